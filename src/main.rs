use std::process::ExitCode;

use anyhow::Result;

use jellyfy::cli::{self, Invocation, USAGE};
use jellyfy::rename_engine::{RenameEngine, RunReport};
use jellyfy::title_editor::MkvPropEdit;

const EXIT_USAGE: u8 = 1;
const EXIT_FILESYSTEM: u8 = 2;
const EXIT_TITLE_EDITOR: u8 = 3;

fn main() -> Result<ExitCode> {
    init_logging()?;

    let invocation = match cli::resolve(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) if e.use_stderr() => {
            e.print()?;
            println!("{}", USAGE);
            return Ok(ExitCode::from(EXIT_USAGE));
        }
        Err(e) => {
            e.print()?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    let (config, mkvpropedit) = match invocation {
        Invocation::Version => {
            println!("{}", cli::version_line());
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Usage => {
            println!("{}", USAGE);
            return Ok(ExitCode::from(EXIT_USAGE));
        }
        Invocation::Run {
            config,
            mkvpropedit,
        } => (config, mkvpropedit),
    };

    tracing::debug!("{:?}", config);
    let engine = RenameEngine::new(config)?;
    let editor = MkvPropEdit::new(mkvpropedit);

    match engine.run(&editor) {
        Ok(report) => {
            tracing::debug!("{:?}", report);
            Ok(exit_code(&report))
        }
        Err(e) => {
            println!("{}", e);
            Ok(ExitCode::from(EXIT_FILESYSTEM))
        }
    }
}

fn exit_code(report: &RunReport) -> ExitCode {
    if report.rename_failures > 0 {
        ExitCode::from(EXIT_FILESYSTEM)
    } else if report.title_failures > 0 {
        ExitCode::from(EXIT_TITLE_EDITOR)
    } else {
        ExitCode::SUCCESS
    }
}

// Logs go to stderr so stdout only carries the rename messages.
fn init_logging() -> Result<()> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
