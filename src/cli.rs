//! Command-line handling.
//!
//! Flags follow the `-name=value` form, so single-dash long flags are
//! rewritten to `--name` before clap sees them.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::rename_engine::{ConfigBuilder, RenameConfig};
use crate::title_editor::DEFAULT_MKVPROPEDIT;

pub const USAGE: &str = "Usage: jellyfy -series=<series> -season=<season> <folder>";

const LONG_FLAGS: &[&str] = &[
    "series",
    "season",
    "force_folder",
    "replace_title",
    "mkvpropedit",
    "version",
    "help",
];

#[derive(Parser, Debug)]
#[command(
    name = "jellyfy",
    about = "Rename a season folder and its episodes for Jellyfin",
    disable_version_flag = true
)]
pub struct Args {
    /// Series name
    #[arg(long, default_value = "")]
    pub series: String,

    /// Season number
    #[arg(long, default_value_t = 0)]
    pub season: u32,

    /// Proceed even if the season folder already exists
    #[arg(
        long = "force_folder",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub force_folder: bool,

    /// Replace the MKV title with the new file name
    #[arg(
        long = "replace_title",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub replace_title: bool,

    /// Program used to edit MKV titles
    #[arg(long, default_value = DEFAULT_MKVPROPEDIT)]
    pub mkvpropedit: PathBuf,

    /// Show version
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub version: bool,

    /// Folder holding the season's episodes
    pub folder: Option<PathBuf>,
}

/// What the command line asks for.
#[derive(Debug)]
pub enum Invocation {
    Version,
    Usage,
    Run {
        config: RenameConfig,
        mkvpropedit: PathBuf,
    },
}

pub fn version_line() -> String {
    format!("jellyfy version {}", env!("CARGO_PKG_VERSION"))
}

/// Rewrites `-series=x` to `--series=x` for known flags. Arguments after
/// `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut past_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if past_separator {
                return arg;
            }
            let rewritten = match arg.to_str() {
                Some("--") => {
                    past_separator = true;
                    None
                }
                Some(text) => match text.strip_prefix('-') {
                    Some(rest) if !rest.starts_with('-') && is_long_flag(rest) => {
                        Some(format!("-{}", text))
                    }
                    _ => None,
                },
                None => None,
            };
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

fn is_long_flag(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

fn is_version_flag(arg: &OsString) -> bool {
    matches!(arg.to_str(), Some("--version" | "--version=true"))
}

/// Resolves the command line. Clap errors, `--help` included, are returned
/// for the caller to print.
pub fn resolve<I, T>(args: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = normalize_args(args);
    let mut before_separator = args.iter().skip(1).take_while(|a| a.as_os_str() != "--");
    if before_separator.any(is_version_flag) {
        return Ok(Invocation::Version);
    }

    let parsed = Args::try_parse_from(args)?;
    Ok(parsed.into_invocation())
}

impl Args {
    pub fn into_invocation(self) -> Invocation {
        if self.version {
            return Invocation::Version;
        }

        let built = ConfigBuilder::new()
            .directory(self.folder.unwrap_or_default())
            .series(self.series)
            .season(self.season)
            .force_folder(self.force_folder)
            .replace_title(self.replace_title)
            .build();

        match built {
            Ok(config) => Invocation::Run {
                config,
                mkvpropedit: self.mkvpropedit,
            },
            Err(e) => {
                tracing::debug!("invalid arguments: {}", e);
                Invocation::Usage
            }
        }
    }
}
