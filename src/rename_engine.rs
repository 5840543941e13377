use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use regex::Regex;

use crate::error::{RenameError, RunError};
use crate::title_editor::TitleEditor;

/// Container extension whose title tag can be rewritten.
pub const MKV_EXTENSION: &str = ".mkv";

#[derive(Debug, Clone)]
pub struct RenameConfig {
    pub directory: PathBuf,
    pub series: String,
    pub season: u32,
    pub force_folder: bool,
    pub replace_title: bool,
}

/// An episode file found in the season folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Name as read from disk.
    pub file_name: OsString,
    pub number: u64,
}

/// What happened during the episode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub renamed: usize,
    pub unchanged: usize,
    pub rename_failures: usize,
    pub titles_modified: usize,
    pub title_failures: usize,
}

#[derive(Debug)]
pub struct RenameEngine {
    config: RenameConfig,
    episode_pattern: Regex,
}

impl RenameEngine {
    pub fn new(config: RenameConfig) -> Result<Self> {
        // S01E02, s1e1, S1E01...
        let episode_pattern = Regex::new(r"(?i)s[0-9]+e([0-9]+)")?;

        Ok(Self {
            config,
            episode_pattern,
        })
    }

    /// Renames the configured folder to `Season NN` next to it and returns
    /// the folder episodes should be read from.
    pub fn normalize_folder(&self) -> Result<PathBuf, RenameError> {
        let source = &self.config.directory;
        let target_name = season_folder_name(self.config.season);
        let parent = source
            .parent()
            .ok_or_else(|| RenameError::NoParent(source.clone()))?;
        let target = parent.join(&target_name);

        match fs::metadata(&target) {
            Ok(_) => {
                if !self.config.force_folder {
                    return Err(RenameError::DestinationExists(target_name));
                }
                tracing::debug!("reusing existing folder {}", target.display());
                return Ok(target);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(RenameError::CheckDestination(e)),
        }

        fs::rename(source, &target).map_err(RenameError::RenameFolder)?;
        println!("Folder renamed successfully");
        tracing::debug!("{} -> {}", source.display(), target.display());

        Ok(target)
    }

    /// Lists files in `folder` carrying an episode marker. Order follows the
    /// directory listing.
    pub fn list_episodes(&self, folder: &Path) -> Result<Vec<Episode>, RenameError> {
        let mut episodes = Vec::new();

        for entry in fs::read_dir(folder).map_err(RenameError::ReadDir)? {
            let entry = entry.map_err(RenameError::ReadDir)?;
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                continue;
            }
            let file_name = entry.file_name();
            match self.episode_number(&file_name.to_string_lossy()) {
                Some(number) => episodes.push(Episode { file_name, number }),
                None => tracing::trace!("skipping {:?}", file_name),
            }
        }

        Ok(episodes)
    }

    /// Episode number from the first marker in `file_name`.
    pub fn episode_number(&self, file_name: &str) -> Option<u64> {
        let captures = self.episode_pattern.captures(file_name)?;
        captures.get(1)?.as_str().parse().ok()
    }

    /// `<Series> SxxEyy` for an episode, without extension.
    pub fn episode_title(&self, number: u64) -> String {
        format!("{} S{:02}E{:02}", self.config.series, self.config.season, number)
    }

    /// Renames each episode in ascending order and rewrites MKV titles when
    /// enabled. Per-file failures are printed and counted, never fatal.
    pub fn rename_episodes(
        &self,
        folder: &Path,
        mut episodes: Vec<Episode>,
        editor: &dyn TitleEditor,
    ) -> RunReport {
        sort_episodes(&mut episodes);
        let mut report = RunReport::default();

        for episode in &episodes {
            let original_name = episode.file_name.to_string_lossy();
            let extension = lowercase_extension(&original_name);
            let title = self.episode_title(episode.number);
            let target_name = format!("{}{}", title, extension);

            let src_path = folder.join(&episode.file_name);
            let new_path = folder.join(&target_name);

            if episode.file_name.as_os_str() != OsStr::new(&target_name) {
                match fs::rename(&src_path, &new_path) {
                    Ok(()) => {
                        println!("{} -> {}", original_name, target_name);
                        report.renamed += 1;
                    }
                    Err(e) => {
                        println!("Error renaming episode: {}", RenameError::RenameEpisode(e));
                        report.rename_failures += 1;
                        continue;
                    }
                }
            } else {
                report.unchanged += 1;
            }

            if extension == MKV_EXTENSION && self.config.replace_title {
                match editor.set_title(&new_path, &title) {
                    Ok(()) => {
                        println!("Title modified in {}", target_name);
                        report.titles_modified += 1;
                    }
                    Err(e) => {
                        println!("Error modifying title: {}", e);
                        report.title_failures += 1;
                    }
                }
            }
        }

        report
    }

    /// Full pipeline: folder, discovery, episodes.
    pub fn run(&self, editor: &dyn TitleEditor) -> Result<RunReport, RunError> {
        let folder = self.normalize_folder().map_err(RunError::Folder)?;
        let episodes = self.list_episodes(&folder).map_err(RunError::Listing)?;
        tracing::debug!("found {} episode(s) in {}", episodes.len(), folder.display());

        Ok(self.rename_episodes(&folder, episodes, editor))
    }
}

pub fn season_folder_name(season: u32) -> String {
    format!("Season {:02}", season)
}

/// Ascending by episode number, file name breaking ties.
pub fn sort_episodes(episodes: &mut [Episode]) {
    episodes.sort_by(|a, b| {
        a.number
            .cmp(&b.number)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
}

/// Suffix from the last dot, lowercased. Empty when there is no dot.
pub fn lowercase_extension(file_name: &str) -> String {
    file_name
        .rfind('.')
        .map(|pos| file_name[pos..].to_lowercase())
        .unwrap_or_default()
}

pub struct ConfigBuilder {
    directory: Option<PathBuf>,
    series: Option<String>,
    season: Option<u32>,
    force_folder: bool,
    replace_title: bool,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            directory: None,
            series: None,
            season: None,
            force_folder: false,
            replace_title: false,
        }
    }

    pub fn directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() {
            self.directory = Some(dir.to_path_buf());
        }
        self
    }

    pub fn series(mut self, series: impl Into<String>) -> Self {
        let series = series.into();
        if !series.is_empty() {
            self.series = Some(series);
        }
        self
    }

    pub fn season(mut self, season: u32) -> Self {
        if season != 0 {
            self.season = Some(season);
        }
        self
    }

    pub fn force_folder(mut self, force: bool) -> Self {
        self.force_folder = force;
        self
    }

    pub fn replace_title(mut self, replace: bool) -> Self {
        self.replace_title = replace;
        self
    }

    pub fn build(self) -> Result<RenameConfig> {
        let directory = self
            .directory
            .ok_or_else(|| anyhow::anyhow!("Directory is required"))?;

        let series = self
            .series
            .ok_or_else(|| anyhow::anyhow!("Series name is required"))?;

        let season = self
            .season
            .ok_or_else(|| anyhow::anyhow!("Season number is required"))?;

        Ok(RenameConfig {
            directory,
            series,
            season,
            force_folder: self.force_folder,
            replace_title: self.replace_title,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
