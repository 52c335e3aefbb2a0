use crate::cli::Cli;
use crate::constants::{LANGUAGES_DIR, MODIFIED_MARKER, PLUGINS_DIR, THEMES_DIR};
use std::path::{Path, PathBuf};

/// immutable run configuration, built once at startup and shared by reference
#[derive(Debug, Clone)]
pub struct AppContext {
    /// repository root; every other path is relative to it
    pub working_dir: PathBuf,

    /// folder holding one subfolder per plugin
    pub plugins_dir: String,

    /// folder holding one subfolder per theme
    pub themes_dir: String,

    /// folder holding translation files
    pub languages_dir: String,

    /// `git status` prefix of in-place edits
    pub modified_marker: String,

    /// branch the update commits are merged into and pushed
    pub production_branch: String,

    /// short-lived branch the update commits are made on
    pub temp_branch: String,

    /// optional intermediate branch merged before production
    pub updates_branch: Option<String>,

    /// pass `--dry-run` to `git commit`
    pub dry_run: bool,
}

impl AppContext {
    pub fn new(working_dir: &Path, cli: &Cli, production_branch: String) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            // layout
            plugins_dir: PLUGINS_DIR.to_string(),
            themes_dir: THEMES_DIR.to_string(),
            languages_dir: LANGUAGES_DIR.to_string(),
            modified_marker: MODIFIED_MARKER.to_string(),
            // branches
            production_branch,
            temp_branch: cli.temp_branch.clone(),
            updates_branch: cli.updates_branch.clone(),
            // commits
            dry_run: cli.dry_run,
        }
    }

    /// absolute path of a repository-relative path
    pub fn absolute(&self, relative: &str) -> PathBuf {
        self.working_dir.join(relative)
    }
}

#[cfg(test)]
impl AppContext {
    /// context rooted at `working_dir` with default layout and branch names
    pub fn for_tests(working_dir: &Path) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            plugins_dir: PLUGINS_DIR.to_string(),
            themes_dir: THEMES_DIR.to_string(),
            languages_dir: LANGUAGES_DIR.to_string(),
            modified_marker: MODIFIED_MARKER.to_string(),
            production_branch: String::from("main"),
            temp_branch: crate::constants::TEMP_BRANCH.to_string(),
            updates_branch: None,
            dry_run: false,
        }
    }
}
