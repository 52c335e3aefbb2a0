use crate::changeset::{ChangeSet, FolderChanges};
use crate::context::AppContext;
use crate::git::Git;
use crate::metadata::{self, VersionPair};
use crate::{status, warning};
use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Plugin,
    Theme,
    Translation,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Plugin => write!(f, "Plugin"),
            Category::Theme => write!(f, "Theme"),
            Category::Translation => write!(f, "Translation"),
        }
    }
}

/// one folder ready to be staged and committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    target_path: String,
    message: String,
    category: Category,
}

impl CommitRecord {
    pub fn new(target_path: String, message: String, category: Category) -> Self {
        Self {
            target_path,
            message,
            category,
        }
    }

    /// repository relative folder to stage
    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// same record with a different commit message
    pub fn with_message(self, message: String) -> Self {
        Self { message, ..self }
    }
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} found: '{}', message: {}",
            self.category, self.target_path, self.message
        )
    }
}

pub fn plugin_message(name: &str, versions: &VersionPair) -> String {
    format!("{} - {} to {}", name, versions.old, versions.new)
}

pub fn theme_message(folder: &str) -> String {
    format!("Updated Theme {folder}")
}

pub const TRANSLATION_MESSAGE: &str = "Updated Translations";

/// modified files below `root`, grouped by subfolder
pub fn scan(git: &Git, ctx: &AppContext, root: &str) -> Result<ChangeSet> {
    let lines = git.status(Some(root))?;
    Ok(ChangeSet::from_status(&lines, root, &ctx.modified_marker))
}

/// plugins, then themes, then translations
pub fn collect_all(git: &Git, ctx: &AppContext) -> Result<Vec<CommitRecord>> {
    let mut records = plugin_records(git, ctx)?;
    records.extend(theme_records(git, ctx)?);
    records.extend(translation_records(git, ctx)?);
    Ok(records)
}

pub fn plugin_records(git: &Git, ctx: &AppContext) -> Result<Vec<CommitRecord>> {
    let changeset = scan(git, ctx, &ctx.plugins_dir)?;
    if changeset.is_empty() {
        status!("no modified plugin folders found");
        return Ok(Vec::new());
    }

    let mut records = Vec::with_capacity(changeset.len());
    for folder in changeset.iter() {
        if let Some(record) = plugin_record(git, ctx, folder)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// build the record for one plugin folder; parse misses skip the folder
fn plugin_record(
    git: &Git,
    ctx: &AppContext,
    folder: &FolderChanges,
) -> Result<Option<CommitRecord>> {
    let target_path = format!("{}/{}", ctx.plugins_dir, folder.folder);
    let folder_path = ctx.absolute(&target_path);

    let Some(main_file) = metadata::find_main_file(&folder.files, &folder_path) else {
        warning!(
            "could not find a main php file in plugin folder '{}'",
            folder.folder
        );
        return Ok(None);
    };

    let name = metadata::read_display_name(&main_file).unwrap_or_else(|| folder.folder.clone());

    // git resolves the path against the repository root
    let relative = main_file
        .strip_prefix(&ctx.working_dir)
        .unwrap_or(&main_file);
    let versions = metadata::version_pair(git.diff(relative)?);
    if !versions.is_complete() {
        warning!(
            "failed to find version numbers in file {}",
            main_file.display()
        );
        warning!("failed to find version numbers for '{}'", name);
        return Ok(None);
    }

    let message = plugin_message(&name, &versions);
    Ok(Some(CommitRecord::new(
        target_path,
        message,
        Category::Plugin,
    )))
}

pub fn theme_records(git: &Git, ctx: &AppContext) -> Result<Vec<CommitRecord>> {
    let changeset = scan(git, ctx, &ctx.themes_dir)?;
    if changeset.is_empty() {
        status!("no modified theme folders found");
    }

    Ok(changeset
        .iter()
        .map(|folder| {
            CommitRecord::new(
                format!("{}/{}", ctx.themes_dir, folder.folder),
                theme_message(&folder.folder),
                Category::Theme,
            )
        })
        .collect())
}

/// a single record for the whole translation root, however many files changed
pub fn translation_records(git: &Git, ctx: &AppContext) -> Result<Vec<CommitRecord>> {
    let changeset = scan(git, ctx, &ctx.languages_dir)?;
    if changeset.is_empty() {
        return Ok(Vec::new());
    }

    Ok(vec![CommitRecord::new(
        ctx.languages_dir.clone(),
        TRANSLATION_MESSAGE.to_string(),
        Category::Translation,
    )])
}
