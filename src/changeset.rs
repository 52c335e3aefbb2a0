use crate::warning;

/// files modified inside one subfolder (plugin or theme) of a scanned root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderChanges {
    pub folder: String,
    pub files: Vec<String>, // relative to the subfolder, in status order
}

/// modified files grouped by the subfolder they live in
///
/// folders keep the order in which they were first seen in the status output
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    folders: Vec<FolderChanges>,
}

impl ChangeSet {
    /// group `git status` lines by the first folder below `root`
    ///
    /// only lines starting with `marker` are considered, and only when they
    /// mention `root` somewhere. the root match is a plain substring test, so
    /// unrelated paths that happen to contain the root text are grouped too.
    /// files sitting directly in `root` are reported and skipped.
    pub fn from_status<I, S>(lines: I, root: &str, marker: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut changeset = Self::default();

        for line in lines {
            // "\tmodified:   wp-content/plugins/foo/css/style.css"
            let line = line.as_ref().trim();
            let Some(path) = line.strip_prefix(marker) else {
                continue;
            };
            if !line.contains(root) {
                continue;
            }

            // strip in steps so differing padding doesn't matter
            let path = path.trim();
            let path = path.strip_prefix(root).unwrap_or(path).trim();
            let path = path.strip_prefix('/').unwrap_or(path);

            // "foo/css/style.css" -> ("foo", "css/style.css")
            match path.split_once('/') {
                Some((folder, file)) => changeset.push(folder, file),
                None => {
                    warning!("encountered a file directly in {}: {}", root, path);
                    warning!("skipping this file...");
                }
            }
        }

        changeset
    }

    fn push(&mut self, folder: &str, file: &str) {
        match self.folders.iter_mut().find(|f| f.folder == folder) {
            Some(existing) => existing.files.push(file.to_string()),
            None => self.folders.push(FolderChanges {
                folder: folder.to_string(),
                files: vec![file.to_string()],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FolderChanges> {
        self.folders.iter()
    }

    /// files changed in `folder`, if any
    #[cfg(test)]
    pub fn files(&self, folder: &str) -> Option<&[String]> {
        self.folders
            .iter()
            .find(|f| f.folder == folder)
            .map(|f| f.files.as_slice())
    }
}
