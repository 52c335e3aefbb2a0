use crate::constants::{MAIN_FILE_EXTENSION, PLUGIN_NAME_HINT, PLUGIN_NAME_LABEL, VERSION_LABEL};
use crate::warning;
use std::fs;
use std::path::{Path, PathBuf};

/// old and new version strings read from a diff; empty when not found
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VersionPair {
    pub old: String,
    pub new: String,
}

impl VersionPair {
    pub fn is_complete(&self) -> bool {
        !self.old.is_empty() && !self.new.is_empty()
    }
}

/// scan diff lines for the first removed and added `version:` lines
///
/// the version is the last whitespace separated token of the line, so a
/// trailing comment after the number yields the wrong token.
pub fn version_pair<I, S>(diff: I) -> VersionPair
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pair = VersionPair::default();

    for line in diff {
        // "- * Version:             3.0.3"
        let line = line.as_ref().trim();
        if !line.to_lowercase().contains(VERSION_LABEL) {
            continue;
        }

        if line.starts_with('-') {
            pair.old = last_token(line);
        }
        if line.starts_with('+') {
            pair.new = last_token(line);
        }

        if pair.is_complete() {
            break;
        }
    }

    pair
}

fn last_token(line: &str) -> String {
    line.split_whitespace().last().unwrap_or("").to_string()
}

/// human readable plugin name from a `Plugin Name:` header line
///
/// only the first matching line counts. the line is trimmed, then a leading
/// `*`, the label and a leading `:` are stripped in that order.
pub fn display_name(contents: &str) -> Option<String> {
    let line = contents
        .lines()
        .find(|line| line.contains(PLUGIN_NAME_LABEL))?;

    // " * Plugin Name: My Cool Plugin"
    let name = line.trim();
    let name = name.strip_prefix('*').unwrap_or(name).trim();
    let name = name.strip_prefix(PLUGIN_NAME_HINT).unwrap_or(name).trim();
    let name = name.strip_prefix(':').unwrap_or(name).trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// read the display name from the file at `path`
pub fn read_display_name(path: &Path) -> Option<String> {
    match read_lossy(path) {
        Ok(contents) => display_name(&contents),
        Err(e) => {
            warning!("failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// find the plugin entry point among the changed files of a plugin folder
///
/// candidates are top level `.php` files, tried in the given order; the first
/// one mentioning `Plugin Name` wins.
pub fn find_main_file(files: &[String], folder_path: &Path) -> Option<PathBuf> {
    for file in files {
        // entry points sit at the plugin root
        if file.contains('/') {
            continue;
        }
        if Path::new(file).extension().and_then(|ext| ext.to_str()) != Some(MAIN_FILE_EXTENSION) {
            continue;
        }

        let path = folder_path.join(file);
        let contents = match read_lossy(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warning!("failed to read {}: {}", path.display(), e);
                continue;
            }
        };

        if contents.lines().any(|line| line.contains(PLUGIN_NAME_HINT)) {
            return Some(path);
        }
    }

    None
}

// plugin headers are not always valid utf-8
fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "<?php
/**
 * Plugin Name: My Cool Plugin
 * Plugin URI:  https://example.com/my-cool-plugin
 * Description: Does cool things.
 * Version:     1.2.4
 * Author:      Someone
 */
";

    #[test]
    fn test_version_pair_from_diff() {
        let diff = "\
diff --git a/wp-content/plugins/foo/foo.php b/wp-content/plugins/foo/foo.php
index 3b18e51..a9c3f2d 100644
--- a/wp-content/plugins/foo/foo.php
+++ b/wp-content/plugins/foo/foo.php
@@ -3,7 +3,7 @@
  * Plugin Name: Foo
- * Version:     1.2.3
+ * Version:     1.2.4
  * Author:      Someone";

        assert_eq!(
            version_pair(diff.lines()),
            VersionPair {
                old: "1.2.3".to_string(),
                new: "1.2.4".to_string()
            }
        );
    }

    #[test]
    fn test_version_pair_is_case_insensitive() {
        let pair = version_pair(["-VERSION: 2.0", "+version: 2.1"]);

        assert_eq!(pair.old, "2.0");
        assert_eq!(pair.new, "2.1");
    }

    #[test]
    fn test_version_pair_takes_first_complete_pair() {
        let pair = version_pair([
            "- * Version: 1.0.0",
            "+ * Version: 1.1.0",
            "-define( 'FOO_VERSION', '1.0.0' ); // version: 1.0.0-old",
            "+define( 'FOO_VERSION', '1.1.0' ); // version: 1.1.0-new",
        ]);

        assert_eq!(pair.old, "1.0.0");
        assert_eq!(pair.new, "1.1.0");
    }

    #[test]
    fn test_version_pair_not_found() {
        let pair = version_pair(["-foo", "+bar", " * Version: 1.0"]);

        assert_eq!(pair, VersionPair::default());
        assert!(!pair.is_complete());
    }

    #[test]
    fn test_version_pair_incomplete() {
        let pair = version_pair(["+ * Version: 3.0.4"]);

        assert_eq!(pair.old, "");
        assert_eq!(pair.new, "3.0.4");
        assert!(!pair.is_complete());
    }

    #[test]
    fn test_version_token_is_last_on_line() {
        // a trailing comment is taken as the version
        let pair = version_pair(["- Version: 1.0 (beta)", "+ Version: 1.1 (beta)"]);

        assert_eq!(pair.old, "(beta)");
        assert_eq!(pair.new, "(beta)");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(
            display_name(" * Plugin Name: My Cool Plugin"),
            Some("My Cool Plugin".to_string())
        );
        assert_eq!(display_name(HEADER), Some("My Cool Plugin".to_string()));
    }

    #[test]
    fn test_display_name_variants() {
        assert_eq!(
            display_name("Plugin Name:Bare"),
            Some("Bare".to_string())
        );
        assert_eq!(
            display_name("\t*   Plugin Name:    Spaced Out   "),
            Some("Spaced Out".to_string())
        );
        // label is case sensitive
        assert_eq!(display_name(" * plugin name: lower"), None);
        // empty name
        assert_eq!(display_name(" * Plugin Name:   "), None);
    }

    #[test]
    fn test_display_name_first_match_only() {
        let contents = " * Plugin Name: First\n * Plugin Name: Second\n";

        assert_eq!(display_name(contents), Some("First".to_string()));
    }

    #[test]
    fn test_find_main_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("inc")).unwrap();
        fs::write(dir.path().join("readme.txt"), "Plugin Name: Not PHP").unwrap();
        fs::write(dir.path().join("helpers.php"), "<?php // nothing here").unwrap();
        fs::write(dir.path().join("inc/nested.php"), HEADER).unwrap();
        fs::write(dir.path().join("foo.php"), HEADER).unwrap();

        let files = [
            "readme.txt".to_string(),
            "inc/nested.php".to_string(),
            "helpers.php".to_string(),
            "foo.php".to_string(),
        ];

        assert_eq!(
            find_main_file(&files, dir.path()),
            Some(dir.path().join("foo.php"))
        );
    }

    #[test]
    fn test_find_main_file_first_candidate_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.php"), HEADER).unwrap();
        fs::write(dir.path().join("b.php"), HEADER).unwrap();

        let files = ["b.php".to_string(), "a.php".to_string()];

        assert_eq!(
            find_main_file(&files, dir.path()),
            Some(dir.path().join("b.php"))
        );
    }

    #[test]
    fn test_find_main_file_none() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("inc")).unwrap();
        fs::write(dir.path().join("inc/nested.php"), HEADER).unwrap();
        fs::write(dir.path().join("style.css"), HEADER).unwrap();

        // missing files are skipped rather than failing
        let files = [
            "inc/nested.php".to_string(),
            "style.css".to_string(),
            "gone.php".to_string(),
        ];

        assert_eq!(find_main_file(&files, dir.path()), None);
    }

    #[test]
    fn test_read_display_name_non_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo.php");
        let mut contents = b"<?php\n/* \xff\xfe */\n * Plugin Name: Caf\xe9 Plugin\n".to_vec();
        contents.extend_from_slice(b" * Version: 1.0\n");
        fs::write(&path, contents).unwrap();

        assert_eq!(
            read_display_name(&path),
            Some("Caf\u{FFFD} Plugin".to_string())
        );
    }
}
