// repository layout, relative to the repository root
pub const PLUGINS_DIR: &str = "wp-content/plugins";
pub const THEMES_DIR: &str = "wp-content/themes";
pub const LANGUAGES_DIR: &str = "wp-content/languages";

// git status
pub const MODIFIED_MARKER: &str = "modified:";

// branches
pub const TEMP_BRANCH: &str = "temp-plugin-updates";
pub const UPDATES_MERGE_STRATEGY: &str = "ours";

// metadata headers
pub const PLUGIN_NAME_HINT: &str = "Plugin Name";
pub const PLUGIN_NAME_LABEL: &str = "Plugin Name:";
pub const VERSION_LABEL: &str = "version:";
pub const MAIN_FILE_EXTENSION: &str = "php";

// ui
pub const SEPARATOR: &str = "----------------------------------------------------------";
