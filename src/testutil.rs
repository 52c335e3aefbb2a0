use git2::Repository;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub const PLUGIN_HEADER_V1: &str = "<?php
/**
 * Plugin Name: Foo Forms
 * Version:     1.2.3
 */
";

pub const PLUGIN_HEADER_V2: &str = "<?php
/**
 * Plugin Name: Foo Forms
 * Version:     1.2.4
 */
";

/// helper to initialise a test git repository
pub fn setup_test_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();

    // configure git user for commits
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    config.set_bool("commit.gpgsign", false).unwrap();

    (temp_dir, repo)
}

/// helper to create a file with content, creating parent folders
pub fn create_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// helper to commit all changes
pub fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let signature = repo.signature().unwrap();

    let parent_commit = repo.head().ok().and_then(|h| h.peel_to_commit().ok());

    if let Some(parent) = parent_commit {
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )
        .unwrap();
    } else {
        // first commit
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])
            .unwrap();
    }
}

/// helper to get the name of the checked out branch
pub fn current_branch(repo: &Repository) -> String {
    repo.head().unwrap().shorthand().unwrap().to_string()
}

/// helper to get the summary of the last commit on `branch`
pub fn last_message(repo: &Repository, branch: &str) -> String {
    repo.revparse_single(branch)
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .summary()
        .unwrap()
        .to_string()
}

/// helper to commit a plugin, a theme and a translation at their first version
pub fn seed_wordpress(repo_path: &Path, repo: &Repository) {
    create_file(
        &repo_path.join("wp-content/plugins/foo-forms/foo-forms.php"),
        PLUGIN_HEADER_V1,
    );
    create_file(
        &repo_path.join("wp-content/plugins/foo-forms/css/forms.css"),
        "form { color: red; }\n",
    );
    create_file(
        &repo_path.join("wp-content/themes/twentytwenty/style.css"),
        "/* Theme Name: Twenty Twenty */\n",
    );
    create_file(
        &repo_path.join("wp-content/languages/plugins/foo-forms-de_DE.po"),
        "msgid \"Send\"\nmsgstr \"Senden\"\n",
    );
    commit_all(repo, "initial commit");
}

/// helper to apply an update pass on top of `seed_wordpress`
pub fn update_wordpress(repo_path: &Path) {
    create_file(
        &repo_path.join("wp-content/plugins/foo-forms/foo-forms.php"),
        PLUGIN_HEADER_V2,
    );
    create_file(
        &repo_path.join("wp-content/plugins/foo-forms/css/forms.css"),
        "form { color: blue; }\n",
    );
    create_file(
        &repo_path.join("wp-content/themes/twentytwenty/style.css"),
        "/* Theme Name: Twenty Twenty (updated) */\n",
    );
    create_file(
        &repo_path.join("wp-content/languages/plugins/foo-forms-de_DE.po"),
        "msgid \"Send\"\nmsgstr \"Absenden\"\n",
    );
}

/// helper to attach a bare `origin` remote and push the current branch to it
pub fn setup_remote(repo_path: &Path, repo: &Repository) -> (TempDir, Repository) {
    let remote_dir = TempDir::new().unwrap();
    let remote = Repository::init_bare(remote_dir.path()).unwrap();
    repo.remote("origin", remote_dir.path().to_str().unwrap())
        .unwrap();

    let branch = current_branch(repo);
    let status = Command::new("git")
        .args(["push", "--quiet", "-u", "origin", &branch])
        .current_dir(repo_path)
        .status()
        .unwrap();
    assert!(status.success(), "initial push failed");

    (remote_dir, remote)
}
