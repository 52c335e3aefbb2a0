use anyhow::{Context, Result, bail};
use git2::{Repository, RepositoryState};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::Command;

/// sanity check that `path` is the root of a git repository in a good state
pub fn sanity_check(path: &Path) -> Result<()> {
    // the layout roots are relative to the repository root
    let repo = Repository::discover(path).context("not in a git repository")?;
    let Some(workdir) = repo.workdir() else {
        bail!("repository has no working tree");
    };
    let canonical = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
    if canonical(workdir) != canonical(path) {
        bail!(
            "must be run from the repository root ({})",
            workdir.display()
        );
    }

    // check we're not in the middle of a git operation
    if repo.state() != RepositoryState::Clean {
        bail!("repository is in the middle of an operation (merge, rebase, etc)");
    }

    // check we're not on a detached HEAD
    if repo.head_detached().unwrap_or(false) {
        bail!("repository is in detached HEAD state");
    }

    Ok(())
}

/// runs the git binary in the repository root
///
/// queries (status, diff) run quietly; everything that changes the
/// repository is echoed first
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
        }
    }

    /// long-format `git status`, optionally limited to `path`
    pub fn status(&self, path: Option<&str>) -> Result<Vec<String>> {
        let mut args = vec!["status", "--long"];
        if let Some(path) = path {
            args.push(path);
        }
        Ok(lines(&self.query(&args)?))
    }

    /// `git diff` of a single file
    pub fn diff(&self, file: &Path) -> Result<Vec<String>> {
        let file = file.to_string_lossy();
        Ok(lines(&self.query(&["diff", "--no-color", "--no-ext-diff", "--", &*file])?))
    }

    pub fn add(&self, path: &str) -> Result<String> {
        self.execute(&["add", path])
    }

    /// create a commit with the given message
    ///
    /// uses the git binary so commit signing and hooks behave as usual
    pub fn commit(&self, message: &str, dry_run: bool) -> Result<String> {
        let mut args = vec!["commit", "--message", message];
        if dry_run {
            args.push("--dry-run");
        }
        self.execute(&args)
    }

    pub fn merge(&self, branch: &str, strategy: Option<&str>) -> Result<String> {
        match strategy {
            Some(strategy) => self.execute(&["merge", "-s", strategy, branch]),
            None => self.execute(&["merge", branch]),
        }
    }

    pub fn pull_all(&self) -> Result<String> {
        with_spinner(|| self.execute(&["pull", "--all"]))
    }

    pub fn push(&self) -> Result<String> {
        with_spinner(|| self.execute(&["push"]))
    }

    pub fn checkout(&self, branch: &str) -> Result<String> {
        self.execute(&["checkout", branch])
    }

    /// create and switch to `branch`, or just switch when it already exists
    pub fn create_branch(&self, branch: &str) -> Result<String> {
        match self.execute(&["checkout", "-b", branch]) {
            Ok(output) => Ok(output),
            Err(_) => self.checkout(branch),
        }
    }

    pub fn delete_branch(&self, branch: &str) -> Result<String> {
        self.execute(&["branch", "-d", branch])
    }

    fn execute(&self, args: &[&str]) -> Result<String> {
        let display = shlex::try_join(args.iter().copied()).unwrap_or_else(|_| args.join(" "));
        crate::command!("$ git {}", display);

        // checkout and friends report on stderr
        let (stdout, stderr) = self.run(args)?;
        let combined = match (stdout.trim().is_empty(), stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", stdout.trim_end(), stderr.trim_end()),
            (false, true) => stdout.trim_end().to_string(),
            (true, _) => stderr.trim_end().to_string(),
        };
        Ok(combined)
    }

    fn query(&self, args: &[&str]) -> Result<String> {
        let (stdout, _) = self.run(args)?;
        Ok(stdout)
    }

    fn run(&self, args: &[&str]) -> Result<(String, String)> {
        let output = Command::new("git")
            // the parsers need plain long-format output whatever the user config says
            .args(["-c", "color.ui=never"])
            .args(args)
            .current_dir(&self.workdir)
            // keep status markers in english
            .env("LC_ALL", "C")
            .output()
            .with_context(|| format!("failed to run git {}", args.join(" ")))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            bail!(
                "git {} failed ({}): {}",
                args.join(" "),
                output.status,
                detail
            );
        }

        Ok((stdout, stderr))
    }
}

fn lines(output: &str) -> Vec<String> {
    output.lines().map(str::to_string).collect()
}

/// run a slow (network) operation behind a spinner
fn with_spinner<T>(f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner}")
            .expect("invalid spinner template"),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = f();

    spinner.finish_and_clear();
    result
}
