use crate::commits::{self, CommitRecord};
use crate::constants::{SEPARATOR, UPDATES_MERGE_STRATEGY};
use crate::context::AppContext;
use crate::git::Git;
use crate::{info, status, ui};
use anyhow::Result;

/// how the collected records get committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    Automatic,
    Manual,
}

impl CommitMode {
    pub const OPTIONS: [&'static str; 2] = ["automatic", "manual"];

    /// map a menu key to a mode; anything else means abort
    pub fn from_choice(choice: Option<char>) -> Option<Self> {
        match choice? {
            'a' => Some(CommitMode::Automatic),
            'm' => Some(CommitMode::Manual),
            _ => None,
        }
    }
}

/// per record choice in manual mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualAction {
    Commit,
    Files,
    Skip,
    Edit,
}

impl ManualAction {
    pub const OPTIONS: [&'static str; 4] = ["commit", "files", "skip", "edit"];

    /// map a menu key to an action; anything else means abort
    pub fn from_choice(choice: Option<char>) -> Option<Self> {
        match choice? {
            'c' => Some(ManualAction::Commit),
            'f' => Some(ManualAction::Files),
            's' => Some(ManualAction::Skip),
            'e' => Some(ManualAction::Edit),
            _ => None,
        }
    }
}

/// what happened to the records of one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub committed: usize,
    pub skipped: usize,
}

/// drives the git side of an update run
pub struct Workflow<'a> {
    ctx: &'a AppContext,
    git: Git,
}

impl<'a> Workflow<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            ctx,
            git: Git::new(&ctx.working_dir),
        }
    }

    /// switch to the temporary branch, starting from an up to date production branch
    pub fn setup_branches(&self) -> Result<()> {
        self.git.checkout(&self.ctx.production_branch)?;
        self.git.pull_all()?;
        self.git.create_branch(&self.ctx.temp_branch)?;

        if let Some(updates_branch) = &self.ctx.updates_branch {
            self.git
                .merge(updates_branch, Some(UPDATES_MERGE_STRATEGY))?;
        }

        Ok(())
    }

    /// plugins, themes and translations with something to commit
    pub fn collect(&self) -> Result<Vec<CommitRecord>> {
        commits::collect_all(&self.git, self.ctx)
    }

    /// stage and commit one record, returning git's output
    pub fn apply(&self, record: &CommitRecord) -> Result<String> {
        self.git.add(record.target_path())?;
        self.git.commit(record.message(), self.ctx.dry_run)
    }

    /// commit every record without asking
    pub fn commit_automatically(&self, records: &[CommitRecord]) -> Result<Summary> {
        let mut summary = Summary::default();
        for record in records {
            info!(self.apply(record)?);
            summary.committed += 1;
        }
        Ok(summary)
    }

    /// ask what to do with each record; an unknown key aborts the run
    pub fn commit_manually(&self, records: Vec<CommitRecord>) -> Result<Summary> {
        self.commit_manually_with(
            records,
            || ui::prompt(&ManualAction::OPTIONS),
            |message| ui::read_line("message: ", message),
        )
    }

    /// manual commit loop reading keys from `next_choice` and edited
    /// messages from `edit`
    pub fn commit_manually_with(
        &self,
        records: Vec<CommitRecord>,
        mut next_choice: impl FnMut() -> Result<Option<char>>,
        mut edit: impl FnMut(&str) -> Result<String>,
    ) -> Result<Summary> {
        let mut summary = Summary::default();

        for mut record in records {
            loop {
                info!(SEPARATOR);
                info!(record);
                info!();

                let Some(action) = ManualAction::from_choice(next_choice()?) else {
                    ui::abort();
                };

                match action {
                    ManualAction::Commit => {
                        info!(self.apply(&record)?);
                        summary.committed += 1;
                        break;
                    }
                    ManualAction::Files => {
                        info!();
                        for line in self.git.status(Some(record.target_path()))? {
                            info!(line.trim());
                        }
                        info!();
                    }
                    ManualAction::Skip => {
                        status!("no changes committed, no files staged, moving on...");
                        summary.skipped += 1;
                        break;
                    }
                    ManualAction::Edit => {
                        // an empty edit keeps the current message
                        let message = edit(record.message())?;
                        if !message.is_empty() {
                            record = record.with_message(message);
                        }
                    }
                }
            }
        }

        Ok(summary)
    }

    /// merge the temporary branch into production (via the updates branch
    /// when configured) and push
    pub fn merge_and_push(&self) -> Result<()> {
        self.merge_and_push_with(|| {
            ui::pause("first merge and push complete. when you're ready, press enter to complete the merge:")
        })
    }

    /// `between` runs after the updates branch push, before the production merge
    pub fn merge_and_push_with(&self, between: impl FnOnce() -> Result<()>) -> Result<()> {
        if let Some(updates_branch) = &self.ctx.updates_branch {
            self.merge_into(updates_branch)?;
            between()?;
        }
        self.merge_into(&self.ctx.production_branch)
    }

    fn merge_into(&self, branch: &str) -> Result<()> {
        self.git.checkout(branch)?;
        info!(self.git.merge(&self.ctx.temp_branch, None)?);
        self.git.push()?;
        Ok(())
    }

    pub fn cleanup(&self) -> Result<()> {
        self.git.delete_branch(&self.ctx.temp_branch)?;
        Ok(())
    }
}
