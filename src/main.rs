mod changeset;
mod cli;
mod commits;
mod constants;
mod context;
mod git;
mod metadata;
#[cfg(test)]
mod testutil;
mod ui;
mod workflow;

use crate::cli::Cli;
use crate::constants::SEPARATOR;
use crate::context::AppContext;
use crate::workflow::{CommitMode, Summary, Workflow};
use anyhow::{Context, Result, bail};
use std::io::IsTerminal;

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // sanity checks
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        bail!("interactive terminal required");
    }
    let working_dir = std::env::current_dir().context("failed to read working directory")?;
    git::sanity_check(&working_dir)?;

    ui::clear_screen();
    status!("setting up git branches for updates");

    let production_branch = match &cli.production_branch {
        Some(branch) => branch.trim().to_string(),
        None => {
            info!("enter the repo's production branch name:");
            ui::read_line("> ", "")?
        }
    };
    if production_branch.is_empty() {
        bail!("production branch name is required");
    }

    let ctx = AppContext::new(&working_dir, &cli, production_branch);
    let workflow = Workflow::new(&ctx);

    workflow.setup_branches()?;

    ui::pause(
        "go update all themes, plugins and translations on the local site, then press enter to continue:",
    )?;

    status!("searching the current directory for updated plugins, themes and translations...");
    let records = workflow.collect()?;

    let summary = if records.is_empty() {
        status!("nothing to commit automatically");
        Summary::default()
    } else {
        status!("would you like to commit files automatically or manually?");
        let choice = ui::prompt(&CommitMode::OPTIONS)?;
        match CommitMode::from_choice(choice) {
            Some(CommitMode::Automatic) => workflow.commit_automatically(&records)?,
            Some(CommitMode::Manual) => workflow.commit_manually(records)?,
            None => ui::abort(),
        }
    };

    info!();
    info!(SEPARATOR);
    status!(
        "{} committed, {} skipped{}",
        summary.committed,
        summary.skipped,
        if ctx.dry_run { " (dry run)" } else { "" }
    );
    ui::pause(
        "you may now make any additional commits. when you're ready, press enter to push everything:",
    )?;

    workflow.merge_and_push()?;
    workflow.cleanup()?;

    info!();
    info!(SEPARATOR);
    status!("updates complete");

    Ok(())
}
