use crate::constants::TEMP_BRANCH;
use clap::Parser;

/// wp-update-commit: commit wordpress plugin, theme and translation updates one folder at a time
#[derive(Parser, Debug)]
#[command(
    name = "wp-update-commit",
    about,
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// production branch name (prompted for when omitted)
    #[arg(long, value_name = "NAME")]
    pub production_branch: Option<String>,

    /// temporary branch the update commits are made on
    #[arg(long, value_name = "NAME", default_value = TEMP_BRANCH)]
    pub temp_branch: String,

    /// intermediate branch to merge into before production
    #[arg(long, value_name = "NAME")]
    pub updates_branch: Option<String>,

    /// run every commit with --dry-run
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
