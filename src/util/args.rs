use std::path::PathBuf;

use clap::Parser;

use crate::extract::GatePolicy;

pub struct Args {
    pub players: PathBuf,
    pub output: PathBuf,
    pub concurrency: Option<usize>,
    pub base_url: Option<String>,
    pub gate: GatePolicy,
    pub debug: bool,
    pub quiet: bool,
}

impl Args {
    pub fn parse() -> Self {
        let ArgsCli {
            players,
            output,
            concurrency,
            base_url,
            gate,
            debug,
            quiet,
        } = ArgsCli::parse();

        Self {
            players,
            output,
            concurrency,
            base_url,
            gate,
            debug,
            quiet,
        }
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            players: PathBuf::from("Players.csv"),
            output: PathBuf::from("Data.csv"),
            concurrency: None,
            base_url: None,
            gate: GatePolicy::default(),
            debug: false,
            quiet: false,
        }
    }
}

#[derive(Parser)]
#[clap(author, about = DESCRIPTION)]
struct ArgsCli {
    #[clap(short, long, default_value = "Players.csv", value_name = "PATH")]
    /// Table whose first column contains the player ids
    players: PathBuf,
    #[clap(short, long, default_value = "Data.csv", value_name = "PATH")]
    /// Table to write the gathered statistics into
    output: PathBuf,
    #[clap(short, long, value_name = "TASKS")]
    /// Maximum amount of profiles requested at once [default: 8]
    concurrency: Option<usize>,
    #[clap(long, value_name = "URL")]
    /// Url that player ids are appended to
    base_url: Option<String>,
    #[clap(long, default_value = "own", value_name = "POLICY")]
    /// Which marker decides whether losses, draws, and rank are parsed
    gate: GatePolicy,
    #[clap(short, long, action)]
    /// Log a summary for every player
    debug: bool,
    #[clap(short, long, action)]
    /// Set this if no logs should be displayed
    quiet: bool,
}

pub static DESCRIPTION: &str = r#"
Script to gather gwent player statistics from their
public profiles and collect them into a single table.

Environment:
  - PROFILE_BASE_URL: Used if --base-url is not given
  - SCRAPER_CONCURRENCY: Used if --concurrency is not given

Gate values:
  - own: A field is parsed only if its own marker is on the page.
  - mmr: Losses, draws, and rank are parsed whenever the MMR
      marker is on the page; a missing marker aborts the run."#;
