#![deny(clippy::all, nonstandard_style, rust_2018_idioms, warnings)]

#[macro_use]
extern crate eyre;

#[macro_use]
extern crate tracing;

use std::process::ExitCode;

use eyre::{Context as _, Report, Result};
use gwent_scraper::{
    util::{Args, DESCRIPTION},
    Config,
};
use tokio::{runtime::Builder as RuntimeBuilder, signal};

fn main() -> ExitCode {
    let args = Args::parse();
    let dotenv = dotenvy::dotenv();
    let _log_worker_guard = gwent_scraper::logging::init(args.quiet, args.debug);

    if let Err(err) = dotenv {
        if !err.not_found() {
            warn!("{:?}", Report::new(err).wrap_err("Failed to load .env file"));
        }
    }

    let runtime = RuntimeBuilder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    match runtime.block_on(async_main(args)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:?}", err.wrap_err("Critical error in main"));

            ExitCode::FAILURE
        }
    }
}

async fn async_main(args: Args) -> Result<()> {
    DESCRIPTION.lines().for_each(|line| info!("{line}"));

    let config = Config::new(&args).context("failed to create config")?;

    info!("");
    info!("Configuration:");
    info!("  - Players are read from `{}`", config.players_path.display());
    info!("  - Statistics are written to `{}`", config.output_path.display());
    info!("  - Profiles are requested from {}", config.base_url);
    info!("  - At most {} profile(s) are requested at once", config.concurrency);
    info!("  - Fields are gated on their {}", config.gate);
    info!("  - Debug logging: {}", config.debug);
    info!("-------------------------------------------------");

    tokio::select! {
        res = gwent_scraper::run(&config) => res.map(|_| ()),
        res = signal::ctrl_c() => match res {
            Ok(_) => bail!("Received Ctrl+C before the table was written"),
            Err(err) => Err(err).context("failed to await ctrl+c"),
        }
    }
}
