use std::sync::Arc;

use eyre::{Context as _, Result};
use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    client::{Client, ProfileSource},
    config::Config,
    extract::Extractor,
    model::PlayerRecord,
    table,
};

use self::progress::Progress;

mod profile;
mod progress;

pub struct Context<S = Client> {
    source: Arc<S>,
    extractor: Arc<Extractor>,
    concurrency: usize,
}

impl Context {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::new(&config.base_url).context("failed to create client")?;

        Self::with_source(client, config)
    }
}

impl<S: ProfileSource> Context<S> {
    pub fn with_source(source: S, config: &Config) -> Result<Self> {
        ensure!(config.concurrency > 0, "concurrency must be at least 1");

        let extractor = Extractor::new(config.gate).context("failed to create extractor")?;

        Ok(Self {
            source: Arc::new(source),
            extractor: Arc::new(extractor),
            concurrency: config.concurrency,
        })
    }

    /// Loads the players, gathers their statistics, and writes them into
    /// the output table. Returns the amount of written rows.
    pub async fn run(&self, config: &Config) -> Result<usize> {
        let players = table::load_players(&config.players_path)?;

        info!(
            "Loaded {} player(s) from `{}`",
            players.len(),
            config.players_path.display()
        );

        let players = self.scrape(players).await?;

        table::write_players(&config.output_path, &players)?;

        info!(
            "Wrote {} row(s) into `{}`",
            players.len(),
            config.output_path.display()
        );

        Ok(players.len())
    }

    /// Processes all players with at most `concurrency` requests at a time.
    ///
    /// The returned records are in the same order as the given ones. The first
    /// error cancels all remaining tasks.
    pub async fn scrape(&self, players: Vec<PlayerRecord>) -> Result<Vec<PlayerRecord>> {
        let total = players.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let mut progress = Progress::new(total);

        info!(
            "Requesting {total} profile(s), {} at a time, gating fields on their {}...",
            self.concurrency,
            self.extractor.policy(),
        );

        for (idx, record) in players.into_iter().enumerate() {
            // Finished tasks are collected while waiting so that errors abort early
            let permit = loop {
                tokio::select! {
                    permit = Arc::clone(&semaphore).acquire_owned() => {
                        break permit.context("profile semaphore was closed")?;
                    }
                    Some(joined) = tasks.join_next() => {
                        progress.store(joined)?;
                    }
                }
            };

            let source = Arc::clone(&self.source);
            let extractor = Arc::clone(&self.extractor);

            tasks.spawn(async move {
                let _permit = permit;

                profile::process(&*source, &extractor, record)
                    .await
                    .map(|record| (idx, record))
            });
        }

        while let Some(joined) = tasks.join_next().await {
            progress.store(joined)?;
        }

        progress.finish()
    }
}
