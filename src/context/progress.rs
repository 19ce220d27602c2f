use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    time::{Duration, Instant},
};

use eyre::{Context as _, Result};
use tokio::task::JoinError;

use crate::model::PlayerRecord;

const LOG_INTERVAL: usize = 50;

/// Keeps finished profiles in their slot and logs how far along the run is.
pub(super) struct Progress {
    start: Instant,
    done: usize,
    slots: Vec<Option<PlayerRecord>>,
}

impl Progress {
    pub(super) fn new(total: usize) -> Self {
        Self {
            start: Instant::now(),
            done: 0,
            slots: vec![None; total],
        }
    }

    pub(super) fn total(&self) -> usize {
        self.slots.len()
    }

    pub(super) fn store(
        &mut self,
        joined: Result<Result<(usize, PlayerRecord)>, JoinError>,
    ) -> Result<()> {
        let (idx, record) = joined.context("profile task panicked")??;
        self.slots[idx] = Some(record);
        self.done += 1;

        if self.done % LOG_INTERVAL == 0 || self.done == self.total() {
            info!(
                "Profile progress: {}/{} | ETA: {}",
                self.done,
                self.total(),
                self.remaining(self.start.elapsed()),
            );
        }

        Ok(())
    }

    /// Extrapolates the time spent so far over the profiles still missing.
    fn remaining(&self, elapsed: Duration) -> Eta {
        if self.done == 0 {
            return Eta(None);
        }

        let left = (self.total() - self.done) as u32;

        Eta(Some(elapsed / self.done as u32 * left))
    }

    /// Records in their original order.
    pub(super) fn finish(self) -> Result<Vec<PlayerRecord>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| slot.ok_or_else(|| eyre!("missing result for player #{idx}")))
            .collect()
    }
}

struct Eta(Option<Duration>);

impl Display for Eta {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Some(duration) = self.0 else {
            return f.write_str("N/A");
        };

        let secs = duration.as_secs();
        let (minutes, secs) = (secs / 60, secs % 60);

        if minutes > 0 {
            write!(f, "{minutes}m{secs}s")
        } else {
            write!(f, "{secs}s")
        }
    }
}
