use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use eyre::{Context as _, Report, Result};
use regex::Regex;

use crate::model::{PlayerRecord, ProfileStats};

use self::rules::{Gate, Marker, CURRENT_PATTERN, PRIVATE_MARKER, WINS_PATTERN};

pub use self::rules::Field;

mod rules;

/// Decides which match has to be present before a field is parsed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GatePolicy {
    /// Every field is parsed only if its own marker matched.
    #[default]
    OwnMatch,
    /// Losses, draws, and rank are parsed whenever the MMR marker matched,
    /// and a missing marker of their own is an error. Reproduces tables
    /// gathered by the first version of the scraper.
    MmrMatch,
}

impl Display for GatePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::OwnMatch => f.write_str("own match"),
            Self::MmrMatch => f.write_str("MMR match"),
        }
    }
}

impl FromStr for GatePolicy {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "own" | "own-match" => Ok(Self::OwnMatch),
            "mmr" | "mmr-match" => Ok(Self::MmrMatch),
            _ => bail!("Failed to parse gate policy `{s}`; must be either `own` or `mmr`"),
        }
    }
}

/// What happened to a profile page.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    Private,
    Parsed,
}

pub struct Extractor {
    wins: Regex,
    current: Regex,
    markers: Vec<Marker>,
    policy: GatePolicy,
}

impl Extractor {
    pub fn new(policy: GatePolicy) -> Result<Self> {
        let wins = Regex::new(WINS_PATTERN).context("failed to compile wins pattern")?;
        let current = Regex::new(CURRENT_PATTERN).context("failed to compile current pattern")?;
        let markers = rules::markers()?;

        Ok(Self {
            wins,
            current,
            markers,
            policy,
        })
    }

    pub fn policy(&self) -> GatePolicy {
        self.policy
    }

    /// Fills `record` with everything found in the page `body`.
    ///
    /// Fields without a marker keep their current value.
    pub fn extract(&self, body: &str, record: &mut PlayerRecord) -> Result<Extraction> {
        if body.contains(PRIVATE_MARKER) {
            return Ok(Extraction::Private);
        }

        if let Some(total) = Self::decode_stats(&self.wins, body, "profileDataWins")? {
            record.total = total;
        }

        if let Some(current) = Self::decode_stats(&self.current, body, "profileDataCurrent")? {
            record.current = current;
        }

        let mmr_found = self
            .markers
            .iter()
            .find(|marker| marker.fields.iter().any(|(field, _)| *field == Field::Mmr))
            .is_some_and(|marker| marker.regex.is_match(body));

        for marker in self.markers.iter() {
            let captures = marker.regex.captures(body);

            let open = match (self.policy, marker.gate) {
                (GatePolicy::MmrMatch, Gate::Mmr) => mmr_found,
                _ => captures.is_some(),
            };

            if !open {
                continue;
            }

            let Some(captures) = captures else {
                bail!("missing {} marker although the MMR marker matched", marker.name);
            };

            marker.apply(&captures, record)?;
        }

        Ok(Extraction::Parsed)
    }

    fn decode_stats(regex: &Regex, body: &str, name: &str) -> Result<Option<ProfileStats>> {
        let Some(json) = regex.captures(body).and_then(|captures| captures.name("json")) else {
            return Ok(None);
        };

        // `null` leaves the stats untouched, same as a missing assignment
        serde_json::from_str::<Option<ProfileStats>>(json.as_str())
            .with_context(|| format!("failed to deserialize {name} ({} bytes)", json.len()))
    }
}
