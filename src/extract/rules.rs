use eyre::{Context as _, Result};
use regex::{Captures, Regex};

use crate::model::PlayerRecord;

/// A numeric column filled in from the page markup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Mmr,
    Losses,
    Draws,
    Rank,
    Prestige,
    Level,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Mmr => "MMR",
            Self::Losses => "losses",
            Self::Draws => "draws",
            Self::Rank => "rank",
            Self::Prestige => "prestige",
            Self::Level => "level",
        }
    }

    fn slot(self, record: &mut PlayerRecord) -> &mut u32 {
        match self {
            Self::Mmr => &mut record.mmr,
            Self::Losses => &mut record.losses,
            Self::Draws => &mut record.draws,
            Self::Rank => &mut record.rank,
            Self::Prestige => &mut record.prestige,
            Self::Level => &mut record.level,
        }
    }
}

/// Which match decides whether a marker's fields are parsed
/// when running with [`GatePolicy::MmrMatch`](super::GatePolicy::MmrMatch).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    Own,
    Mmr,
}

/// A pattern together with the fields its named groups fill in.
pub struct Marker {
    pub name: &'static str,
    pub regex: Regex,
    pub fields: &'static [(Field, &'static str)],
    pub gate: Gate,
    pub strip_commas: bool,
}

impl Marker {
    fn new(
        name: &'static str,
        pattern: &str,
        fields: &'static [(Field, &'static str)],
        gate: Gate,
        strip_commas: bool,
    ) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("failed to compile {name} pattern `{pattern}`"))?;

        Ok(Self {
            name,
            regex,
            fields,
            gate,
            strip_commas,
        })
    }

    /// Parses every field of the marker out of `captures` into `record`.
    pub fn apply(&self, captures: &Captures<'_>, record: &mut PlayerRecord) -> Result<()> {
        for &(field, group) in self.fields {
            let text = captures.name(group).map_or("", |m| m.as_str());

            let digits = if self.strip_commas {
                text.replace(',', "")
            } else {
                text.to_owned()
            };

            *field.slot(record) = digits.parse().with_context(|| {
                format!("failed to parse {} from `{text}`", field.name())
            })?;
        }

        Ok(())
    }
}

pub const PRIVATE_MARKER: &str = "THIS PLAYER PROFILE IS PRIVATE";

pub const WINS_PATTERN: &str = r"var profileDataWins = (?P<json>.*?);";
pub const CURRENT_PATTERN: &str = r"var profileDataCurrent = (?P<json>.*?);";

/// The MMR marker comes first; the gate of the others may depend on it.
pub fn markers() -> Result<Vec<Marker>> {
    let markers = vec![
        Marker::new(
            "MMR",
            r"(?P<mmr>[0-9][0-9,]*) MMR",
            &[(Field::Mmr, "mmr")],
            Gate::Own,
            true,
        )?,
        Marker::new(
            "losses",
            r"Losses</td><td>(?P<matches>[0-9,]*) matches</td>",
            &[(Field::Losses, "matches")],
            Gate::Mmr,
            true,
        )?,
        Marker::new(
            "draws",
            r"Draws</td><td>(?P<matches>[0-9,]*) matches</td>",
            &[(Field::Draws, "matches")],
            Gate::Mmr,
            true,
        )?,
        Marker::new(
            "rank",
            r#"-details__rank"><strong>(?P<rank>[0-9]*)<"#,
            &[(Field::Rank, "rank")],
            Gate::Mmr,
            false,
        )?,
        Marker::new(
            "prestige",
            r#"prestige--(?P<prestige>[0-9]*)"><strong>[\s]*(?P<level>[0-9]*)"#,
            &[(Field::Prestige, "prestige"), (Field::Level, "level")],
            Gate::Own,
            false,
        )?,
    ];

    Ok(markers)
}
