use super::ProfileStats;

/// Rank of a player whose page does not show one.
pub const DEFAULT_RANK: u32 = 30;

/// Everything gathered about a single player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: Box<str>,
    pub rank: u32,
    pub prestige: u32,
    pub level: u32,
    pub mmr: u32,
    pub losses: u32,
    pub draws: u32,
    pub current: ProfileStats,
    pub total: ProfileStats,
}

impl PlayerRecord {
    pub fn new(id: impl Into<Box<str>>) -> Self {
        Self {
            id: id.into(),
            rank: DEFAULT_RANK,
            prestige: 0,
            level: 0,
            mmr: 0,
            losses: 0,
            draws: 0,
            current: ProfileStats::default(),
            total: ProfileStats::default(),
        }
    }

    /// Row for the output table, in header order.
    pub fn to_row(&self) -> [String; 9] {
        [
            self.id.to_string(),
            self.rank.to_string(),
            self.total.overall.to_string(),
            self.current.overall.to_string(),
            self.losses.to_string(),
            self.draws.to_string(),
            self.mmr.to_string(),
            self.prestige.to_string(),
            self.level.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_defaults() {
        let record = PlayerRecord::new("geralt");

        assert_eq!(
            record.to_row(),
            ["geralt", "30", "0", "0", "0", "0", "0", "0", "0"].map(String::from)
        );
    }
}
