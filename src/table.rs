use std::path::Path;

use csv::{ReaderBuilder, Writer};
use eyre::{Context as _, Result};

use crate::model::PlayerRecord;

pub const HEADER: [&str; 9] = [
    "id",
    "rank",
    "total wins",
    "current wins",
    "current losses",
    "current draws",
    "MMR",
    "prestige",
    "level",
];

/// Reads the player ids from the first column of a headerless table.
pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to open player table `{}`", path.display()))?;

    reader
        .records()
        .zip(1..)
        .map(|(row, line)| -> Result<PlayerRecord> {
            let row = row.with_context(|| {
                format!("failed to read row {line} of `{}`", path.display())
            })?;

            let id = row
                .get(0)
                .ok_or_else(|| eyre!("row {line} of `{}` is empty", path.display()))?;

            Ok(PlayerRecord::new(id))
        })
        .collect()
}

pub fn write_players(path: &Path, players: &[PlayerRecord]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("failed to create output table `{}`", path.display()))?;

    writer
        .write_record(HEADER)
        .context("failed to write table header")?;

    for player in players {
        writer
            .write_record(player.to_row())
            .with_context(|| format!("failed to write row of player `{}`", player.id))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush output table `{}`", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn load_keeps_order_and_first_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Players.csv");
        fs::write(&path, "yennefer,1\ngeralt,2\n\"dan,delion\",3\n").unwrap();

        let ids: Vec<_> = load_players(&path)
            .unwrap()
            .into_iter()
            .map(|player| player.id)
            .collect();

        let expected: [Box<str>; 3] = ["yennefer".into(), "geralt".into(), "dan,delion".into()];
        assert_eq!(ids, expected);
    }

    #[test]
    fn load_missing_file() {
        let dir = TempDir::new().unwrap();

        assert!(load_players(&dir.path().join("missing.csv")).is_err());
    }

    #[test]
    fn load_uneven_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Players.csv");
        fs::write(&path, "yennefer,1\ngeralt\n").unwrap();

        assert!(load_players(&path).is_err());
    }

    #[test]
    fn write_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Data.csv");

        let mut ciri = PlayerRecord::new("ciri");
        ciri.total.overall = 420;
        ciri.current.overall = 12;
        ciri.losses = 8;
        ciri.draws = 1;
        ciri.mmr = 9_650;
        ciri.rank = 0;
        ciri.prestige = 4;
        ciri.level = 12;

        write_players(&path, &[PlayerRecord::new("geralt"), ciri]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let expected = "id,rank,total wins,current wins,current losses,current draws,MMR,prestige,level\n\
            geralt,30,0,0,0,0,0,0,0\n\
            ciri,0,420,12,8,1,9650,4,12\n";

        assert_eq!(content, expected);
    }
}
