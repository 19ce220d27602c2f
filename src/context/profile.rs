use eyre::{Context as _, Result};

use crate::{
    client::ProfileSource,
    extract::{Extraction, Extractor},
    model::PlayerRecord,
};

/// Requests the profile of `record` and fills in whatever it shows.
pub(super) async fn process<S: ProfileSource>(
    source: &S,
    extractor: &Extractor,
    mut record: PlayerRecord,
) -> Result<PlayerRecord> {
    let page = source
        .fetch_profile(&record.id)
        .await
        .with_context(|| format!("failed to request profile of `{}`", record.id))?;

    let Some(page) = page else {
        debug!("No profile page for `{}`", record.id);

        return Ok(record);
    };

    let extraction = extractor
        .extract(page.as_str(), &mut record)
        .with_context(|| format!("failed to extract statistics of `{}`", record.id))?;

    match extraction {
        Extraction::Private => debug!("{}'s profile is private", record.id),
        Extraction::Parsed => debug!(
            "{}: Rank: {} | All: {} | Wins: {} | Losses: {} | Draws: {} | MMR: {} ({} bytes)",
            record.id,
            record.rank,
            record.total.overall,
            record.current.overall,
            record.losses,
            record.draws,
            record.mmr,
            page.len(),
        ),
    }

    Ok(record)
}
