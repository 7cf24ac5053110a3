use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    error::Error,
    schema::{rankings, round_scores},
    tournaments::{debates::Debate, rankings::WORST_RANK},
};

/// Converts a judge's ordinal placement to points: 1st = 5, 2nd = 4, down to
/// 6th = 0. Fixed law of the format.
pub fn points(rank: i64) -> f64 {
    (WORST_RANK - rank) as f64
}

/// Recomputes the round score of every speaker in the debate from the
/// rankings currently on file: the arithmetic mean of each judge's point
/// value for the speaker.
///
/// A debate judged by one judge and a debate judged by three both average
/// over however many rankings exist; panel size is deliberately not
/// normalised. Speakers no judge has ranked yet get no row. Existing rows
/// are overwritten, so recomputation is idempotent for fixed ledger
/// contents.
///
/// Returns the ids of the speakers whose round score was (re)written, so the
/// caller can recompute exactly those standings.
pub fn recompute_round_scores(
    debate: &Debate,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Vec<String>, Error> {
    let ranks = rankings::table
        .filter(rankings::debate_id.eq(&debate.id))
        .select((rankings::speaker_id, rankings::rank))
        .load::<(String, i64)>(conn)?;

    let mut points_of_speaker: IndexMap<String, Vec<f64>> = IndexMap::new();
    for (speaker_id, rank) in ranks {
        points_of_speaker
            .entry(speaker_id)
            .or_default()
            .push(points(rank));
    }

    let mut affected = Vec::new();
    for (speaker_id, points) in &points_of_speaker {
        let score = points.iter().sum::<f64>() / points.len() as f64;

        diesel::insert_into(round_scores::table)
            .values((
                round_scores::id.eq(Uuid::now_v7().to_string()),
                round_scores::debate_id.eq(&debate.id),
                round_scores::speaker_id.eq(speaker_id),
                round_scores::round.eq(debate.round),
                round_scores::score.eq(score),
            ))
            .on_conflict((round_scores::debate_id, round_scores::speaker_id))
            .do_update()
            .set(round_scores::score.eq(score))
            .execute(conn)?;

        affected.push(speaker_id.clone());
    }

    Ok(affected)
}
