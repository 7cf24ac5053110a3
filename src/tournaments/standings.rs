use chrono::Utc;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::Error,
    schema::{
        round_scores, speaker_standings, tournament_debates,
        tournament_speakers,
    },
    tournaments::speakers::Position,
};

#[derive(Queryable, Serialize, Clone, Debug)]
pub struct SpeakerStanding {
    pub id: String,
    pub tournament_id: String,
    pub speaker_id: String,
    pub total_score: f64,
    pub rounds_participated: i64,
    pub average_score: f64,
    pub highest_round_score: f64,
    pub updated_at: chrono::NaiveDateTime,
}

/// Rebuilds one speaker's cumulative standing from their round scores within
/// the tournament. A speaker with no scored rounds has no standing row, so
/// an empty ledger deletes any stale row instead of writing zeros.
pub fn recompute_standing(
    speaker_id: &str,
    tournament_id: &str,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<(), Error> {
    let scores = round_scores::table
        .inner_join(
            tournament_debates::table
                .on(tournament_debates::id.eq(round_scores::debate_id)),
        )
        .filter(round_scores::speaker_id.eq(speaker_id))
        .filter(tournament_debates::tournament_id.eq(tournament_id))
        .select(round_scores::score)
        .load::<f64>(conn)?;

    if scores.is_empty() {
        diesel::delete(
            speaker_standings::table.filter(
                speaker_standings::speaker_id
                    .eq(speaker_id)
                    .and(speaker_standings::tournament_id.eq(tournament_id)),
            ),
        )
        .execute(conn)?;
        return Ok(());
    }

    let total: f64 = scores.iter().sum();
    let rounds = scores.len() as i64;
    let average = total / rounds as f64;
    // round scores sit in [0, 5], so 0 is a safe floor for the max
    let highest = scores.iter().copied().fold(0.0_f64, f64::max);

    diesel::insert_into(speaker_standings::table)
        .values((
            speaker_standings::id.eq(Uuid::now_v7().to_string()),
            speaker_standings::tournament_id.eq(tournament_id),
            speaker_standings::speaker_id.eq(speaker_id),
            speaker_standings::total_score.eq(total),
            speaker_standings::rounds_participated.eq(rounds),
            speaker_standings::average_score.eq(average),
            speaker_standings::highest_round_score.eq(highest),
            speaker_standings::updated_at.eq(Utc::now().naive_utc()),
        ))
        .on_conflict((
            speaker_standings::tournament_id,
            speaker_standings::speaker_id,
        ))
        .do_update()
        .set((
            speaker_standings::total_score.eq(total),
            speaker_standings::rounds_participated.eq(rounds),
            speaker_standings::average_score.eq(average),
            speaker_standings::highest_round_score.eq(highest),
            speaker_standings::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(conn)?;

    Ok(())
}

#[derive(Queryable, Serialize, Debug)]
pub struct StandingRow {
    pub speaker_id: String,
    pub name: String,
    pub team: String,
    pub position: String,
    pub total_score: f64,
    pub rounds_participated: i64,
    pub average_score: f64,
    pub highest_round_score: f64,
}

/// The tournament speaker tab, optionally filtered to one position.
///
/// Ordering is the league's ranking policy: average score first, then the
/// best single round, then number of rounds judged. Speakers equal on all
/// three have no defined relative order.
pub fn standings(
    tournament_id: &str,
    position: Option<Position>,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Vec<StandingRow>, Error> {
    let mut query = speaker_standings::table
        .inner_join(
            tournament_speakers::table
                .on(tournament_speakers::id.eq(speaker_standings::speaker_id)),
        )
        .filter(speaker_standings::tournament_id.eq(tournament_id))
        .select((
            speaker_standings::speaker_id,
            tournament_speakers::name,
            tournament_speakers::team,
            tournament_speakers::position,
            speaker_standings::total_score,
            speaker_standings::rounds_participated,
            speaker_standings::average_score,
            speaker_standings::highest_round_score,
        ))
        .into_boxed::<Sqlite>();

    if let Some(position) = position {
        query = query
            .filter(tournament_speakers::position.eq(position.as_str()));
    }

    Ok(query
        .order((
            speaker_standings::average_score.desc(),
            speaker_standings::highest_round_score.desc(),
            speaker_standings::rounds_participated.desc(),
        ))
        .load::<StandingRow>(conn)?)
}
