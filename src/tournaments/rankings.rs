use std::collections::{HashMap, HashSet};

use chrono::Utc;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::Error,
    schema::rankings,
    tournaments::{
        assignments::JudgeAssignment,
        debates::{DebateRepr, SPEAKERS_PER_DEBATE},
        scoring, standings,
    },
};

pub const BEST_RANK: i64 = 1;
pub const WORST_RANK: i64 = 6;

#[derive(Queryable, Serialize, Deserialize, Clone, Debug)]
pub struct Ranking {
    pub id: String,
    pub judge_id: String,
    pub debate_id: String,
    pub speaker_id: String,
    pub rank: i64,
    pub submitted_at: chrono::NaiveDateTime,
}

impl Ranking {
    pub fn of_judge_and_debate(
        judge_id: &str,
        debate_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Vec<Self>, Error> {
        Ok(rankings::table
            .filter(
                rankings::judge_id
                    .eq(judge_id)
                    .and(rankings::debate_id.eq(debate_id)),
            )
            .load::<Ranking>(conn)?)
    }
}

/// Accepts one judge's complete ranking of a debate's six speakers.
///
/// Validation runs in a fixed order, failing fast with the first violated
/// rule: set size, rank range, rank permutation, judge assignment, speaker
/// membership. On success the six ranking rows are upserted (a resubmission
/// by the same judge fully replaces the previous set), the judge's
/// assignment is marked completed, and the debate's round scores plus the
/// affected speakers' standings are recomputed. All of this happens inside
/// one transaction, so a failure partway leaves no trace.
pub fn submit_ranking(
    judge_id: &str,
    debate_id: &str,
    ranking_of_speaker: &HashMap<String, i64>,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<(), Error> {
    if ranking_of_speaker.len() != SPEAKERS_PER_DEBATE {
        return Err(Error::InvalidRankingSetSize {
            got: ranking_of_speaker.len(),
        });
    }

    for &rank in ranking_of_speaker.values() {
        if !(BEST_RANK..=WORST_RANK).contains(&rank) {
            return Err(Error::RankOutOfRange { rank });
        }
    }

    // Six in-range values with no duplicates are exactly {1, ..., 6}.
    let distinct: HashSet<i64> =
        ranking_of_speaker.values().copied().collect();
    if distinct.len() != SPEAKERS_PER_DEBATE {
        return Err(Error::DuplicateOrMissingRank);
    }

    conn.transaction(|conn| -> Result<(), Error> {
        let assignment =
            JudgeAssignment::of_judge_and_debate(judge_id, debate_id, conn)?
                .ok_or_else(|| Error::JudgeNotAssigned {
                    judge_id: judge_id.to_string(),
                    debate_id: debate_id.to_string(),
                })?;

        // The assignment's foreign key guarantees the debate exists.
        let repr = DebateRepr::fetch(debate_id, conn)?.ok_or(
            Error::TransactionFailure(diesel::result::Error::NotFound),
        )?;

        let registered: HashSet<&str> =
            repr.speakers.iter().map(|s| s.id.as_str()).collect();
        for speaker_id in ranking_of_speaker.keys() {
            if !registered.contains(speaker_id.as_str()) {
                return Err(Error::UnknownSpeakerInRanking {
                    speaker_id: speaker_id.clone(),
                });
            }
        }
        // Both sets have cardinality six, so membership one way implies
        // equality.

        let now = Utc::now().naive_utc();
        for (speaker_id, &rank) in ranking_of_speaker {
            diesel::insert_into(rankings::table)
                .values((
                    rankings::id.eq(Uuid::now_v7().to_string()),
                    rankings::judge_id.eq(judge_id),
                    rankings::debate_id.eq(debate_id),
                    rankings::speaker_id.eq(speaker_id),
                    rankings::rank.eq(rank),
                    rankings::submitted_at.eq(now),
                ))
                .on_conflict((
                    rankings::judge_id,
                    rankings::debate_id,
                    rankings::speaker_id,
                ))
                .do_update()
                .set((
                    rankings::rank.eq(rank),
                    rankings::submitted_at.eq(now),
                ))
                .execute(conn)?;
        }

        assignment.mark_completed(conn)?;

        let affected = scoring::recompute_round_scores(&repr.debate, conn)?;
        for speaker_id in &affected {
            standings::recompute_standing(
                speaker_id,
                &repr.debate.tournament_id,
                conn,
            )?;
        }

        info!(judge_id, debate_id, "accepted ranking submission");
        Ok(())
    })
}
