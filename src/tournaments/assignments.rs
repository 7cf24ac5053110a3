use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Error,
    schema::{judge_assignments, tournament_debates},
    tournaments::{
        Tournament,
        debates::{Debate, DebateRepr},
    },
};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Queryable, Serialize, Deserialize, Clone, Debug)]
pub struct JudgeAssignment {
    pub id: String,
    pub judge_id: String,
    pub debate_id: String,
    pub status: String,
}

impl JudgeAssignment {
    /// Assigns a judge to a debate. At most one assignment exists per
    /// (judge, debate) pair; re-assigning is a no-op and does not reset a
    /// completed assignment back to pending.
    pub fn assign(
        judge_id: &str,
        debate_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<(), Error> {
        diesel::insert_into(judge_assignments::table)
            .values((
                judge_assignments::id.eq(Uuid::now_v7().to_string()),
                judge_assignments::judge_id.eq(judge_id),
                judge_assignments::debate_id.eq(debate_id),
                judge_assignments::status.eq(STATUS_PENDING),
            ))
            .on_conflict((
                judge_assignments::judge_id,
                judge_assignments::debate_id,
            ))
            .do_nothing()
            .execute(conn)?;
        Ok(())
    }

    pub fn of_judge_and_debate(
        judge_id: &str,
        debate_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Option<Self>, Error> {
        Ok(judge_assignments::table
            .filter(
                judge_assignments::judge_id
                    .eq(judge_id)
                    .and(judge_assignments::debate_id.eq(debate_id)),
            )
            .first::<JudgeAssignment>(conn)
            .optional()?)
    }

    pub fn mark_completed(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<(), Error> {
        diesel::update(
            judge_assignments::table
                .filter(judge_assignments::id.eq(&self.id)),
        )
        .set(judge_assignments::status.eq(STATUS_COMPLETED))
        .execute(conn)?;
        Ok(())
    }
}

/// The judge's pending debate in the tournament's current round, with its
/// speakers, or `None` if the judge has nothing left to rank.
pub fn current_assignment(
    judge_id: &str,
    tournament_id: &str,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Option<DebateRepr>, Error> {
    let tournament = match Tournament::fetch(tournament_id, conn)? {
        Some(tournament) => tournament,
        None => return Ok(None),
    };

    let debate = tournament_debates::table
        .inner_join(
            judge_assignments::table
                .on(judge_assignments::debate_id.eq(tournament_debates::id)),
        )
        .filter(judge_assignments::judge_id.eq(judge_id))
        .filter(judge_assignments::status.eq(STATUS_PENDING))
        .filter(tournament_debates::tournament_id.eq(tournament_id))
        .filter(tournament_debates::round.eq(tournament.current_round))
        .select(tournament_debates::all_columns)
        .first::<Debate>(conn)
        .optional()?;

    match debate {
        Some(debate) => {
            let speakers = debate.speakers(conn)?;
            Ok(Some(DebateRepr { debate, speakers }))
        }
        None => Ok(None),
    }
}

#[derive(Queryable, Serialize, Debug)]
pub struct CompletedAssignment {
    pub debate_id: String,
    pub round: i64,
    pub venue: String,
    pub aff_team: String,
    pub neg_team: String,
}

/// Debates this judge has already ranked, most recent round first.
pub fn completed_assignments(
    judge_id: &str,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Vec<CompletedAssignment>, Error> {
    Ok(judge_assignments::table
        .inner_join(
            tournament_debates::table
                .on(tournament_debates::id.eq(judge_assignments::debate_id)),
        )
        .filter(judge_assignments::judge_id.eq(judge_id))
        .filter(judge_assignments::status.eq(STATUS_COMPLETED))
        .order_by(tournament_debates::round.desc())
        .select((
            tournament_debates::id,
            tournament_debates::round,
            tournament_debates::venue,
            tournament_debates::aff_team,
            tournament_debates::neg_team,
        ))
        .load::<CompletedAssignment>(conn)?)
}
