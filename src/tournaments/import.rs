use std::collections::HashMap;

use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::Error,
    schema::tournament_speakers,
    tournaments::{
        Tournament,
        assignments::JudgeAssignment,
        debates::{Debate, NewDebate, SPEAKERS_PER_DEBATE},
        speakers::Position,
    },
};

/// Normalised draw payload handed to the core by the import layer. Parsing
/// the tournament software's own export format happens outside this crate;
/// the core only requires this shape.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SpeakerImport {
    pub id: String,
    pub name: String,
    pub team: String,
    pub position: Position,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DebateImport {
    pub id: String,
    pub venue: Option<String>,
    pub aff_team: String,
    pub neg_team: String,
    pub speakers: Vec<SpeakerImport>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RoundImport {
    pub round: i64,
    pub debates: Vec<DebateImport>,
    /// Judges mapped to the debate they will rank this round; `None` means
    /// the judge sits this round out.
    pub judge_assignments: HashMap<String, Option<String>>,
}

impl RoundImport {
    /// Registers the round's debates, speakers and pending judge
    /// assignments, and advances the tournament's current round, all in one
    /// transaction. Speakers already known from earlier rounds are updated
    /// in place; debates already registered are left alone.
    pub fn apply(
        &self,
        tournament_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<(), Error> {
        conn.transaction(|conn| -> Result<(), Error> {
            let tournament = Tournament::fetch(tournament_id, conn)?.ok_or(
                Error::TransactionFailure(diesel::result::Error::NotFound),
            )?;

            for debate in &self.debates {
                if debate.speakers.len() != SPEAKERS_PER_DEBATE {
                    return Err(Error::InvalidDebateSpeakerCount {
                        debate_id: debate.id.clone(),
                        got: debate.speakers.len(),
                    });
                }

                for speaker in &debate.speakers {
                    diesel::insert_into(tournament_speakers::table)
                        .values((
                            tournament_speakers::id.eq(&speaker.id),
                            tournament_speakers::tournament_id
                                .eq(tournament_id),
                            tournament_speakers::name.eq(&speaker.name),
                            tournament_speakers::team.eq(&speaker.team),
                            tournament_speakers::position
                                .eq(speaker.position.as_str()),
                            tournament_speakers::created_at
                                .eq(chrono::Utc::now().naive_utc()),
                        ))
                        .on_conflict(tournament_speakers::id)
                        .do_update()
                        .set((
                            tournament_speakers::name.eq(&speaker.name),
                            tournament_speakers::team.eq(&speaker.team),
                            tournament_speakers::position
                                .eq(speaker.position.as_str()),
                        ))
                        .execute(conn)?;
                }

                if Debate::fetch(&debate.id, conn)?.is_none() {
                    let speaker_ids: Vec<&str> = debate
                        .speakers
                        .iter()
                        .map(|s| s.id.as_str())
                        .collect();
                    Debate::create(
                        NewDebate {
                            id: &debate.id,
                            tournament_id,
                            round: self.round,
                            venue: debate.venue.as_deref().unwrap_or("TBA"),
                            aff_team: &debate.aff_team,
                            neg_team: &debate.neg_team,
                        },
                        &speaker_ids,
                        conn,
                    )?;
                }
            }

            for (judge_id, debate_id) in &self.judge_assignments {
                if let Some(debate_id) = debate_id {
                    JudgeAssignment::assign(judge_id, debate_id, conn)?;
                }
            }

            tournament.set_current_round(self.round, conn)?;

            info!(
                tournament_id,
                round = self.round,
                debates = self.debates.len(),
                "applied draw import"
            );
            Ok(())
        })
    }
}
