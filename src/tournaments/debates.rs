use chrono::Utc;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Error,
    schema::{debate_speakers, tournament_debates, tournament_speakers},
    tournaments::speakers::Speaker,
};

/// National-style rounds rank exactly six speakers (three per side). This is
/// a fixed contract of the format, not a runtime option.
pub const SPEAKERS_PER_DEBATE: usize = 6;

#[derive(Queryable, Serialize, Deserialize, Clone, Debug)]
pub struct Debate {
    pub id: String,
    pub tournament_id: String,
    pub round: i64,
    pub venue: String,
    pub aff_team: String,
    pub neg_team: String,
    pub created_at: chrono::NaiveDateTime,
}

pub struct NewDebate<'a> {
    pub id: &'a str,
    pub tournament_id: &'a str,
    pub round: i64,
    pub venue: &'a str,
    pub aff_team: &'a str,
    pub neg_team: &'a str,
}

impl Debate {
    /// Registers a debate together with its speaker membership rows. A
    /// payload without exactly six speakers is rejected, since draw imports
    /// arrive from outside the crate.
    pub fn create(
        new: NewDebate<'_>,
        speaker_ids: &[&str],
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Self, Error> {
        if speaker_ids.len() != SPEAKERS_PER_DEBATE {
            return Err(Error::InvalidDebateSpeakerCount {
                debate_id: new.id.to_string(),
                got: speaker_ids.len(),
            });
        }

        let debate = Debate {
            id: new.id.to_string(),
            tournament_id: new.tournament_id.to_string(),
            round: new.round,
            venue: new.venue.to_string(),
            aff_team: new.aff_team.to_string(),
            neg_team: new.neg_team.to_string(),
            created_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(tournament_debates::table)
            .values((
                tournament_debates::id.eq(&debate.id),
                tournament_debates::tournament_id.eq(&debate.tournament_id),
                tournament_debates::round.eq(debate.round),
                tournament_debates::venue.eq(&debate.venue),
                tournament_debates::aff_team.eq(&debate.aff_team),
                tournament_debates::neg_team.eq(&debate.neg_team),
                tournament_debates::created_at.eq(debate.created_at),
            ))
            .execute(conn)?;

        for speaker_id in speaker_ids {
            diesel::insert_into(debate_speakers::table)
                .values((
                    debate_speakers::id.eq(Uuid::now_v7().to_string()),
                    debate_speakers::debate_id.eq(&debate.id),
                    debate_speakers::speaker_id.eq(*speaker_id),
                ))
                .execute(conn)?;
        }

        Ok(debate)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Option<Self>, Error> {
        Ok(tournament_debates::table
            .filter(tournament_debates::id.eq(id))
            .first::<Debate>(conn)
            .optional()?)
    }

    pub fn speakers(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Vec<Speaker>, Error> {
        Ok(tournament_speakers::table
            .inner_join(debate_speakers::table.on(
                debate_speakers::speaker_id.eq(tournament_speakers::id),
            ))
            .filter(debate_speakers::debate_id.eq(&self.id))
            .select(tournament_speakers::all_columns)
            .load::<Speaker>(conn)?)
    }
}

/// A debate together with its six registered speakers.
pub struct DebateRepr {
    pub debate: Debate,
    pub speakers: Vec<Speaker>,
}

impl DebateRepr {
    pub fn fetch(
        debate_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Option<Self>, Error> {
        let debate = match Debate::fetch(debate_id, conn)? {
            Some(debate) => debate,
            None => return Ok(None),
        };
        let speakers = debate.speakers(conn)?;
        Ok(Some(DebateRepr { debate, speakers }))
    }
}
