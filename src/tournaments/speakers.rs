use chrono::Utc;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::Error,
    schema::{
        debate_speakers, rankings, round_scores, speaker_standings,
        tournament_speakers,
    },
};

/// A speaker's role within their team of three.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Position {
    First,
    Deputy,
    Whip,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::First => "First",
            Position::Deputy => "Deputy",
            Position::Whip => "Whip",
        }
    }
}

#[derive(Queryable, Serialize, Deserialize, Clone, Debug)]
pub struct Speaker {
    pub id: String,
    pub tournament_id: String,
    pub name: String,
    pub team: String,
    pub position: String,
    pub created_at: chrono::NaiveDateTime,
}

impl Speaker {
    pub fn create(
        tournament_id: &str,
        name: &str,
        team: &str,
        position: Position,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Self, Error> {
        let speaker = Speaker {
            id: Uuid::now_v7().to_string(),
            tournament_id: tournament_id.to_string(),
            name: name.to_string(),
            team: team.to_string(),
            position: position.as_str().to_string(),
            created_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(tournament_speakers::table)
            .values((
                tournament_speakers::id.eq(&speaker.id),
                tournament_speakers::tournament_id.eq(&speaker.tournament_id),
                tournament_speakers::name.eq(&speaker.name),
                tournament_speakers::team.eq(&speaker.team),
                tournament_speakers::position.eq(&speaker.position),
                tournament_speakers::created_at.eq(speaker.created_at),
            ))
            .execute(conn)?;

        Ok(speaker)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Option<Self>, Error> {
        Ok(tournament_speakers::table
            .filter(tournament_speakers::id.eq(id))
            .first::<Speaker>(conn)
            .optional()?)
    }

    /// Admin edit of a speaker's details. Identity is never edited; derived
    /// rows key on the id and are unaffected.
    pub fn update_details(
        id: &str,
        name: &str,
        team: &str,
        position: Position,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<(), Error> {
        diesel::update(
            tournament_speakers::table.filter(tournament_speakers::id.eq(id)),
        )
        .set((
            tournament_speakers::name.eq(name),
            tournament_speakers::team.eq(team),
            tournament_speakers::position.eq(position.as_str()),
        ))
        .execute(conn)?;
        Ok(())
    }

    /// Admin removal of a speaker. Dependent rankings, round scores and the
    /// standing row go in the same transaction, so no orphaned derived state
    /// can survive. Succeeds even when the speaker has no dependent rows.
    pub fn delete_cascade(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<(), Error> {
        conn.transaction(|conn| -> Result<(), Error> {
            diesel::delete(
                rankings::table.filter(rankings::speaker_id.eq(id)),
            )
            .execute(conn)?;
            diesel::delete(
                round_scores::table.filter(round_scores::speaker_id.eq(id)),
            )
            .execute(conn)?;
            diesel::delete(
                speaker_standings::table
                    .filter(speaker_standings::speaker_id.eq(id)),
            )
            .execute(conn)?;
            diesel::delete(
                debate_speakers::table
                    .filter(debate_speakers::speaker_id.eq(id)),
            )
            .execute(conn)?;
            diesel::delete(
                tournament_speakers::table
                    .filter(tournament_speakers::id.eq(id)),
            )
            .execute(conn)?;

            info!(speaker_id = id, "deleted speaker and dependent rows");
            Ok(())
        })
    }
}
