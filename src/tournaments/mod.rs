use chrono::Utc;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::Error, schema::tournaments};

pub mod assignments;
pub mod debates;
pub mod import;
pub mod rankings;
pub mod scoring;
pub mod speakers;
pub mod standings;

#[derive(Queryable, Serialize, Deserialize, Clone, Debug)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    /// Round currently in progress. Zero until the first draw is imported.
    pub current_round: i64,
    pub created_at: chrono::NaiveDateTime,
}

impl Tournament {
    pub fn create(
        name: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Self, Error> {
        let tournament = Tournament {
            id: Uuid::now_v7().to_string(),
            name: name.to_string(),
            current_round: 0,
            created_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(tournaments::table)
            .values((
                tournaments::id.eq(&tournament.id),
                tournaments::name.eq(&tournament.name),
                tournaments::current_round.eq(tournament.current_round),
                tournaments::created_at.eq(tournament.created_at),
            ))
            .execute(conn)?;

        Ok(tournament)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Option<Self>, Error> {
        Ok(tournaments::table
            .filter(tournaments::id.eq(id))
            .first::<Tournament>(conn)
            .optional()?)
    }

    pub fn set_current_round(
        &self,
        round: i64,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<(), Error> {
        diesel::update(tournaments::table.filter(tournaments::id.eq(&self.id)))
            .set(tournaments::current_round.eq(round))
            .execute(conn)?;
        Ok(())
    }
}
