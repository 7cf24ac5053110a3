//! Scoring core for a six-speaker ranked debate league. Judges rank the six
//! speakers of each debate; rankings are converted to points (1st = 5, 6th =
//! 0), averaged across the judges of the debate into round scores, and rolled
//! into cumulative per-tournament speaker standings.
//!
//! The web layer, authentication and draw-file parsing live elsewhere: this
//! crate receives already-authenticated judge identities and a normalised
//! draw-import payload, and exposes plain data structures at its boundary.

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub mod error;
pub mod schema;
pub mod state;
pub mod tournaments;


pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
