//! Seeds a demo tournament: four teams, a first-round draw with two debates,
//! and a submitted ranking for each assigned judge. Useful for poking at the
//! standings queries against a real database file.

use std::collections::HashMap;

use clap::Parser;
use diesel_migrations::MigrationHarness;
use itertools::Itertools;
use rand::seq::SliceRandom;
use ranktab::{
    MIGRATIONS,
    state::build_pool,
    tournaments::{
        Tournament,
        import::{DebateImport, RoundImport, SpeakerImport},
        rankings::submit_ranking,
        speakers::Position,
        standings::standings,
    },
};

#[derive(Parser)]
struct Args {
    database_url: Option<String>,
}

const TEAMS: [&str; 4] = [
    "Ashford A",
    "Beaumont",
    "Carlton",
    "Dunmore",
];

fn speakers_of_team(team: &str) -> Vec<SpeakerImport> {
    [Position::First, Position::Deputy, Position::Whip]
        .into_iter()
        .map(|position| SpeakerImport {
            id: format!("{}-{}", team.to_lowercase().replace(' ', "-"), position.as_str().to_lowercase()),
            name: format!("{} {}", team, position.as_str()),
            team: team.to_string(),
            position,
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt().init();

    let args = Args::parse();
    let db_url = if let Some(url) = args.database_url {
        url
    } else {
        std::env::var("DATABASE_URL").expect(
            "please either set `DATABASE_URL` or pass the database URL as an argument",
        )
    };

    let pool = build_pool(&db_url).unwrap();
    let mut conn = pool.get().unwrap();
    conn.run_pending_migrations(MIGRATIONS).unwrap();

    let tournament = Tournament::create("Demo Open", &mut conn).unwrap();

    let debates = vec![
        DebateImport {
            id: "demo-r1-d1".to_string(),
            venue: Some("Room 101".to_string()),
            aff_team: TEAMS[0].to_string(),
            neg_team: TEAMS[1].to_string(),
            speakers: [speakers_of_team(TEAMS[0]), speakers_of_team(TEAMS[1])]
                .concat(),
        },
        DebateImport {
            id: "demo-r1-d2".to_string(),
            venue: None,
            aff_team: TEAMS[2].to_string(),
            neg_team: TEAMS[3].to_string(),
            speakers: [speakers_of_team(TEAMS[2]), speakers_of_team(TEAMS[3])]
                .concat(),
        },
    ];

    let import = RoundImport {
        round: 1,
        debates: debates.clone(),
        judge_assignments: HashMap::from([
            ("judge-alex".to_string(), Some("demo-r1-d1".to_string())),
            ("judge-blair".to_string(), Some("demo-r1-d2".to_string())),
            ("judge-casey".to_string(), None),
        ]),
    };
    import.apply(&tournament.id, &mut conn).unwrap();

    let mut rng = rand::rng();
    for (judge_id, debate) in
        [("judge-alex", &debates[0]), ("judge-blair", &debates[1])]
    {
        let mut ranks = (1..=6i64).collect_vec();
        ranks.shuffle(&mut rng);

        let ranking_of_speaker: HashMap<String, i64> = debate
            .speakers
            .iter()
            .map(|s| s.id.clone())
            .zip(ranks)
            .collect();

        submit_ranking(judge_id, &debate.id, &ranking_of_speaker, &mut conn)
            .unwrap();
    }

    println!("seeded tournament {} ({})", tournament.name, tournament.id);
    let tab = standings(&tournament.id, None, &mut conn).unwrap();
    println!("{}", serde_json::to_string_pretty(&tab).unwrap());
}
