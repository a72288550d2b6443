use aila_core::{ActionKind, Database};
use chrono::Utc;
use clap::Subcommand;

use super::session;

#[derive(Subcommand)]
pub enum TrackAction {
    /// A person was added to the tree
    AddPerson,
    /// The tree was exported (GEDCOM/PDF)
    Export,
    /// The tree view was opened
    ViewTree,
}

#[derive(Subcommand)]
pub enum PersonsAction {
    /// Update the tree-size snapshot
    Set {
        /// Current number of persons in the tree
        count: u64,
    },
}

pub fn run(action: TrackAction) -> Result<(), Box<dyn std::error::Error>> {
    let kind = match action {
        TrackAction::AddPerson => ActionKind::AddPerson,
        TrackAction::Export => ActionKind::Export,
        TrackAction::ViewTree => ActionKind::ViewTree,
    };

    let db = Database::open()?;
    let (mut store, init_event) = session::load_store(&db);
    let event = store.track_action(kind, Utc::now());
    for e in init_event.iter().chain(event.iter()) {
        session::print_event(e);
    }
    session::save_store(&db, &store)
}

pub fn run_persons(action: PersonsAction) -> Result<(), Box<dyn std::error::Error>> {
    let PersonsAction::Set { count } = action;

    let db = Database::open()?;
    let (mut store, init_event) = session::load_store(&db);
    let event = store.set_persons_count(count, Utc::now());
    for e in init_event.iter().chain(event.iter()) {
        session::print_event(e);
    }
    session::save_store(&db, &store)
}
