//! Case lifecycle workflow engine for a legal practice.
//!
//! The engine models a firm's cases as a five-stage kanban board: `board`
//! owns the collection and the drag slot, `drag` is the gesture state
//! machine, `gateway` enforces the mutate-then-refetch contract against a
//! `store::CaseStore`, and `form` validates case creation. `server` and `db`
//! provide the record store the engine talks to; `ui` and the `docket`
//! binary render it all in a terminal.

pub mod board;
pub mod config;
pub mod db;
pub mod documents;
pub mod drag;
pub mod errors;
pub mod form;
pub mod gateway;
pub mod models;
pub mod research;
pub mod server;
pub mod stage;
pub mod store;
pub mod ui;

#[cfg(test)]
pub mod testing;
