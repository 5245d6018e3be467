//! Core types and rules for livecal.
//!
//! This crate holds everything the `livecal` CLI drives:
//! - `match_state` for the per-poll snapshot of live matches
//! - `end_time` for the event end-time policy
//! - `reconcile` for the create/update/no-op decision engine
//! - `report` for the human-readable change reporter
//! - `gateway` and `remote` for talking to a calendar provider
//! - `feed` for reading the score snapshot
//! - `sync` for reconciling one calendar against one tournament

pub mod config;
pub mod constants;
pub mod end_time;
pub mod error;
pub mod event;
pub mod feed;
pub mod gateway;
pub mod match_state;
pub mod reconcile;
pub mod remote;
pub mod report;
pub mod sync;
pub mod timestamp;

pub use error::{LiveCalError, LiveCalResult};
