//! Email triage: keyword and heuristic classification of emails into
//! productive / unproductive, with a suggested reply and reasoning.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod store;
