//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as `blockfall::{core,input,term,types}`
//! and adds the pieces that tie them together for the terminal binary: the
//! event [`journal`] and the headless game [`session`].

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod journal;
pub mod session;

pub use journal::{Journal, JournalConfig, JournalRecord};
pub use session::Session;
