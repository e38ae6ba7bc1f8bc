//! Record persistence subsystem
//!
//! The fixed, narrow operation set over Model records: insert, upsert,
//! get, get_sorted, update, count, remove. Not a query language and not
//! an ORM; filters pass through to the backend untouched.
//!
//! # Invariants
//!
//! - `name` is the only identity key; upsert is keyed on it.
//! - Upserting the same name repeatedly leaves exactly one document,
//!   last metadata wins.
//! - Only upsert propagates a hard error; every other operation logs
//!   and returns a degraded result carrying the diagnostic.

mod errors;
mod ops;
mod outcome;
mod record;

pub use errors::{StoreError, StoreResult};
pub use ops::RecordStore;
pub use outcome::{CountOutcome, QueryOutcome, WriteOutcome};
pub use record::Record;
