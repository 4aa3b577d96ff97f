//! Storage traits the execution core depends on (§6): a table-oriented key-value [`Database`]
//! with an ordered [`Cursor`], and a [`StateProvider`] for historical account/code reads. No
//! concrete backing store lives here — MDBX itself is out of scope (§1); `execore-provider`
//! supplies the one in-memory implementation this workspace ships.

mod convert;
mod database;
mod state_provider;

pub use convert::convert_to_db_format;
pub use database::{Cursor, Database, Table};
pub use state_provider::{EmptyStateProvider, StateProvider};
