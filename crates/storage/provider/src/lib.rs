//! The World State (§4.C): [`CacheState`], an in-memory overlay with a journaled mutation model,
//! and [`InMemoryDatabase`], the sole [`execore_storage_api::Database`] implementation this
//! workspace ships.

mod codec;
mod journal;
mod memory_db;
mod state;

pub use codec::{decode_account, decode_account_opt, encode_account, encode_account_opt};
pub use memory_db::InMemoryDatabase;
pub use state::{decode_account_change_set_value, CacheState};
