use execore_errors::ProviderError;

/// The key-value tables the backing store (§6) is organized into.
///
/// `AccountChangeSet`/`StorageChangeSet` are keyed by `be64(block_number)` (optionally followed
/// by `address`/`address || incarnation || storage_key`, see [`crate::convert_to_db_format`]) and
/// hold the prior value overwritten by that block, so a block can be inverted without
/// re-executing history. `Headers`/`Bodies`/`Receipts` are keyed by `block_number || hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
    PlainState,
    AccountChangeSet,
    StorageChangeSet,
    Code,
    CanonicalHeaders,
    Headers,
    Bodies,
    Receipts,
}

impl Table {
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlainState => "PlainState",
            Self::AccountChangeSet => "AccountChangeSet",
            Self::StorageChangeSet => "StorageChangeSet",
            Self::Code => "Code",
            Self::CanonicalHeaders => "CanonicalHeaders",
            Self::Headers => "Headers",
            Self::Bodies => "Bodies",
            Self::Receipts => "Receipts",
        }
    }
}

/// The backing key-value store capability the World State and Blockchain Driver depend on (§6).
///
/// A single call is assumed to commit atomically; there is no separate transaction handle in
/// this narrow interface — `InMemoryDatabase` (the only implementation this crate ships; an
/// embedded on-disk database is out of scope) is trivially atomic since it never yields between
/// operations.
#[auto_impl::auto_impl(&mut, Box)]
pub trait Database {
    fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, ProviderError>;
    fn put(&mut self, table: Table, key: Vec<u8>, value: Vec<u8>) -> Result<(), ProviderError>;
    fn delete(&mut self, table: Table, key: &[u8]) -> Result<(), ProviderError>;

    /// An ordered cursor over `table`, for range scans and prefix erasure (unwind needs to erase
    /// every change-set entry at or above a given block).
    fn cursor(&self, table: Table) -> Box<dyn Cursor>;
}

/// An ordered cursor over one [`Table`], supporting the `seek`/`next`/`prev`/`erase` operations
/// §6 requires. Positioning is undefined (returns `None`/no-ops) until `seek` has been called
/// once.
pub trait Cursor {
    /// Positions the cursor at the first key `>= key`. Returns that entry, or `None` if no such
    /// key exists.
    fn seek(&mut self, key: &[u8]) -> Option<(Vec<u8>, Vec<u8>)>;
    /// Advances to the next key in ascending order.
    fn next(&mut self) -> Option<(Vec<u8>, Vec<u8>)>;
    /// Moves to the previous key in ascending order (i.e. the next-lowest key).
    fn prev(&mut self) -> Option<(Vec<u8>, Vec<u8>)>;
    /// Deletes the entry the cursor currently sits on.
    fn erase(&mut self);
}
