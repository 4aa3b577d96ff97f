//! The one [`Database`] implementation this workspace ships: a plain in-memory table store.
//!
//! MDBX itself is explicitly out of scope, so there is nothing to page to disk. `Rc<RefCell<_>>`
//! gives cursors a handle onto the same tables the database reads and writes, which is sound here
//! because the whole execution core is single-threaded by construction (§5) — there is no
//! `Send`/`Sync` bound to satisfy.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::rc::Rc;

use execore_errors::ProviderError;
use execore_storage_api::{Cursor, Database, Table};

type TableMap = BTreeMap<Vec<u8>, Vec<u8>>;

#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Rc<RefCell<HashMap<Table, TableMap>>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Database for InMemoryDatabase {
    fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, ProviderError> {
        Ok(self.tables.borrow().get(&table).and_then(|map| map.get(key).cloned()))
    }

    fn put(&mut self, table: Table, key: Vec<u8>, value: Vec<u8>) -> Result<(), ProviderError> {
        self.tables.borrow_mut().entry(table).or_default().insert(key, value);
        Ok(())
    }

    fn delete(&mut self, table: Table, key: &[u8]) -> Result<(), ProviderError> {
        if let Some(map) = self.tables.borrow_mut().get_mut(&table) {
            map.remove(key);
        }
        Ok(())
    }

    fn cursor(&self, table: Table) -> Box<dyn Cursor> {
        Box::new(InMemoryCursor { tables: Rc::clone(&self.tables), table, current_key: None })
    }
}

struct InMemoryCursor {
    tables: Rc<RefCell<HashMap<Table, TableMap>>>,
    table: Table,
    current_key: Option<Vec<u8>>,
}

impl Cursor for InMemoryCursor {
    fn seek(&mut self, key: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
        let tables = self.tables.borrow();
        let map = tables.get(&self.table)?;
        let entry = map.range(key.to_vec()..).next().map(|(k, v)| (k.clone(), v.clone()));
        self.current_key = entry.as_ref().map(|(k, _)| k.clone());
        entry
    }

    fn next(&mut self) -> Option<(Vec<u8>, Vec<u8>)> {
        let tables = self.tables.borrow();
        let map = tables.get(&self.table)?;
        let current = self.current_key.clone()?;
        let entry = map
            .range((Bound::Excluded(current), Bound::Unbounded))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()));
        self.current_key = entry.as_ref().map(|(k, _)| k.clone());
        entry
    }

    fn prev(&mut self) -> Option<(Vec<u8>, Vec<u8>)> {
        let tables = self.tables.borrow();
        let map = tables.get(&self.table)?;
        let current = self.current_key.clone()?;
        let entry = map.range::<Vec<u8>, _>(..current).next_back().map(|(k, v)| (k.clone(), v.clone()));
        self.current_key = entry.as_ref().map(|(k, _)| k.clone());
        entry
    }

    fn erase(&mut self) {
        let Some(key) = self.current_key.clone() else { return };
        if let Some(map) = self.tables.borrow_mut().get_mut(&self.table) {
            map.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let mut db = InMemoryDatabase::new();
        db.put(Table::Code, b"key".to_vec(), b"value".to_vec()).unwrap();
        assert_eq!(db.get(Table::Code, b"key").unwrap(), Some(b"value".to_vec()));
    }

    #[test]
    fn delete_removes_the_entry() {
        let mut db = InMemoryDatabase::new();
        db.put(Table::Code, b"key".to_vec(), b"value".to_vec()).unwrap();
        db.delete(Table::Code, b"key").unwrap();
        assert_eq!(db.get(Table::Code, b"key").unwrap(), None);
    }

    #[test]
    fn cursor_walks_keys_in_ascending_order() {
        let mut db = InMemoryDatabase::new();
        db.put(Table::Headers, vec![1], b"a".to_vec()).unwrap();
        db.put(Table::Headers, vec![3], b"c".to_vec()).unwrap();
        db.put(Table::Headers, vec![2], b"b".to_vec()).unwrap();

        let mut cursor = db.cursor(Table::Headers);
        assert_eq!(cursor.seek(&[0]), Some((vec![1], b"a".to_vec())));
        assert_eq!(cursor.next(), Some((vec![2], b"b".to_vec())));
        assert_eq!(cursor.next(), Some((vec![3], b"c".to_vec())));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn cursor_erase_removes_the_current_entry_from_the_table() {
        let mut db = InMemoryDatabase::new();
        db.put(Table::Headers, vec![1], b"a".to_vec()).unwrap();
        {
            let mut cursor = db.cursor(Table::Headers);
            cursor.seek(&[1]);
            cursor.erase();
        }
        assert_eq!(db.get(Table::Headers, &[1]).unwrap(), None);
    }
}
