//! # Entity Store
//!
//! Ordered, insert-only collections keyed by a per-collection id.
//!
//! ## Id Assignment
//! ```text
//! existing ids: [1, 2]        next_id() = max(1, 2, 0) + 1 = 3
//! existing ids: []            next_id() = max(0) + 1       = 1
//! ```
//! There is no delete, so the max only grows and an id is never handed out
//! twice.
//!
//! ## Ordering
//! Rows keep insertion order. Updates go through [`Table::get_mut`] and never
//! move a row.

use serde::Serialize;

/// An id type owned by one collection.
pub trait EntityId: Copy + Eq + Ord {
    fn from_raw(raw: u32) -> Self;
    fn raw(self) -> u32;
}

/// A row that can live in a [`Table`].
pub trait Entity {
    type Id: EntityId;

    fn id(&self) -> Self::Id;
}

/// One collection of the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table { rows: Vec::new() }
    }
}

impl<T: Entity> Table<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next inserted row will get.
    pub fn next_id(&self) -> T::Id {
        let max = self.rows.iter().map(|row| row.id().raw()).max().unwrap_or(0);
        T::Id::from_raw(max.saturating_add(1))
    }

    /// Appends a row built from the next id and returns it.
    pub fn insert_with(&mut self, build: impl FnOnce(T::Id) -> T) -> &T {
        let row = build(self.next_id());
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.rows.iter_mut().find(|row| row.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    /// First row in insertion order.
    pub fn first(&self) -> Option<&T> {
        self.rows.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.rows
    }

    pub fn as_slice(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a, T: Entity> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Item, ItemId};

    #[test]
    fn test_next_id_starts_at_one() {
        let table: Table<Item> = Table::new();
        assert_eq!(table.next_id(), ItemId(1));
    }

    #[test]
    fn test_next_id_follows_max() {
        let mut table = Table::new();
        table.insert_with(Item::new);
        table.insert_with(Item::new);
        assert_eq!(table.next_id(), ItemId(3));

        let third = table.insert_with(Item::new).id;
        assert_eq!(third, ItemId(3));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut table = Table::new();
        for _ in 0..4 {
            table.insert_with(Item::new);
        }
        table.get_mut(ItemId(2)).unwrap().product = "Book".to_string();

        let ids: Vec<u32> = table.iter().map(|item| item.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(table.get(ItemId(2)).unwrap().product, "Book");
    }

    #[test]
    fn test_lookup_missing_id() {
        let mut table = Table::new();
        table.insert_with(Item::new);
        assert!(table.get(ItemId(9)).is_none());
        assert!(!table.contains(ItemId(0)));
    }
}
