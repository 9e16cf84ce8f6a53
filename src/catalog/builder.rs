//! Sorted, categorised view of a set of entries.
//!
//! A [`Catalog`] is built once from an [`EntrySource`]: entries are stably
//! sorted by normalized title, grouped into categories by the first letter of
//! that title, and numbered `0..n` in their final order. The numbering doubles
//! as the index into `entries`, which keeps launch lookups O(1).

use crate::catalog::model::{Category, Entry, EntrySource, LaunchId, LoadError};
use crate::catalog::title::{category_key, normalize};
use serde::Serialize;
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
    entries: Vec<Entry>,
}

impl Catalog {
    /// Read `source` once and build a catalog from its entries.
    pub fn build<S: EntrySource + ?Sized>(source: &S) -> Result<Self, LoadError> {
        let catalog = Self::from_entries(source.read_entries()?);
        info!(
            entries = catalog.entries.len(),
            categories = catalog.categories.len(),
            "catalog built"
        );
        Ok(catalog)
    }

    /// Sort, categorise and number `entries`.
    ///
    /// Any `category` or `launch_id` already present on the entries is
    /// replaced.
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        sort_by_title(&mut entries);

        let mut categories: Vec<Category> = Vec::new();
        for (launch_id, entry) in entries.iter_mut().enumerate() {
            let key = category_key(&normalize(&entry.title));
            if categories.last().map(|c| c.name.as_str()) != Some(key.as_str()) {
                categories.push(Category::keyed(&key));
            }
            entry.category = key;
            entry.launch_id = launch_id;
        }

        Self {
            categories,
            entries,
        }
    }

    /// Stable re-sort of the entries by normalized title.
    ///
    /// A built catalog is already in this order, so launch ids, categories
    /// and their order all survive unchanged.
    pub fn resort(&mut self) {
        sort_by_title(&mut self.entries);
    }

    /// Entry carrying `id`, if any.
    pub fn entry(&self, id: LaunchId) -> Option<&Entry> {
        match self.entries.get(id) {
            Some(entry) if entry.launch_id == id => Some(entry),
            _ => self.entries.iter().find(|entry| entry.launch_id == id),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Each category paired with its run of entries, in catalog order.
    ///
    /// Runs are positional, so two categories that happen to share a name
    /// still list only their own entries.
    pub fn sections(&self) -> Vec<Section<'_>> {
        let mut rest = self.entries.as_slice();
        self.categories
            .iter()
            .map(|category| {
                let run = rest
                    .iter()
                    .take_while(|entry| entry.category == category.name)
                    .count();
                let (entries, tail) = rest.split_at(run);
                rest = tail;
                Section { category, entries }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One category and the entries filed under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Section<'a> {
    pub category: &'a Category,
    pub entries: &'a [Entry],
}

fn sort_by_title(entries: &mut [Entry]) {
    // sort_by_cached_key is stable; ties keep their input order.
    entries.sort_by_cached_key(|entry| normalize(&entry.title));
}
