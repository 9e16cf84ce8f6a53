//! Owned, lock-guarded catalog handle for concurrent request handlers.

use crate::catalog::{Catalog, LaunchId};
use crate::launch::{LaunchError, LaunchPlan};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug)]
/// Cheap-to-clone handle on one catalog instance.
///
/// The only mutation, [`Catalog::resort`], happens together with the read
/// that follows it under a single guard, so readers never see a catalog
/// mid-sort.
pub struct SharedCatalog {
    inner: Arc<Mutex<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Re-sort, then hand the catalog to `read` while still holding the guard.
    pub fn sorted_view<R>(&self, read: impl FnOnce(&Catalog) -> R) -> R {
        let mut catalog = self.lock();
        catalog.resort();
        read(&catalog)
    }

    /// Resolve `id` to a launch plan. The guard is released on return.
    pub fn resolve(&self, id: LaunchId) -> Result<LaunchPlan, LaunchError> {
        LaunchPlan::resolve(&self.lock(), id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }
}
