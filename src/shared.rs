use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::Result;
use crate::index::{IndexOptions, WordIndex};

/// A [`WordIndex`] shared between threads.
///
/// Loading and unloading hold the write lock until they finish. Checks only
/// take the read lock and may run alongside each other.
#[derive(Clone, Debug, Default)]
pub struct SharedIndex(Arc<RwLock<WordIndex>>);

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: IndexOptions) -> Self {
        Self(Arc::new(RwLock::new(WordIndex::with_options(options))))
    }

    pub fn load<R: BufRead>(&self, source: R) -> Result<usize> {
        self.0.write().load(source)
    }

    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        self.0.write().load_file(path)
    }

    pub fn check<T: AsRef<[u8]>>(&self, word: T) -> bool {
        self.0.read().check(word)
    }

    pub fn size(&self) -> usize {
        self.0.read().size()
    }

    pub fn unload(&self) {
        self.0.write().unload();
    }

    /// Holds the read lock for a batch of lookups.
    pub fn read(&self) -> RwLockReadGuard<'_, WordIndex> {
        self.0.read()
    }
}
