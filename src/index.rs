//! Fixed-size chained hash index over a word list.
//!
//! Words are folded to ASCII lowercase, hashed with a shift/xor rolling hash
//! into one of [`BUCKETS`] slots and prepended to that slot's chain. The
//! bucket count never changes for the lifetime of an index.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::{LoadError, Result};

/// Number of buckets in every index.
pub const BUCKETS: usize = 3000;

/// Longest word, in bytes, an index stores by default.
pub const MAX_WORD_LENGTH: usize = 45;

pub const DEFAULT_MAX_WORD_LENGTH: NonZeroUsize = match NonZeroUsize::new(MAX_WORD_LENGTH) {
    Some(max) => max,
    None => panic!("MAX_WORD_LENGTH must be non-zero"),
};

/// What to do with a word-list token longer than the configured maximum.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    #[default]
    Skip,
    Truncate,
    Reject,
}

impl FromStr for OversizePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(OversizePolicy::Skip),
            "truncate" => Ok(OversizePolicy::Truncate),
            "reject" => Ok(OversizePolicy::Reject),
            other => Err(format!(
                "unknown oversize policy `{other}`, expected skip, truncate or reject"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Non-zero, so truncation can never store an empty word.
    pub max_word_length: NonZeroUsize,
    pub oversize: OversizePolicy,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
            oversize: OversizePolicy::default(),
        }
    }
}

struct Entry {
    word: Box<[u8]>,
    next: Option<Box<Entry>>,
}

/// Load distribution of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    pub entries: usize,
    pub occupied_buckets: usize,
    pub longest_chain: usize,
}

pub struct WordIndex {
    buckets: Vec<Option<Box<Entry>>>,
    count: usize,
    options: IndexOptions,
}

/// Folds ASCII uppercase letters to lowercase. Every other byte is kept as is.
pub fn normalize<T: AsRef<[u8]>>(word: T) -> Vec<u8> {
    word.as_ref().to_ascii_lowercase()
}

/// Maps a normalized word to its bucket in `0..BUCKETS`.
///
/// Each byte is xored in as its unsigned value, so bytes `0x80..=0xFF` are not
/// sign-extended the way a signed C `char` would be. Buckets for non-ASCII
/// words therefore differ from a signed-char implementation; ASCII words land
/// in the same buckets.
pub fn hash<T: AsRef<[u8]>>(word: T) -> usize {
    let acc = word
        .as_ref()
        .iter()
        .fold(0u32, |acc, &byte| (acc << 2) ^ u32::from(byte));
    acc as usize % BUCKETS
}

impl WordIndex {
    pub fn new() -> Self {
        Self::with_options(IndexOptions::default())
    }

    pub fn with_options(options: IndexOptions) -> Self {
        let mut buckets = Vec::with_capacity(BUCKETS);
        buckets.resize_with(BUCKETS, || None);
        Self {
            buckets,
            count: 0,
            options,
        }
    }

    pub fn options(&self) -> IndexOptions {
        self.options
    }

    /// Opens `path` and loads every word in it.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        self.ensure_empty()?;
        let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loading word list from {}", path.display());
        self.load(BufReader::new(file))
    }

    /// Reads whitespace-delimited words from `source` until it is exhausted.
    ///
    /// Returns how many words were inserted. On a read error the words already
    /// inserted stay in the index and are counted by [`WordIndex::size`].
    pub fn load<R: BufRead>(&mut self, mut source: R) -> Result<usize> {
        self.ensure_empty()?;

        let mut inserted = 0;
        let mut line = Vec::new();
        let mut line_no = 0;
        loop {
            line.clear();
            if source.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_no += 1;

            for token in line
                .split(|b| b.is_ascii_whitespace())
                .filter(|t| !t.is_empty())
            {
                let token = match self.fit(token, line_no)? {
                    Some(token) => token,
                    None => continue,
                };
                self.insert(normalize(token));
                inserted += 1;
            }
        }

        let stats = self.stats();
        debug!(
            "loaded {} words into {} buckets, longest chain {}",
            inserted, stats.occupied_buckets, stats.longest_chain
        );
        Ok(inserted)
    }

    fn ensure_empty(&self) -> Result<()> {
        if self.count > 0 {
            return Err(LoadError::AlreadyLoaded {
                entries: self.count,
            });
        }
        Ok(())
    }

    fn fit<'a>(&self, token: &'a [u8], line: usize) -> Result<Option<&'a [u8]>> {
        let max = self.options.max_word_length.get();
        if token.len() <= max {
            return Ok(Some(token));
        }
        match self.options.oversize {
            OversizePolicy::Skip => {
                warn!(
                    "skipping {} byte word on line {}, maximum is {}",
                    token.len(),
                    line,
                    max
                );
                Ok(None)
            }
            OversizePolicy::Truncate => Ok(Some(&token[..max])),
            OversizePolicy::Reject => Err(LoadError::OversizeWord {
                line,
                length: token.len(),
                max,
            }),
        }
    }

    fn insert(&mut self, word: Vec<u8>) {
        let slot = &mut self.buckets[hash(&word)];
        let next = slot.take();
        *slot = Some(Box::new(Entry {
            word: word.into_boxed_slice(),
            next,
        }));
        self.count += 1;
    }

    /// Case-insensitive membership test. An empty index contains nothing.
    pub fn check<T: AsRef<[u8]>>(&self, word: T) -> bool {
        let word = word.as_ref();
        if word.len() > self.options.max_word_length.get() {
            return false;
        }
        let lowered = normalize(word);
        let mut seek = self.buckets[hash(&lowered)].as_deref();
        while let Some(entry) = seek {
            if *entry.word == *lowered {
                return true;
            }
            seek = entry.next.as_deref();
        }
        false
    }

    pub fn size(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_loaded(&self) -> bool {
        !self.is_empty()
    }

    /// Releases every entry and returns the index to its freshly created state.
    pub fn unload(&mut self) {
        let released = self.release_all();
        if released > 0 {
            debug!("unloaded {} words", released);
        }
    }

    fn release_all(&mut self) -> usize {
        let mut released = 0;
        for slot in self.buckets.iter_mut() {
            let mut seek = slot.take();
            while let Some(mut entry) = seek {
                seek = entry.next.take();
                drop(entry);
                released += 1;
            }
        }
        self.count = 0;
        released
    }

    /// Bucket an arbitrary-case word would be stored in.
    pub fn bucket_of<T: AsRef<[u8]>>(&self, word: T) -> usize {
        hash(normalize(word))
    }

    pub fn chain_len(&self, bucket: usize) -> usize {
        let mut len = 0;
        let mut seek = self.buckets.get(bucket).and_then(|b| b.as_deref());
        while let Some(entry) = seek {
            len += 1;
            seek = entry.next.as_deref();
        }
        len
    }

    pub fn stats(&self) -> IndexStats {
        (0..BUCKETS)
            .map(|bucket| self.chain_len(bucket))
            .filter(|&len| len > 0)
            .fold(IndexStats::default(), |mut stats, len| {
                stats.entries += len;
                stats.occupied_buckets += 1;
                stats.longest_chain = stats.longest_chain.max(len);
                stats
            })
    }

    /// Stored words, bucket by bucket, most recently loaded first within a bucket.
    pub fn iter(&self) -> Words<'_> {
        Words {
            buckets: self.buckets.iter(),
            current: None,
        }
    }
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WordIndex {
    // Chains are released iteratively; the derived drop would recurse once per entry.
    fn drop(&mut self) {
        self.release_all();
    }
}

impl fmt::Debug for WordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordIndex")
            .field("buckets", &BUCKETS)
            .field("count", &self.count)
            .field("options", &self.options)
            .finish()
    }
}

pub struct Words<'a> {
    buckets: std::slice::Iter<'a, Option<Box<Entry>>>,
    current: Option<&'a Entry>,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current {
                self.current = entry.next.as_deref();
                return Some(&entry.word);
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }
}
