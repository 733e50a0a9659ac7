//! # lexicon
//!
//! Assigns compact integer identifiers to words and keeps them sorted, for
//! consumers such as finite-state automaton builders that need the whole
//! vocabulary in byte order.
//!
//! - [`Lexicon`]: in-memory word → ID map on a [`HatTrie`]. IDs are handed
//!   out sequentially from 0 in first-seen order.
//! - [`DiskLexiconWriter`] / [`DiskLexiconReader`]: the three-file on-disk
//!   format (word store, offset index, sorted IDs).
//! - [`build_fst`] / [`write_fst`]: export of the sorted lexicon as an
//!   `fst::Map`.
//!
//! ## Example
//!
//! ```rust
//! use lexicon::Lexicon;
//!
//! let mut lex = Lexicon::new();
//! assert_eq!(lex.add(b"pear")?, 0);
//! assert_eq!(lex.add(b"apple")?, 1);
//! assert_eq!(lex.add(b"pear")?, 0);
//!
//! let mut words = Vec::new();
//! lex.for_each_sorted(|word, id| words.push((word.to_vec(), id)));
//! assert_eq!(words, vec![(b"apple".to_vec(), 1), (b"pear".to_vec(), 0)]);
//! # Ok::<(), lexicon::LexiconError>(())
//! ```

#![warn(clippy::all)]

pub mod disk;
pub mod error;
mod fsa;

pub use disk::{DiskLexiconReader, DiskLexiconWriter};
pub use error::{LexiconError, Result};
pub use fsa::{build_fst, write_fst};

use std::path::Path;

use hat_trie::{HatTrie, TrieConfig};
use tracing::debug;

/// Word identifier.
pub type Id = hat_trie::Value;

/// An in-memory lexicon.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    trie: HatTrie,
    next_id: Id,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a lexicon whose trie uses `config`.
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            trie: HatTrie::with_config(config),
            next_id: 0,
        }
    }

    /// Returns the identifier of `word`, assigning the next free one if the
    /// word is new.
    ///
    /// Words may not contain a NUL byte since the on-disk store uses it as a
    /// terminator.
    pub fn add(&mut self, word: &[u8]) -> Result<Id> {
        if let Some(id) = self.trie.get(word) {
            return Ok(id);
        }
        if word.contains(&0) {
            return Err(LexiconError::InvalidWord(error::display_word(word)));
        }
        if self.next_id == Id::MAX {
            return Err(LexiconError::Exhausted);
        }

        let id = self.next_id;
        self.trie.insert(word, id);
        self.next_id += 1;
        Ok(id)
    }

    pub fn id(&self, word: &[u8]) -> Option<Id> {
        self.trie.get(word)
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Visits every word in ascending byte order.
    pub fn for_each_sorted<F>(&self, visit: F)
    where
        F: FnMut(&[u8], Id),
    {
        self.trie.for_each(visit);
    }

    /// The underlying trie.
    pub fn trie(&self) -> &HatTrie {
        &self.trie
    }

    /// Persists the lexicon into `dir` in the on-disk format.
    ///
    /// Returns the number of words written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<usize> {
        let mut writer = DiskLexiconWriter::create(dir)?;
        let mut iter = self.trie.iter();
        while let Some((word, id)) = iter.next_entry() {
            writer.write(word, id)?;
        }
        let stats = self.trie.stats();
        debug!(
            internal_nodes = stats.internal_nodes,
            hybrid_containers = stats.hybrid_containers,
            pure_containers = stats.pure_containers,
            bursts = stats.bursts,
            "lexicon trie shape"
        );
        writer.finish()
    }

    /// Builds an FST map of the lexicon.
    pub fn to_fst(&self) -> Result<fst::Map<Vec<u8>>> {
        build_fst(&self.trie)
    }
}

impl<W: AsRef<[u8]>> Extend<W> for Lexicon {
    /// Adds every word, skipping words that cannot be stored.
    fn extend<I: IntoIterator<Item = W>>(&mut self, iter: I) {
        for word in iter {
            if let Err(err) = self.add(word.as_ref()) {
                debug!(%err, "skipped word");
            }
        }
    }
}
