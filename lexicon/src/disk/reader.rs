use std::cmp::Ordering;
use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::info;

use super::{read_u32, LexiconPaths, POSITION_BYTES, TERMINATOR, UNUSED_OFFSET};
use crate::error::{display_word, LexiconError, Result};
use crate::Id;

/// Read-only view of a lexicon directory written by
/// [`DiskLexiconWriter`](super::DiskLexiconWriter).
///
/// The three files are memory-mapped; lookups borrow words straight from
/// the mapping.
pub struct DiskLexiconReader {
    paths: LexiconPaths,
    lexicon: Option<Mmap>,
    indices: Option<Mmap>,
    sorted: Option<Mmap>,
}

impl DiskLexiconReader {
    /// Opens the lexicon stored in `dir` and checks its layout.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let paths = LexiconPaths::new(dir.as_ref());
        let reader = Self {
            lexicon: map_file(&paths.lexicon)?,
            indices: map_file(&paths.indices)?,
            sorted: map_file(&paths.sorted)?,
            paths,
        };

        if reader.indices().len() % POSITION_BYTES != 0 {
            return Err(LexiconError::corrupt(
                &reader.paths.indices,
                "length is not a multiple of 4",
            ));
        }
        if reader.sorted().len() % POSITION_BYTES != 0 {
            return Err(LexiconError::corrupt(
                &reader.paths.sorted,
                "length is not a multiple of 4",
            ));
        }
        if reader.lexicon().last().is_some_and(|&b| b != TERMINATOR) {
            return Err(LexiconError::corrupt(
                &reader.paths.lexicon,
                "last word is not NUL-terminated",
            ));
        }

        info!(
            words = reader.len(),
            store_bytes = reader.lexicon().len(),
            path = %reader.paths.lexicon.display(),
            "opened lexicon"
        );
        Ok(reader)
    }

    /// Number of words in the lexicon.
    pub fn len(&self) -> usize {
        self.sorted().len() / POSITION_BYTES
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the word stored under `id`, without its terminator.
    pub fn word(&self, id: Id) -> Result<&[u8]> {
        let offset = match read_u32(self.indices(), id as usize) {
            Some(UNUSED_OFFSET) | None => return Err(LexiconError::UnknownId(id)),
            Some(offset) => offset as usize,
        };

        let store = self.lexicon();
        let tail = store.get(offset..).ok_or_else(|| {
            LexiconError::corrupt(&self.paths.indices, "offset past end of word store")
        })?;
        let end = tail.iter().position(|&b| b == TERMINATOR).ok_or_else(|| {
            LexiconError::corrupt(&self.paths.lexicon, "word is not NUL-terminated")
        })?;
        Ok(&tail[..end])
    }

    /// Looks `word` up by binary search over the sorted identifier file.
    pub fn id(&self, word: &[u8]) -> Result<Id> {
        let mut lo = 0;
        let mut hi = self.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let id = self.sorted_id(mid)?;
            match self.word(id)?.cmp(word) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Ok(id),
            }
        }
        Err(LexiconError::UnknownWord(display_word(word)))
    }

    /// Iterates over `(word, id)` pairs in ascending word order.
    pub fn iter(&self) -> impl Iterator<Item = Result<(&[u8], Id)>> + '_ {
        (0..self.len()).map(move |position| {
            let id = self.sorted_id(position)?;
            Ok((self.word(id)?, id))
        })
    }

    fn sorted_id(&self, position: usize) -> Result<Id> {
        read_u32(self.sorted(), position)
            .ok_or_else(|| LexiconError::corrupt(&self.paths.sorted, "position out of range"))
    }

    fn lexicon(&self) -> &[u8] {
        bytes(&self.lexicon)
    }

    fn indices(&self) -> &[u8] {
        bytes(&self.indices)
    }

    fn sorted(&self) -> &[u8] {
        bytes(&self.sorted)
    }
}

/// Maps `path` read-only. Empty files are left unmapped.
fn map_file(path: &Path) -> Result<Option<Mmap>> {
    let file = File::open(path).map_err(|e| LexiconError::io(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| LexiconError::io(path, e))?
        .len();
    if len == 0 {
        return Ok(None);
    }
    // SAFETY: lexicon files are written once and never modified while a
    // reader has them open.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| LexiconError::io(path, e))?;
    Ok(Some(mmap))
}

#[inline]
fn bytes(map: &Option<Mmap>) -> &[u8] {
    map.as_deref().unwrap_or(&[])
}
