use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use super::{LexiconPaths, POSITION_BYTES, TERMINATOR, UNUSED_OFFSET};
use crate::error::{display_word, LexiconError, Result};
use crate::Id;

/// Streams a sorted lexicon into a directory.
///
/// Words must arrive in strictly ascending byte order, which is exactly what
/// a sorted traversal of the trie produces. The word store and the sorted
/// identifier file are appended as words arrive; the offset index is kept in
/// memory and written by [`finish`](Self::finish).
///
/// Dropping a writer without calling `finish` leaves the directory without a
/// usable offset index.
pub struct DiskLexiconWriter {
    paths: LexiconPaths,
    lexicon: BufWriter<File>,
    sorted: BufWriter<File>,
    /// Word-store offset per identifier.
    offsets: Vec<u32>,
    written: u64,
    previous: Option<Vec<u8>>,
    count: usize,
}

impl DiskLexiconWriter {
    /// Creates (or truncates) the lexicon files in `dir`, creating the
    /// directory if needed.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| LexiconError::io(dir, e))?;
        let paths = LexiconPaths::new(dir);

        let lexicon = create_file(&paths.lexicon)?;
        let sorted = create_file(&paths.sorted)?;
        debug!(dir = %dir.display(), "created lexicon files");

        Ok(Self {
            paths,
            lexicon,
            sorted,
            offsets: Vec::new(),
            written: 0,
            previous: None,
            count: 0,
        })
    }

    /// Appends `word` under `id`.
    pub fn write(&mut self, word: &[u8], id: Id) -> Result<()> {
        if word.contains(&TERMINATOR) {
            return Err(LexiconError::InvalidWord(display_word(word)));
        }
        if id == UNUSED_OFFSET {
            return Err(LexiconError::ReservedId(id));
        }
        if let Some(previous) = &self.previous {
            if previous.as_slice() >= word {
                return Err(LexiconError::OutOfOrder {
                    previous: display_word(previous),
                    word: display_word(word),
                });
            }
        }
        let offset = u32::try_from(self.written)
            .ok()
            .filter(|&offset| offset != UNUSED_OFFSET)
            .ok_or(LexiconError::StoreTooLarge)?;

        let slot = id as usize;
        if slot >= self.offsets.len() {
            self.offsets.resize(slot + 1, UNUSED_OFFSET);
        }
        if self.offsets[slot] != UNUSED_OFFSET {
            return Err(LexiconError::DuplicateId(id));
        }

        let lexicon_path = &self.paths.lexicon;
        self.lexicon
            .write_all(word)
            .and_then(|()| self.lexicon.write_all(&[TERMINATOR]))
            .map_err(|e| LexiconError::io(lexicon_path, e))?;
        self.sorted
            .write_all(&id.to_le_bytes())
            .map_err(|e| LexiconError::io(&self.paths.sorted, e))?;

        self.offsets[slot] = offset;
        self.written += word.len() as u64 + 1;
        self.count += 1;
        match &mut self.previous {
            Some(previous) => {
                previous.clear();
                previous.extend_from_slice(word);
            }
            None => self.previous = Some(word.to_vec()),
        }
        Ok(())
    }

    /// Number of words written so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Writes the offset index and flushes every file to disk.
    ///
    /// Returns the number of words written.
    pub fn finish(self) -> Result<usize> {
        let Self {
            paths,
            lexicon,
            sorted,
            offsets,
            written,
            count,
            ..
        } = self;

        sync(lexicon, &paths.lexicon)?;
        sync(sorted, &paths.sorted)?;

        let mut indices = create_file(&paths.indices)?;
        let mut buf = Vec::with_capacity(offsets.len() * POSITION_BYTES);
        for offset in &offsets {
            buf.extend_from_slice(&offset.to_le_bytes());
        }
        indices
            .write_all(&buf)
            .map_err(|e| LexiconError::io(&paths.indices, e))?;
        sync(indices, &paths.indices)?;

        info!(
            words = count,
            store_bytes = written,
            id_slots = offsets.len(),
            path = %paths.lexicon.display(),
            "wrote lexicon"
        );
        Ok(count)
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| LexiconError::io(path, e))
}

fn sync(writer: BufWriter<File>, path: &Path) -> Result<()> {
    let file = writer
        .into_inner()
        .map_err(|e| LexiconError::io(path, e.into_error()))?;
    file.sync_all().map_err(|e| LexiconError::io(path, e))
}
