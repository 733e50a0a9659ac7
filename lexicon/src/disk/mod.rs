//! On-disk lexicon.
//!
//! A lexicon directory holds three files:
//!
//! - `hat.lex`: every word followed by a single `0x00`, in ascending word order.
//! - `hat.lex.idx`: one little-endian `u32` per identifier at `id * 4`, the
//!   offset of that word in `hat.lex`. Identifiers that were never written
//!   hold `u32::MAX`.
//! - `hat.lex.srt`: little-endian `u32` identifiers in ascending word order,
//!   binary-searched to map a word back to its identifier.
//!
//! Files are written once by [`DiskLexiconWriter`] and memory-mapped read-only
//! by [`DiskLexiconReader`].

mod reader;
mod writer;

pub use reader::DiskLexiconReader;
pub use writer::DiskLexiconWriter;

use std::path::{Path, PathBuf};

/// Word store file name.
pub const LEXICON_FILE_NAME: &str = "hat.lex";
/// Offset index file name.
pub const INDICES_FILE_NAME: &str = "hat.lex.idx";
/// Sorted identifier file name.
pub const SORTED_FILE_NAME: &str = "hat.lex.srt";

const TERMINATOR: u8 = 0;
const POSITION_BYTES: usize = std::mem::size_of::<u32>();
const UNUSED_OFFSET: u32 = u32::MAX;

/// Paths of the three lexicon files inside one directory.
#[derive(Debug, Clone)]
struct LexiconPaths {
    lexicon: PathBuf,
    indices: PathBuf,
    sorted: PathBuf,
}

impl LexiconPaths {
    fn new(dir: &Path) -> Self {
        Self {
            lexicon: dir.join(LEXICON_FILE_NAME),
            indices: dir.join(INDICES_FILE_NAME),
            sorted: dir.join(SORTED_FILE_NAME),
        }
    }
}

#[inline]
fn read_u32(bytes: &[u8], position: usize) -> Option<u32> {
    let start = position.checked_mul(POSITION_BYTES)?;
    let chunk = bytes.get(start..start + POSITION_BYTES)?;
    let mut buf = [0u8; POSITION_BYTES];
    buf.copy_from_slice(chunk);
    Some(u32::from_le_bytes(buf))
}
