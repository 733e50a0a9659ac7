//! Export of the sorted trie into a finite state transducer.
//!
//! `fst` requires keys in ascending order, which the trie's traversal
//! guarantees, so the trie can be streamed straight into a builder.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fst::{Map, MapBuilder};
use hat_trie::HatTrie;
use tracing::info;

use crate::error::{LexiconError, Result};

/// Builds an in-memory FST map from every `(key, id)` pair of `trie`.
pub fn build_fst(trie: &HatTrie) -> Result<Map<Vec<u8>>> {
    let mut builder = MapBuilder::memory();
    feed(trie, &mut builder)?;
    let bytes = builder.into_inner()?;
    let fst_bytes = bytes.len();
    let map = Map::new(bytes)?;
    info!(keys = map.len(), fst_bytes, "built FST");
    Ok(map)
}

/// Streams every `(key, id)` pair of `trie` into an FST file at `path`.
pub fn write_fst(trie: &HatTrie, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| LexiconError::io(path, e))?;
    let mut builder = MapBuilder::new(BufWriter::new(file))?;
    feed(trie, &mut builder)?;

    let mut writer = builder.into_inner()?;
    writer.flush().map_err(|e| LexiconError::io(path, e))?;
    info!(keys = trie.len(), path = %path.display(), "wrote FST");
    Ok(())
}

fn feed<W: std::io::Write>(trie: &HatTrie, builder: &mut MapBuilder<W>) -> Result<()> {
    let mut iter = trie.iter();
    while let Some((key, id)) = iter.next_entry() {
        builder.insert(key, u64::from(id))?;
    }
    Ok(())
}
