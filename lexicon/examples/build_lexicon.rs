//! Builds a lexicon from whitespace-separated words and writes it to disk.
//!
//! ```text
//! cargo run -p lexicon --example build_lexicon -- words.txt out_dir/
//! ```
//!
//! Without arguments a small built-in text is used and the lexicon is written
//! to a temporary directory.

use std::env;
use std::fs;
use std::path::PathBuf;

use lexicon::{DiskLexiconReader, Lexicon};

const SAMPLE: &str = "the quick brown fox jumps over the lazy dog \
                      a quick brown dog jumps over a lazy fox";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let text = match args.next() {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let (out, _guard) = match args.next() {
        Some(dir) => (PathBuf::from(dir), None),
        None => {
            let tmp = tempfile::tempdir()?;
            (tmp.path().to_path_buf(), Some(tmp))
        }
    };

    let mut lex = Lexicon::new();
    for word in text.split_whitespace() {
        lex.add(word.as_bytes())?;
    }

    let stats = lex.trie().stats();
    println!("=== Lexicon ===\n");
    println!("Words: {}", lex.len());
    println!("Internal nodes: {}", stats.internal_nodes);
    println!(
        "Containers: {} pure, {} hybrid",
        stats.pure_containers, stats.hybrid_containers
    );
    println!("Bursts: {}", stats.bursts);
    println!("Approx heap: {} bytes\n", stats.heap_bytes);

    let written = lex.write_to(&out)?;
    println!("Wrote {} words to {}", written, out.display());

    let reader = DiskLexiconReader::open(&out)?;
    for entry in reader.iter().take(10) {
        let (word, id) = entry?;
        println!("{:>6}  {}", id, String::from_utf8_lossy(word));
    }

    let fst = lex.to_fst()?;
    println!("\nFST: {} keys, {} bytes", fst.len(), fst.as_fst().size());
    Ok(())
}
