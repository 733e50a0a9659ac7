//! Shared test setup.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=lexicon=debug,hat_trie=debug`) to see the
//! events emitted while tests run.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a console subscriber once per test binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .compact()
            .try_init();
    });
}

/// Deterministic pseudo-words over a small alphabet, with duplicates.
pub fn words(n: usize, seed: u64) -> Vec<Vec<u8>> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let len = rng.gen_range(0..10);
            (0..len).map(|_| rng.gen_range(b'a'..=b'f')).collect()
        })
        .collect()
}
