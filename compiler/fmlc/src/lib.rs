//! Library half of the `fml` driver.
//!
//! `main.rs` only dispatches on the subcommand; argument parsing and the
//! commands themselves live here so they can be tested without a process.

pub mod args;
pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set. With `FML_LOG_TREE` also set, spans
/// render as an indented tree instead of flat lines. Safe to call twice.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let tree = std::env::var_os("FML_LOG_TREE").is_some();
        let tree_layer = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        });
        let flat_layer = (!tree).then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
        });
        tracing_subscriber::registry()
            .with(tree_layer)
            .with(flat_layer)
            .with(filter)
            .init();
    });
}
