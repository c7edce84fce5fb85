//! Optional trace output for debugging the compiler itself.

use std::sync::Once;

/// Variable holding the `EnvFilter` directives, e.g.
/// `ZEUS_LOG=zeus_codegen=trace`.
pub const LOG_ENV: &str = "ZEUS_LOG";

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical subscriber writing to stderr.
///
/// Call this once at startup. Safe to call multiple times. Does nothing
/// unless `ZEUS_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var(LOG_ENV).is_ok() {
            let filter = EnvFilter::from_env(LOG_ENV);
            tracing_subscriber::registry()
                .with(
                    HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
