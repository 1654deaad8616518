use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "mountain_huts=info";
const VERBOSE_DIRECTIVE: &str = "mountain_huts=debug";

/// Initializes logging to stderr so stdout stays free for command output.
/// `RUST_LOG` takes precedence over the default directive.
pub fn init_logging(verbose: bool) {
    let directive = if verbose { VERBOSE_DIRECTIVE } else { DEFAULT_DIRECTIVE };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    // A second init (e.g. from tests) is harmless; keep the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
