//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset.
fn default_directive(under_test: bool) -> &'static str {
    if under_test { "docsearch=debug" } else { "docsearch=info" }
}

/// Installs a global fmt subscriber. Safe to call multiple times; a
/// subscriber installed elsewhere first is left in place.
///
/// Under the test harness output goes through the captured test writer.
pub fn init() {
    INIT.call_once(|| {
        let under_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(under_test)));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .compact();

        let installed = if under_test {
            builder.with_test_writer().try_init()
        } else {
            builder.with_writer(std::io::stderr).try_init()
        };
        if let Err(e) = installed {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_init_installs_global_subscriber() {
        init();
        init();

        // Visible from a thread other than the one that ran `init`
        let enabled = std::thread::spawn(|| tracing::enabled!(tracing::Level::INFO))
            .join()
            .unwrap();
        check!(enabled);
    }

    #[test]
    fn test_default_directive_scopes_to_crate() {
        check!(default_directive(true) == "docsearch=debug");
        check!(default_directive(false) == "docsearch=info");
    }
}
