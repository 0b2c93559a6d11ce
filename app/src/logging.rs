//! Optional `tracing` subscriber for binaries and tests embedding `localfs`.
//!
//! The library only emits events; installing a subscriber is up to the
//! host. `init` is a convenience that reads its filter from `LOCALFS_LOG`.

use std::env;

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `localfs=debug`.
pub const LOG_ENV: &str = "LOCALFS_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install a compact stderr subscriber. Returns `false` when a global
/// subscriber was already set, so repeated calls are harmless.
pub fn init() -> bool {
    fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter())
        .try_init()
        .is_ok()
}

fn build_filter() -> EnvFilter {
    match env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => EnvFilter::new(value),
        _ => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let _ = init();
        assert!(!init(), "second init must not replace the subscriber");
    }
}
