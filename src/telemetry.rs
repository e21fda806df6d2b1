//! Opt-in tracing setup for hosts embedding the chart.
//!
//! The crate itself only emits `tracing` events. Hosts that already own a
//! subscriber can ignore this module entirely.

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "pie3d_rs=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature, or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"pie3d_rs=trace"` while debugging rebuilds.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::{init_default_tracing, init_tracing_with_fallback};

    #[test]
    fn tracing_init_is_a_no_op_without_feature() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_fallback("pie3d_rs=trace"));
    }
}
