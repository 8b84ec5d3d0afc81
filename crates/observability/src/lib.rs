//! Tracing and logging setup shared by the pantry binaries.

/// Initialize process-wide tracing with `default_level` as the fallback filter.
///
/// `RUST_LOG` takes precedence when set. This is safe to call multiple times;
/// subsequent calls become no-ops.
pub fn init(default_level: &str) {
    self::tracing::init(default_level);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
