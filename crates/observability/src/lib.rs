//! Tracing and logging setup shared by the storefront binaries.

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    let _ = tracing::init();
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;
