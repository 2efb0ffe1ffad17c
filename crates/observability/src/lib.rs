//! Tracing/logging setup shared by QuantumStock binaries.

/// Initialize process-wide tracing with the format chosen by
/// `QUANTUMSTOCK_LOG_FORMAT` (`json`, the default, or `pretty`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use tracing::LogFormat;
