//! Tracing/logging setup shared by the binaries.

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event (services).
    #[default]
    Json,
    /// Human-readable lines (CLI tools).
    Pretty,
}

/// Initialize process-wide tracing with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json, "info");
}

/// Tracing configuration (filters, layers).
pub mod tracing;
