//! Audit sink
//!
//! Audit records are ordinary `tracing` events under a dedicated target so
//! they can be filtered or routed separately (`RUST_LOG=pinbot::audit=info`).
//! Every record carries `actor`, `channel` and `guild` fields.

/// Tracing target for audit records
pub const AUDIT_TARGET: &str = "pinbot::audit";

/// Joins reactor ids for an audit line
pub(crate) fn format_reactors(reactors: &[pinbot_core::Snowflake]) -> String {
    reactors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
