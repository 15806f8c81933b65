//! Integration test utilities for the automation engine
//!
//! Provides an in-memory chat platform, event fixtures, an audit-record
//! recorder and a harness that wires the engine to them and to the
//! in-memory preference stores.

pub mod audit;
pub mod fixtures;

pub use audit::*;
pub use fakes::*;
pub use fixtures::*;
pub use harness::*;
