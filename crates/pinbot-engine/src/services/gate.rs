//! ThresholdGate - compares distinct reactors against a resolved limit

use super::classifier::Intent;

/// What to do with a qualifying reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Threshold reached
    Fire,
    /// Not enough reactors yet; the next reaction re-evaluates from scratch
    Wait,
    /// Feature disabled or not configured at any scope
    NotApplicable,
}

pub struct ThresholdGate;

impl ThresholdGate {
    /// Decide whether an action fires.
    ///
    /// `reactors` must be the distinct-reactor count, not the number of
    /// add events.
    pub fn should_fire(intent: Intent, reactors: u32, limit: Option<u32>) -> GateDecision {
        let decision = match limit {
            None | Some(0) => GateDecision::NotApplicable,
            Some(limit) if reactors < limit => GateDecision::Wait,
            Some(_) => GateDecision::Fire,
        };
        tracing::trace!(?intent, reactors, ?limit, ?decision, "Threshold evaluated");
        decision
    }

    /// Limit required to reopen an archived thread: `ceil(limit * 3 / 4)`
    pub fn reopen_limit(limit: u32) -> u32 {
        limit - limit / 4
    }
}
