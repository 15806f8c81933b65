//! ThreadStateMachine - per-message thread lifecycle
//!
//! `NoThread -> Open -> Archived`, with `Archived -> Open` (reopen) as the
//! only way back. State is never stored; it is rebuilt from the channel's
//! thread list on every event.

use pinbot_core::entities::{MessageSnapshot, ThreadInfo};
use pinbot_core::Snowflake;

use super::classifier::Intent;
use super::gate::{GateDecision, ThresholdGate};

/// Thread state of one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadState {
    NoThread,
    Open(ThreadInfo),
    Archived(ThreadInfo),
    /// The platform flags a thread on the message but none is listed
    Inconsistent,
}

impl ThreadState {
    /// Locate the thread anchored to `message` among the channel's threads
    pub fn locate(message: &MessageSnapshot, threads: &[ThreadInfo]) -> Self {
        match threads.iter().find(|t| t.is_anchored_to(message.id)) {
            Some(thread) if thread.archived => Self::Archived(thread.clone()),
            Some(thread) => Self::Open(thread.clone()),
            None if message.has_thread() => Self::Inconsistent,
            None => Self::NoThread,
        }
    }
}

/// What a qualifying thread-marker reaction should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadTransition {
    /// `NoThread -> Open`
    Create,
    /// `Archived -> Open`
    Reopen(Snowflake),
    /// Thread is live; only clear the marker
    ClearMarker,
    /// Below threshold, disabled, or state unknown
    Hold,
}

pub struct ThreadStateMachine;

impl ThreadStateMachine {
    /// Limit that applies in `state`; archived threads reopen at a reduced limit
    pub fn effective_limit(state: &ThreadState, limit: u32) -> Option<u32> {
        match state {
            ThreadState::NoThread => Some(limit),
            ThreadState::Archived(_) => Some(ThresholdGate::reopen_limit(limit)),
            ThreadState::Open(_) | ThreadState::Inconsistent => None,
        }
    }

    /// Decide the transition for `reactors` distinct thread-marker reactors
    ///
    /// A live thread always gets its marker cleared, even when threads are
    /// disabled for the channel.
    pub fn decide(state: &ThreadState, reactors: u32, limit: u32) -> ThreadTransition {
        match state {
            ThreadState::Open(_) => ThreadTransition::ClearMarker,
            _ if limit == 0 => ThreadTransition::Hold,
            ThreadState::Inconsistent => ThreadTransition::Hold,
            ThreadState::NoThread | ThreadState::Archived(_) => {
                let limit = Self::effective_limit(state, limit);
                match (ThresholdGate::should_fire(Intent::Thread, reactors, limit), state) {
                    (GateDecision::Fire, ThreadState::Archived(thread)) => {
                        ThreadTransition::Reopen(thread.id)
                    }
                    (GateDecision::Fire, _) => ThreadTransition::Create,
                    (GateDecision::Wait | GateDecision::NotApplicable, _) => ThreadTransition::Hold,
                }
            }
        }
    }
}
