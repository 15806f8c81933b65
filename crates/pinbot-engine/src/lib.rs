//! # pinbot-engine
//!
//! Application layer: the reaction-threshold automation engine, the
//! auto-thread and orphan-thread paths, and the configuration command surface.

pub mod dto;
pub mod services;

pub use dto::{
    AutoThreadEntry, CleanupOutcome, CreateOutcome, PreferenceChange, PreferenceEntry,
    ReactionOutcome, SetLimitRequest, ThreadSettings,
};
pub use services::{
    ActionExecutor, Classification, ConfigResolver, Engine, EngineContext, EngineContextBuilder,
    EngineError, EngineResult, EngineSettings, GateDecision, GuildTierClamp, IgnoreReason, Intent,
    PreferenceService, ReactionClassifier, ThreadState, ThreadStateMachine, ThreadTransition,
    ThresholdGate, AUDIT_TARGET,
};
