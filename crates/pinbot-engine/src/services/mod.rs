//! Engine services
//!
//! Pure decision components (resolver fallback, classifier, gate, thread
//! state machine, tier clamp) plus the services that drive them against the
//! platform and the preference store.

pub mod audit;
pub mod bookmark;
pub mod classifier;
pub mod context;
pub mod engine;
pub mod error;
pub mod executor;
pub mod gate;
pub mod intents;
pub mod preferences;
pub mod resolver;
pub mod thread_state;
pub mod tier_clamp;

pub use audit::AUDIT_TARGET;
pub use classifier::{Classification, IgnoreReason, Intent, ReactionClassifier};
pub use context::{EngineContext, EngineContextBuilder, EngineSettings};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use executor::ActionExecutor;
pub use gate::{GateDecision, ThresholdGate};
pub use intents::{IntentHandler, IntentRequest};
pub use preferences::PreferenceService;
pub use resolver::ConfigResolver;
pub use thread_state::{ThreadState, ThreadStateMachine, ThreadTransition};
pub use tier_clamp::GuildTierClamp;
