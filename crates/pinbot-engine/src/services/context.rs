//! Engine context - dependency container for engine services
//!
//! Holds the preference stores, the platform client and the bot's own settings.

use std::sync::Arc;

use pinbot_core::traits::{AutoThreadRepository, ChatPlatform, PreferenceRepository};
use pinbot_core::Snowflake;

use super::error::{EngineError, EngineResult};

/// Settings the engine needs about the bot itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// The bot's own user id
    pub bot_user_id: Snowflake,
    /// Longest message body the platform accepts
    pub max_message_length: usize,
}

impl EngineSettings {
    pub fn new(bot_user_id: Snowflake) -> Self {
        Self {
            bot_user_id,
            max_message_length: 2000,
        }
    }

    #[must_use]
    pub fn with_max_message_length(mut self, max: usize) -> Self {
        self.max_message_length = max;
        self
    }
}

/// Engine context containing all dependencies
///
/// Cheap to clone; every event task gets its own copy.
#[derive(Clone)]
pub struct EngineContext {
    preference_repo: Arc<dyn PreferenceRepository>,
    auto_thread_repo: Arc<dyn AutoThreadRepository>,
    platform: Arc<dyn ChatPlatform>,
    settings: EngineSettings,
}

impl EngineContext {
    /// Create a new engine context with all dependencies
    pub fn new(
        preference_repo: Arc<dyn PreferenceRepository>,
        auto_thread_repo: Arc<dyn AutoThreadRepository>,
        platform: Arc<dyn ChatPlatform>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            preference_repo,
            auto_thread_repo,
            platform,
            settings,
        }
    }

    // === Repositories ===

    /// Get the preference repository
    pub fn preference_repo(&self) -> &dyn PreferenceRepository {
        self.preference_repo.as_ref()
    }

    /// Get the auto-thread repository
    pub fn auto_thread_repo(&self) -> &dyn AutoThreadRepository {
        self.auto_thread_repo.as_ref()
    }

    // === Platform ===

    /// Get the chat platform client
    pub fn platform(&self) -> &dyn ChatPlatform {
        self.platform.as_ref()
    }

    // === Settings ===

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn bot_user_id(&self) -> Snowflake {
        self.settings.bot_user_id
    }
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("repositories", &"...")
            .field("platform", &"dyn ChatPlatform")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating EngineContext
#[derive(Default)]
pub struct EngineContextBuilder {
    preference_repo: Option<Arc<dyn PreferenceRepository>>,
    auto_thread_repo: Option<Arc<dyn AutoThreadRepository>>,
    platform: Option<Arc<dyn ChatPlatform>>,
    settings: Option<EngineSettings>,
}

impl EngineContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preference_repo(mut self, repo: Arc<dyn PreferenceRepository>) -> Self {
        self.preference_repo = Some(repo);
        self
    }

    pub fn auto_thread_repo(mut self, repo: Arc<dyn AutoThreadRepository>) -> Self {
        self.auto_thread_repo = Some(repo);
        self
    }

    pub fn platform(mut self, platform: Arc<dyn ChatPlatform>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the EngineContext
    ///
    /// # Errors
    /// Returns `EngineError::Validation` if any required dependency is missing
    pub fn build(self) -> EngineResult<EngineContext> {
        Ok(EngineContext::new(
            self.preference_repo
                .ok_or_else(|| EngineError::validation("preference_repo is required"))?,
            self.auto_thread_repo
                .ok_or_else(|| EngineError::validation("auto_thread_repo is required"))?,
            self.platform
                .ok_or_else(|| EngineError::validation("platform is required"))?,
            self.settings
                .ok_or_else(|| EngineError::validation("settings are required"))?,
        ))
    }
}
