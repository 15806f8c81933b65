//! REST client implementing [`ChatPlatform`] over the platform's HTTP API

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use pinbot_common::PlatformConfig;
use pinbot_core::entities::{
    ChannelInfo, GuildInfo, Marker, MessageSnapshot, NewThread, OutgoingMessage, ReactionSummary,
    ThreadInfo,
};
use pinbot_core::{ChatPlatform, PlatformError, PlatformResult, Snowflake};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{instrument, trace};

use super::models::{
    ApiId, ApiMessage, ApiRateLimit, ApiThread, ApiThreadList, ApiUser, ArchiveThread, CreateDm,
};

/// Reactor page size accepted by the reactions endpoint
const REACTORS_PAGE: usize = 100;

/// Archived thread page size
const ARCHIVED_PAGE: u32 = 100;

/// HTTP implementation of the chat platform port
#[derive(Debug, Clone)]
pub struct RestPlatform {
    client: Client,
    api_base: Url,
    web_base: String,
}

impl RestPlatform {
    /// Create a client authenticated with the bot token
    pub fn new(config: &PlatformConfig) -> PlatformResult<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bot {}", config.token))
            .map_err(|e| PlatformError::Transport(format!("invalid token: {e}")))?;
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .build()
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let api_base = Url::parse(&config.api_base)
            .map_err(|e| PlatformError::Transport(format!("invalid api base: {e}")))?;

        Ok(Self {
            client,
            api_base,
            web_base: config.web_base.trim_end_matches('/').to_string(),
        })
    }

    /// Link that opens the message in the platform's web client
    pub fn jump_url(&self, guild_id: Option<Snowflake>, channel_id: Snowflake, message_id: Snowflake) -> String {
        let guild = guild_id.map_or_else(|| "@me".to_string(), |g| g.to_string());
        format!("{}/channels/{guild}/{channel_id}/{message_id}", self.web_base)
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    /// Build an endpoint URL; segments are percent-encoded
    fn url(&self, segments: &[&str]) -> PlatformResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| PlatformError::Transport("api base cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> PlatformResult<RequestBuilder> {
        Ok(self.client.request(method, self.url(segments)?))
    }

    async fn send(&self, request: RequestBuilder) -> PlatformResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let status = response.status();
        trace!(status = status.as_u16(), url = %response.url(), "Platform response");
        if status.is_success() {
            return Ok(response);
        }

        let retry_header = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<f64>().ok());
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, retry_header, &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> PlatformResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| PlatformError::Decode(e.to_string()))
    }

    async fn send_empty(&self, request: RequestBuilder) -> PlatformResult<()> {
        self.send(request).await.map(|_| ())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Every user holding `emoji` on the message, following pagination
    async fn fetch_reactors(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> PlatformResult<Vec<Snowflake>> {
        let (channel, message) = (channel_id.to_string(), message_id.to_string());
        let mut reactors = Vec::new();
        let mut after: Option<Snowflake> = None;

        loop {
            let mut request = self
                .request(
                    Method::GET,
                    &["channels", &channel, "messages", &message, "reactions", emoji],
                )?
                .query(&[("limit", REACTORS_PAGE.to_string())]);
            if let Some(after) = after {
                request = request.query(&[("after", after.to_string())]);
            }

            let page: Vec<ApiUser> = self.send_json(request).await?;
            let full_page = page.len() == REACTORS_PAGE;
            after = page.last().map(|u| u.id);
            reactors.extend(page.into_iter().map(|u| u.id));

            if !full_page || after.is_none() {
                return Ok(reactors);
            }
        }
    }

    /// One page of a channel's public archived threads, newest first
    async fn archived_page(
        &self,
        channel_id: Snowflake,
        before: Option<String>,
    ) -> PlatformResult<ApiThreadList> {
        let channel = channel_id.to_string();
        let mut request = self
            .request(
                Method::GET,
                &["channels", &channel, "threads", "archived", "public"],
            )?
            .query(&[("limit", ARCHIVED_PAGE.to_string())]);
        if let Some(before) = before {
            request = request.query(&[("before", before)]);
        }
        self.send_json(request).await
    }
}

/// Drain a paginated archived-thread listing
///
/// Stops when a page reports no more results or the cursor stops moving.
async fn collect_archived<F, Fut>(mut fetch: F) -> PlatformResult<Vec<ApiThread>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = PlatformResult<ApiThreadList>>,
{
    let mut threads = Vec::new();
    let mut before: Option<String> = None;

    loop {
        let page = fetch(before.clone()).await?;
        let next = page.next_before();
        threads.extend(page.threads);

        match next {
            Some(cursor) if before.as_ref() != Some(&cursor) => before = Some(cursor),
            _ => return Ok(threads),
        }
    }
}

fn channel_threads(threads: Vec<ApiThread>, parent: Snowflake) -> Vec<ThreadInfo> {
    threads
        .into_iter()
        .filter(|t| t.parent_id.is_none_or(|p| p == parent))
        .map(|t| t.into_info(parent))
        .collect()
}

/// Map a non-success response to a platform error
pub fn error_for_status(status: StatusCode, retry_after_secs: Option<f64>, body: &str) -> PlatformError {
    match status {
        StatusCode::NOT_FOUND => PlatformError::NotFound(body.to_string()),
        StatusCode::FORBIDDEN => PlatformError::Forbidden(body.to_string()),
        StatusCode::TOO_MANY_REQUESTS => {
            let secs = serde_json::from_str::<ApiRateLimit>(body)
                .map(|r| r.retry_after)
                .ok()
                .or(retry_after_secs)
                .unwrap_or(1.0);
            PlatformError::RateLimited {
                retry_after_ms: (secs.max(0.0) * 1000.0).ceil() as u64,
            }
        }
        _ => PlatformError::Http {
            status: status.as_u16(),
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl ChatPlatform for RestPlatform {
    #[instrument(skip(self))]
    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> PlatformResult<MessageSnapshot> {
        let (channel, message) = (channel_id.to_string(), message_id.to_string());
        let api: ApiMessage = self
            .send_json(self.request(Method::GET, &["channels", &channel, "messages", &message])?)
            .await?;

        let guild_id = match api.guild_id {
            Some(guild_id) => Some(guild_id),
            None => self.fetch_channel(channel_id).await?.guild_id,
        };

        // Reactor ids are only needed for the markers the engine counts
        let mut reactions = Vec::with_capacity(api.reactions.len());
        for reaction in &api.reactions {
            let Some(name) = reaction.emoji.unicode_name() else {
                continue;
            };
            let summary = if Marker::from_emoji(name).is_some() {
                let ids = self.fetch_reactors(channel_id, message_id, name).await?;
                ReactionSummary {
                    emoji: name.to_string(),
                    count: reaction.count,
                    reactor_ids: ids,
                }
            } else {
                ReactionSummary {
                    emoji: name.to_string(),
                    count: reaction.count,
                    reactor_ids: Vec::new(),
                }
            };
            reactions.push(summary);
        }

        let jump_url = self.jump_url(guild_id, channel_id, message_id);
        Ok(api.into_snapshot(guild_id, jump_url, reactions))
    }

    #[instrument(skip(self))]
    async fn fetch_channel(&self, channel_id: Snowflake) -> PlatformResult<ChannelInfo> {
        let channel = channel_id.to_string();
        self.send_json(self.request(Method::GET, &["channels", &channel])?)
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_guild(&self, guild_id: Snowflake) -> PlatformResult<GuildInfo> {
        let guild = guild_id.to_string();
        self.send_json(self.request(Method::GET, &["guilds", &guild])?)
            .await
    }

    #[instrument(skip(self))]
    async fn list_threads(&self, channel_id: Snowflake) -> PlatformResult<Vec<ThreadInfo>> {
        let channel = self.fetch_channel(channel_id).await?;

        let mut threads = match channel.guild_id {
            Some(guild_id) => {
                let guild = guild_id.to_string();
                let active: ApiThreadList = self
                    .send_json(self.request(Method::GET, &["guilds", &guild, "threads", "active"])?)
                    .await?;
                active.threads
            }
            None => Vec::new(),
        };
        threads.extend(collect_archived(move |before| self.archived_page(channel_id, before)).await?);
        Ok(channel_threads(threads, channel_id))
    }

    #[instrument(skip(self))]
    async fn count_thread_messages(&self, thread_id: Snowflake, limit: u32) -> PlatformResult<u32> {
        let thread = thread_id.to_string();
        let request = self
            .request(Method::GET, &["channels", &thread, "messages"])?
            .query(&[("limit", limit.to_string())]);
        let messages: Vec<ApiId> = self.send_json(request).await?;
        Ok((messages.len() as u32).min(limit))
    }

    #[instrument(skip(self))]
    async fn pin_message(&self, channel_id: Snowflake, message_id: Snowflake) -> PlatformResult<()> {
        let (channel, message) = (channel_id.to_string(), message_id.to_string());
        self.send_empty(self.request(Method::PUT, &["channels", &channel, "pins", &message])?)
            .await
    }

    #[instrument(skip(self))]
    async fn add_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> PlatformResult<()> {
        let (channel, message) = (channel_id.to_string(), message_id.to_string());
        self.send_empty(self.request(
            Method::PUT,
            &["channels", &channel, "messages", &message, "reactions", emoji, "@me"],
        )?)
        .await
    }

    #[instrument(skip(self))]
    async fn remove_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
        user_id: Snowflake,
    ) -> PlatformResult<()> {
        let (channel, message, user) = (
            channel_id.to_string(),
            message_id.to_string(),
            user_id.to_string(),
        );
        self.send_empty(self.request(
            Method::DELETE,
            &["channels", &channel, "messages", &message, "reactions", emoji, &user],
        )?)
        .await
    }

    #[instrument(skip(self))]
    async fn clear_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> PlatformResult<()> {
        let (channel, message) = (channel_id.to_string(), message_id.to_string());
        self.send_empty(self.request(
            Method::DELETE,
            &["channels", &channel, "messages", &message, "reactions", emoji],
        )?)
        .await
    }

    #[instrument(skip(self, thread))]
    async fn create_thread(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        thread: &NewThread,
    ) -> PlatformResult<ThreadInfo> {
        let (channel, message) = (channel_id.to_string(), message_id.to_string());
        let request = self
            .request(
                Method::POST,
                &["channels", &channel, "messages", &message, "threads"],
            )?
            .json(thread);
        let created: ApiThread = self.send_json(request).await?;
        Ok(created.into_info(channel_id))
    }

    #[instrument(skip(self))]
    async fn set_thread_archived(&self, thread_id: Snowflake, archived: bool) -> PlatformResult<()> {
        let thread = thread_id.to_string();
        let request = self
            .request(Method::PATCH, &["channels", &thread])?
            .json(&ArchiveThread { archived });
        self.send_empty(request).await
    }

    #[instrument(skip(self))]
    async fn delete_thread(&self, thread_id: Snowflake) -> PlatformResult<()> {
        let thread = thread_id.to_string();
        self.send_empty(self.request(Method::DELETE, &["channels", &thread])?)
            .await
    }

    #[instrument(skip(self, message))]
    async fn send_direct_message(
        &self,
        user_id: Snowflake,
        message: &OutgoingMessage,
    ) -> PlatformResult<()> {
        let dm: ApiId = self
            .send_json(
                self.request(Method::POST, &["users", "@me", "channels"])?
                    .json(&CreateDm { recipient_id: user_id }),
            )
            .await?;

        let channel = dm.id.to_string();
        self.send_empty(
            self.request(Method::POST, &["channels", &channel, "messages"])?
                .json(message),
        )
        .await
    }
}
