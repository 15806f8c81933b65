//! Bookmark copy rendering

use pinbot_core::entities::{Embed, EmbedAuthor, MessageSnapshot, OutgoingMessage};

pub const BOOKMARK_TITLE: &str = "🔖 Bookmark created";

/// Escape markdown control characters so names render literally
pub fn sanitise(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '~' | '`' | '|' | '>' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build the private copy of `message` sent to whoever bookmarked it
pub fn render_bookmark(
    message: &MessageSnapshot,
    guild_name: &str,
    channel_name: &str,
    max_length: usize,
) -> OutgoingMessage {
    let mut embed = Embed::titled(BOOKMARK_TITLE);
    embed.description = Some(message.preview(max_length).to_string());
    embed.author = Some(EmbedAuthor {
        name: message.author.display_name().to_string(),
    });

    let timestamp = message.created_at.format("%Y-%m-%d %H:%M:%S");
    embed = embed.field(
        format!("{timestamp} UTC"),
        format!(
            "[Server {}, channel #{}]({})",
            sanitise(guild_name),
            sanitise(channel_name),
            message.jump_url
        ),
        false,
    );

    if message.attachment_count > 0 {
        embed = embed.field("Files", format!("Total {}", message.attachment_count), true);
    }
    if message.embed_count > 0 {
        embed = embed.field("Embeds", format!("Total {}", message.embed_count), true);
    }

    OutgoingMessage::embed(embed)
}
