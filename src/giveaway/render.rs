use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    messaging::message::{Button, Embed, OutgoingMessage},
    models::{
        giveaway::{Giveaway, GiveawayDraft},
        settings::GuildSettings,
    },
};

pub const ENTER_BUTTON_ID: &str = "enter-giveaway";
/// Followed by the giveaway id, e.g. `leave-giveaway:1180000000000000000`.
pub const LEAVE_BUTTON_PREFIX: &str = "leave-giveaway:";
pub const ENDED_COLOR: u32 = 0x2F3136;
pub const SUMMARY_URL: &str = "https://giveawaybot.party/summary";

const SUMMARY_KEY_MARKER: &str = "#giveaway=";

lazy_static! {
    static ref ATTACHMENT_KEY_REGEX: Regex = Regex::new(r"/attachments/(\d+/\d+)/").unwrap();
}

pub fn mentions(users: &[i64]) -> String {
    users
        .iter()
        .map(|user| format!("<@{user}>"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe(
    draft: &GiveawayDraft,
    entries: usize,
    winners: Option<&[i64]>,
) -> String {
    let end = draft.end_time.unix_timestamp();
    let mut description = match draft.description.as_deref() {
        Some(text) if !text.is_empty() => format!("{text}\n\n"),
        _ => String::new(),
    };

    let ends_label = if winners.is_some() { "Ended" } else { "Ends" };
    description.push_str(&format!("{ends_label}: <t:{end}:R> (<t:{end}:f>)\n"));
    description.push_str(&format!("Hosted by: <@{}>\n", draft.host_id));
    description.push_str(&format!("Entries: **{entries}**\n"));
    match winners {
        None => description.push_str(&format!("Winners: **{}**", draft.winners)),
        Some(winners) => description.push_str(&format!("Winners: {}", mentions(winners))),
    }
    description
}

/// Announcement of a running giveaway, with the entry button.
pub fn render_running(
    draft: &GiveawayDraft,
    settings: &GuildSettings,
    entries: usize,
) -> OutgoingMessage {
    OutgoingMessage::new()
        .embed(Embed {
            title: draft.prize.clone(),
            description: describe(draft, entries, None),
            color: settings.color(),
            timestamp: draft.end_time.unix_timestamp(),
        })
        .button(Button::Action {
            custom_id: ENTER_BUTTON_ID.to_string(),
            label: String::new(),
            emoji: Some(settings.emoji().to_string()),
        })
}

/// Terminal state of an announcement. The entry button is gone; a summary
/// link replaces it when the manifest was uploaded.
pub fn render_ended(
    giveaway: &Giveaway,
    entries: usize,
    winners: &[i64],
    manifest_key: Option<&str>,
) -> OutgoingMessage {
    let message = OutgoingMessage::new().embed(Embed {
        title: giveaway.draft.prize.clone(),
        description: describe(&giveaway.draft, entries, Some(winners)),
        color: ENDED_COLOR,
        timestamp: giveaway.end_time().unix_timestamp(),
    });

    match manifest_key {
        Some(key) => message.button(Button::Link {
            label: "Giveaway Summary".to_string(),
            url: summary_url(key),
        }),
        None => message,
    }
}

/// Follow-up posted under the announcement once it ends.
pub fn render_winner_message(giveaway: &Giveaway, winners: &[i64]) -> OutgoingMessage {
    let content = if winners.is_empty() {
        "No valid entrants, so a winner could not be determined!".to_string()
    } else {
        format!(
            "Congratulations {}! You won the **{}**!",
            mentions(winners),
            giveaway.draft.prize
        )
    };

    OutgoingMessage::new()
        .content(content)
        .reply_to(giveaway.message_id)
        .mention_users(true)
}

/// Line posted to a guild's log channel when one of its giveaways ends.
/// Users are named but not pinged.
pub fn render_log_message(
    giveaway: &Giveaway,
    entries: usize,
    winners: &[i64],
    manifest_key: Option<&str>,
) -> OutgoingMessage {
    let mut content = format!(
        "Giveaway `{}` for **{}** in <#{}> ended with {entries} entries.",
        giveaway.message_id, giveaway.draft.prize, giveaway.channel_id
    );
    if !winners.is_empty() {
        content.push_str(&format!(" Winners: {}", mentions(winners)));
    }
    if let Some(key) = manifest_key {
        content.push_str(&format!("
<{}>", summary_url(key)));
    }
    OutgoingMessage::new().content(content)
}

pub fn leave_button_id(giveaway_id: i64) -> String {
    format!("{LEAVE_BUTTON_PREFIX}{giveaway_id}")
}

pub fn giveaway_id_from_leave_button(custom_id: &str) -> Option<i64> {
    custom_id.strip_prefix(LEAVE_BUTTON_PREFIX)?.parse().ok()
}

pub fn summary_url(manifest_key: &str) -> String {
    format!("{SUMMARY_URL}{SUMMARY_KEY_MARKER}{manifest_key}")
}

/// Manifest key carried by a summary link button.
pub fn summary_key_from_url(url: &str) -> Option<String> {
    let index = url.rfind(SUMMARY_KEY_MARKER)?;
    let key = &url[index + SUMMARY_KEY_MARKER.len()..];
    (!key.is_empty()).then(|| key.to_string())
}

/// `<channel>/<attachment>` pair of an uploaded attachment's URL.
pub fn manifest_key_from_url(url: &str) -> Option<String> {
    ATTACHMENT_KEY_REGEX
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|key| key.as_str().to_string())
}
