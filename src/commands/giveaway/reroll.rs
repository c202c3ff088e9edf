use serenity::{
    all::{ActionRowComponent, ButtonKind, CommandInteraction, Message, MessageId},
    builder::CreateAllowedMentions,
};
use tracing::debug;

use super::giveaway_id;
use crate::{
    common::options::Options,
    giveaway::render::{mentions, summary_key_from_url},
    models::{
        command::{CommandContext, CommandContextReply},
        handler::Handler,
        response::{Response, ResponseError, ResponseResult},
    },
};

fn invalid_message() -> ResponseError {
    ResponseError::Execution(
        "That message is not an ended giveaway",
        Some("Please use the message ID of a giveaway that has ended in this channel".to_string()),
    )
}

/// Manifest key behind the summary button of an ended giveaway.
fn summary_key(message: &Message) -> Option<String> {
    message
        .components
        .iter()
        .flat_map(|row| &row.components)
        .find_map(|component| match component {
            ActionRowComponent::Button(button) => match &button.data {
                ButtonKind::Link { url } => summary_key_from_url(url),
                _ => None,
            },
            _ => None,
        })
}

pub async fn reroll(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
) -> ResponseResult {
    let id = giveaway_id(cmd)?;
    let count = Options {
        options: cmd.data.options(),
    }
    .get_integer("count")
    .unwrap_or(1);

    let Ok(message) = cmd
        .channel_id
        .message(&ctx.ctx, MessageId::new(id as u64))
        .await
    else {
        return Err(invalid_message());
    };
    if message.author.id != ctx.ctx.cache.current_user().id {
        return Err(invalid_message());
    }
    let Some(key) = summary_key(&message) else {
        return Err(invalid_message());
    };

    let winners = handler
        .manager
        .reroll(&key, usize::try_from(count).unwrap_or(1))
        .await?;
    if winners.is_empty() {
        return Err(ResponseError::Execution(
            "Nobody entered this giveaway",
            None,
        ));
    }
    debug!("Rerolled giveaway {id} for {}", cmd.user.id);

    ctx.reply(
        cmd,
        Response::new()
            .content(format!(
                "<@{}> rerolled the giveaway! Congratulations {}!",
                cmd.user.id,
                mentions(&winners)
            ))
            .allowed_mentions(CreateAllowedMentions::new().all_users(true)),
    )
    .await
}
