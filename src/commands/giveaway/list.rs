use serenity::{all::CommandInteraction, builder::CreateEmbed};

use crate::models::{
    command::{CommandContext, CommandContextReply},
    handler::Handler,
    response::{Response, ResponseResult},
};

const LIST_LIMIT: usize = 25;

pub async fn list(handler: &Handler, ctx: &CommandContext, cmd: &CommandInteraction) -> ResponseResult {
    let guild_id = ctx.guild_id.get();
    let giveaways = handler
        .manager
        .running_in_channel(cmd.channel_id.get() as i64)
        .await?;

    let description = if giveaways.is_empty() {
        "There are no running giveaways in this channel.".to_string()
    } else {
        giveaways
            .iter()
            .take(LIST_LIMIT)
            .map(|giveaway| {
                format!(
                    "[`{}`](https://discord.com/channels/{guild_id}/{}/{}) **{}** ends <t:{}:R>",
                    giveaway.message_id,
                    giveaway.channel_id,
                    giveaway.message_id,
                    giveaway.prize(),
                    giveaway.end_time().unix_timestamp()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    ctx.reply(
        cmd,
        Response::new()
            .embed(
                CreateEmbed::new()
                    .title("Running giveaways")
                    .description(description),
            )
            .ephemeral(true),
    )
    .await
}
