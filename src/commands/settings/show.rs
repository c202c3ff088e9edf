use serenity::{all::CommandInteraction, builder::CreateEmbed};

use crate::models::{
    command::{CommandContext, CommandContextReply},
    handler::Handler,
    response::{Response, ResponseResult},
    tier::PremiumTier,
};

pub async fn show(handler: &Handler, ctx: &CommandContext, cmd: &CommandInteraction) -> ResponseResult {
    let guild_id = ctx.guild_id.get() as i64;
    let settings = handler.manager.store().settings(guild_id).await?;
    let tier = match settings.owner_id {
        Some(owner_id) => handler.manager.tier_for(guild_id, owner_id).await?,
        None => PremiumTier::Free,
    };

    let owner = settings
        .owner_id
        .map_or("N/A".to_string(), |id| format!("<@{id}>"));
    let log_channel = settings
        .log_channel
        .map_or("N/A".to_string(), |id| format!("<#{id}>"));
    let description = format!(
        "Owner: {owner}\nPremium: **{}**\nEmoji: {}\nColour: `{}`\nLog channel: {log_channel}",
        tier.name(),
        settings.emoji(),
        settings.color_hex(),
    );

    ctx.reply(
        cmd,
        Response::new()
            .embed(
                CreateEmbed::new()
                    .title("Giveaway settings")
                    .description(description)
                    .color(settings.color()),
            )
            .ephemeral(true),
    )
    .await
}
