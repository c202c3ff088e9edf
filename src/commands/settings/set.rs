use serenity::{all::CommandInteraction, builder::CreateEmbed};

use crate::{
    common::options::Options,
    models::{
        command::{CommandContext, CommandContextReply},
        handler::Handler,
        response::{Response, ResponseError, ResponseResult},
        settings::{parse_color, parse_emoji},
    },
};

fn updated(title: &'static str, description: String) -> Response {
    Response::new()
        .embed(CreateEmbed::new().title(title).description(description))
        .ephemeral(true)
}

pub async fn color(handler: &Handler, ctx: &CommandContext, cmd: &CommandInteraction) -> ResponseResult {
    let options = Options {
        options: cmd.data.options(),
    };
    let Some(color) = options.get_string("hex").as_deref().and_then(parse_color) else {
        return Err(ResponseError::Execution(
            "That is not a valid colour",
            Some("Use a hex code such as `#5865F2` or a name such as `red`".to_string()),
        ));
    };

    let settings = handler
        .manager
        .update_settings(ctx.guild_id.get() as i64, |settings| settings.color = color)
        .await?;
    ctx.reply(
        cmd,
        updated(
            "Giveaway colour updated",
            format!("New giveaways will use `{}`.", settings.color_hex()),
        ),
    )
    .await
}

pub async fn emoji(handler: &Handler, ctx: &CommandContext, cmd: &CommandInteraction) -> ResponseResult {
    let options = Options {
        options: cmd.data.options(),
    };
    let Some(emoji) = options.get_string("emoji").as_deref().and_then(parse_emoji) else {
        return Err(ResponseError::Execution(
            "That is not a valid emoji",
            Some("Use a single standard emoji or a custom emoji from this server".to_string()),
        ));
    };

    let settings = handler
        .manager
        .update_settings(ctx.guild_id.get() as i64, move |settings| {
            settings.emoji = Some(emoji);
        })
        .await?;
    ctx.reply(
        cmd,
        updated(
            "Giveaway emoji updated",
            format!("New giveaways will use {}.", settings.emoji()),
        ),
    )
    .await
}

pub async fn log_channel(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
) -> ResponseResult {
    let options = Options {
        options: cmd.data.options(),
    };
    let channel = options.get_channel("channel").map(|id| id.get() as i64);

    handler
        .manager
        .update_settings(ctx.guild_id.get() as i64, |settings| {
            settings.log_channel = channel;
        })
        .await?;
    let description = match channel {
        Some(id) => format!("Ended giveaways will be logged in <#{id}>."),
        None => "The log channel was cleared.".to_string(),
    };
    ctx.reply(cmd, updated("Log channel updated", description)).await
}
