use serenity::all::{CommandInteraction, Permissions};
use tracing::debug;

use crate::{
    common::options::Options,
    models::{
        command::{CommandContext, CommandContextReply},
        handler::Handler,
        response::{Response, ResponseError, ResponseResult},
        user::CachedUser,
    },
};

pub async fn start(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
) -> ResponseResult {
    let options = Options {
        options: cmd.data.options(),
    };
    let (Some(duration), Some(winners), Some(prize)) = (
        options.get_string("duration"),
        options.get_integer("winners"),
        options.get_string("prize"),
    ) else {
        return Err(ResponseError::Execution(
            "Missing giveaway details",
            Some("A duration, a number of winners and a prize are required".to_string()),
        ));
    };
    let description = options.get_string("description");

    let guild_id = ctx.guild_id.get() as i64;
    let channel_id = cmd.channel_id.get() as i64;
    let host_id = cmd.user.id.get() as i64;
    let manager = &handler.manager;

    let tier = manager.tier_for(guild_id, host_id).await?;
    debug!("Host {host_id} is creating a giveaway with tier {}", tier.name());
    manager
        .check_availability(
            guild_id,
            channel_id,
            tier,
            cmd.app_permissions.unwrap_or(Permissions::empty()),
        )
        .await?;
    let draft = manager.construct_giveaway(
        host_id,
        &duration,
        &winners.to_string(),
        &prize,
        description.as_deref(),
        tier,
    )?;
    let giveaway_id = manager.send_giveaway(draft, guild_id, channel_id).await?;
    manager.remember_user(&CachedUser::from(&cmd.user)).await;

    ctx.reply(
        cmd,
        Response::new()
            .content(format!("Giveaway `{giveaway_id}` has started!"))
            .ephemeral(true),
    )
    .await
}
