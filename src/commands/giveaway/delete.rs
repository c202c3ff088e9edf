use serenity::{all::CommandInteraction, builder::CreateEmbed};

use super::giveaway_id;
use crate::models::{
    command::{CommandContext, CommandContextReply},
    handler::Handler,
    response::{Response, ResponseError, ResponseResult},
};

pub async fn delete(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
) -> ResponseResult {
    let id = giveaway_id(cmd)?;
    let giveaway = handler.manager.find(ctx.guild_id.get() as i64, id).await?;

    if !handler.manager.delete_giveaway(&giveaway).await? {
        return Err(ResponseError::Execution(
            "This giveaway has already ended",
            None,
        ));
    }

    ctx.reply(
        cmd,
        Response::new()
            .embed(CreateEmbed::new().title("Successfully deleted giveaway"))
            .ephemeral(true),
    )
    .await
}
