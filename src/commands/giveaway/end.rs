use serenity::{all::CommandInteraction, builder::CreateEmbed};

use super::giveaway_id;
use crate::models::{
    command::{CommandContext, CommandContextReply},
    handler::Handler,
    response::{Response, ResponseError, ResponseResult},
};

pub async fn end(handler: &Handler, ctx: &CommandContext, cmd: &CommandInteraction) -> ResponseResult {
    let id = giveaway_id(cmd)?;
    let giveaway = handler.manager.find(ctx.guild_id.get() as i64, id).await?;

    let Some(report) = handler.manager.end_giveaway(&giveaway).await? else {
        return Err(ResponseError::Execution(
            "This giveaway has already ended",
            None,
        ));
    };

    let description = if report.confirmed {
        format!(
            "{} entrants, {} winners.",
            report.entrants,
            report.winners.len()
        )
    } else {
        "The results could not be posted in the giveaway's channel.".to_string()
    };
    ctx.reply(
        cmd,
        Response::new()
            .embed(
                CreateEmbed::new()
                    .title("Successfully ended giveaway")
                    .description(description),
            )
            .ephemeral(true),
    )
    .await
}
