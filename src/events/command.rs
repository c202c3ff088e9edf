use std::sync::atomic::AtomicBool;

use serenity::{all::CommandInteraction, prelude::Context as IncomingContext};
use tracing::{debug, error};

use crate::{
    commands::get_command_list,
    models::{
        command::{CommandContext, CommandContextReply, FailedCommandContext},
        handler::Handler,
        response::ResponseError,
    },
};

impl Handler {
    pub async fn on_command(&self, ctx: IncomingContext, command: CommandInteraction) {
        let start = std::time::Instant::now();

        let Some(guild_id) = command.guild_id else {
            let fail_context = FailedCommandContext { ctx };
            if let Err(err) = fail_context
                .error_message(
                    &command,
                    ResponseError::Execution("Giveaways can only be run inside servers", None),
                )
                .await
            {
                error!("Failed to reply to command: {:?}", err);
            }
            return;
        };

        let command_context = CommandContext {
            ctx,
            has_responded: AtomicBool::new(false),
            guild_id,
        };

        for existing_command in get_command_list() {
            if existing_command.name() != command.data.name {
                continue;
            }
            if let Err(err) = existing_command
                .router(self, &command_context, &command)
                .await
            {
                debug!("Command {} failed: {:?}", command.data.name, err);
                if let Err(reply_err) = command_context.error_message(&command, err).await {
                    error!("Failed to report command failure: {:?}", reply_err);
                }
            }
        }

        debug!("Took {:?} to handle a command", start.elapsed());
    }
}
