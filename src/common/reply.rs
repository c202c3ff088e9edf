use std::sync::atomic::Ordering;

use serenity::{
    all::CommandInteraction,
    builder::{
        CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
        EditInteractionResponse,
    },
};
use tracing::{debug, error};

use crate::models::{
    command::{
        CommandContext, CommandContextReply, FailedCommandContext, InteractionContext,
        InteractionContextReply,
    },
    response::{Response, ResponseError, ResponseResult},
};

const ERROR_COLOR: u32 = 0xED4245;

fn create_message(response: Response) -> CreateInteractionResponseMessage {
    let mut reply = CreateInteractionResponseMessage::new();
    if let Some(content) = response.content {
        reply = reply.content(content);
    }
    if let Some(embeds) = response.embeds {
        reply = reply.embeds(embeds);
    }
    if let Some(allowed_mentions) = response.allowed_mentions {
        reply = reply.allowed_mentions(allowed_mentions);
    }
    if let Some(components) = response.components {
        reply = reply.components(components);
    }
    if response.ephemeral {
        reply = reply.ephemeral(true);
    }
    reply
}

fn edit_message(response: Response) -> EditInteractionResponse {
    let mut edit = EditInteractionResponse::new();
    if let Some(content) = response.content {
        edit = edit.content(content);
    }
    if let Some(embeds) = response.embeds {
        edit = edit.embeds(embeds);
    }
    if let Some(allowed_mentions) = response.allowed_mentions {
        edit = edit.allowed_mentions(allowed_mentions);
    }
    if let Some(components) = response.components {
        edit = edit.components(components);
    }
    edit
}

/// Ephemeral embed describing what went wrong.
pub fn error_response(err: &ResponseError) -> Response {
    let embed = match err {
        ResponseError::Execution(title, hint) => {
            let embed = CreateEmbed::new().title(*title).color(ERROR_COLOR);
            match hint {
                Some(hint) => embed.description(hint),
                None => embed,
            }
        }
        ResponseError::Serenity(_) => CreateEmbed::new()
            .title("An error occurred")
            .description("Please try again in a moment")
            .color(ERROR_COLOR),
    };
    Response::new().embed(embed).ephemeral(true)
}

#[async_trait::async_trait]
impl CommandContextReply for CommandContext {
    async fn reply(&self, cmd: &CommandInteraction, response: Response) -> ResponseResult {
        let start = std::time::Instant::now();
        if self.has_responded.load(Ordering::Relaxed) {
            if let Err(err) = cmd
                .edit_response(&self.ctx.http, edit_message(response))
                .await
            {
                error!("Attempted to edit a response to a command, failed with error: {err}");
                return Err(ResponseError::Serenity(err));
            }
        } else {
            if let Err(err) = cmd
                .create_response(
                    &self.ctx.http,
                    CreateInteractionResponse::Message(create_message(response)),
                )
                .await
            {
                error!("Attempted to create a response to a command, failed with error: {err}");
                return Err(ResponseError::Serenity(err));
            }
            self.has_responded.store(true, Ordering::Relaxed);
        }
        debug!("Took {:?} to reply to a command", start.elapsed());
        Ok(())
    }

    async fn error_message(&self, cmd: &CommandInteraction, err: ResponseError) -> ResponseResult {
        self.reply(cmd, error_response(&err)).await
    }
}

#[async_trait::async_trait]
impl CommandContextReply for FailedCommandContext {
    async fn reply(&self, cmd: &CommandInteraction, response: Response) -> ResponseResult {
        if let Err(err) = cmd
            .create_response(
                &self.ctx.http,
                CreateInteractionResponse::Message(create_message(response)),
            )
            .await
        {
            error!("Attempted to create a response to a command, failed with error: {err}");
            return Err(ResponseError::Serenity(err));
        }
        Ok(())
    }

    async fn error_message(&self, cmd: &CommandInteraction, err: ResponseError) -> ResponseResult {
        self.reply(cmd, error_response(&err)).await
    }
}

impl InteractionContext {
    async fn respond(&self, response: CreateInteractionResponse) -> ResponseResult {
        let start = std::time::Instant::now();
        if let Err(err) = self
            .interaction
            .create_response(&self.ctx.http, response)
            .await
        {
            error!("Attempted to respond to an interaction, failed with error: {err}");
            return Err(ResponseError::Serenity(err));
        }
        self.has_responded.store(true, Ordering::Relaxed);
        debug!("Took {:?} to respond to an interaction", start.elapsed());
        Ok(())
    }
}

#[async_trait::async_trait]
impl InteractionContextReply for InteractionContext {
    async fn reply(&self, response: Response) -> ResponseResult {
        if self.has_responded.load(Ordering::Relaxed) {
            if let Err(err) = self
                .interaction
                .edit_response(&self.ctx.http, edit_message(response))
                .await
            {
                error!("Attempted to edit an interaction response, failed with error: {err}");
                return Err(ResponseError::Serenity(err));
            }
            return Ok(());
        }
        self.respond(CreateInteractionResponse::Message(create_message(response)))
            .await
    }

    async fn update(&self, message: CreateInteractionResponseMessage) -> ResponseResult {
        self.respond(CreateInteractionResponse::UpdateMessage(message))
            .await
    }

    async fn error_message(&self, err: ResponseError) -> ResponseResult {
        self.reply(error_response(&err)).await
    }
}
