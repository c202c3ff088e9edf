use std::sync::atomic::AtomicBool;

use serenity::{
    all::{CommandInteraction, ComponentInteraction, GuildId},
    builder::{CreateCommand, CreateInteractionResponseMessage},
    prelude::Context as IncomingContext,
};

use super::{
    handler::Handler,
    response::{Response, ResponseError, ResponseResult},
};

pub struct CommandContext {
    pub ctx: IncomingContext,
    pub has_responded: AtomicBool,
    pub guild_id: GuildId,
}

/// Context for commands that could not be resolved to a guild.
pub struct FailedCommandContext {
    pub ctx: IncomingContext,
}

pub struct InteractionContext {
    pub ctx: IncomingContext,
    pub has_responded: AtomicBool,
    pub interaction: ComponentInteraction,
}

impl InteractionContext {
    pub fn new(ctx: IncomingContext, interaction: ComponentInteraction) -> Self {
        InteractionContext {
            ctx,
            has_responded: AtomicBool::new(false),
            interaction,
        }
    }
}

#[async_trait::async_trait]
pub trait CommandContextReply {
    async fn reply(&self, cmd: &CommandInteraction, response: Response) -> ResponseResult;

    async fn error_message(&self, cmd: &CommandInteraction, err: ResponseError) -> ResponseResult;
}

#[async_trait::async_trait]
pub trait InteractionContextReply {
    async fn reply(&self, response: Response) -> ResponseResult;

    /// Replaces the message the component is attached to.
    async fn update(&self, message: CreateInteractionResponseMessage) -> ResponseResult;

    async fn error_message(&self, err: ResponseError) -> ResponseResult;
}

#[async_trait::async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    fn register(&self) -> CreateCommand;
    async fn router(
        &self,
        handler: &Handler,
        ctx: &CommandContext,
        cmd: &CommandInteraction,
    ) -> ResponseResult;
}
