use serenity::{
    all::{ButtonStyle, ComponentInteraction},
    builder::{CreateActionRow, CreateButton, CreateEmbed, CreateInteractionResponseMessage},
    prelude::Context as IncomingContext,
};
use tracing::{debug, error};

use crate::{
    database::EntryOutcome,
    giveaway::render::{giveaway_id_from_leave_button, leave_button_id, ENTER_BUTTON_ID},
    messaging::discord::interaction_message,
    models::{
        command::{InteractionContext, InteractionContextReply},
        handler::Handler,
        response::{Response, ResponseError, ResponseResult},
        user::CachedUser,
    },
};

fn giveaway_ended() -> ResponseError {
    ResponseError::Execution("This giveaway has ended", None)
}

impl Handler {
    pub async fn on_component(&self, ctx: IncomingContext, component: ComponentInteraction) {
        let start = std::time::Instant::now();
        let custom_id = component.data.custom_id.clone();
        let interaction_context = InteractionContext::new(ctx, component);

        let result = if custom_id == ENTER_BUTTON_ID {
            self.enter_giveaway(&interaction_context).await
        } else if let Some(giveaway_id) = giveaway_id_from_leave_button(&custom_id) {
            self.leave_giveaway(&interaction_context, giveaway_id).await
        } else {
            return;
        };

        if let Err(err) = result {
            if let Err(reply_err) = interaction_context.error_message(err).await {
                error!("Could not notify user of failed button press. Failed with error: {reply_err:?}");
            }
        }
        debug!("Took {:?} to handle button {custom_id}", start.elapsed());
    }

    async fn enter_giveaway(&self, ctx: &InteractionContext) -> ResponseResult {
        let giveaway_id = ctx.interaction.message.id.get() as i64;
        let user_id = ctx.interaction.user.id.get() as i64;

        // Cached first so a claim racing this entry still finds the name.
        self.manager
            .remember_user(&CachedUser::from(&ctx.interaction.user))
            .await;
        match self.manager.entries().add_entry(giveaway_id, user_id).await? {
            EntryOutcome::Entered(_) => {
                match self.manager.running_announcement(giveaway_id).await? {
                    Some((_, announcement)) => ctx.update(interaction_message(&announcement)).await,
                    None => {
                        ctx.reply(
                            Response::new()
                                .embed(CreateEmbed::new().description(
                                    "Your entry was counted, but the giveaway has just ended.",
                                ))
                                .ephemeral(true),
                        )
                        .await
                    }
                }
            }
            EntryOutcome::AlreadyEntered => {
                ctx.reply(
                    Response::new()
                        .embed(CreateEmbed::new().description("You have already entered this giveaway!"))
                        .components(vec![CreateActionRow::Buttons(vec![CreateButton::new(
                            leave_button_id(giveaway_id),
                        )
                        .label("Leave Giveaway")
                        .style(ButtonStyle::Danger)])])
                        .ephemeral(true),
                )
                .await
            }
            EntryOutcome::GiveawayMissing => Err(giveaway_ended()),
        }
    }

    async fn leave_giveaway(&self, ctx: &InteractionContext, giveaway_id: i64) -> ResponseResult {
        let user_id = ctx.interaction.user.id.get() as i64;

        let left = self.manager.entries().remove_entry(giveaway_id, user_id).await?;
        let description = if left {
            "You have left the giveaway."
        } else {
            "You were not entered in this giveaway."
        };
        ctx.update(
            CreateInteractionResponseMessage::new()
                .embed(CreateEmbed::new().description(description))
                .components(vec![]),
        )
        .await?;

        if left {
            self.manager.refresh_announcement(giveaway_id).await?;
        }
        Ok(())
    }
}
