use serenity::{
    all::{CommandInteraction, CommandOptionType, Permissions},
    builder::{CreateCommand, CreateCommandOption},
};

use crate::{
    common::options::Options,
    models::{
        command::{Command, CommandContext},
        handler::Handler,
        response::{ResponseError, ResponseResult},
    },
};

pub mod delete;
pub mod end;
pub mod list;
pub mod reroll;
pub mod start;

pub struct GiveawayCommand;

fn giveaway_id_option(description: &'static str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "giveaway_id", description).required(true)
}

/// Message id of the giveaway named in the command.
pub fn giveaway_id(cmd: &CommandInteraction) -> Result<i64, ResponseError> {
    Options {
        options: cmd.data.options(),
    }
    .get_id("giveaway_id")
    .ok_or(ResponseError::Execution(
        "That is not a valid giveaway ID",
        Some("Please use the message ID of the giveaway".to_string()),
    ))
}

#[async_trait::async_trait]
impl Command for GiveawayCommand {
    fn name(&self) -> &'static str {
        "giveaway"
    }

    fn register(&self) -> CreateCommand {
        CreateCommand::new("giveaway")
            .description("Giveaway commands")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "start",
                    "Start a new giveaway in this channel",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "duration",
                        "How long the giveaway runs for, e.g. 10m or 1h30m",
                    )
                    .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Integer,
                        "winners",
                        "The number of winners",
                    )
                    .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "prize",
                        "The prize for the giveaway",
                    )
                    .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "description",
                        "The description for the giveaway",
                    )
                    .required(false),
                ),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "end",
                    "End a giveaway early",
                )
                .add_sub_option(giveaway_id_option("The message ID of the giveaway to end")),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "delete",
                    "Delete a giveaway without picking winners",
                )
                .add_sub_option(giveaway_id_option("The message ID of the giveaway to delete")),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "reroll",
                    "Pick new winners for an ended giveaway",
                )
                .add_sub_option(giveaway_id_option("The message ID of the ended giveaway"))
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Integer,
                        "count",
                        "The number of new winners (default: 1)",
                    )
                    .min_int_value(1)
                    .required(false),
                ),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "list",
                "List the running giveaways in this channel",
            ))
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .dm_permission(false)
    }

    async fn router(
        &self,
        handler: &Handler,
        ctx: &CommandContext,
        cmd: &CommandInteraction,
    ) -> ResponseResult {
        for option in &cmd.data.options {
            match option.name.as_str() {
                "start" => return start::start(handler, ctx, cmd).await,
                "end" => return end::end(handler, ctx, cmd).await,
                "delete" => return delete::delete(handler, ctx, cmd).await,
                "reroll" => return reroll::reroll(handler, ctx, cmd).await,
                "list" => return list::list(handler, ctx, cmd).await,
                _ => continue,
            }
        }

        Err(ResponseError::Execution(
            "Invalid command",
            Some("You must specify a subcommand to use this command!".to_string()),
        ))
    }
}
