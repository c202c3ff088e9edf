use serenity::{
    all::{ChannelType, CommandDataOptionValue, CommandInteraction, CommandOptionType, Permissions},
    builder::{CreateCommand, CreateCommandOption},
};

use crate::models::{
    command::{Command, CommandContext},
    handler::Handler,
    response::{ResponseError, ResponseResult},
};

mod set;
mod show;

pub struct SettingsCommand;

#[async_trait::async_trait]
impl Command for SettingsCommand {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn register(&self) -> CreateCommand {
        CreateCommand::new("settings")
            .description("Show or change how giveaways look in this server")
            .add_option(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "show",
                "Show the current settings",
            ))
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommandGroup,
                    "set",
                    "Change a setting",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "color",
                        "Set the giveaway embed colour",
                    )
                    .add_sub_option(
                        CreateCommandOption::new(
                            CommandOptionType::String,
                            "hex",
                            "Hex code or standard colour name",
                        )
                        .required(true),
                    ),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "emoji",
                        "Set the emoji on the entry button",
                    )
                    .add_sub_option(
                        CreateCommandOption::new(
                            CommandOptionType::String,
                            "emoji",
                            "A standard or custom emoji",
                        )
                        .required(true),
                    ),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "log_channel",
                        "Set the channel where ended giveaways are logged, or clear it",
                    )
                    .add_sub_option(
                        CreateCommandOption::new(
                            CommandOptionType::Channel,
                            "channel",
                            "Leave empty to clear the log channel",
                        )
                        .channel_types(vec![ChannelType::Text])
                        .required(false),
                    ),
                ),
            )
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
                "show" => return show::show(handler, ctx, cmd).await,
                "set" => {
                    let CommandDataOptionValue::SubCommandGroup(group) = &option.value else {
                        continue;
                    };
                    match group.first().map(|sub| sub.name.as_str()) {
                        Some("color") => return set::color(handler, ctx, cmd).await,
                        Some("emoji") => return set::emoji(handler, ctx, cmd).await,
                        Some("log_channel") => return set::log_channel(handler, ctx, cmd).await,
                        _ => continue,
                    }
                }
                _ => continue,
            }
        }

        Err(ResponseError::Execution(
            "Invalid command",
            Some("You must specify a subcommand to use this command!".to_string()),
        ))
    }
}
