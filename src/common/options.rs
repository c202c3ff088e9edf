use serenity::all::{ChannelId, ResolvedOption, ResolvedValue};

/// Resolved command options, looked up by name through any subcommand.
#[derive(Debug, Clone)]
pub struct Options<'a> {
    pub options: Vec<ResolvedOption<'a>>,
}

impl Options<'_> {
    pub fn get_string(&self, name: &str) -> Option<String> {
        for option in &self.options {
            match &option.value {
                ResolvedValue::SubCommandGroup(cmd) | ResolvedValue::SubCommand(cmd) => {
                    let sub_options = Options {
                        options: cmd.clone(),
                    };
                    return sub_options.get_string(name);
                }
                ResolvedValue::String(string) => {
                    if option.name == name {
                        return Some((*string).to_string());
                    }
                }
                _ => continue,
            }
        }
        None
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        for option in &self.options {
            match &option.value {
                ResolvedValue::SubCommandGroup(cmd) | ResolvedValue::SubCommand(cmd) => {
                    let sub_options = Options {
                        options: cmd.clone(),
                    };
                    return sub_options.get_integer(name);
                }
                ResolvedValue::Integer(integer) => {
                    if option.name == name {
                        return Some(*integer);
                    }
                }
                _ => continue,
            }
        }
        None
    }

    pub fn get_channel(&self, name: &str) -> Option<ChannelId> {
        for option in &self.options {
            match &option.value {
                ResolvedValue::SubCommandGroup(cmd) | ResolvedValue::SubCommand(cmd) => {
                    let sub_options = Options {
                        options: cmd.clone(),
                    };
                    return sub_options.get_channel(name);
                }
                ResolvedValue::Channel(channel) => {
                    if option.name == name {
                        return Some(channel.id);
                    }
                }
                _ => continue,
            }
        }
        None
    }

    /// Parses a snowflake given as a string option, e.g. a message id.
    pub fn get_id(&self, name: &str) -> Option<i64> {
        self.get_string(name)?.trim().parse().ok()
    }
}
