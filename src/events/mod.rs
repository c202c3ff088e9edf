pub mod command;
pub mod component;
pub mod guild_join;
pub mod ready;
pub mod router;
