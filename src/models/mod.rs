pub mod command;
pub mod config;
pub mod giveaway;
pub mod handler;
pub mod manifest;
pub mod response;
pub mod settings;
pub mod tier;
pub mod user;
