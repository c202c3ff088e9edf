#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::unreadable_literal)]

use std::sync::Arc;

use serenity::{http::Http, prelude::GatewayIntents, Client};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};

use crate::{
    database::postgres::PgStore,
    giveaway::{
        manager::GiveawayManager,
        scheduler::{schedule_channel, Scheduler, SchedulerConfig},
    },
    messaging::{discord::DiscordMessenger, webhook::WebhookUploader},
    models::config::BotConfig,
};

mod commands;
mod common;
mod database;
mod events;
mod giveaway;
mod messaging;
mod models;

#[tokio::main]
async fn main() {
    let log_level = match std::env::var("DEBUG").unwrap_or(false.to_string()).as_str() {
        "true" => tracing::Level::DEBUG,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Getting environment variables");
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Could not load configuration: {err}");
            return;
        }
    };

    info!("Establishing connection to main database");
    let pool = match PgPoolOptions::new()
        .connect(&config.database.connection_url())
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            error!("Could not connect to the main database. Failed with error: {err:?}");
            return;
        }
    };
    let store = PgStore::new(pool);
    info!("Running outstanding migrations");
    if let Err(err) = store.migrate().await {
        error!("Could not run migrations. Failed with error: {err:?}");
        return;
    }
    info!("Connected to main database");

    let http = Arc::new(Http::new(&config.discord_token));
    let uploader = match WebhookUploader::connect(http.clone(), &config.manifest_webhooks).await {
        Ok(uploader) => uploader,
        Err(err) => {
            error!("Could not resolve manifest webhooks. Failed with error: {err:?}");
            return;
        }
    };

    let (schedule, incoming) = schedule_channel();
    let manager = Arc::new(GiveawayManager::new(
        Arc::new(store),
        Arc::new(DiscordMessenger::new(http)),
        Arc::new(uploader),
        schedule,
    ));
    let scheduler = Scheduler::new(
        manager.clone(),
        incoming,
        SchedulerConfig {
            sweep_interval: config.sweep_interval,
            resync_interval: config.resync_interval,
            workers: config.end_workers,
        },
    )
    .start();

    // Discord client connection
    let handler = models::handler::Handler { manager };
    let intents = GatewayIntents::GUILDS;
    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
    {
        Ok(client) => client,
        Err(err) => {
            error!("Could not build the Discord client. Failed with error: {err:?}");
            scheduler.stop().await;
            return;
        }
    };

    if let Err(err) = client.start_autosharded().await {
        error!("Attempted to start the Discord client, but failed with error: {err}");
    }
    scheduler.stop().await;
}
