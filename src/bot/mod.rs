//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `InventoryBuddy` application,
//! including all slash commands, autocomplete handlers, and bot context management.
//! The Discord author of each interaction is the owner every core call is scoped to.

/// Discord command implementations (product, sale, stock entry, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::Settings,
    core::OwnerId,
    errors::{Error, Result},
};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the loaded settings.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Settings from config.toml
    pub settings: Arc<Settings>,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection and settings.
    #[must_use]
    pub const fn new(database: DatabaseConnection, settings: Arc<Settings>) -> Self {
        Self { database, settings }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// The owner context for the invoking Discord user.
///
/// # Errors
/// Returns `Error::Authentication` if the author id is empty.
pub fn owner_of(ctx: Context<'_>) -> Result<OwnerId> {
    OwnerId::new(ctx.author().id.to_string())
}

/// Parses a `YYYY-MM-DD` command argument.
///
/// # Errors
/// Returns `Error::Validation` if the text is not a valid date.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        Error::validation(format!("'{input}' is not a date; use the YYYY-MM-DD format"))
    })
}

/// Timestamp stored for a user-selected day in `tz`: now when the day is
/// today, otherwise noon of that day.
///
/// # Errors
/// Returns `Error::Validation` if noon does not exist on that day in `tz`.
pub fn day_to_timestamp_in<Tz: TimeZone>(
    day: NaiveDate,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<DateTime<Utc>> {
    if now.with_timezone(tz).date_naive() == day {
        return Ok(now);
    }

    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    tz.from_local_datetime(&day.and_time(noon))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| Error::validation(format!("{day} has no noon in the local timezone")))
}

/// Resolves an optional date argument to a stored timestamp, defaulting to now.
///
/// # Errors
/// Returns `Error::Validation` for a malformed date.
pub fn effective_timestamp(input: Option<&str>) -> Result<DateTime<Utc>> {
    let now = Utc::now();
    match input {
        Some(text) => day_to_timestamp_in(parse_day(text)?, now, &Local),
        None => Ok(now),
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            match error.kind() {
                crate::errors::ErrorKind::Internal | crate::errors::ErrorKind::Store => {
                    error!("Error in command `{}`: {:?}", ctx.command().name, error);
                }
                _ => info!("Command `{}` rejected: {}", ctx.command().name, error),
            }
            if let Err(e) = ctx.say(format!("❌ {}", error.user_message())).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
///
/// # Errors
/// Returns `Error::Framework` if the client cannot be created or stops with an error.
#[instrument(skip(token, settings, database))]
pub async fn run_bot(
    token: String,
    settings: Arc<Settings>,
    database: DatabaseConnection,
) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::product(),
                commands::sell(),
                commands::sales(),
                commands::stock_entries(),
                commands::summary(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, settings))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::{FixedOffset, Timelike};

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(matches!(
            parse_day("29/02/2024"),
            Err(Error::Validation { .. })
        ));
        assert!(parse_day("2023-02-29").is_err());
    }

    #[test]
    fn test_day_to_timestamp_today_keeps_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(day_to_timestamp_in(today, now, &Utc).unwrap(), now);
    }

    #[test]
    fn test_day_to_timestamp_other_day_is_local_noon() {
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

        let stamp = day_to_timestamp_in(day, now, &tz).unwrap();
        assert_eq!(stamp.with_timezone(&tz).date_naive(), day);
        assert_eq!(stamp.hour(), 7);
    }
}
