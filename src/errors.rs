//! Unified error types for the inventory tracker.
//!
//! Every core operation returns [`Result`]. The first five variants form the
//! domain taxonomy surfaced to users; the rest are ambient failures from
//! configuration, I/O, export and the Discord framework.

use std::fmt;

use sea_orm::DbErr;
use thiserror::Error;

/// Coarse classification of an [`Error`], used when rendering notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input violated a constraint; nothing was mutated
    Validation,
    /// A referenced record does not exist under the caller's ownership
    NotFound,
    /// A sale asked for more units than are on hand
    InsufficientStock,
    /// No authenticated owner context
    Authentication,
    /// The record store call failed; nothing was committed
    Store,
    /// Configuration, I/O, export or framework failure
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "Validation error",
            Self::NotFound => "Not found",
            Self::InsufficientStock => "Insufficient stock",
            Self::Authentication => "Authentication required",
            Self::Store => "Store error",
            Self::Internal => "Internal error",
        };
        f.write_str(label)
    }
}

/// Application error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Input violates a stated constraint (empty field, bad quantity, negative price)
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// Referenced record does not resolve under the caller's ownership
    #[error("{entity} not found: {reference}")]
    NotFound {
        /// Kind of record that was looked up ("Product", "Sale", ...)
        entity: &'static str,
        /// The id or name that failed to resolve
        reference: String,
    },

    /// Requested sale quantity exceeds the available stock
    #[error("Insufficient stock for '{product}': requested {requested}, only {available} available")]
    InsufficientStock {
        /// Product name
        product: String,
        /// Units the caller asked for
        requested: i64,
        /// Units on hand at the time of the check
        available: i64,
    },

    /// No authenticated owner context
    #[error("Authentication error: {message}")]
    Authentication {
        /// Why the owner context is missing
        message: String,
    },

    /// The record store call failed
    #[error("Store error: {0}")]
    Store(#[from] DbErr),

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// CSV export failed
    #[error("Export error: {message}")]
    Export {
        /// Description of the export failure
        message: String,
    },

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self::Export {
            message: value.to_string(),
        }
    }
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a product [`Error::NotFound`].
    pub fn product_not_found(reference: impl ToString) -> Self {
        Self::NotFound {
            entity: "Product",
            reference: reference.to_string(),
        }
    }

    /// Returns the taxonomy kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Store(_) => ErrorKind::Store,
            Self::Config { .. }
            | Self::Io(_)
            | Self::EnvVar(_)
            | Self::Export { .. }
            | Self::Framework(_) => ErrorKind::Internal,
        }
    }

    /// Text for a single dismissible notification: the kind plus the
    /// corrective action where one is known.
    #[must_use]
    pub fn user_message(&self) -> String {
        let kind = self.kind();
        match self {
            Self::Validation { message } => format!("{kind}: {message}"),
            Self::NotFound { entity, reference } => {
                format!("{kind}: {entity} '{reference}' does not exist. Check the name and try again.")
            }
            Self::InsufficientStock {
                product, available, ..
            } => format!("{kind}: Only {available} units available for {product}."),
            Self::Authentication { .. } => {
                format!("{kind}: please sign in again before retrying.")
            }
            Self::Store(_) => format!("{kind}: the change was not saved. Please try again."),
            _ => format!("{kind}: something went wrong. Please try again later."),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
