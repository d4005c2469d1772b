//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities are the single representation of each record: the same
//! `Model` is persisted, returned by the core, and rendered by the bot.
//! Every table carries an `owner_id` column that scopes all queries.

pub mod product;
pub mod sale;
pub mod stock_entry;

// Re-export specific types to avoid conflicts
pub use product::Entity as Product;
pub use sale::Entity as Sale;
pub use stock_entry::{Entity as StockEntry, EntryType};
