//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are drawn from the invoking user's own products only.

use crate::{
    bot::{Context, owner_of},
    core::product,
};
use tracing::warn;

/// Provides autocomplete suggestions for product names.
///
/// Returns up to 25 of the author's product names containing `partial`
/// (case-insensitive), sorted alphabetically. Lookup failures are logged and
/// yield no suggestions.
pub async fn autocomplete_product_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(owner) = owner_of(ctx) else {
        return Vec::new();
    };

    product::suggest_product_names(&ctx.data().database, &owner, partial)
        .await
        .unwrap_or_else(|e| {
            warn!("Product autocomplete failed: {}", e);
            Vec::new()
        })
}
