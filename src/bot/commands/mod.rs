//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands and the dashboard summary
pub mod general;

/// Product management commands
pub mod product;

/// Sale recording and sales history commands
pub mod sale;

/// Stock entry log commands
pub mod stock;

/// Maximum number of records listed in one reply
pub const MAX_LISTED: usize = 20;

// Export commands
pub use general::*;
pub use product::*;
pub use sale::*;
pub use stock::*;

/// Joins list lines for a reply, keeping the first [`MAX_LISTED`] and noting
/// how many were left out.
#[must_use]
pub fn truncated_listing(lines: Vec<String>) -> String {
    let hidden = lines.len().saturating_sub(MAX_LISTED);
    let mut text = lines
        .into_iter()
        .take(MAX_LISTED)
        .collect::<Vec<_>>()
        .join("\n");
    if hidden > 0 {
        text.push_str(&format!("\n…and {hidden} more"));
    }
    text
}
