//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come straight from the catalog so that the chosen value always matches an
//! item name exactly.

use crate::{bot::BotData, core::catalog::CatalogItem, errors::Error};

/// Discord shows at most this many suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Provides autocomplete suggestions for standalone item names.
///
/// # Arguments
/// * `ctx` - The poise context containing the catalog
/// * `partial` - The partial string the user has typed so far
///
/// # Returns
/// Item names containing the partial input (case-insensitive), in catalog order
pub async fn autocomplete_item_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_names(ctx.data().catalog.items().iter(), partial)
}

/// Provides autocomplete suggestions for box slots, offering only box-eligible items.
pub async fn autocomplete_box_item(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_names(ctx.data().catalog.box_eligible(), partial)
}

fn matching_names<'a>(items: impl Iterator<Item = &'a CatalogItem>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    items
        .filter(|item| item.name.to_lowercase().contains(&partial_lower))
        .map(|item| item.name.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}
