//! Bot layer - Discord-specific interface and command handlers
//!
//! This module is the form through which customers build and submit orders, and through
//! which the shop views totals and downloads the CSV files. All business rules live in
//! [`crate::core`]; commands only collect input and format replies.

/// Discord command implementations (cart, orders, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::AppConfig,
    core::{cart::Cart, catalog::Catalog, order},
    errors::{Error, Result},
    store::{OrderRecord, RecordStore},
};
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Shop name used in titles
    pub shop_name: String,
    /// Items, prices and the box offer
    pub catalog: Catalog,
    /// CSV file of submitted orders
    pub store: RecordStore,
    /// Draft carts keyed by Discord user
    pub carts: RwLock<HashMap<serenity::UserId, Cart>>,
}

impl BotData {
    /// Creates the shared context from the loaded configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            shop_name: config.shop_name,
            catalog: config.catalog,
            store: RecordStore::new(config.store_path),
            carts: RwLock::new(HashMap::new()),
        }
    }

    /// Submits a user's cart as an order and empties the cart.
    ///
    /// The cart is taken out and the order recorded under a single write lock. A rejected
    /// order puts the cart back untouched so the customer can fix it and retry.
    ///
    /// # Errors
    /// Returns the validation or store error from [`order::submit_order`].
    pub async fn submit_cart(
        &self,
        user_id: serenity::UserId,
        customer_name: &str,
        note: &str,
    ) -> Result<OrderRecord> {
        let mut carts = self.carts.write().await;
        let cart = carts.remove(&user_id).unwrap_or_default();

        let result = order::submit_order(
            &self.store,
            &self.catalog,
            &cart.to_input(customer_name, note),
        );
        if result.is_err() && !cart.is_empty() {
            carts.insert(user_id, cart);
        }
        result
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } if error.is_validation() => {
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send validation message: {}", e);
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
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
/// Returns an error if the client cannot be created or the gateway connection fails.
#[instrument(skip(token, config))]
pub async fn run_bot(token: String, config: AppConfig) -> Result<()> {
    let data = BotData::new(config);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::menu(),
                commands::cart(),
                commands::submit(),
                commands::orders(),
                commands::totals(),
                commands::audit(),
                commands::export_totals(),
                commands::export_orders(),
                commands::clear_orders(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
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
    use super::*;
    use crate::test_utils::*;
    use tempfile::TempDir;

    fn bot_data() -> Result<(TempDir, BotData)> {
        let dir = tempfile::tempdir()?;
        let data = BotData::new(AppConfig {
            shop_name: "Doceria".to_string(),
            catalog: sample_catalog(),
            store_path: dir.path().join("pedidos.csv"),
        });
        Ok((dir, data))
    }

    #[tokio::test]
    async fn test_submit_cart_records_order_and_empties_cart() -> Result<()> {
        let (_dir, data) = bot_data()?;
        let user = serenity::UserId::new(1);
        data.carts
            .write()
            .await
            .entry(user)
            .or_default()
            .set_quantity(&data.catalog, BRIGADEIRO, 3)?;

        let record = data.submit_cart(user, "Ana", "").await?;

        assert_eq!(record.encoded_order, "Brigadeiro (unidade) (x3)");
        assert!(!data.carts.read().await.contains_key(&user));
        assert_eq!(data.store.read_all_records()?, vec![record]);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_cart() -> Result<()> {
        let (_dir, data) = bot_data()?;
        let user = serenity::UserId::new(1);
        data.carts
            .write()
            .await
            .entry(user)
            .or_default()
            .set_quantity(&data.catalog, PACOCA, 2)?;

        let result = data.submit_cart(user, "   ", "").await;

        assert!(matches!(result, Err(Error::EmptyCustomerName)));
        let carts = data.carts.read().await;
        assert_eq!(carts.get(&user).map(|cart| cart.quantities().get(PACOCA)), Some(Some(&2)));
        assert!(!data.store.exists());
        Ok(())
    }
}
