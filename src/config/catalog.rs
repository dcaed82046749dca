//! Catalog configuration loading from config.toml
//!
//! The shop's items, prices and box offer can be overridden with a TOML file. When no
//! file is present the launch catalog from [`Catalog::shop_default`] is used.

use crate::{
    core::{
        catalog::{BoxOffer, Catalog, CatalogItem},
        money,
    },
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable pointing at the catalog file.
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

/// Catalog file used when `CONFIG_PATH` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Shop name used when the file does not give one.
pub const DEFAULT_SHOP_NAME: &str = "Delícias do Prefeito";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// General shop settings
    #[serde(default)]
    pub shop: ShopConfig,
    /// Standalone items in display order
    pub items: Vec<ItemConfig>,
    /// The box offer
    #[serde(rename = "box")]
    pub box_offer: BoxConfig,
}

/// `[shop]` table
#[derive(Debug, Deserialize)]
pub struct ShopConfig {
    /// Name shown in message titles
    #[serde(default = "default_shop_name")]
    pub name: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: default_shop_name(),
        }
    }
}

fn default_shop_name() -> String {
    DEFAULT_SHOP_NAME.to_string()
}

/// One `[[items]]` entry
#[derive(Debug, Deserialize, Clone)]
pub struct ItemConfig {
    /// Item name, also used in the encoded orders
    pub name: String,
    /// Unit price in reais
    pub price: f64,
    /// Whether the item may go in a box
    #[serde(default)]
    pub box_eligible: bool,
}

/// `[box]` table
#[derive(Debug, Deserialize, Clone)]
pub struct BoxConfig {
    /// Display name of the box
    pub name: String,
    /// Price of one box in reais
    pub price: f64,
}

impl Config {
    /// Converts the parsed file into a validated catalog.
    ///
    /// # Errors
    /// Returns `Error::Config` for invalid prices or item names.
    pub fn into_catalog(self) -> Result<Catalog> {
        let items = self
            .items
            .into_iter()
            .map(|item| {
                let unit_price = money::price_from_f64(item.price, &format!("price of '{}'", item.name))?;
                Ok(CatalogItem {
                    name: item.name,
                    unit_price,
                    box_eligible: item.box_eligible,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let box_offer = BoxOffer {
            price: money::price_from_f64(self.box_offer.price, "box price")?,
            name: self.box_offer.name,
        };

        Catalog::new(items, box_offer)
    }
}

/// Loads catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    debug!("Attempting to load catalog from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    parse_config(&contents)
}

/// Parses catalog configuration from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid or incomplete.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Resolves the shop name and catalog.
///
/// Uses `CONFIG_PATH` when set (the file must then exist), otherwise `config.toml` if it
/// exists, otherwise the built-in launch catalog.
///
/// # Errors
/// Returns `Error::Config` if the chosen file is unreadable or invalid.
pub fn load_shop_catalog() -> Result<(String, Catalog)> {
    let explicit = std::env::var(CONFIG_PATH_VAR).ok();
    let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

    if explicit.is_none() && !Path::new(path).exists() {
        info!("No {DEFAULT_CONFIG_PATH} found, using the built-in catalog");
        return Ok((DEFAULT_SHOP_NAME.to_string(), Catalog::shop_default()));
    }

    let config = load_config(path)?;
    let shop_name = config.shop.name.clone();
    Ok((shop_name, config.into_catalog()?))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal::Decimal;

    const SAMPLE: &str = r#"
        [shop]
        name = "Doceria Teste"

        [[items]]
        name = "Brigadeiro (unidade)"
        price = 2.00
        box_eligible = true

        [[items]]
        name = "Salgadinho de queijo"
        price = 5.5

        [box]
        name = "Caixa de doces (4 unidades)"
        price = 7.00
    "#;

    #[test]
    fn test_parse_catalog_config() -> Result<()> {
        let config = parse_config(SAMPLE)?;
        assert_eq!(config.shop.name, "Doceria Teste");
        assert_eq!(config.items.len(), 2);
        assert!(config.items[0].box_eligible);
        assert!(!config.items[1].box_eligible);

        let catalog = config.into_catalog()?;
        assert_eq!(
            catalog.get("Salgadinho de queijo").unwrap().unit_price,
            Decimal::new(550, 2)
        );
        assert_eq!(catalog.box_offer().price, Decimal::new(700, 2));
        assert_eq!(catalog.box_eligible().count(), 1);
        Ok(())
    }

    #[test]
    fn test_shop_name_defaults() -> Result<()> {
        let config = parse_config(
            r#"
            items = []
            [box]
            name = "Caixa"
            price = 7.0
            "#,
        )?;
        assert_eq!(config.shop.name, DEFAULT_SHOP_NAME);
        Ok(())
    }

    #[test]
    fn test_negative_price_rejected() -> Result<()> {
        let config = parse_config(
            r#"
            [[items]]
            name = "Bolo"
            price = -1.0
            [box]
            name = "Caixa"
            price = 7.0
            "#,
        )?;
        assert!(matches!(config.into_catalog(), Err(Error::Config { .. })));
        Ok(())
    }

    #[test]
    fn test_delimiter_in_name_rejected() -> Result<()> {
        let config = parse_config(
            r#"
            [[items]]
            name = "Bolo; fatia"
            price = 1.0
            [box]
            name = "Caixa"
            price = 7.0
            "#,
        )?;
        assert!(config.into_catalog().is_err());
        Ok(())
    }

    #[test]
    fn test_missing_box_table_is_an_error() {
        let result = parse_config(
            r#"
            [[items]]
            name = "Bolo"
            price = 1.0
            "#,
        );
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_repository_config_matches_builtin_catalog() -> Result<()> {
        let config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml"))?;
        let catalog = config.into_catalog()?;
        let builtin = Catalog::shop_default();

        assert_eq!(catalog.items(), builtin.items());
        assert_eq!(catalog.box_offer(), builtin.box_offer());
        Ok(())
    }
}
