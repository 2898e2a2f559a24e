//! Catalog
//!
//! Loads product listings from YAML and validates them into [`Product`]s.
//!
//! ```yaml
//! products:
//!   - id: camera
//!     title: Canon EOS 90D
//!     image: images/camera.jpg
//!     price: 500 INR
//!     security_deposit: 5000 INR
//!     owner:
//!       name: Priya
//!       location: Pune
//! ```

use std::{fs, path::Path};

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, INR, USD},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::Price,
    products::{OwnerInfo, Product, ProductId},
};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unit price of zero or less
    #[error("Price must be positive for {0}")]
    NonPositivePrice(ProductId),

    /// Deposit below zero
    #[error("Security deposit cannot be negative for {0}")]
    NegativeDeposit(ProductId),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products, or between a price and its deposit
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The same id was listed twice
    #[error("Duplicate product: {0}")]
    DuplicateProduct(ProductId),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<ProductFixture>,
}

/// Product as listed in YAML
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: String,
    title: String,
    #[serde(default)]
    image: String,

    /// e.g. "500 INR"
    price: String,

    /// e.g. "5000 INR"; the default deposit applies when absent
    #[serde(default)]
    security_deposit: Option<String>,

    #[serde(default)]
    owner: OwnerFixture,
}

#[derive(Debug, Default, Deserialize)]
struct OwnerFixture {
    #[serde(default)]
    name: String,
    location: Option<String>,
    contact: Option<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let id = ProductId::new(fixture.id);
        let unit_price = parse_price(&fixture.price)?;

        if unit_price.to_minor_units() <= 0 {
            return Err(CatalogError::NonPositivePrice(id));
        }

        let security_deposit = fixture
            .security_deposit
            .as_deref()
            .map(parse_price)
            .transpose()?;

        if let Some(deposit) = security_deposit {
            if deposit.currency() != unit_price.currency() {
                return Err(CatalogError::CurrencyMismatch(
                    unit_price.currency().iso_alpha_code.to_string(),
                    deposit.currency().iso_alpha_code.to_string(),
                ));
            }

            if deposit.to_minor_units() < 0 {
                return Err(CatalogError::NegativeDeposit(id));
            }
        }

        Ok(Product {
            id,
            title: fixture.title,
            image: fixture.image,
            unit_price,
            security_deposit,
            owner: OwnerInfo {
                name: fixture.owner.name,
                location: fixture.owner.location,
                contact: fixture.owner.contact,
            },
        })
    }
}

/// Parse a price string (e.g. "499.50 INR") into money.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if
/// the amount has more decimal places than the currency allows, or if the
/// currency code is not recognized.
pub fn parse_price(s: &str) -> Result<Price, CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = currency_for_code(code)?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .map(Decimal::from)
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    let minor = amount
        .checked_mul(scale)
        .filter(|value| value.fract().is_zero())
        .and_then(|value| value.to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor, currency))
}

fn currency_for_code(code: &str) -> Result<&'static Currency, CatalogError> {
    match code {
        "INR" => Ok(INR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(CatalogError::UnknownCurrency(other.to_string())),
    }
}

/// Products available to rent, in listing order.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a listing is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&contents)?;

        debug!(path = %path.display(), products = catalog.len(), "loaded catalog");

        Ok(catalog)
    }

    /// Parse a catalog from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a listing is invalid.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;
        let mut catalog = Self::new();

        for product_fixture in fixture.products {
            catalog.insert(product_fixture.try_into()?)?;
        }

        Ok(catalog)
    }

    /// Add a validated product
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already listed or the currency differs from
    /// earlier products.
    pub fn insert(&mut self, product: Product) -> Result<(), CatalogError> {
        let currency = product.unit_price.currency();

        if let Some(existing) = self.currency
            && existing != currency
        {
            return Err(CatalogError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            ));
        }

        if self.index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        self.currency = Some(currency);
        self.index.insert(product.id.clone(), self.products.len());
        self.products.push(product);

        Ok(())
    }

    /// Get a product by id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not listed.
    pub fn product(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.index
            .get(id)
            .and_then(|position| self.products.get(*position))
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    /// Iterate over products in listing order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether no products are listed
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency shared by every listing
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, CatalogError> {
        self.currency.ok_or(CatalogError::NoCurrency)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::iso::JPY;
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    const CATALOG: &str = "\
products:
  - id: camera
    title: Canon EOS 90D
    image: images/camera.jpg
    price: 500 INR
    security_deposit: 5000 INR
    owner:
      name: Priya
      location: Pune
  - id: tent
    title: Four person tent
    price: 299.50 INR
";

    #[test]
    fn parse_price_reads_major_units() -> TestResult {
        assert_eq!(parse_price("500 INR")?, Money::from_minor(500_00, INR));
        assert_eq!(parse_price("2.99 GBP")?, Money::from_minor(299, GBP));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        assert!(matches!(parse_price("2.99GBP"), Err(CatalogError::InvalidPrice(_))));
        assert!(matches!(parse_price("1 INR extra"), Err(CatalogError::InvalidPrice(_))));
        assert!(matches!(parse_price("abc INR"), Err(CatalogError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_sub_minor_precision() {
        assert!(matches!(parse_price("1.005 INR"), Err(CatalogError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn from_yaml_loads_products_in_order() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;

        let ids: Vec<&str> = catalog.iter().map(|product| product.id.as_str()).collect();

        assert_eq!(ids, vec!["camera", "tent"]);
        assert_eq!(catalog.currency()?, INR);

        let camera = catalog.product(&ProductId::new("camera"))?;

        assert_eq!(camera.unit_price, Money::from_minor(500_00, INR));
        assert_eq!(camera.security_deposit, Some(Money::from_minor(5_000_00, INR)));
        assert_eq!(camera.owner.name, "Priya");
        assert_eq!(camera.owner.location.as_deref(), Some("Pune"));

        let tent = catalog.product(&ProductId::new("tent"))?;

        assert_eq!(tent.unit_price, Money::from_minor(299_50, INR));
        assert!(tent.security_deposit.is_none());
        assert!(tent.image.is_empty());

        Ok(())
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("catalog.yml");

        fs::write(&path, CATALOG)?;

        let catalog = Catalog::load(&path)?;

        assert_eq!(catalog.len(), 2);

        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() -> TestResult {
        let dir = tempdir()?;

        let result = Catalog::load(dir.path().join("missing.yml"));

        assert!(matches!(result, Err(CatalogError::Io(_))));

        Ok(())
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let yaml = "\
products:
  - id: camera
    title: Camera
    price: 500 INR
  - id: kayak
    title: Kayak
    price: 40 USD
";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn deposit_in_other_currency_is_rejected() {
        let yaml = "\
products:
  - id: camera
    title: Camera
    price: 500 INR
    security_deposit: 50 GBP
";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn zero_price_is_rejected() {
        let yaml = "\
products:
  - id: freebie
    title: Free thing
    price: 0 INR
";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(result, Err(CatalogError::NonPositivePrice(id)) if id.as_str() == "freebie"));
    }

    #[test]
    fn negative_deposit_is_rejected() {
        let yaml = "\
products:
  - id: drill
    title: Drill
    price: 100 INR
    security_deposit: -5 INR
";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(result, Err(CatalogError::NegativeDeposit(_))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = "\
products:
  - id: camera
    title: Camera
    price: 500 INR
  - id: camera
    title: Camera again
    price: 600 INR
";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(result, Err(CatalogError::DuplicateProduct(_))));
    }

    #[test]
    fn insert_rejects_other_currency() -> TestResult {
        let mut catalog = Catalog::from_yaml(CATALOG)?;

        let result = catalog.insert(Product {
            id: ProductId::new("lantern"),
            title: "Lantern".to_string(),
            image: String::new(),
            unit_price: Money::from_minor(1_000, JPY),
            security_deposit: None,
            owner: OwnerInfo::default(),
        });

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch(_, _))));
        assert_eq!(catalog.len(), 2);

        Ok(())
    }

    #[test]
    fn missing_product_is_reported() {
        let catalog = Catalog::new();

        let result = catalog.product(&ProductId::new("nope"));

        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
        assert!(matches!(catalog.currency(), Err(CatalogError::NoCurrency)));
    }
}
