use serde::{Deserialize, Serialize};

use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

/// Opaque identifier for Products.
///
/// The actor allocates identifiers from a counter; they are rendered as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation and update payloads ([`ProductFormData`])
/// - Collection checks ([`validate`](crate::validation::validate))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

/// Products with this many units or fewer are flagged as low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the actor system)
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `stock` - Units in stock
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }

    /// The price as shown on the product card, e.g. `Rp 15.000.000`.
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

/// Formats a price in rupiah the Indonesian way: `.` groups thousands, `,` starts the
/// fraction, and at most three fraction digits are kept.
///
/// `15000000.0` becomes `Rp 15.000.000`, `1234.5` becomes `Rp 1.234,5`.
pub fn format_price(price: f64) -> String {
    // `as` saturates, so absurd values cannot wrap
    let thousandths = (price.abs() * 1000.0).round() as u128;
    let whole = group_thousands(&(thousandths / 1000).to_string());
    let fraction = format!("{:03}", thousandths % 1000);
    let fraction = fraction.trim_end_matches('0');

    let sign = if price < 0.0 && thousandths > 0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("Rp {sign}{whole}")
    } else {
        format!("Rp {sign}{whole},{fraction}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

/// Text-typed staging record behind the product form.
///
/// Used as both the create and the update payload; the actor validates and parses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFormData {
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl ProductFormData {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        stock: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            stock: stock.into(),
        }
    }
}

impl From<&Product> for ProductFormData {
    fn from(product: &Product) -> Self {
        // f64's Display drops a zero fraction: 15000000.0 -> "15000000"
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
        }
    }
}

/// Ordering applied to the displayed product list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Collection order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    StockAsc,
    StockDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Default,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::StockAsc,
        SortOption::StockDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::StockAsc => "stock-asc",
            SortOption::StockDesc => "stock-desc",
        }
    }

    /// Label shown in the sort picker.
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Default => "Default",
            SortOption::PriceAsc => "Harga (Terendah ke Tertinggi)",
            SortOption::PriceDesc => "Harga (Tertinggi ke Terendah)",
            SortOption::StockAsc => "Stok (Terendah ke Tertinggi)",
            SortOption::StockDesc => "Stok (Tertinggi ke Terendah)",
        }
    }

    /// Comparator for this option, or `None` when the list keeps its order.
    pub fn compare(&self, a: &Product, b: &Product) -> Option<Ordering> {
        match self {
            SortOption::Default => None,
            SortOption::PriceAsc => Some(a.price.total_cmp(&b.price)),
            SortOption::PriceDesc => Some(b.price.total_cmp(&a.price)),
            SortOption::StockAsc => Some(a.stock.cmp(&b.stock)),
            SortOption::StockDesc => Some(b.stock.cmp(&a.stock)),
        }
    }
}

impl Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option: {0}")]
pub struct UnknownSortOption(pub String);

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| UnknownSortOption(s.to_string()))
    }
}

/// The catalog a fresh desk starts with.
pub fn sample_catalog() -> Vec<ProductFormData> {
    vec![
        ProductFormData::new("Laptop Gaming", "15000000", "5"),
        ProductFormData::new("Mouse Wireless", "250000", "20"),
        ProductFormData::new("Keyboard Mechanical", "1200000", "8"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_seeded_from_product_renders_whole_numbers() {
        let product = Product::new(ProductId::from(1), "Laptop", 15000000.0, 5);
        let form = ProductFormData::from(&product);
        assert_eq!(form, ProductFormData::new("Laptop", "15000000", "5"));

        let cheap = Product::new(ProductId::from(2), "Pen", 2.5, 1);
        assert_eq!(ProductFormData::from(&cheap).price, "2.5");
    }

    #[test]
    fn test_sort_option_names() {
        for option in SortOption::ALL {
            assert_eq!(option.as_str().parse::<SortOption>().unwrap(), option);
        }
        assert_eq!(
            serde_json::to_string(&SortOption::PriceDesc).unwrap(),
            "\"price-desc\""
        );
        assert!("price".parse::<SortOption>().is_err());
    }

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(15000000.0), "Rp 15.000.000");
        assert_eq!(format_price(250000.0), "Rp 250.000");
        assert_eq!(format_price(999.0), "Rp 999");
        assert_eq!(format_price(1000.0), "Rp 1.000");
        assert_eq!(format_price(1234.5), "Rp 1.234,5");
        assert_eq!(format_price(29.99), "Rp 29,99");
        // at most three fraction digits
        assert_eq!(format_price(0.12345), "Rp 0,123");
    }

    #[test]
    fn test_low_stock_includes_threshold() {
        let product = |stock| Product::new(ProductId::from(1), "Mouse", 250000.0, stock);
        assert!(product(5).is_low_stock());
        assert!(product(10).is_low_stock());
        assert!(!product(11).is_low_stock());
        assert_eq!(product(11).display_price(), "Rp 250.000");
    }

    #[test]
    fn test_sort_labels() {
        assert_eq!(SortOption::Default.label(), "Default");
        assert_eq!(SortOption::PriceAsc.label(), "Harga (Terendah ke Tertinggi)");
        assert_eq!(SortOption::StockDesc.label(), "Stok (Tertinggi ke Terendah)");
    }

    #[test]
    fn test_product_id_is_opaque_string() {
        assert_eq!(ProductId::from(7).to_string(), "7");
        assert_eq!(serde_json::to_string(&ProductId::from(7)).unwrap(), "\"7\"");
    }
}
