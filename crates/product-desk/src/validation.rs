//! Product form validation.
//!
//! [`validate`] checks a [`ProductFormData`] against the live collection and returns every
//! problem at once, keyed by field. Nothing is cached between calls. [`parse_form`] is the
//! only way from a staging form to typed values, so a form that fails validation can never be
//! half-parsed into a product.

use crate::model::{Product, ProductFormData, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A field of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Price,
    Stock,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Stock => "stock",
        })
    }
}

/// A single field-level problem. Messages are the form's user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FieldError {
    #[error("Nama produk wajib diisi")]
    NameRequired,
    #[error("Nama produk sudah digunakan")]
    NameTaken,
    #[error("Harga wajib diisi")]
    PriceRequired,
    #[error("Harga harus berupa angka positif")]
    PriceNotPositive,
    #[error("Stok wajib diisi")]
    StockRequired,
    #[error("Stok harus berupa angka positif")]
    StockNotPositive,
}

/// Field errors of one validation pass. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

/// Typed values of a form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedProduct {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

fn parse_price(text: &str) -> Result<f64, FieldError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FieldError::PriceRequired);
    }
    match text.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(FieldError::PriceNotPositive),
    }
}

fn parse_stock(text: &str) -> Result<u32, FieldError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FieldError::StockRequired);
    }
    match text.parse::<i64>() {
        Ok(stock) if stock > 0 => u32::try_from(stock).map_err(|_| FieldError::StockNotPositive),
        _ => Err(FieldError::StockNotPositive),
    }
}

fn check_name(
    name: &str,
    products: &[Product],
    editing: Option<&ProductId>,
) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::NameRequired);
    }
    let wanted = name.to_lowercase();
    let taken = products
        .iter()
        .filter(|p| Some(&p.id) != editing)
        .any(|p| p.name.to_lowercase() == wanted);
    if taken {
        Err(FieldError::NameTaken)
    } else {
        Ok(())
    }
}

/// Validates `form` against `products`.
///
/// `editing` is the id of the product being edited, if any; it is left out of the
/// duplicate-name check so a product can keep its own name.
pub fn validate(
    form: &ProductFormData,
    products: &[Product],
    editing: Option<&ProductId>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Err(e) = check_name(&form.name, products, editing) {
        errors.insert(Field::Name, e);
    }
    if let Err(e) = parse_price(&form.price) {
        errors.insert(Field::Price, e);
    }
    if let Err(e) = parse_stock(&form.stock) {
        errors.insert(Field::Stock, e);
    }
    errors
}

/// Parses the numeric fields of `form`. The name is kept exactly as typed.
///
/// Uniqueness is not checked here; see [`validate`].
pub fn parse_form(form: &ProductFormData) -> Result<ParsedProduct, FieldErrors> {
    let mut errors = FieldErrors::new();
    if form.name.trim().is_empty() {
        errors.insert(Field::Name, FieldError::NameRequired);
    }
    let price = parse_price(&form.price)
        .map_err(|e| errors.insert(Field::Price, e))
        .ok();
    let stock = parse_stock(&form.stock)
        .map_err(|e| errors.insert(Field::Stock, e))
        .ok();

    match (price, stock) {
        (Some(price), Some(stock)) if errors.is_empty() => Ok(ParsedProduct {
            name: form.name.clone(),
            price,
            stock,
        }),
        _ => Err(errors),
    }
}
