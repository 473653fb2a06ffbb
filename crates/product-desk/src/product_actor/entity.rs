//! ActorEntity trait implementation for the Product domain type.
//!
//! Validation runs in the collection checks, before the actor touches its store, so a
//! rejected form never leaves a trace. The lifecycle hooks then only parse and assign.

use super::ProductError;
use crate::model::{Product, ProductFormData, ProductId};
use crate::validation::{parse_form, validate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn ensure_valid(
    form: &ProductFormData,
    existing: &[Product],
    editing: Option<&ProductId>,
) -> Result<(), ProductError> {
    let errors = validate(form, existing, editing);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ProductError::Validation(errors))
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductFormData;
    type Update = ProductFormData;
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Creates a new Product from a validated form.
    fn from_create_params(id: ProductId, params: ProductFormData) -> Result<Self, Self::Error> {
        let parsed = parse_form(&params)?;
        Ok(Self::new(id, parsed.name, parsed.price, parsed.stock))
    }

    /// Rejects empty or malformed fields and names already in use.
    fn check_create(params: &ProductFormData, existing: &[Self]) -> Result<(), Self::Error> {
        ensure_valid(params, existing, None)
    }

    /// Same rules as create, except the product may keep its own name.
    fn check_update(
        id: &ProductId,
        update: &ProductFormData,
        existing: &[Self],
    ) -> Result<(), Self::Error> {
        ensure_valid(update, existing, Some(id))
    }

    /// Replaces name, price and stock. The id is never touched.
    async fn on_update(
        &mut self,
        update: ProductFormData,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        let parsed = parse_form(&update)?;
        self.name = parsed.name;
        self.price = parsed.price;
        self.stock = parsed.stock;
        Ok(())
    }
}
