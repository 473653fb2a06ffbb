//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes domain-specific methods.
use crate::model::{Product, ProductFormData, ProductId};
use crate::product_actor::ProductError;
use crate::session::ConfirmedDelete;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
///
/// [`ActorClient::inner`] hands out the untyped resource client, which can delete without a
/// [`ConfirmedDelete`]. The desk keeps its `ProductClient` private for that reason; outside code
/// deletes through [`delete_product`](Self::delete_product).
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    /// Entity errors come back as the `ProductError` the actor produced, so callers can still
    /// reach the field errors of a rejected form.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<ProductError>() {
            Ok(product_error) => product_error,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    /// Validates `form` and appends a new product.
    #[instrument(skip(self))]
    pub async fn create_product(&self, form: ProductFormData) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(form).await.map_err(Self::map_error)
    }

    /// Validates `form` and replaces the product's fields in place.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        form: ProductFormData,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, form).await.map_err(Self::map_error)
    }

    /// Removes the product a confirmed delete points at.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, confirmed: ConfirmedDelete) -> Result<(), ProductError> {
        debug!("Sending request");
        self.inner
            .delete(confirmed.id().clone())
            .await
            .map_err(Self::map_error)
    }
}
