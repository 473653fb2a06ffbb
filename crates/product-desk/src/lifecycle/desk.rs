use crate::catalog;
use crate::clients::ProductClient;
use crate::config::DeskConfig;
use crate::debounce::Debouncer;
use crate::model::{sample_catalog, Product, ProductId, SortOption};
use crate::product_actor::{self, ProductError};
use crate::session::{DeskState, EmptyListing};
use crate::validation::Field;
use resource_actor::ActorClient;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// The product page: the product actor, the search debouncer and the desk state.
///
/// `ProductDesk` is responsible for:
/// - **Lifecycle Management**: starting the product actor and stopping it on shutdown
/// - **Wiring**: feeding store outcomes back into the [`DeskState`]
/// - **Search Debouncing**: only the settled search text filters the list
///
/// # Example
///
/// ```ignore
/// let mut desk = ProductDesk::with_sample_catalog(&DeskConfig::default()).await?;
///
/// desk.edit_field(Field::Name, "Cable");
/// desk.edit_field(Field::Price, "15000");
/// desk.edit_field(Field::Stock, "40");
/// let cable = desk.submit().await?;
///
/// desk.request_delete(&cable.id).await?;
/// desk.confirm_delete().await?;
///
/// desk.shutdown().await?;
/// ```
pub struct ProductDesk {
    client: ProductClient,
    search: Debouncer<String>,
    state: DeskState,
    handle: JoinHandle<()>,
}

impl ProductDesk {
    /// Spawns an empty product actor. Must be called from within a Tokio runtime.
    pub fn new(config: &DeskConfig) -> Self {
        let (actor, resource_client) = product_actor::new(config.channel_buffer);
        let client = ProductClient::new(resource_client);
        let handle = tokio::spawn(actor.run(()));

        info!(
            debounce_ms = config.search_debounce.as_millis() as u64,
            channel_buffer = config.channel_buffer,
            "Product desk started"
        );

        Self {
            client,
            search: Debouncer::new(String::new(), config.search_debounce),
            state: DeskState::new(),
            handle,
        }
    }

    /// Like [`new`](Self::new), seeded with the three sample products.
    pub async fn with_sample_catalog(config: &DeskConfig) -> Result<Self, ProductError> {
        let desk = Self::new(config);
        for form in sample_catalog() {
            let id = desk.client.create_product(form).await?;
            debug!(product_id = %id, "Sample product added");
        }
        Ok(desk)
    }

    pub fn state(&self) -> &DeskState {
        &self.state
    }

    fn transition(&mut self, step: impl FnOnce(DeskState) -> DeskState) {
        let state = std::mem::take(&mut self.state);
        self.state = step(state);
    }

    /// Records the typed search text. It filters the list once it has settled.
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.search.push(text.clone());
        self.transition(|s| s.search_typed(text));
    }

    /// Waits until the typed search text has settled.
    pub async fn wait_for_search(&mut self) {
        let typed = self.state.search.clone();
        let mut settled = self.search.subscribe();
        if settled.wait_for(|text| *text == typed).await.is_err() {
            warn!("Search debouncer stopped before the text settled");
        }
        self.sync_search();
    }

    fn sync_search(&mut self) {
        let settled = self.search.current();
        if settled != self.state.applied_search {
            debug!(search = %settled, "Search settled");
            self.transition(|s| s.search_settled(settled));
        }
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.transition(|s| s.sort_chosen(sort));
    }

    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.transition(|s| s.form_edited(field, value));
    }

    async fn find(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.client
            .get(id.clone())
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Looks up one product. The store itself stays private to the desk, so every delete goes
    /// through [`confirm_delete`](Self::confirm_delete).
    pub async fn product(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        self.client.get(id.clone()).await
    }

    /// Loads `id` into the form for editing.
    pub async fn select_for_edit(&mut self, id: &ProductId) -> Result<(), ProductError> {
        let product = self.find(id).await?;
        info!(product_id = %id, "Editing product");
        self.transition(|s| s.begin_edit(&product));
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.transition(DeskState::cancel_edit);
    }

    /// Creates a product from the form, or updates the one being edited.
    ///
    /// On success the form is cleared and edit mode ends. A rejected form stays as typed with
    /// its field errors recorded in the state.
    pub async fn submit(&mut self) -> Result<Product, ProductError> {
        let form = self.state.form.clone();
        let outcome = match self.state.editing().cloned() {
            Some(id) => self.client.update_product(id, form).await,
            None => match self.client.create_product(form).await {
                Ok(id) => self.find(&id).await,
                Err(e) => Err(e),
            },
        };

        match outcome {
            Ok(product) => {
                info!(product_id = %product.id, name = %product.name, "Product saved");
                self.transition(DeskState::submit_accepted);
                Ok(product)
            }
            Err(ProductError::Validation(errors)) => {
                warn!(%errors, "Product form rejected");
                self.transition(|s| s.submit_rejected(errors.clone()));
                Err(ProductError::Validation(errors))
            }
            Err(e) => {
                error!(error = %e, "Submit failed");
                Err(e)
            }
        }
    }

    /// Marks `id` for deletion. Nothing is removed until [`confirm_delete`](Self::confirm_delete).
    pub async fn request_delete(&mut self, id: &ProductId) -> Result<(), ProductError> {
        let product = self.find(id).await?;
        info!(product_id = %id, name = %product.name, "Delete requested");
        self.transition(|s| s.request_delete(&product));
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.transition(DeskState::cancel_delete);
    }

    /// Deletes the marked product. Returns its id, or `None` if nothing was marked.
    pub async fn confirm_delete(&mut self) -> Result<Option<ProductId>, ProductError> {
        let (state, token) = std::mem::take(&mut self.state).confirm_delete();
        self.state = state;

        let Some(token) = token else {
            debug!("Nothing marked for deletion");
            return Ok(None);
        };
        let id = token.id().clone();
        self.client.delete_product(token).await?;
        info!(product_id = %id, "Product deleted");

        if self.state.editing() == Some(&id) {
            self.cancel_edit();
        }
        Ok(Some(id))
    }

    /// The list to display: settled search applied, then the chosen sort.
    pub async fn visible_products(&mut self) -> Result<Vec<Product>, ProductError> {
        self.sync_search();
        let products = self.client.list().await?;
        Ok(catalog::visible_products(
            &products,
            &self.state.applied_search,
            self.state.sort,
        ))
    }

    /// What to say when [`visible_products`](Self::visible_products) comes back empty.
    pub fn empty_listing(&self) -> EmptyListing {
        self.state.empty_listing()
    }

    /// Stops the debouncer and the product actor.
    ///
    /// Dropping the client closes the actor's channel; the actor then drains and exits.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down product desk...");

        drop(self.search);
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Product desk shutdown complete.");
        Ok(())
    }
}
