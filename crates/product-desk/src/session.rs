//! Desk state: everything the product page remembers between events.
//!
//! [`DeskState`] is a plain serializable value. Each transition consumes the state and returns
//! the next one; none of them performs I/O. The [`ProductDesk`](crate::lifecycle::ProductDesk)
//! runs the store requests and feeds the outcomes back in.
//!
//! Deleting is a two-step affair. [`DeskState::request_delete`] only marks a product, and
//! [`DeskState::confirm_delete`] is the one place that hands out a [`ConfirmedDelete`], the
//! token [`ProductClient::delete_product`](crate::clients::ProductClient::delete_product)
//! requires.

use crate::model::{Product, ProductFormData, ProductId, SortOption};
use crate::validation::{Field, FieldErrors};
use serde::{Deserialize, Serialize};

/// Which product, if any, the form is editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: ProductId },
}

/// Progress of a delete request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum DeleteState {
    #[default]
    Idle,
    PendingConfirmation { id: ProductId, name: String },
}

/// Proof that a delete went through mark-then-confirm.
///
/// Only [`DeskState::confirm_delete`] can create one.
#[derive(Debug, PartialEq, Eq)]
pub struct ConfirmedDelete {
    id: ProductId,
}

impl ConfirmedDelete {
    pub fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Why the displayed list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyListing {
    /// The collection itself is empty.
    NoProducts,
    /// A search is active and nothing matches it.
    NoMatches,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeskState {
    /// Search text as typed.
    pub search: String,
    /// Search text after debouncing; this is what filters the list.
    pub applied_search: String,
    pub sort: SortOption,
    pub edit: EditState,
    pub form: ProductFormData,
    pub errors: FieldErrors,
    pub delete: DeleteState,
}

impl DeskState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_typed(self, text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..self
        }
    }

    pub fn search_settled(self, text: impl Into<String>) -> Self {
        Self {
            applied_search: text.into(),
            ..self
        }
    }

    pub fn sort_chosen(self, sort: SortOption) -> Self {
        Self { sort, ..self }
    }

    /// Switches the form to `product`, seeding it from the product's current values.
    pub fn begin_edit(self, product: &Product) -> Self {
        Self {
            edit: EditState::Editing {
                id: product.id.clone(),
            },
            form: ProductFormData::from(product),
            errors: FieldErrors::new(),
            ..self
        }
    }

    /// Leaves edit mode with an empty form.
    pub fn cancel_edit(self) -> Self {
        Self {
            edit: EditState::Idle,
            form: ProductFormData::default(),
            errors: FieldErrors::new(),
            ..self
        }
    }

    pub fn form_edited(mut self, field: Field, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            Field::Name => self.form.name = value,
            Field::Price => self.form.price = value,
            Field::Stock => self.form.stock = value,
        }
        self
    }

    /// Keeps the form as typed and shows the errors next to it.
    pub fn submit_rejected(self, errors: FieldErrors) -> Self {
        Self { errors, ..self }
    }

    /// Clears the form and leaves edit mode.
    pub fn submit_accepted(self) -> Self {
        self.cancel_edit()
    }

    /// Marks `product` for deletion. Nothing is removed yet.
    pub fn request_delete(self, product: &Product) -> Self {
        Self {
            delete: DeleteState::PendingConfirmation {
                id: product.id.clone(),
                name: product.name.clone(),
            },
            ..self
        }
    }

    pub fn cancel_delete(self) -> Self {
        Self {
            delete: DeleteState::Idle,
            ..self
        }
    }

    /// Confirms a pending delete.
    ///
    /// Returns the token for the marked product, or `None` if nothing was pending. Either way
    /// the delete state goes back to idle.
    pub fn confirm_delete(self) -> (Self, Option<ConfirmedDelete>) {
        let token = match &self.delete {
            DeleteState::PendingConfirmation { id, .. } => Some(ConfirmedDelete { id: id.clone() }),
            DeleteState::Idle => None,
        };
        (self.cancel_delete(), token)
    }

    /// The id under edit, if any.
    pub fn editing(&self) -> Option<&ProductId> {
        match &self.edit {
            EditState::Editing { id } => Some(id),
            EditState::Idle => None,
        }
    }

    pub fn pending_delete(&self) -> Option<&ProductId> {
        match &self.delete {
            DeleteState::PendingConfirmation { id, .. } => Some(id),
            DeleteState::Idle => None,
        }
    }

    /// Classifies an empty listing: a typed search means nothing matched.
    pub fn empty_listing(&self) -> EmptyListing {
        if self.search.is_empty() {
            EmptyListing::NoProducts
        } else {
            EmptyListing::NoMatches
        }
    }
}
