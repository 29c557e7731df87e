//! File-backed product catalog shared by the REST, GraphQL and WebSocket
//! front-ends.
//!
//! The [`ProductStore`] owns the canonical product list, persisted as one
//! JSON document; [`create_mediator`] wires the command/query handlers and
//! the event log subscribers every server process uses to reach it.

use std::sync::{Arc, Mutex};

use mediator::DefaultMediator;

pub mod commands;
pub mod error;
pub mod events;
pub mod models;
pub mod queries;
pub mod services;
pub mod store;
pub mod validation;

pub use error::{CatalogError, Result};
pub use models::{Product, ProductDraft, ProductId};
pub use store::{ProductStore, SharedProductStore};

pub type SharedMediator = Arc<Mutex<DefaultMediator>>;

/// Builds the shared mediator: one handler per catalog operation, plus log
/// subscribers for the product lifecycle events.
pub fn create_mediator(store: &SharedProductStore) -> SharedMediator {
    use commands::*;
    use events::*;
    use queries::*;

    let mediator = DefaultMediator::builder()
        .add_handler(get_product::GetProductRequestHandler(store.clone()))
        .add_handler(get_all_products::GetAllProductsRequestHandler(store.clone()))
        .add_handler(get_products_by_category::GetProductsByCategoryRequestHandler(
            store.clone(),
        ))
        .add_handler_deferred(|m| add_product::AddProductRequestHandler(store.clone(), m))
        .add_handler_deferred(|m| update_product::UpdateProductRequestHandler(store.clone(), m))
        .add_handler_deferred(|m| delete_product::DeleteProductRequestHandler(store.clone(), m))
        .subscribe_fn(|event: ProductAddedEvent| {
            log::info!("added: {} - {}", event.0.name, event.0.id);
        })
        .subscribe_fn(|event: ProductUpdatedEvent| {
            log::info!("updated: {} - {}", event.0.name, event.0.id);
        })
        .subscribe_fn(|event: ProductDeletedEvent| {
            log::info!("deleted: {} - {}", event.0.name, event.0.id);
        })
        .build();

    Arc::new(Mutex::new(mediator))
}
