use mediator::{DefaultMediator, Mediator, Request, RequestHandler};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::ProductAddedEvent;
use crate::models::{Product, ProductDraft};
use crate::store::{lock_store, SharedProductStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProductCommand(pub ProductDraft);

impl Request<Result<Product>> for AddProductCommand {}

pub struct AddProductRequestHandler(pub SharedProductStore, pub DefaultMediator);

impl RequestHandler<AddProductCommand, Result<Product>> for AddProductRequestHandler {
    fn handle(&mut self, command: AddProductCommand) -> Result<Product> {
        let product = lock_store(&self.0)?.create(command.0)?;

        if let Err(err) = self.1.publish(ProductAddedEvent(product.clone())) {
            log::warn!("failed to publish product added event: {err}");
        }

        Ok(product)
    }
}
