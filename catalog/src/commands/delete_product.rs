use mediator::{DefaultMediator, Mediator, Request, RequestHandler};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::ProductDeletedEvent;
use crate::models::{Product, ProductId};
use crate::store::{lock_store, SharedProductStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProductCommand(pub ProductId);

impl Request<Result<Product>> for DeleteProductCommand {}

pub struct DeleteProductRequestHandler(pub SharedProductStore, pub DefaultMediator);

impl RequestHandler<DeleteProductCommand, Result<Product>> for DeleteProductRequestHandler {
    fn handle(&mut self, command: DeleteProductCommand) -> Result<Product> {
        let product = lock_store(&self.0)?.delete(command.0)?;

        if let Err(err) = self.1.publish(ProductDeletedEvent(product.clone())) {
            log::warn!("failed to publish product deleted event: {err}");
        }

        Ok(product)
    }
}
