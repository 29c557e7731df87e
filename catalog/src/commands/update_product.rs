use mediator::{DefaultMediator, Mediator, Request, RequestHandler};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::ProductUpdatedEvent;
use crate::models::{Product, ProductDraft, ProductId};
use crate::store::{lock_store, SharedProductStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductCommand {
    pub id: ProductId,
    pub draft: ProductDraft,
}

impl Request<Result<Product>> for UpdateProductCommand {}

pub struct UpdateProductRequestHandler(pub SharedProductStore, pub DefaultMediator);

impl RequestHandler<UpdateProductCommand, Result<Product>> for UpdateProductRequestHandler {
    fn handle(&mut self, command: UpdateProductCommand) -> Result<Product> {
        let product = lock_store(&self.0)?.update(command.id, command.draft)?;

        if let Err(err) = self.1.publish(ProductUpdatedEvent(product.clone())) {
            log::warn!("failed to publish product updated event: {err}");
        }

        Ok(product)
    }
}
