use mediator::{Request, RequestHandler};

use crate::error::Result;
use crate::models::{Product, ProductId};
use crate::store::{lock_store, SharedProductStore};

#[derive(Debug, Clone)]
pub struct GetProductRequest(pub ProductId);

impl Request<Result<Product>> for GetProductRequest {}

pub struct GetProductRequestHandler(pub SharedProductStore);

impl RequestHandler<GetProductRequest, Result<Product>> for GetProductRequestHandler {
    fn handle(&mut self, request: GetProductRequest) -> Result<Product> {
        lock_store(&self.0)?.get(request.0)
    }
}
