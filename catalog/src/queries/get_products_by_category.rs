use mediator::{Request, RequestHandler};

use crate::models::Product;
use crate::store::SharedProductStore;

#[derive(Debug, Clone)]
pub struct GetProductsByCategoryRequest(pub String);

impl Request<Vec<Product>> for GetProductsByCategoryRequest {}

pub struct GetProductsByCategoryRequestHandler(pub SharedProductStore);

impl RequestHandler<GetProductsByCategoryRequest, Vec<Product>> for GetProductsByCategoryRequestHandler {
    fn handle(&mut self, request: GetProductsByCategoryRequest) -> Vec<Product> {
        match self.0.lock() {
            Ok(store) => store.get_by_category(&request.0),
            Err(_) => {
                log::warn!("catalog store lock poisoned, returning empty product list");
                Vec::new()
            }
        }
    }
}
