use mediator::{Request, RequestHandler};

use crate::models::Product;
use crate::store::SharedProductStore;

#[derive(Debug, Clone)]
pub struct GetAllProductsRequest;

impl Request<Vec<Product>> for GetAllProductsRequest {}

pub struct GetAllProductsRequestHandler(pub SharedProductStore);

impl RequestHandler<GetAllProductsRequest, Vec<Product>> for GetAllProductsRequestHandler {
    fn handle(&mut self, _: GetAllProductsRequest) -> Vec<Product> {
        match self.0.lock() {
            Ok(store) => store.get_all(),
            Err(_) => {
                log::warn!("catalog store lock poisoned, returning empty product list");
                Vec::new()
            }
        }
    }
}
