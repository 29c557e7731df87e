use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, put, HttpResponse};
use catalog::commands::add_product::AddProductCommand;
use catalog::commands::delete_product::DeleteProductCommand;
use catalog::commands::update_product::UpdateProductCommand;
use catalog::queries::get_all_products::GetAllProductsRequest;
use catalog::queries::get_product::GetProductRequest;
use catalog::{Product, ProductDraft, ProductId, SharedMediator};
use mediator::{Mediator, Request};

use crate::error::ApiError;

type ApiResult = Result<HttpResponse, ApiError>;

fn send<Req, Res>(mediator: &SharedMediator, request: Req) -> Result<Res, ApiError>
where
    Res: 'static,
    Req: Request<Res> + 'static,
{
    let mut mediator = mediator.lock().map_err(|_| ApiError::internal())?;
    mediator.send(request).map_err(|_| ApiError::internal())
}

#[post("")]
pub async fn create(body: Json<ProductDraft>, mediator: Data<SharedMediator>) -> ApiResult {
    let created: catalog::Result<Product> = send(&mediator, AddProductCommand(body.into_inner()))?;
    let product = created?;

    Ok(HttpResponse::Created()
        .insert_header(("Location", format!("/api/products/{}", product.id)))
        .json(product))
}

#[put("/{id}")]
pub async fn update(
    path: Path<ProductId>,
    body: Json<ProductDraft>,
    mediator: Data<SharedMediator>,
) -> ApiResult {
    let updated: catalog::Result<Product> = send(
        &mediator,
        UpdateProductCommand {
            id: path.into_inner(),
            draft: body.into_inner(),
        },
    )?;

    Ok(HttpResponse::Ok().json(updated?))
}

#[delete("/{id}")]
pub async fn delete(path: Path<ProductId>, mediator: Data<SharedMediator>) -> ApiResult {
    let removed: catalog::Result<Product> = send(&mediator, DeleteProductCommand(path.into_inner()))?;
    removed?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/{id}")]
pub async fn get(path: Path<ProductId>, mediator: Data<SharedMediator>) -> ApiResult {
    let product: catalog::Result<Product> = send(&mediator, GetProductRequest(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(product?))
}

#[get("")]
pub async fn get_all(mediator: Data<SharedMediator>) -> ApiResult {
    let products: Vec<Product> = send(&mediator, GetAllProductsRequest)?;
    Ok(HttpResponse::Ok().json(products))
}
