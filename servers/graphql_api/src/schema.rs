//! GraphQL view of the catalog: queries and mutations resolve through the
//! same mediator commands the REST servers use, so the validation policy
//! applies uniformly across transports.

use async_graphql::{
    Context, EmptySubscription, Error, InputObject, Object, Result, Schema, SimpleObject, ID,
};
use catalog::commands::add_product::AddProductCommand;
use catalog::commands::delete_product::DeleteProductCommand;
use catalog::commands::update_product::UpdateProductCommand;
use catalog::queries::get_all_products::GetAllProductsRequest;
use catalog::queries::get_product::GetProductRequest;
use catalog::queries::get_products_by_category::GetProductsByCategoryRequest;
use catalog::{CatalogError, Product, ProductDraft, ProductId, SharedMediator};
use chrono::{DateTime, Utc};
use mediator::{Mediator, Request};

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(mediator: SharedMediator) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(mediator)
        .finish()
}

#[derive(SimpleObject)]
#[graphql(name = "Product")]
pub struct ProductObject {
    pub id: ID,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Product> for ProductObject {
    fn from(product: Product) -> Self {
        ProductObject {
            id: ID(product.id.to_string()),
            name: product.name,
            price: product.price,
            description: product.description,
            categories: product.categories,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(InputObject)]
#[graphql(name = "ProductInput")]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
}

impl From<ProductInput> for ProductDraft {
    fn from(input: ProductInput) -> Self {
        ProductDraft {
            name: Some(input.name),
            price: Some(input.price),
            description: input.description,
            categories: input.categories,
        }
    }
}

fn parse_id(id: &ID) -> Option<ProductId> {
    id.0.parse::<ProductId>().ok()
}

fn send_request<Req, Res>(ctx: &Context<'_>, request: Req) -> Result<Res>
where
    Res: 'static,
    Req: Request<Res> + 'static,
{
    let mediator = ctx.data::<SharedMediator>()?;
    let mut mediator = mediator
        .lock()
        .map_err(|_| Error::new("internal server error"))?;
    mediator
        .send(request)
        .map_err(|_| Error::new("internal server error"))
}

fn catalog_error(err: CatalogError) -> Error {
    match err {
        CatalogError::Storage(reason) => {
            log::error!("storage failure: {reason}");
            Error::new("failed to access product data")
        }
        other => Error::new(other.to_string()),
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<ProductObject>> {
        let products: Vec<Product> = send_request(ctx, GetAllProductsRequest)?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProductObject>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };

        let product: catalog::Result<Product> = send_request(ctx, GetProductRequest(id))?;
        match product {
            Ok(product) => Ok(Some(product.into())),
            Err(CatalogError::NotFound(_)) => Ok(None),
            Err(err) => Err(catalog_error(err)),
        }
    }

    async fn products_by_category(
        &self,
        ctx: &Context<'_>,
        category: String,
    ) -> Result<Vec<ProductObject>> {
        let products: Vec<Product> = send_request(ctx, GetProductsByCategoryRequest(category))?;
        Ok(products.into_iter().map(Into::into).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        input: ProductInput,
    ) -> Result<ProductObject> {
        let created: catalog::Result<Product> =
            send_request(ctx, AddProductCommand(input.into()))?;
        created.map(Into::into).map_err(catalog_error)
    }

    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ProductInput,
    ) -> Result<ProductObject> {
        let id = parse_id(&id).ok_or_else(|| Error::new("product not found"))?;
        let updated: catalog::Result<Product> = send_request(
            ctx,
            UpdateProductCommand {
                id,
                draft: input.into(),
            },
        )?;
        updated.map(Into::into).map_err(catalog_error)
    }

    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let id = parse_id(&id).ok_or_else(|| Error::new("product not found"))?;
        let removed: catalog::Result<Product> = send_request(ctx, DeleteProductCommand(id))?;
        removed.map(|_| true).map_err(catalog_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::ProductStore;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tempfile::{tempdir, TempDir};

    fn schema_over_temp_store() -> (CatalogSchema, TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(Mutex::new(
            ProductStore::open(dir.path().join("products.json")).unwrap(),
        ));
        let schema = build_schema(catalog::create_mediator(&store));
        (schema, dir)
    }

    #[actix_web::test]
    async fn create_then_query_products() {
        let (schema, _dir) = schema_over_temp_store();

        let response = schema
            .execute(
                r#"mutation {
                    createProduct(input: { name: "Lamp", price: 25.0, categories: ["home"] }) {
                        id name price categories
                    }
                }"#,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(json!("1"), data["createProduct"]["id"]);
        assert_eq!(json!(["home"]), data["createProduct"]["categories"]);

        let response = schema
            .execute(r#"{ products { id name } product(id: "1") { name } }"#)
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(1, data["products"].as_array().unwrap().len());
        assert_eq!(json!("Lamp"), data["product"]["name"]);
    }

    #[actix_web::test]
    async fn products_by_category_filters_on_the_label() {
        let (schema, _dir) = schema_over_temp_store();

        schema
            .execute(r#"mutation { createProduct(input: { name: "Lamp", price: 25.0, categories: ["home"] }) { id } }"#)
            .await;
        schema
            .execute(r#"mutation { createProduct(input: { name: "Kettle", price: 40.0 }) { id } }"#)
            .await;

        let response = schema
            .execute(r#"{ productsByCategory(category: "home") { name } }"#)
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(json!([{ "name": "Lamp" }]), data["productsByCategory"]);
    }

    #[actix_web::test]
    async fn validation_failures_become_graphql_errors() {
        let (schema, _dir) = schema_over_temp_store();

        let response = schema
            .execute(r#"mutation { createProduct(input: { name: "Lamp", price: 0 }) { id } }"#)
            .await;
        assert_eq!(1, response.errors.len());
        assert_eq!("price must be a positive number", response.errors[0].message);
    }

    #[actix_web::test]
    async fn missing_products_resolve_to_null_or_error() {
        let (schema, _dir) = schema_over_temp_store();

        let response = schema.execute(r#"{ product(id: "42") { name } }"#).await;
        assert!(response.errors.is_empty());
        let data = response.data.into_json().unwrap();
        assert!(data["product"].is_null());

        let response = schema
            .execute(r#"mutation { deleteProduct(id: "42") }"#)
            .await;
        assert_eq!(1, response.errors.len());
        assert_eq!("product 42 not found", response.errors[0].message);
    }

    #[actix_web::test]
    async fn delete_product_reports_success() {
        let (schema, _dir) = schema_over_temp_store();

        schema
            .execute(r#"mutation { createProduct(input: { name: "Lamp", price: 25.0 }) { id } }"#)
            .await;

        let response = schema.execute(r#"mutation { deleteProduct(id: "1") }"#).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(json!(true), data["deleteProduct"]);
    }
}
