mod config;
mod schema;

use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::web::{self, Data};
use actix_web::{middleware, App, HttpResponse, HttpServer, Responder};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use catalog::ProductStore;

use config::ServerConfig;
use schema::CatalogSchema;

async fn graphql(schema: Data<CatalogSchema>, request: GraphQLRequest) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

async fn graphiql() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = ProductStore::open(&config.data_path).expect("failed to initialize product store");
    let store = Arc::new(Mutex::new(store));
    let schema = schema::build_schema(catalog::create_mediator(&store));

    log::info!("GraphQL API listening on {}:{}", config.host, config.port);

    let bind_address = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .app_data(Data::new(schema.clone()))
            .route("/graphql", web::post().to(graphql))
            .route("/graphql", web::get().to(graphiql))
            .service(Files::new("/", &config.static_dir).index_file("index.html"))
    })
    .bind(bind_address)?
    .run()
    .await
}
