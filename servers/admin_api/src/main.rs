mod config;
mod endpoints;
mod error;

use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::web::Data;
use actix_web::{middleware, web, App, HttpServer};
use catalog::ProductStore;

use config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = ProductStore::open(&config.data_path).expect("failed to initialize product store");
    let store = Arc::new(Mutex::new(store));
    let mediator = catalog::create_mediator(&store);

    log::info!("admin API listening on {}:{}", config.host, config.port);

    let bind_address = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .app_data(Data::new(mediator.clone()))
            .service(
                web::scope("/api/products")
                    .service(endpoints::products::create)
                    .service(endpoints::products::update)
                    .service(endpoints::products::delete)
                    .service(endpoints::products::get)
                    .service(endpoints::products::get_all),
            )
            .service(Files::new("/", &config.static_dir).index_file("index.html"))
    })
    .bind(bind_address)?
    .run()
    .await
}
