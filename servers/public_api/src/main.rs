mod config;
mod endpoints;
mod error;

use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
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

    log::info!("public API listening on {}:{}", config.host, config.port);

    let bind_address = (config.host.clone(), config.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION]);

        let spa_index = config.static_dir.join("index.html");

        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(Data::new(mediator.clone()))
            .service(endpoints::health)
            .service(
                web::scope("/api/products")
                    .service(endpoints::products::create)
                    .service(endpoints::products::update)
                    .service(endpoints::products::delete)
                    .service(endpoints::products::get)
                    .service(endpoints::products::get_all),
            )
            .service(
                Files::new("/", &config.static_dir)
                    .index_file("index.html")
                    // Unmatched GETs fall back to the storefront shell.
                    .default_handler(fn_service(move |req: ServiceRequest| {
                        let spa_index = spa_index.clone();
                        async move {
                            let (req, _) = req.into_parts();
                            let file = NamedFile::open_async(spa_index).await?;
                            let res = file.into_response(&req);
                            Ok(ServiceResponse::new(req, res))
                        }
                    })),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
