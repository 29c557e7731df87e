mod config;
mod endpoints;
mod protocol;
mod registry;

use std::time::Duration;

use actix_web::web::Data;
use actix_web::{middleware, App, HttpServer};
use actix_ws::Session;

use config::ServerConfig;
use registry::ConnectionRegistry;

pub type Relay = ConnectionRegistry<Session>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let relay = Relay::new();

    // Drop connections that stopped answering, every 30 seconds.
    let sweeper = relay.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            sweeper.sweep().await;
        }
    });

    log::info!(
        "chat relay listening on ws://{}:{}/ws",
        config.host,
        config.port
    );

    let bind_address = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(Data::new(relay.clone()))
            .service(endpoints::health)
            .service(endpoints::ws)
    })
    .bind(bind_address)?
    .run()
    .await
}
