use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
        let port = env::var("PORT")
            .map(|port| port.parse::<u16>().ok())
            .ok()
            .flatten()
            .unwrap_or(3003);

        ServerConfig { host, port }
    }
}
