use emergency_paths::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let port = match args.get(1) {
        Some(arg) => arg.parse()?,
        None => ServerConfig::default().port,
    };

    let config = ServerConfig {
        port,
        ..Default::default()
    };

    log::info!("Configuration: port {}, CORS {}, max sessions {}, session timeout {} minutes",
        config.port, config.enable_cors, config.max_sessions, config.session_timeout_minutes);
    log::info!("Graph limits: {} nodes, {} edges", config.max_nodes, config.max_edges);

    start_server_with_config(config).await?;

    Ok(())
}
