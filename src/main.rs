use tokio::net::TcpListener;

use flatwiki::{build_state, create_router, logger::Logger, Config, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    Logger::init()?;

    let config = Config::new();
    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    log::info!("Server started on: http://localhost:{}", config.port);
    axum::serve(listener, app).await.map_err(WikiError::from)
}
