use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slidesync::{
    config::ServerConfig,
    event::{EventBus, EventDispatcher},
    room::{self, RoomRegistry, RoomService},
    shared::AppState,
    upload::{self, DocumentStore},
    websockets::{
        websocket_handler, ConnectionManager, InMemoryConnectionManager, MessageBroadcaster,
    },
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slidesync=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting slide sync server");

    let config = Arc::new(ServerConfig::from_env());

    let document_store = Arc::new(DocumentStore::from_config(&config));
    document_store
        .prepare()
        .await
        .map_err(std::io::Error::other)?;

    let room_service = Arc::new(RoomService::new(RoomRegistry::new(
        config.host_election(),
    )));
    let connection_manager: Arc<dyn ConnectionManager> = Arc::new(InMemoryConnectionManager::new());

    let (event_bus, event_receiver) = EventBus::new(config.event_queue_capacity);
    let dispatcher = EventDispatcher::new(
        Arc::clone(&room_service),
        MessageBroadcaster::new(Arc::clone(&connection_manager)),
    );
    let dispatcher_handle = dispatcher.start(event_receiver);

    let app_state = AppState::new(
        room_service,
        event_bus,
        connection_manager,
        Arc::clone(&document_store),
        Arc::clone(&config),
    );

    // Client assets: first directory containing the path wins
    let assets = config
        .static_dirs
        .iter()
        .rev()
        .fold(Router::new(), |next, dir| {
            Router::new().fallback_service(ServeDir::new(dir).fallback(next))
        });

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route("/rooms", get(room::list_rooms))
        .route("/rooms/:room_id", get(room::get_room))
        .nest_service(
            &config.uploads_route,
            ServeDir::new(document_store.upload_dir()),
        )
        .fallback_service(assets)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    dispatcher_handle.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
