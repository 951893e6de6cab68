use axum::{
    extract::Extension,
    routing::{delete, get},
    Router,
};
use folia::{
    handlers::{members, photos, roster},
    Handles, Settings,
};
use std::error::Error;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let settings = Settings::new()?;
    tracing::info!("Running with settings: {:?}", settings);
    let handles = Handles::new(&settings)?;
    let extra_layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        // the SPA is opened straight from phones during the event
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(handles));

    let app = Router::new()
        .nest_service("/app", ServeDir::new(&settings.http.assets_directory))
        .route("/", get(|| async { "folia" }))
        .route("/membros", get(members::list).post(members::register))
        .route("/membros/:id", delete(members::remove))
        .route("/fotos", get(photos::list).post(photos::upload))
        .route("/roster", get(roster::roster))
        .layer(extra_layers);

    let listen_addr: SocketAddr =
        format!("{}:{}", settings.http.host, settings.http.port).parse()?;
    tracing::info!("Server started: Listening on: {}", listen_addr);
    axum::Server::bind(&listen_addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
