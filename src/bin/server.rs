use axum::routing::get;
use infinity_server::{api, gemini::GeminiClient, migrator};
use sea_orm::Database;
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    infinity_server::telemetry::init_telemetry("infinity-server");

    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    // The store connection string is the one fatal startup requirement
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    use sea_orm_migration::MigratorTrait;
    migrator::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    // Media store: fall back to an anonymous client when no credentials
    // are available, so only the upload endpoint suffers
    let gcs_config = match google_cloud_storage::client::ClientConfig::default()
        .with_auth()
        .await
    {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Media store auth unavailable, uploads will fail: {}", e);
            google_cloud_storage::client::ClientConfig::default().anonymous()
        }
    };
    let gcs_client = google_cloud_storage::client::Client::new(gcs_config);

    let gemini = GeminiClient::from_env();

    infinity_server::metrics::init_metrics(&db).await;

    let cors_origin =
        std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let app = api::router(db, gemini, gcs_client)
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer)
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str().to_string())
                        .unwrap_or_else(|| request.uri().path().to_string());

                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %matched_path,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(
                    cors_origin
                        .parse::<axum::http::HeaderValue>()
                        .expect("CORS_ORIGIN must be a valid header value"),
                )
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
