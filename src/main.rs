use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use graph_analytics::{handlers, AnalyticsConfig, GdsService, GraphAnalytics, Neo4jClient};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = AnalyticsConfig::from_env();

    tracing::info!(
        "🔷 [Analytics Service] Connecting to Neo4j at {}...",
        config.neo4j_uri
    );

    // Connectivity failure at construction is fatal, not degraded
    let client = match &config.neo4j_database {
        Some(db) => {
            Neo4jClient::connect_with_db(
                &config.neo4j_uri,
                &config.neo4j_user,
                &config.neo4j_password,
                db,
            )
            .await
        }
        None => {
            Neo4jClient::connect(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password)
                .await
        }
    }
    .map_err(|e| {
        tracing::error!("Failed to connect to Neo4j: {}", e);
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
    })?;

    tracing::info!("✅ [Analytics Service] Neo4j connection established");

    let analytics: Arc<dyn GraphAnalytics> = Arc::new(GdsService::new(
        Arc::new(client),
        config.node_label.clone(),
        config.relationship_type.clone(),
    ));

    let port = config.port;
    tracing::info!("🚀 [Analytics Service] Starting on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(web::Data::new(analytics.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                web::scope("/api/analytics")
                    .route("/bfs", web::post().to(handlers::run_bfs))
                    .route("/pagerank", web::post().to(handlers::run_pagerank)),
            )
            .route(
                "/health",
                web::get().to(|| async {
                    actix_web::HttpResponse::Ok().json(serde_json::json!({
                        "status": "healthy",
                        "service": "graph_analytics"
                    }))
                }),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
