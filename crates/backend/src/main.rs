pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod shared;
pub mod usecases;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    use shared::state::AppState;

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Keep SQL statement logging out of the app log
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let response = next.run(req).await;

        let duration = start.elapsed();
        tracing::info!(
            "{:>5}ms | {} {:>6} {}",
            duration.as_millis(),
            response.status().as_u16(),
            method,
            path
        );

        response
    }

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let state = Arc::new(AppState::from_config(&config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Store handlers
        .route(
            "/api/stores",
            get(handlers::a001_store::list_all).post(handlers::a001_store::upsert),
        )
        .route("/api/stores/active", get(handlers::a001_store::list_active))
        .route(
            "/api/stores/:id",
            get(handlers::a001_store::get_by_id).delete(handlers::a001_store::delete),
        )
        // A002 Sales rep handlers
        .route(
            "/api/reps",
            get(handlers::a002_sales_rep::list_all).post(handlers::a002_sales_rep::upsert),
        )
        .route("/api/reps/active", get(handlers::a002_sales_rep::list_active))
        .route(
            "/api/reps/:id",
            get(handlers::a002_sales_rep::get_by_id).delete(handlers::a002_sales_rep::delete),
        )
        // A003 Daily revenue fact handlers
        .route(
            "/api/revenue-facts",
            get(handlers::a003_daily_revenue_fact::list)
                .post(handlers::a003_daily_revenue_fact::upsert),
        )
        .route(
            "/api/revenue-facts/batch",
            post(handlers::a003_daily_revenue_fact::upsert_batch),
        )
        .route(
            "/api/revenue-facts/corrections",
            post(handlers::a003_daily_revenue_fact::apply_correction),
        )
        // A004 Monthly goal handlers
        .route(
            "/api/goals",
            get(handlers::a004_monthly_goal::list).post(handlers::a004_monthly_goal::upsert),
        )
        .route(
            "/api/goals/:id",
            axum::routing::delete(handlers::a004_monthly_goal::delete),
        )
        // A005 Rep activity handlers (read only, written by the sync)
        .route("/api/rep-activity", get(handlers::a005_rep_activity_fact::list))
        // A006 Owner mapping handlers
        .route(
            "/api/owner-mappings",
            get(handlers::a006_owner_mapping::list_all)
                .post(handlers::a006_owner_mapping::upsert),
        )
        .route(
            "/api/owner-mappings/:id",
            axum::routing::delete(handlers::a006_owner_mapping::delete),
        )
        // A007 Entity group handlers
        .route(
            "/api/entity-groups",
            get(handlers::a007_entity_group::list).post(handlers::a007_entity_group::upsert),
        )
        .route(
            "/api/entity-groups/:id",
            axum::routing::delete(handlers::a007_entity_group::delete),
        )
        // D400 Performance dashboard
        .route(
            "/api/d400/performance",
            get(handlers::d400_performance::get_performance),
        )
        .route(
            "/api/d400/company-summary",
            get(handlers::d400_performance::get_company_summary),
        )
        // D401 Trend dashboards
        .route(
            "/api/d401/trends/daily",
            get(handlers::d401_trends::get_daily_trend),
        )
        .route(
            "/api/d401/trends/day-of-week",
            get(handlers::d401_trends::get_day_of_week),
        )
        .route(
            "/api/d401/trends/cumulative",
            get(handlers::d401_trends::get_cumulative),
        )
        // UseCase u501: CRM activity sync
        .route("/api/u501/sync", post(handlers::usecases::sync_activity))
        .route("/api/u501/status", get(handlers::usecases::sync_status))
        // UseCase u502: owner mapping bootstrap
        .route("/api/u502/map-owners", post(handlers::usecases::map_owners))
        .with_state(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], 3000).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port 3000 is already in use. Please ensure no other process is using this port."
                );
            } else {
                tracing::error!("Failed to bind to port 3000. Error: {}", e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
