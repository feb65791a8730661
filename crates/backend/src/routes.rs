use axum::body::Body;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::shared::config::{resolve_dir, Config};

/// Static dev server: datasets under `/data`, the frontend bundle everywhere else
pub fn configure_routes(config: &Config) -> Router {
    let data_dir = resolve_dir(&config.server.data_dir);
    let dist_dir = resolve_dir(&config.server.dist_dir);
    tracing::info!(
        "Serving {} at /data and {} at /",
        data_dir.display(),
        dist_dir.display()
    );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/data", ServeDir::new(data_dir))
        .fallback_service(ServeDir::new(dist_dir))
        .layer(middleware::from_fn(request_logger))
}

async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed().as_millis();
    if status.is_success() || status.is_redirection() {
        tracing::info!("{} {} {} {}ms", status.as_u16(), method, uri.path(), elapsed);
    } else {
        tracing::warn!("{} {} {} {}ms", status.as_u16(), method, uri.path(), elapsed);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ServerConfig;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn config(data_dir: &std::path::Path) -> Config {
        Config {
            server: ServerConfig {
                port: 0,
                data_dir: data_dir.to_string_lossy().into_owned(),
                dist_dir: data_dir.join("dist").to_string_lossy().into_owned(),
            },
        }
    }

    #[tokio::test]
    async fn test_serves_dataset_files() {
        let dir = std::env::temp_dir().join(format!("naf-risk-routes-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("at-data.json"), "{}").unwrap();

        let app = configure_routes(&config(&dir));
        let response = app
            .oneshot(Request::get("/data/at-data.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health() {
        let dir = std::env::temp_dir();
        let app = configure_routes(&config(&dir));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
