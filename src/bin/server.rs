use std::time::Duration;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use board_cutter::cutter::{Cutter, DEFAULT_TIME_LIMIT};
use board_cutter::input::validate;
use board_cutter::types::{Board, DetailRequest, Outcome, expand};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct CutRequest {
    board: Board,
    details: Vec<DetailRequest>,
    #[serde(default)]
    time_limit_ms: Option<u64>,
}

#[derive(Serialize)]
struct CutResponse {
    status: &'static str,
    placements: Vec<PlacementResponse>,
    used_area: Option<u64>,
    utilization_percent: Option<f64>,
    waste_area: Option<u64>,
}

#[derive(Serialize)]
struct PlacementResponse {
    name: String,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    rotated: bool,
}

impl From<Outcome> for CutResponse {
    fn from(outcome: Outcome) -> Self {
        let status = outcome.status();
        match outcome {
            Outcome::Solved(solution) => CutResponse {
                status,
                used_area: Some(solution.used_area()),
                utilization_percent: Some(solution.utilization_percent()),
                waste_area: Some(solution.waste_area()),
                placements: solution
                    .placements
                    .into_iter()
                    .map(|p| PlacementResponse {
                        width: p.width(),
                        height: p.height(),
                        name: p.detail.name,
                        x: p.x,
                        y: p.y,
                        rotated: p.rotated,
                    })
                    .collect(),
            },
            Outcome::Exhausted | Outcome::TimedOut => CutResponse {
                status,
                placements: vec![],
                used_area: None,
                utilization_percent: None,
                waste_area: None,
            },
        }
    }
}

async fn cut(Json(req): Json<CutRequest>) -> Result<Json<CutResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /cut"
    );

    validate(&req.board, &req.details).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let time_limit = req
        .time_limit_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TIME_LIMIT);
    // Each search holds a blocking-pool thread until it returns.
    if time_limit > DEFAULT_TIME_LIMIT {
        return Err((
            StatusCode::BAD_REQUEST,
            format!(
                "time_limit_ms must be at most {}",
                DEFAULT_TIME_LIMIT.as_millis()
            ),
        ));
    }
    let cutter = Cutter::new(req.board, expand(&req.details)).with_time_limit(time_limit);

    let outcome = tokio::task::spawn_blocking(move || cutter.solve())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(outcome.into()))
}

fn app() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/cut", post(cut))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(serve());
}

async fn serve() {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app()).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(board: (u32, u32), details: &[(&str, u32, u32, u32)]) -> CutRequest {
        CutRequest {
            board: Board::new(board.0, board.1),
            details: details
                .iter()
                .map(|&(name, width, height, quantity)| DetailRequest {
                    name: name.to_string(),
                    width,
                    height,
                    quantity,
                })
                .collect(),
            time_limit_ms: None,
        }
    }

    #[tokio::test]
    async fn test_cut_solved() {
        let req = request((10, 10), &[("A", 6, 4, 1), ("B", 4, 6, 1)]);
        let Json(resp) = cut(Json(req)).await.unwrap();
        assert_eq!(resp.status, "solved");
        assert_eq!(resp.placements.len(), 2);
        assert_eq!(resp.placements[0].name, "A");
        assert_eq!((resp.placements[1].x, resp.placements[1].y), (0, 4));
        assert_eq!(resp.used_area, Some(48));
        assert_eq!(resp.waste_area, Some(52));
    }

    #[tokio::test]
    async fn test_cut_exhausted() {
        let req = request((2, 2), &[("A", 2, 2, 1), ("B", 1, 1, 1)]);
        let Json(resp) = cut(Json(req)).await.unwrap();
        assert_eq!(resp.status, "exhausted");
        assert!(resp.placements.is_empty());
        assert_eq!(resp.utilization_percent, None);
    }

    #[tokio::test]
    async fn test_cut_rejects_oversized_detail() {
        let req = request((10, 10), &[("A", 20, 4, 1)]);
        let (status, msg) = cut(Json(req)).await.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(msg.contains("does not fit"));
    }

    #[tokio::test]
    async fn test_cut_timed_out() {
        let mut req = request((30, 30), &[("S", 10, 10, 10)]);
        req.time_limit_ms = Some(50);
        let Json(resp) = cut(Json(req)).await.unwrap();
        assert_eq!(resp.status, "timed_out");
        assert!(resp.placements.is_empty());
        assert_eq!(resp.used_area, None);
    }

    #[tokio::test]
    async fn test_cut_rejects_long_time_limit() {
        let mut req = request((10, 10), &[("A", 6, 4, 1)]);
        req.time_limit_ms = Some(1_000_000_000_000);
        let (status, msg) = cut(Json(req)).await.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(msg.contains("time_limit_ms"));

        let mut req = request((10, 10), &[("A", 6, 4, 1)]);
        req.time_limit_ms = Some(5000);
        let Json(resp) = cut(Json(req)).await.unwrap();
        assert_eq!(resp.status, "solved");
    }

    #[tokio::test]
    async fn test_cut_rejects_oversized_board_and_quantity() {
        let req = request((1_000_000, 1_000_000), &[("A", 1, 1, 1)]);
        let (status, msg) = cut(Json(req)).await.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(msg.contains("cells"));

        let req = request((100, 100), &[("A", 1, 1, 4_000_000_000)]);
        let (status, msg) = cut(Json(req)).await.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(msg.contains("pieces"));
    }

    #[test]
    fn test_request_accepts_integral_floats() {
        let req: CutRequest = serde_json::from_str(
            r#"{"board": {"width": 10.0, "height": 10},
                "details": [{"name": "A", "width": 6, "height": 4.0, "quantity": 1}]}"#,
        )
        .unwrap();
        assert_eq!(req.board, Board::new(10, 10));
        assert_eq!(req.details[0].height, 4);
        assert_eq!(req.time_limit_ms, None);
    }
}
