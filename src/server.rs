use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::acquire::PageFetcher;
use crate::analyzer::analyze;
use crate::error::MenuError;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Deserialize)]
pub struct UrlParams {
    pub url: String,
    #[serde(default)]
    pub name: String,
}

pub async fn analyze_text(Json(req): Json<AnalyzeRequest>) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Menu text must not be empty.").into_response();
    }
    let record = analyze(&req.text, &req.restaurant_name).with_source(req.source);
    Json(record).into_response()
}

pub async fn analyze_url(
    State(fetcher): State<PageFetcher>,
    Query(params): Query<UrlParams>,
) -> impl IntoResponse {
    info!("Analyzing URL: {}", params.url);
    match fetcher.fetch_text(&params.url).await {
        Ok(text) => Json(analyze(&text, &params.name).with_source(params.url)).into_response(),
        Err(err @ MenuError::CapabilityUnavailable(_)) => {
            (StatusCode::NOT_IMPLEMENTED, err.to_string()).into_response()
        }
        Err(err) => {
            warn!("Failed to fetch {}: {}", params.url, err);
            (
                StatusCode::BAD_GATEWAY,
                format!("Failed to fetch menu page: {err}"),
            )
                .into_response()
        }
    }
}

pub fn router(fetcher: PageFetcher) -> Router {
    Router::new()
        .route("/analyze", post(analyze_text))
        .route("/analyze-url", get(analyze_url))
        .with_state(fetcher)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
}

pub async fn serve(bind: &str, fetcher: PageFetcher) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on http://{bind}");
    axum::serve(listener, router(fetcher)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquire::DEFAULT_TIMEOUT;
    use crate::labels::Label;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn analyze_text_returns_record() {
        let req = AnalyzeRequest {
            text: "Trattoria Sole\nHauptgang\nRisotto ai funghi vegetarisch 28.00".to_string(),
            restaurant_name: String::new(),
            source: "upload".to_string(),
        };
        let response = analyze_text(Json(req)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let record: crate::labels::MenuLabelRecord = serde_json::from_slice(&body).unwrap();
        assert_eq!(record.restaurant_name, "Trattoria Sole");
        assert_eq!(record.source, "upload");
        assert_eq!(record.main_dish_count, 1);
        assert_eq!(record.vegetarian_options, Label::Yes);
    }

    #[tokio::test]
    async fn analyze_text_rejects_blank_input() {
        let req = AnalyzeRequest {
            text: "   \n ".to_string(),
            restaurant_name: String::new(),
            source: String::new(),
        };
        let response = analyze_text(Json(req)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unreachable_url_is_bad_gateway() {
        let fetcher = PageFetcher::new(DEFAULT_TIMEOUT).unwrap();
        let params = UrlParams {
            url: "not a url".to_string(),
            name: String::new(),
        };
        let response = analyze_url(State(fetcher), Query(params)).await.into_response();
        let expected = if cfg!(feature = "web") {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::NOT_IMPLEMENTED
        };
        assert_eq!(response.status(), expected);
    }
}
