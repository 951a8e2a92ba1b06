use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::services::{ServeDir, ServeFile};

use crate::provider::{ProviderClient, ProviderError};
use engagement_audit::config::ProviderConfig;
use engagement_audit::report::{assemble, AnalyticsReport};
use engagement_audit::{account_metrics, normalize};

#[derive(Clone)]
struct AppState {
    provider: Option<ProviderClient>,
    tweet_limit: usize,
}

#[derive(Deserialize)]
struct AnalyzeQuery {
    handle: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

enum ApiError {
    InvalidInput(String),
    Configuration(String),
    Upstream {
        status: StatusCode,
        error: String,
        details: Option<String>,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidInput(error) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error,
                    details: None,
                },
            ),
            ApiError::Configuration(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error,
                    details: None,
                },
            ),
            ApiError::Upstream {
                status,
                error,
                details,
            } => (status, ErrorBody { error, details }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Status { status, body } => ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                error: "provider request failed".to_string(),
                details: if body.is_empty() { None } else { Some(body) },
            },
            ProviderError::MissingUser => ApiError::Upstream {
                status: StatusCode::NOT_FOUND,
                error: "user not found".to_string(),
                details: None,
            },
            other => ApiError::Upstream {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: other.to_string(),
                details: None,
            },
        }
    }
}

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let config = ProviderConfig::load(None)?;
    let provider = ProviderClient::from_env(&config);
    if provider.is_none() {
        tracing::warn!("TWITTERAPI_KEY is not set; /api/analyze will return configuration errors");
    }
    let state = AppState {
        provider,
        tweet_limit: config.tweet_limit,
    };

    let web_root = args.web_root;
    let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
    let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", get(analyze_handler))
        .nest_service("/", static_service)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    tracing::info!(%addr, "listening");
    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let handle = query
        .handle
        .as_deref()
        .unwrap_or("")
        .trim()
        .trim_start_matches('@')
        .trim()
        .to_string();
    if handle.is_empty() {
        return Err(ApiError::InvalidInput(
            "missing handle query parameter".to_string(),
        ));
    }

    let provider = state.provider.as_ref().ok_or_else(|| {
        ApiError::Configuration("TWITTERAPI_KEY is not configured".to_string())
    })?;

    tracing::info!(handle = %handle, "analyzing profile");
    let user = provider.fetch_user(&handle).await?;
    let user_id = normalize::user_id(&user);
    if user_id.is_empty() {
        return Err(ApiError::from(ProviderError::MissingUser));
    }
    let raw_tweets = provider.fetch_last_tweets(&user_id, state.tweet_limit).await?;

    let now = Utc::now();
    let profile = normalize::normalize_profile(&user);
    let tweets: Vec<_> = raw_tweets
        .iter()
        .map(|raw| normalize::normalize_tweet(raw, now))
        .collect();
    let metrics = account_metrics(&tweets);

    Ok(Json(assemble(&profile, &tweets, &metrics, now)))
}
