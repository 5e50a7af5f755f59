// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod session;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use nearby_traveler_api::{
    ApiError, CatalogResponse, DraftRequest, DraftResponse, EvaluateSelectionRequest,
    EvaluateSelectionResponse, LoginRequest, LoginResponse, MatchesResponse, RegisterRequest,
    RegisterResponse, SessionService, SignupDrafts, UserDirectory, UserResponse, clear_draft,
    create_draft, current_user, evaluate_selection, find_matches, get_catalog, get_draft, login,
    logout, register_user, update_draft,
};
use nearby_traveler_domain::FlowThresholds;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigError, ServerConfig};
use crate::session::SessionUser;

/// How often expired sessions and drafts are swept.
const PURGE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(300);

/// Nearby Traveler Server - HTTP server for signup, selection, and matching
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Session lifetime in minutes. Overrides the config file.
    #[arg(long)]
    session_ttl_minutes: Option<i64>,
}

/// Application state shared across handlers.
///
/// Stores are locked in the order directory, sessions, drafts.
#[derive(Clone)]
struct AppState {
    /// Registered members.
    directory: Arc<Mutex<UserDirectory>>,
    /// Live login sessions.
    sessions: Arc<Mutex<SessionService>>,
    /// In-progress signups.
    drafts: Arc<Mutex<SignupDrafts>>,
    /// Effective per-flow minimums.
    thresholds: Arc<FlowThresholds>,
    /// Whether registration also opens a session.
    issue_token_on_register: bool,
}

impl AppState {
    fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        let directory: UserDirectory = config
            .bcrypt_cost
            .map_or_else(UserDirectory::default, UserDirectory::new);

        Ok(Self {
            directory: Arc::new(Mutex::new(directory)),
            sessions: Arc::new(Mutex::new(SessionService::new(config.session_ttl()))),
            drafts: Arc::new(Mutex::new(SignupDrafts::new(config.draft_ttl()))),
            thresholds: Arc::new(config.flow_thresholds()?),
            issue_token_on_register: config.issue_token_on_register,
        })
    }
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageResponse {
    /// What happened.
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Items still needed, for selection shortfalls.
    #[serde(skip_serializing_if = "Option::is_none")]
    needed: Option<usize>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Items still needed, for selection shortfalls.
    needed: Option<usize>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            needed: self.needed,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, needed): (StatusCode, Option<usize>) = match &err {
            ApiError::AuthenticationFailed { .. } => (StatusCode::UNAUTHORIZED, None),
            ApiError::SelectionRequirementNotMet { needed, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(*needed))
            }
            ApiError::DomainRuleViolation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, None),
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                (StatusCode::BAD_REQUEST, None)
            }
            ApiError::Conflict { .. } => (StatusCode::CONFLICT, None),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, None),
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        Self {
            status,
            message: err.to_string(),
            needed,
        }
    }
}

/// Handler for POST `/api/auth/register` and `/api/register`.
///
/// Registers a member, optionally logs them in, and discards the signup
/// draft the request names.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), HttpError> {
    info!(
        username = %req.username,
        user_type = %req.user_type,
        "Handling register request"
    );

    let mut directory = app_state.directory.lock().await;
    let mut sessions = if app_state.issue_token_on_register {
        Some(app_state.sessions.lock().await)
    } else {
        None
    };
    let response: RegisterResponse = register_user(
        &mut directory,
        sessions.as_deref_mut(),
        &app_state.thresholds,
        &req,
    )?;
    drop(sessions);
    drop(directory);

    if let Some(draft_id) = &req.draft_id {
        let cleared: bool = clear_draft(&mut *app_state.drafts.lock().await, draft_id).is_ok();
        debug!(draft_id = %draft_id, cleared, "Discarded signup draft after registration");
    }

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let directory = app_state.directory.lock().await;
    let mut sessions = app_state.sessions.lock().await;
    let response: LoginResponse = login(&directory, &mut sessions, &req)?;
    Ok(Json(response))
}

/// Handler for POST `/api/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, token): SessionUser,
) -> Json<MessageResponse> {
    logout(&mut *app_state.sessions.lock().await, &token);
    info!(username = %user.username, "User logged out");
    Json(MessageResponse {
        message: String::from("Logged out"),
    })
}

/// Handler for GET `/api/auth/me`.
async fn handle_me(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<UserResponse>, HttpError> {
    let directory = app_state.directory.lock().await;
    Ok(Json(current_user(&directory, &user)?))
}

/// Handler for GET `/api/catalog`.
#[allow(clippy::unused_async)]
async fn handle_catalog(AxumState(app_state): AxumState<AppState>) -> Json<CatalogResponse> {
    Json(get_catalog(&app_state.thresholds))
}

/// Handler for POST `/api/selection/evaluate`.
#[allow(clippy::unused_async)]
async fn handle_evaluate_selection(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<EvaluateSelectionRequest>,
) -> Result<Json<EvaluateSelectionResponse>, HttpError> {
    let response: EvaluateSelectionResponse = evaluate_selection(&app_state.thresholds, &req)?;
    debug!(
        total = response.total,
        minimum = response.minimum,
        is_valid = response.is_valid,
        "Evaluated selection"
    );
    Ok(Json(response))
}

/// Handler for POST `/api/signup/drafts`.
async fn handle_create_draft(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<DraftRequest>,
) -> Result<(StatusCode, Json<DraftResponse>), HttpError> {
    let mut drafts = app_state.drafts.lock().await;
    let response: DraftResponse = create_draft(&mut drafts, req, OffsetDateTime::now_utc())?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/api/signup/drafts/{draft_id}`.
async fn handle_get_draft(
    AxumState(app_state): AxumState<AppState>,
    Path(draft_id): Path<String>,
) -> Result<Json<DraftResponse>, HttpError> {
    let mut drafts = app_state.drafts.lock().await;
    Ok(Json(get_draft(
        &mut drafts,
        &draft_id,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for PUT `/api/signup/drafts/{draft_id}`.
async fn handle_update_draft(
    AxumState(app_state): AxumState<AppState>,
    Path(draft_id): Path<String>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, HttpError> {
    let mut drafts = app_state.drafts.lock().await;
    Ok(Json(update_draft(
        &mut drafts,
        &draft_id,
        req,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for DELETE `/api/signup/drafts/{draft_id}`.
async fn handle_clear_draft(
    AxumState(app_state): AxumState<AppState>,
    Path(draft_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    clear_draft(&mut *app_state.drafts.lock().await, &draft_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/api/matches`.
async fn handle_matches(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<MatchesResponse>, HttpError> {
    let directory = app_state.directory.lock().await;
    Ok(Json(find_matches(&directory, &user)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(handle_register))
        .route("/api/register", post(handle_register))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/auth/me", get(handle_me))
        .route("/api/catalog", get(handle_catalog))
        .route("/api/selection/evaluate", post(handle_evaluate_selection))
        .route("/api/signup/drafts", post(handle_create_draft))
        .route(
            "/api/signup/drafts/{draft_id}",
            get(handle_get_draft)
                .put(handle_update_draft)
                .delete(handle_clear_draft),
        )
        .route("/api/matches", get(handle_matches))
        .with_state(app_state)
}

/// Periodically drops expired sessions and drafts.
async fn purge_expired(app_state: AppState) {
    let mut interval: tokio::time::Interval = tokio::time::interval(PURGE_INTERVAL);
    loop {
        interval.tick().await;
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let sessions: usize = app_state.sessions.lock().await.purge_expired(now);
        let drafts: usize = app_state.drafts.lock().await.purge_expired(now);
        if sessions > 0 || drafts > 0 {
            debug!(sessions, drafts, "Purged expired entries");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Nearby Traveler Server");

    let mut config: ServerConfig = if let Some(path) = &args.config {
        info!("Loading configuration from: {}", path.display());
        ServerConfig::load(path)?
    } else {
        warn!("No configuration file given, using defaults");
        ServerConfig::default()
    };
    if let Some(minutes) = args.session_ttl_minutes {
        config.session_ttl_minutes = minutes;
        config.validate()?;
    }

    let app_state: AppState = AppState::from_config(&config)?;
    for (flow, requirement) in app_state.thresholds.iter() {
        info!(flow = %flow, minimum = requirement.minimum(), "Selection threshold");
    }

    tokio::spawn(purge_expired(app_state.clone()));

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
