use crate::config::SyncResolvedConfig;
use crate::db::DbActorHandle;
use crate::error::IronlogError;
use crate::server::guards::auth::RequireKeyAuth;
use crate::server::routes::{exercises, oauth, progress, sync, workouts};

use axum::{
    Router,
    extract::{FromRef, Request},
    http::{HeaderName, Uri, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use axum_extra::extract::cookie::Key;
use base64::Engine as _;
use rand::RngCore;
use reqwest::header::HeaderValue;
use std::time::Instant;
use std::{sync::Arc, sync::LazyLock, time::Duration};
use tracing::{error, info, warn};

/// Process-wide key for the private (encrypted) OAuth state cookie.
static COOKIE_KEY: LazyLock<Key> = LazyLock::new(Key::generate);

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
const IRONLOG_USER_AGENT: &str = concat!("ironlog/", env!("CARGO_PKG_VERSION"));

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct IronlogState {
    pub db: DbActorHandle,
    /// Outbound client for the health platform (token endpoint and exercise API).
    pub client: reqwest::Client,
    pub sync_cfg: Arc<SyncResolvedConfig>,
    /// `None` leaves the `/api` routes open.
    pub api_key: Option<Arc<str>>,
    pub insecure_cookie: bool,
    /// Where the OAuth callback sends the browser back to.
    pub settings_path: Arc<str>,
}

impl IronlogState {
    pub fn new(
        db: DbActorHandle,
        sync_cfg: SyncResolvedConfig,
        api_key: Option<Arc<str>>,
        insecure_cookie: bool,
        settings_path: impl Into<Arc<str>>,
    ) -> Self {
        fn build_client(proxy: Option<&url::Url>) -> reqwest::Client {
            let mut builder = reqwest::Client::builder()
                .user_agent(IRONLOG_USER_AGENT)
                .redirect(reqwest::redirect::Policy::none())
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(60));

            if let Some(proxy_url) = proxy {
                let proxy = reqwest::Proxy::all(proxy_url.as_str())
                    .expect("invalid proxy url for reqwest client");
                builder = builder.proxy(proxy);
            }

            builder.build().expect("failed to build reqwest client")
        }

        let client = build_client(sync_cfg.proxy.as_ref());
        Self {
            db,
            client,
            sync_cfg: Arc::new(sync_cfg),
            api_key,
            insecure_cookie,
            settings_path: settings_path.into(),
        }
    }
}

impl FromRef<IronlogState> for Key {
    fn from_ref(_state: &IronlogState) -> Self {
        COOKIE_KEY.clone()
    }
}

async fn not_found_handler(uri: Uri) -> IronlogError {
    IronlogError::not_found("route", uri.path())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis();
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

pub fn ironlog_router(state: IronlogState) -> Router {
    let api = Router::new()
        .route(
            "/api/exercises",
            get(exercises::list_exercises).post(exercises::create_exercise),
        )
        .route(
            "/api/exercises/{id}",
            get(exercises::get_exercise)
                .put(exercises::update_exercise)
                .delete(exercises::delete_exercise),
        )
        .route(
            "/api/workouts",
            get(workouts::list_workouts).post(workouts::create_workout),
        )
        .route(
            "/api/workouts/{id}",
            get(workouts::get_workout)
                .put(workouts::replace_workout)
                .delete(workouts::delete_workout),
        )
        .route("/api/workouts/{id}/sets", post(workouts::add_set))
        .route(
            "/api/workouts/{id}/sets/{set_id}",
            delete(workouts::remove_set),
        )
        .route("/api/progress", get(progress::progress))
        .route("/api/stats", get(progress::stats))
        .route(
            "/api/sync",
            get(sync::sync_status)
                .post(sync::run_sync)
                .delete(sync::disconnect),
        )
        .layer(middleware::from_extractor_with_state::<RequireKeyAuth, _>(
            state.clone(),
        ));

    // Browser-driven consent flow; protected by the CSRF state cookie instead of the API key.
    let oauth = Router::new()
        .route("/sync/auth", get(oauth::sync_oauth_entry))
        .route("/sync/callback", get(oauth::sync_oauth_callback));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(oauth)
        .merge(api)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
