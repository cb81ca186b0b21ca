use crate::error::IronlogError;
use crate::server::router::IronlogState;
use crate::sync::SyncService;
use crate::sync::client::SyncOauthEndpoints;
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use tracing::{error, info, warn};

const CSRF_COOKIE: &str = "ironlog_sync_oauth_state";

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// GET /sync/auth
///
/// Redirects the browser to the platform consent page and remembers `state` in a private cookie.
pub async fn sync_oauth_entry(
    State(state): State<IronlogState>,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, IronlogError> {
    let (auth_url, csrf_token) = SyncOauthEndpoints::build_authorize_url(&state.sync_cfg)?;

    let jar = jar.add(build_cookie(
        CSRF_COOKIE,
        csrf_token.secret().to_string(),
        !state.insecure_cookie,
    ));

    info!("Dispatching sync OAuth redirect to: {}", auth_url);
    Ok((jar, Redirect::temporary(auth_url.as_ref())))
}

/// GET /sync/callback
///
/// Always ends with a redirect to the settings page carrying `success=connected` or
/// `error=oauth_denied|no_code|state_mismatch|callback_failed`.
pub async fn sync_oauth_callback(
    State(state): State<IronlogState>,
    params: Result<Query<CallbackParams>, QueryRejection>,
    jar: PrivateCookieJar,
) -> Response {
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let expected_state = jar.get(CSRF_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(Cookie::from(CSRF_COOKIE));

    let outcome = match check_callback(&params, expected_state.as_deref()) {
        Err(reason) => {
            warn!(reason, "sync OAuth callback rejected");
            Err(reason)
        }
        Ok(code) => SyncService::connect(&state.sync_cfg, &state.client, &state.db, code)
            .await
            .map_err(|e| {
                error!("sync OAuth exchange failed: {e}");
                "callback_failed"
            }),
    };

    let target = match outcome {
        Ok(()) => format!("{}?success=connected", state.settings_path),
        Err(reason) => format!("{}?error={reason}", state.settings_path),
    };
    (jar, Redirect::temporary(&target)).into_response()
}

/// Returns the authorization code, or the `error` tag for the settings page.
fn check_callback(
    params: &CallbackParams,
    expected_state: Option<&str>,
) -> Result<String, &'static str> {
    if params.error.is_some() {
        return Err("oauth_denied");
    }
    let code = params
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or("no_code")?;

    match (params.state.as_deref(), expected_state) {
        (Some(got), Some(expected)) if got == expected => Ok(code.to_string()),
        _ => Err("state_mismatch"),
    }
}

fn build_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(15))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(code: Option<&str>, state: Option<&str>, error: Option<&str>) -> CallbackParams {
        CallbackParams {
            code: code.map(str::to_string),
            state: state.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn callback_outcomes() {
        assert_eq!(
            check_callback(&params(Some("c"), Some("s"), Some("access_denied")), Some("s")),
            Err("oauth_denied")
        );
        assert_eq!(
            check_callback(&params(Some(" "), Some("s"), None), Some("s")),
            Err("no_code")
        );
        assert_eq!(
            check_callback(&params(Some("c"), Some("forged"), None), Some("s")),
            Err("state_mismatch")
        );
        assert_eq!(
            check_callback(&params(Some("c"), Some("s"), None), None),
            Err("state_mismatch")
        );
        assert_eq!(
            check_callback(&params(Some("c"), Some("s"), None), Some("s")),
            Ok("c".to_string())
        );
    }
}
