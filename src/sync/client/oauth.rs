use crate::config::SyncResolvedConfig;
use crate::error::{IronlogError, OauthError};
use crate::oauth_utils::{OauthTokenResponse, StandardOauth2Client, build_oauth2_client};
use oauth2::{AuthorizationCode, CsrfToken, RedirectUrl, RefreshToken, Scope};
use tracing::info;

/// Stateless OAuth endpoints of the health platform, built per call from resolved config.
pub struct SyncOauthEndpoints;

impl SyncOauthEndpoints {
    fn build_client(cfg: &SyncResolvedConfig) -> Result<StandardOauth2Client, IronlogError> {
        if !cfg.is_configured() {
            return Err(IronlogError::SyncNotConfigured);
        }
        let redirect = RedirectUrl::new(cfg.redirect_url.to_string())?;
        build_oauth2_client(
            &cfg.client_id,
            Some(&cfg.client_secret),
            cfg.auth_url.as_str(),
            cfg.token_url.as_str(),
            redirect,
        )
    }

    /// Consent URL with the configured scopes and a fresh random `state`.
    pub fn build_authorize_url(
        cfg: &SyncResolvedConfig,
    ) -> Result<(url::Url, CsrfToken), IronlogError> {
        let client = Self::build_client(cfg)?;
        let mut req = client.authorize_url(CsrfToken::new_random);
        for scope in &cfg.scopes {
            req = req.add_scope(Scope::new(scope.clone()));
        }
        Ok(req.url())
    }

    pub async fn exchange_authorization_code(
        cfg: &SyncResolvedConfig,
        code: AuthorizationCode,
        http_client: &reqwest::Client,
    ) -> Result<OauthTokenResponse, IronlogError> {
        let client = Self::build_client(cfg)?;
        let token: OauthTokenResponse = client
            .exchange_code(code)
            .request_async(http_client)
            .await
            .map_err(OauthError::from)?;
        info!("sync OAuth code exchange completed");
        Ok(token)
    }

    pub async fn refresh_access_token(
        cfg: &SyncResolvedConfig,
        refresh_token: &str,
        http_client: &reqwest::Client,
    ) -> Result<OauthTokenResponse, IronlogError> {
        let client = Self::build_client(cfg)?;
        let token: OauthTokenResponse = client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(http_client)
            .await
            .map_err(OauthError::from)?;
        info!("sync access token refreshed");
        Ok(token)
    }
}
