use chrono::{DateTime, TimeDelta, Utc};
use ironlog_schema::{SyncReport, SyncStatus};
use oauth2::AuthorizationCode;
use tracing::{info, warn};

use super::client::{ShealthApi, SyncOauthEndpoints};
use super::token::SyncToken;
use crate::config::SyncResolvedConfig;
use crate::db::DbActorHandle;
use crate::error::IronlogError;

/// Orchestrates connect, status, disconnect and sync over the stored credential.
pub struct SyncService;

impl SyncService {
    pub async fn status(db: &DbActorHandle) -> Result<SyncStatus, IronlogError> {
        let status = match db.get_sync_token().await? {
            Some(token) => SyncStatus {
                connected: true,
                last_sync_at: token.last_sync_at,
                expires_at: Some(token.expires_at),
                is_expired: Some(token.is_expired(Utc::now())),
            },
            None => SyncStatus {
                connected: false,
                last_sync_at: None,
                expires_at: None,
                is_expired: None,
            },
        };
        Ok(status)
    }

    /// Exchanges the authorization code and stores the resulting credential.
    pub async fn connect(
        cfg: &SyncResolvedConfig,
        http_client: &reqwest::Client,
        db: &DbActorHandle,
        code: String,
    ) -> Result<(), IronlogError> {
        let resp = SyncOauthEndpoints::exchange_authorization_code(
            cfg,
            AuthorizationCode::new(code),
            http_client,
        )
        .await?;
        db.save_sync_token(SyncToken::from_response(&resp, None, Utc::now()))
            .await?;
        info!("health platform connected");
        Ok(())
    }

    pub async fn disconnect(db: &DbActorHandle) -> Result<bool, IronlogError> {
        let existed = db.delete_sync_token().await?;
        info!(existed, "health platform disconnected");
        Ok(existed)
    }

    async fn refresh(
        cfg: &SyncResolvedConfig,
        http_client: &reqwest::Client,
        db: &DbActorHandle,
        token: &SyncToken,
    ) -> Result<SyncToken, IronlogError> {
        let Some(refresh_token) = token.refresh_token.as_deref() else {
            return Err(IronlogError::SyncReauthRequired(
                "no refresh token stored".to_string(),
            ));
        };

        let resp = SyncOauthEndpoints::refresh_access_token(cfg, refresh_token, http_client)
            .await
            .map_err(|e| match e {
                IronlogError::SyncNotConfigured => e,
                other => {
                    warn!(error = %other, "sync token refresh failed");
                    IronlogError::SyncReauthRequired(other.to_string())
                }
            })?;

        let mut fresh = SyncToken::from_response(&resp, Some(refresh_token), Utc::now());
        fresh.last_sync_at = token.last_sync_at;
        db.save_sync_token(fresh.clone()).await?;
        Ok(fresh)
    }

    /// Pulls the trailing `days` window (configured default when `None` or `0`) and reconciles it.
    ///
    /// An expired token is refreshed first; an upstream 401 triggers at most one refresh and
    /// retry. Nothing is written when authentication cannot be restored.
    pub async fn run(
        cfg: &SyncResolvedConfig,
        http_client: &reqwest::Client,
        db: &DbActorHandle,
        days: Option<u32>,
    ) -> Result<SyncReport, IronlogError> {
        let days = days.filter(|d| *d > 0).unwrap_or(cfg.default_days);
        let to = Utc::now();
        let from = window_start(to, days)?;

        let mut token = db
            .get_sync_token()
            .await?
            .ok_or(IronlogError::SyncNotConnected)?;

        let mut refreshed = false;
        if token.is_expired(Utc::now()) {
            token = Self::refresh(cfg, http_client, db, &token).await?;
            refreshed = true;
        }

        let records =
            match ShealthApi::fetch_workouts(cfg, http_client, &token.access_token, from, to).await
            {
                Err(e) if ShealthApi::is_unauthorized(&e) => {
                    if refreshed {
                        return Err(IronlogError::SyncReauthRequired(
                            "access token rejected after refresh".to_string(),
                        ));
                    }
                    token = Self::refresh(cfg, http_client, db, &token).await?;
                    ShealthApi::fetch_workouts(cfg, http_client, &token.access_token, from, to)
                        .await
                        .map_err(|e| {
                            if ShealthApi::is_unauthorized(&e) {
                                IronlogError::SyncReauthRequired(
                                    "access token rejected after refresh".to_string(),
                                )
                            } else {
                                e
                            }
                        })?
                }
                other => other?,
            };

        let report = db.reconcile(records, Utc::now()).await?;
        info!(
            days,
            imported = report.imported,
            updated = report.updated,
            skipped = report.skipped,
            total = report.total,
            "sync finished"
        );
        Ok(report)
    }
}

/// Start of a `days`-long window ending at `to`; a window reaching past the calendar is rejected.
fn window_start(to: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>, IronlogError> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|span| to.checked_sub_signed(span))
        .ok_or_else(|| IronlogError::Validation(format!("days out of range: {days}")))
}
