use chrono::{DateTime, TimeDelta, Utc};
use oauth2::TokenResponse;

use crate::oauth_utils::OauthTokenResponse;

/// A stored token counts as expired this many seconds before its real expiry.
pub const EXPIRY_BUFFER_SECS: i64 = 5 * 60;

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// The single stored credential of the health-platform integration.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub last_sync_at: Option<DateTime<Utc>>,
}

impl SyncToken {
    /// Builds the row to persist from a token endpoint response.
    ///
    /// A response without a refresh token keeps `previous_refresh`.
    pub fn from_response(
        resp: &OauthTokenResponse,
        previous_refresh: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_in = resp
            .expires_in()
            .and_then(|d| TimeDelta::from_std(d).ok())
            .unwrap_or(TimeDelta::seconds(DEFAULT_EXPIRES_IN_SECS));

        Self {
            access_token: resp.access_token().secret().clone(),
            refresh_token: resp
                .refresh_token()
                .map(|t| t.secret().clone())
                .or_else(|| previous_refresh.map(str::to_string)),
            expires_at: now + expires_in,
            last_sync_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at - TimeDelta::seconds(EXPIRY_BUFFER_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn token_response(body: serde_json::Value) -> OauthTokenResponse {
        serde_json::from_value(body).expect("valid token response")
    }

    #[test]
    fn expiry_honours_five_minute_buffer() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let mut token = SyncToken {
            access_token: "a".into(),
            refresh_token: None,
            expires_at: now + TimeDelta::minutes(6),
            last_sync_at: None,
        };
        assert!(!token.is_expired(now));

        token.expires_at = now + TimeDelta::minutes(4);
        assert!(token.is_expired(now));
    }

    #[test]
    fn refresh_without_new_refresh_token_keeps_old_one() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let resp = token_response(serde_json::json!({
            "access_token": "fresh",
            "token_type": "bearer",
        }));

        let token = SyncToken::from_response(&resp, Some("old-refresh"), now);
        assert_eq!(token.access_token, "fresh");
        assert_eq!(token.refresh_token.as_deref(), Some("old-refresh"));
        assert_eq!(token.expires_at, now + TimeDelta::seconds(3600));
    }

    #[test]
    fn issued_refresh_token_and_lifetime_win() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let resp = token_response(serde_json::json!({
            "access_token": "fresh",
            "refresh_token": "new-refresh",
            "token_type": "bearer",
            "expires_in": 600,
        }));

        let token = SyncToken::from_response(&resp, Some("old-refresh"), now);
        assert_eq!(token.refresh_token.as_deref(), Some("new-refresh"));
        assert_eq!(token.expires_at, now + TimeDelta::minutes(10));
    }
}
