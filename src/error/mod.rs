mod ironlog;
mod oauth;

pub use ironlog::{ApiErrorBody, ApiErrorObject, IronlogError};
pub use oauth::OauthError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
