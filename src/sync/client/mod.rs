pub mod api;
pub mod oauth;

pub use api::ShealthApi;
pub use oauth::SyncOauthEndpoints;
