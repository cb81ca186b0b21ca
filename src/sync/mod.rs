//! Health-platform integration: token lifecycle, vendor client and the reconciler.

pub mod activity_type;
pub mod client;
pub mod reconciler;
pub mod service;
pub mod token;

pub use activity_type::map_activity_type;
pub use reconciler::{ExternalWorkout, WorkoutStore, reconcile};
pub use service::SyncService;
pub use token::SyncToken;
