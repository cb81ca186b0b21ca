pub mod guards;
pub mod router;
pub mod routes;

pub use router::{IronlogState, ironlog_router};
