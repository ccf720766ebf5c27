/// REST API for the onion alias daemon
///
/// Provides HTTP endpoints for provisioning clients:
/// - Listing, registering and removing aliases
/// - Clearing the registry
/// - Resolving a hostname the way resolution paths do

pub mod handlers;
pub mod responses;
pub mod server;

pub use handlers::AppState;
pub use responses::*;
pub use server::{build_router, ApiServer};
