/// Onion alias daemon library
///
/// Loads configured aliases into the process-wide registry and exposes an
/// HTTP API for provisioning and inspecting them.

pub mod api;
pub mod logging;

pub use api::{build_router, ApiServer, AppState};
