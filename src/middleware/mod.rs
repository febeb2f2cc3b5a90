pub mod guard;
pub mod response;
pub mod session;

pub use guard::route_guard_middleware;
pub use response::{ApiResponse, ApiResult};
pub use session::RequestSession;
