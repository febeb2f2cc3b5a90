pub mod envelope;
pub mod gateway;

pub use envelope::{ApiEnvelope, StatusFlag};
pub use gateway::{ApiClient, GatewayError};
