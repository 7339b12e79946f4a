// epscale-api: Async Rust clients for the sizing report API and the
// managed identity provider.

pub mod error;
pub mod identity;
pub mod sizing;
pub mod transport;
pub mod types;

pub use error::Error;
pub use identity::IdentityClient;
pub use sizing::SizingClient;
pub use transport::{TlsMode, TransportConfig};
pub use types::{AiAnalysis, AuthTokens, SignUpAttributes, UsagePage, UsageRecord, UsageStats};
