//! Minimal Pingera API client
//!
//! Typed access to the Pingera monitoring API: status pages, components,
//! incidents, checks and heartbeats. One [`PingeraClient`] owns one
//! connection pool and applies the retry and timeout policy to every call.
//!
//! # Quick Start
//!
//! ```no_run
//! use pingera_sdk::{PageRequest, PingeraClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PingeraClient::new("your-api-key")?;
//!
//! let pages = client.get_pages(PageRequest::new(1, 20)?, None).await?;
//! for page in &pages.items {
//!     println!("{} ({})", page.name, page.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every fallible call returns [`PingeraError`]. Use [`PingeraError::kind`]
//! for a coarse classification that can be reported as data.

pub mod checks;
pub mod client;
pub mod components;
pub mod error;
pub mod heartbeats;
pub mod pages;
pub mod pagination;

pub use checks::{
    Check, CheckCreateParams, CheckFilter, CheckJob, CheckResult, OnDemandCheckParams,
    ResultWindow,
};
pub use client::{
    validate_identifier, ApiInfo, Checks, Components, Heartbeats, Pages, PingeraClient,
    PingeraClientBuilder, DEFAULT_API_BASE, DEFAULT_TIMEOUT,
};
pub use components::{Component, ComponentParams, ComponentStatus};
pub use error::{ErrorKind, PingeraError, PingeraResult, RetryConfig};
pub use heartbeats::{Heartbeat, HeartbeatCreateParams, HeartbeatLog};
pub use pages::{
    AccessSettings, Incident, Localization, NotificationSettings, Page, PageBranding,
    PageCreateParams, PageLanguage, PageList, PageStyling, SubscriptionSettings,
};
pub use pagination::{ExtraFields, PageRequest, Paginated, Validate, MAX_PAGE_SIZE};
