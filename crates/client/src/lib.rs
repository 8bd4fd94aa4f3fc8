//! HTTP client for the storefront API.
//!
//! [`StorefrontClient`] speaks the remote API over `reqwest`, carries the
//! explicit [`SessionContext`](storefront_auth::SessionContext) and implements
//! [`CartService`](storefront_cart::CartService) so the cart engine can run
//! against the real backend.

pub mod address;
pub mod config;
pub mod error;
pub mod http;

pub use address::Address;
pub use config::{ClientConfig, ConfigError, DEFAULT_ENDPOINT};
pub use error::ClientError;
pub use http::StorefrontClient;
