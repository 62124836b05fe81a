//! Validated value types.
//!
//! These types enforce their invariants at construction time.

mod api_url;
mod method;

pub use api_url::ApiUrl;
pub use method::Method;
