mod auth;
mod client;
pub mod domain;
mod error;
mod synco_url;

pub use auth::*;
pub use client::*;
pub use error::ApiError;
pub use synco_url::SyncoURL;
