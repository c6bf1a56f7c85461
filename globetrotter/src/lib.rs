mod api_url;
mod auth;
mod client;
pub mod domain;
pub mod share;
pub mod timeline;

pub(crate) use api_url::*;

pub use auth::*;
pub use client::*;
