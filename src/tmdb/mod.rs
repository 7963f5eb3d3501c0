//! Outbound side: the TMDB client and the request shapes it accepts.

pub mod client;
pub mod types;

pub use client::*;
pub use types::*;
