//! New York City Transit subway feeds.

mod client;

pub use client::FeedClient;
