//! Clients for specific agencies' realtime feeds.

pub mod mta;
