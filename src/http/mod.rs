//! HTTP plumbing for fetching release archives.

mod client;

pub use client::HttpClient;
