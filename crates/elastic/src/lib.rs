//! Elasticsearch snapshot API transport
//!
//! This crate provides `ElasticClient`, the HTTP implementation of
//! `SnapshotRepository`:
//! - `GET /_cat/snapshots/{repository}?format=json` to list
//! - `DELETE /_snapshot/{repository}/{id}` to delete

pub mod client;

pub use client::{ElasticClient, DELETE_TIMEOUT};
