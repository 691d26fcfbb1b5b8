//! Infrastructure layer for salonbook.
//!
//! Contains implementations of the repository traits defined in
//! `salonbook-core`: SQLite storage with split read/write pools, the
//! persisted notification sink, the local filesystem image store, and the
//! configuration loader.

pub mod config;
pub mod sqlite;
pub mod storage;
