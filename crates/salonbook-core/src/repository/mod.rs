//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (salonbook-infra) implements. The core crate never depends on any
//! specific storage technology.
//!
//! All traits use native async fn in traits (RPITIT, Rust 2024 edition).

pub mod appointment;
pub mod employee;
pub mod notification;
pub mod review;
pub mod salon;
pub mod service;
pub mod slot;
