//! Business logic for the salonbook booking platform.
//!
//! This crate holds the repository traits (ports) and the services built on
//! top of them: the slot ledger, the booking engine, the review ledger, the
//! catalog, and notification plumbing. It never depends on any specific
//! storage technology -- implementations live in salonbook-infra.

pub mod notify;
pub mod repository;
pub mod service;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
