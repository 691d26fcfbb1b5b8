//! Shared domain types for the salonbook booking platform.
//!
//! This crate contains the entities used across the platform: Salon, Service,
//! Employee, TimeSlot, Appointment, Review, Notification, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod appointment;
pub mod employee;
pub mod error;
pub mod notification;
pub mod review;
pub mod salon;
pub mod service;
pub mod slot;
pub mod user;
