//! Services orchestrating the booking platform.
//!
//! Each service is generic over the repository ports it needs, keeping the
//! core crate free of infrastructure. Concrete wiring happens in the API
//! crate's application state.

pub mod booking;
pub mod catalog;
pub mod notification;
pub mod review;
pub mod slots;
