//! HTTP request handlers for the REST API.

pub mod appointment;
pub mod employee;
pub mod notification;
pub mod review;
pub mod salon;
pub mod service;
pub mod slot;
