//! Filesystem adapters for salonbook.

pub mod image;

pub use image::LocalImageStore;
