pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod notify;
pub mod render;
pub mod reservations;
pub mod selection;
pub mod session;
// cmd and reports belong to the binary (main.rs).
