//! Core domain types

pub mod review;

pub use review::*;
