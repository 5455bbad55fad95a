//! Storage layer
//!
//! Uses SQLite (embedded) so the service needs no external database process.

pub mod db;

pub use db::Database;
