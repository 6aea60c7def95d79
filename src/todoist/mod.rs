//! Todoist upstream: wire shapes, normalization, and the HTTP client

pub mod client;
pub mod models;

// Re-export main types for convenience
pub use client::{TodoistClient, today_bounds_for};
pub use models::{normalize_completed, normalize_task};
