//! Configuration and the normalized task model

pub mod config;
pub mod models;
