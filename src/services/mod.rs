// src/services/mod.rs

//! Business logic, independent of HTTP. Handlers call into these.

pub mod admin;
pub mod auth;
pub mod quiz;
