//! Networking modules for the assistant HTTP endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the POST calls and `types` defines the shared wire schema.

pub mod api;
pub mod types;
