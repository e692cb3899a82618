//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and assistant orchestration so route
//! handlers stay focused on HTTP translation.

pub mod assistant;
pub mod demo;
pub mod requests;
