//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `chat`, `history`) so the panel view can
//! depend on small focused models.

pub mod auth;
pub mod chat;
pub mod history;
