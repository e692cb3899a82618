//! # client
//!
//! Browser-side model of the PyThoughts assistant panel.
//!
//! This crate holds the chat panel state machine, the conversation history
//! buffer, the wire types shared with the `/api/ai/*` endpoints, and the HTTP
//! helpers that call them from the browser (behind the `hydrate` feature).

pub mod net;
pub mod state;
