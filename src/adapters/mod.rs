//! Adapters Layer
//!
//! Inbound: the HTTP middleware and server. Outbound: the MaxMind readers.

pub mod inbound;
pub mod outbound;
