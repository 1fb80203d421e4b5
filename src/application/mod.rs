//! Application Layer
//!
//! Use cases built on the domain ports: the shared lookup registry and the
//! enrichment policy.

pub mod enrichment_service;
pub mod lookup_registry;

pub use enrichment_service::{Enrichment, EnrichmentService};
pub use lookup_registry::{InitOutcome, LookupRegistry};
