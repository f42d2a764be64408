//! Facilities Index Library
//!
//! A Rust library for normalizing loosely-structured hospital facility
//! records from JSON-lines datasets into a strict canonical schema, and
//! serving the resulting immutable dataset through full-scan and
//! geohash-based proximity queries.
//!
//! This library provides tools for:
//! - Decoding raw facility records with strict mandatory-field validation
//! - Resolving free-text facility type, governance, and trauma designations
//!   against fixed enumerations
//! - Normalizing display text, addresses, and best-effort website URLs
//! - Computing deterministic 12-character geohashes from coordinates
//! - Building an in-memory index answering "facilities near X" queries via
//!   widening geohash-prefix search
//!
//! Loading is fail-fast: a dataset either decodes completely or the load
//! returns an error. After a successful load the index never mutates and
//! can be shared freely across threads.

pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod geohash;
pub mod index;
pub mod models;

// CLI modules
pub mod cli;

// Re-export commonly used types
pub use config::LoadOptions;
pub use error::{FacilitiesError, Result};
pub use index::{FacilitiesIndex, LoadStats};
pub use models::{Facility, FacilityKey, FacilityType, Governance, TraumaType};
