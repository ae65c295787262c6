//! Domain layer containing business entities and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - The persisted URL record
//! - [`repositories`] - Store contract implemented by the infrastructure layer
//! - [`resolution_event`] - Event emitted for every successful redirect
//! - [`reachability`] - Contract for probing original URLs
//!
//! # Lifecycle of a URL record
//!
//! 1. Inserted with no short code; the store assigns the id
//! 2. Short code derived from the id and attached exactly once
//! 3. Deleted by the reachability verifier if the target does not answer,
//!    otherwise kept indefinitely

pub mod entities;
pub mod reachability;
pub mod repositories;
pub mod resolution_event;
