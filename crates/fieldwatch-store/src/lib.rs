//! Document-store persistence for Fieldwatch
//!
//! Thin REST client over the remote document store plus the two
//! collection wrappers: the canonical site list and the append-only
//! observation history.

pub mod client;
pub mod error;
pub mod observations;
pub mod sites;
pub mod types;

pub use client::{DocumentClient, OBSERVATIONS_COLLECTION, SITES_COLLECTION};
pub use error::StoreError;
pub use observations::ObservationLogger;
pub use sites::SiteStore;
pub use types::{Observation, Site, SiteDraft, SiteUpdate, SiteValidationError};
