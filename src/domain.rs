//! Domain models for dynamic demand sets.
//!
//! This module contains the demand set record itself, its CRUD action flag,
//! the per-link demand profiles it owns, and the tool configuration.

/// The dynamic demand set record.
pub mod dynamic_demand_set;
pub use dynamic_demand_set::DynamicDemandSet;

/// CRUD action flags.
pub mod crud_flag;
pub use crud_flag::{CrudFlag, UnknownCrudFlag};

/// Per-link demand profiles.
pub mod demand_profile;
pub use demand_profile::DemandProfile;

mod config;
pub use config::Config;
