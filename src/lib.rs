//! Dynamic Demand Sets
//!
//! A dynamic demand set is produced by a traffic estimation run: it records
//! which run produced it, when, and the per-link demand profiles it
//! estimated.

pub mod domain;
pub use domain::{Config, CrudFlag, DemandProfile, DynamicDemandSet, UnknownCrudFlag};

/// Raw storage and YAML documents for dynamic demand sets.
pub mod storage;
pub use storage::{DynamicDemandSetData, LoadError};
