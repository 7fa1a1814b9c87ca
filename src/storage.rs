/// YAML document serialization for demand sets.
pub mod document;
mod dynamic_demand_set_data;

pub use document::LoadError;
pub use dynamic_demand_set_data::DynamicDemandSetData;
