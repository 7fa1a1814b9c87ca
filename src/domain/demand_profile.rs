use serde::{Deserialize, Serialize};

/// A demand profile for a single link.
///
/// Demand sets look profiles up by [`DemandProfile::link_id`]; the remaining
/// fields describe the demand time series and are carried as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    /// The link this profile applies to.
    pub link_id: i64,

    /// The destination link, for origin-destination profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_link_id: Option<i64>,

    /// Offset of the first sample, in seconds.
    #[serde(default)]
    pub start_time: f64,

    /// Seconds between consecutive samples.
    #[serde(default)]
    pub sample_rate: f64,

    /// Multiplier applied to every sample.
    #[serde(default = "default_knob")]
    pub knob: f64,

    /// Demand samples, in time order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub demand: Vec<f64>,
}

const fn default_knob() -> f64 {
    1.0
}

impl DemandProfile {
    /// Creates an empty profile for the given link.
    #[must_use]
    pub const fn new(link_id: i64) -> Self {
        Self {
            link_id,
            destination_link_id: None,
            start_time: 0.0,
            sample_rate: 0.0,
            knob: default_knob(),
            demand: Vec::new(),
        }
    }

    /// Sets the destination link.
    #[must_use]
    pub const fn with_destination(mut self, link_id: i64) -> Self {
        self.destination_link_id = Some(link_id);
        self
    }

    /// Sets the start time and sample rate, both in seconds.
    #[must_use]
    pub const fn with_timing(mut self, start_time: f64, sample_rate: f64) -> Self {
        self.start_time = start_time;
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the multiplier.
    #[must_use]
    pub const fn with_knob(mut self, knob: f64) -> Self {
        self.knob = knob;
        self
    }

    /// Sets the demand samples.
    #[must_use]
    pub fn with_demand(mut self, demand: Vec<f64>) -> Self {
        self.demand = demand;
        self
    }
}
