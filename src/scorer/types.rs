use serde::{Deserialize, Serialize};

/// Full breakdown of one placement's fitness. Lower is better; 0.0 is perfect.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessReport {
    // Raw measures
    pub overlap_area: f64,
    pub bounds_area: f64,
    pub excess_weight: f64,
    pub total_weight: f64,
    pub center_of_mass: (f64, f64),
    /// Distance from the center of mass to the safe zone (0 inside it).
    pub com_offset: f64,

    // Weighted penalties
    pub overlap_penalty: f64,
    pub bounds_penalty: f64,
    pub weight_penalty: f64,
    pub balance_penalty: f64,
    /// Added once whenever overlap or bounds area is non-zero.
    pub feasibility_floor: f64,

    pub total: f64,
}

impl FitnessReport {
    pub fn is_perfect(&self) -> bool {
        self.total == 0.0
    }

    /// No overlap and nothing outside the container.
    pub fn is_feasible(&self) -> bool {
        self.overlap_area == 0.0 && self.bounds_area == 0.0
    }
}
