pub mod physics;
pub mod types;

pub use self::types::FitnessReport;
use crate::config::FitnessWeights;
use crate::instances::Instance;
use crate::placement::{self, Gene, Placement};

/// Scores a placement. Pure function of its inputs.
///
/// The four components are summed after weighting. When any geometric
/// violation exists a floor of `penalty_balance * half_diagonal` is added, which
/// is at least the balance penalty of any placement lying fully inside the
/// container; feasible placements therefore always outrank infeasible ones.
pub fn evaluate(instance: &Instance, weights: &FitnessWeights, placement: &Placement) -> FitnessReport {
    let container = &instance.container;

    let overlap_area = physics::overlap_area(placement);
    let bounds_area = physics::bounds_area(placement, container);

    let total_weight: f64 = placement.items.iter().map(|p| p.weight).sum();
    let excess_weight = (total_weight - container.max_weight).max(0.0);

    let (center_of_mass, com_offset) = match physics::center_of_mass(placement) {
        Some(com) => (com, physics::com_offset(com, container, weights.balance_tolerance)),
        None => (container.center(), 0.0),
    };

    let overlap_penalty = overlap_area * weights.penalty_overlap;
    let bounds_penalty = bounds_area * weights.penalty_bounds;
    let weight_penalty = excess_weight * weights.penalty_weight;
    let balance_penalty = com_offset * weights.penalty_balance;
    let feasibility_floor = if overlap_area > 0.0 || bounds_area > 0.0 {
        weights.penalty_balance * container.half_diagonal()
    } else {
        0.0
    };

    let total = (overlap_penalty + bounds_penalty + weight_penalty + balance_penalty + feasibility_floor)
        .max(0.0);

    FitnessReport {
        overlap_area,
        bounds_area,
        excess_weight,
        total_weight,
        center_of_mass,
        com_offset,
        overlap_penalty,
        bounds_penalty,
        weight_penalty,
        balance_penalty,
        feasibility_floor,
        total,
    }
}

/// Decoder and evaluator bound to one instance. Every solver scores through this.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub instance: Instance,
    pub weights: FitnessWeights,
}

impl Scorer {
    pub fn new(instance: Instance, weights: FitnessWeights) -> Self {
        Self { instance, weights }
    }

    pub fn item_count(&self) -> usize {
        self.instance.items.len()
    }

    pub fn decode(&self, genotype: &[Gene]) -> Placement {
        placement::decode(&self.instance, genotype)
    }

    pub fn evaluate(&self, placement: &Placement) -> FitnessReport {
        evaluate(&self.instance, &self.weights, placement)
    }

    /// Decode + evaluate.
    pub fn score(&self, genotype: &[Gene]) -> (Placement, FitnessReport) {
        let placement = self.decode(genotype);
        let report = self.evaluate(&placement);
        (placement, report)
    }

    pub fn score_total(&self, genotype: &[Gene]) -> f64 {
        self.score(genotype).1.total
    }

    /// Per-item share of the geometric violations (overlap counted for both
    /// partners, plus the item's out-of-bounds area). Used to steer moves
    /// toward the items causing trouble.
    pub fn element_costs(&self, placement: &Placement) -> Vec<f64> {
        let bounds = self.instance.container.bounds();
        placement
            .items
            .iter()
            .enumerate()
            .map(|(i, p)| {
                physics::overlap_with(placement, &p.rect, Some(i)) + p.rect.area_outside(&bounds)
            })
            .collect()
    }
}
