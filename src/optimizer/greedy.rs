use super::{BestSolution, SolveContext, Solver, Strategy};
use crate::config::GreedyOrder;
use crate::geometry::{grid_positions, Rect};
use crate::instances::{Container, Item};
use crate::placement::{Gene, Genotype};
use tracing::debug;

/// Order in which items are placed. Largest-first sorts by area, then weight,
/// both descending; ties keep input order.
pub fn placement_order(items: &[Item], order: GreedyOrder) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..items.len()).collect();
    if order == GreedyOrder::LargestFirst {
        idx.sort_by(|&a, &b| {
            items[b]
                .area()
                .total_cmp(&items[a].area())
                .then(items[b].weight.total_cmp(&items[a].weight))
        });
    }
    idx
}

fn orientations(item: &Item) -> &'static [bool] {
    if item.rotatable {
        &[false, true]
    } else {
        &[false]
    }
}

/// First grid position (scanning rows bottom-up, left to right) where `item`
/// fits inside the container without touching the area of any placed rect.
/// Across orientations the lower, then further-left, position wins.
pub fn first_fit(item: &Item, container: &Container, placed: &[Rect], step: f64) -> Option<Gene> {
    let mut found: Option<Gene> = None;
    for &rotated in orientations(item) {
        let (w, d) = item.footprint(rotated);
        let xs = grid_positions(container.width - w, step);
        let ys = grid_positions(container.depth - d, step);

        'scan: for &y in &ys {
            if let Some(f) = found {
                if y > f.y {
                    break;
                }
            }
            for &x in &xs {
                let rect = Rect::new(x, y, w, d);
                if placed.iter().all(|r| r.intersection_area(&rect) == 0.0) {
                    let better = match found {
                        None => true,
                        Some(f) => y < f.y || (y == f.y && x < f.x),
                    };
                    if better {
                        found = Some(Gene::new(x, y, rotated));
                    }
                    break 'scan;
                }
            }
        }
    }
    found
}

/// In-bounds grid position with the least overlap against `placed`; the
/// origin when the item is larger than the container in every orientation.
pub fn least_overlap(item: &Item, container: &Container, placed: &[Rect], step: f64) -> Gene {
    let mut best = (f64::INFINITY, Gene::default());
    for &rotated in orientations(item) {
        let (w, d) = item.footprint(rotated);
        for &y in &grid_positions(container.depth - d, step) {
            for &x in &grid_positions(container.width - w, step) {
                let rect = Rect::new(x, y, w, d);
                let overlap: f64 = placed.iter().map(|r| r.intersection_area(&rect)).sum();
                if overlap < best.0 {
                    best = (overlap, Gene::new(x, y, rotated));
                }
            }
        }
    }
    best.1
}

/// Deterministic bottom-left construction. Returns a genotype in item order.
pub fn construct(items: &[Item], container: &Container, step: f64, order: GreedyOrder) -> Genotype {
    let mut genes = vec![Gene::default(); items.len()];
    let mut placed: Vec<Rect> = Vec::with_capacity(items.len());

    for i in placement_order(items, order) {
        let item = &items[i];
        let gene = match first_fit(item, container, &placed, step) {
            Some(g) => g,
            None => {
                debug!("item {} has no free slot, placing at least overlap", item.id);
                least_overlap(item, container, &placed, step)
            }
        };
        let (w, d) = item.footprint(gene.rotated);
        placed.push(Rect::new(gene.x, gene.y, w, d));
        genes[i] = gene;
    }
    genes
}

pub struct GreedyPlacement {
    step: f64,
    order: GreedyOrder,
}

impl GreedyPlacement {
    pub fn new(step: f64, order: GreedyOrder) -> Self {
        Self { step, order }
    }
}

impl Solver for GreedyPlacement {
    fn strategy(&self) -> Strategy {
        Strategy::Greedy
    }

    fn solve(&self, ctx: &mut SolveContext<'_>) -> BestSolution {
        let scorer = ctx.scorer;
        let genotype = construct(
            &scorer.instance.items,
            &scorer.instance.container,
            self.step,
            self.order,
        );
        let best = BestSolution::from_genotype(scorer, genotype);
        ctx.report(best.fitness(), best.fitness());
        best
    }
}
