use crate::geometry::{distance_to_rect, Rect};
use crate::instances::Container;
use crate::placement::Placement;

/// Sum of pairwise intersection areas over all unordered item pairs.
pub fn overlap_area(placement: &Placement) -> f64 {
    let items = &placement.items;
    let mut total = 0.0;
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            total += items[i].rect.intersection_area(&items[j].rect);
        }
    }
    total
}

/// Overlap between `rect` and every placed rect except index `skip`.
pub fn overlap_with(placement: &Placement, rect: &Rect, skip: Option<usize>) -> f64 {
    placement
        .items
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != skip)
        .map(|(_, p)| p.rect.intersection_area(rect))
        .sum()
}

/// Total item area lying outside the container floor.
pub fn bounds_area(placement: &Placement, container: &Container) -> f64 {
    let bounds = container.bounds();
    placement.rects().map(|r| r.area_outside(&bounds)).sum()
}

/// Weight-averaged centroid. `None` when the placement carries no weight.
pub fn center_of_mass(placement: &Placement) -> Option<(f64, f64)> {
    let total: f64 = placement.items.iter().map(|p| p.weight).sum();
    if total <= 0.0 {
        return None;
    }
    let (mut wx, mut wy) = (0.0, 0.0);
    for p in &placement.items {
        let (cx, cy) = p.rect.center();
        wx += cx * p.weight;
        wy += cy * p.weight;
    }
    Some((wx / total, wy / total))
}

/// Centered rectangle of half-extent `tolerance * (width, depth)`.
pub fn safe_zone(container: &Container, tolerance: f64) -> Rect {
    let (cx, cy) = container.center();
    let hx = container.width * tolerance;
    let hy = container.depth * tolerance;
    Rect {
        x0: cx - hx,
        y0: cy - hy,
        x1: cx + hx,
        y1: cy + hy,
    }
}

/// Distance from the center of mass to the safe zone.
pub fn com_offset(com: (f64, f64), container: &Container, tolerance: f64) -> f64 {
    distance_to_rect(com.0, com.1, &safe_zone(container, tolerance))
}
