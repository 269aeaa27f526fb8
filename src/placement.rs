use crate::geometry::Rect;
use crate::instances::Instance;
use serde::{Deserialize, Serialize};

/// One item's proposed placement: lower-left corner plus rotation flag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gene {
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
}

impl Gene {
    pub fn new(x: f64, y: f64, rotated: bool) -> Self {
        Self { x, y, rotated }
    }
}

/// `genes[i]` places `instance.items[i]`.
pub type Genotype = Vec<Gene>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub item_id: u32,
    pub rect: Rect,
    /// Effective rotation (false for non-rotatable items, whatever the gene says).
    pub rotated: bool,
    pub weight: f64,
}

/// Concrete geometry decoded from a genotype. Never edited in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub items: Vec<PlacedItem>,
}

impl Placement {
    pub fn get(&self, item_id: u32) -> Option<&PlacedItem> {
        self.items.iter().find(|p| p.item_id == item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.items.iter().map(|p| &p.rect)
    }

    /// Compact `id@(x,y)[R]` listing used by exports.
    pub fn summary(&self) -> String {
        self.items
            .iter()
            .map(|p| {
                format!(
                    "{}@({:.2},{:.2}){}",
                    p.item_id,
                    p.rect.x0,
                    p.rect.y0,
                    if p.rotated { "R" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Turns a genotype into rectangles. Out-of-bounds coordinates are kept as-is.
pub fn decode(instance: &Instance, genotype: &[Gene]) -> Placement {
    debug_assert_eq!(instance.items.len(), genotype.len());

    let items = instance
        .items
        .iter()
        .zip(genotype)
        .map(|(item, gene)| {
            let (w, d) = item.footprint(gene.rotated);
            PlacedItem {
                item_id: item.id,
                rect: Rect::new(gene.x, gene.y, w, d),
                rotated: gene.rotated && item.rotatable,
                weight: item.weight,
            }
        })
        .collect();

    Placement { items }
}

/// Inverse of [`decode`]: reads the lower-left corner and rotation back out.
pub fn encode(placement: &Placement) -> Genotype {
    placement
        .items
        .iter()
        .map(|p| Gene::new(p.rect.x0, p.rect.y0, p.rotated))
        .collect()
}
