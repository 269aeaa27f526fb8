use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle on the container floor, `(x0, y0)` lower-left,
/// `(x1, y1)` upper-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, depth: f64) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + depth,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline(always)]
    pub fn depth(&self) -> f64 {
        self.y1 - self.y0
    }

    #[inline(always)]
    pub fn area(&self) -> f64 {
        self.width() * self.depth()
    }

    #[inline(always)]
    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5)
    }

    /// Area shared with `other`. Touching edges share no area.
    #[inline(always)]
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = self.x1.min(other.x1) - self.x0.max(other.x0);
        let d = self.y1.min(other.y1) - self.y0.max(other.y0);
        if w <= 0.0 || d <= 0.0 {
            return 0.0;
        }
        w * d
    }

    /// Area of the part of `self` lying outside `bounds`.
    #[inline(always)]
    pub fn area_outside(&self, bounds: &Rect) -> f64 {
        (self.area() - self.intersection_area(bounds)).max(0.0)
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }
}

/// Distance from `(px, py)` to the nearest point of `zone`. Zero inside.
pub fn distance_to_rect(px: f64, py: f64, zone: &Rect) -> f64 {
    let dx = if px < zone.x0 {
        zone.x0 - px
    } else if px > zone.x1 {
        px - zone.x1
    } else {
        0.0
    };
    let dy = if py < zone.y0 {
        zone.y0 - py
    } else if py > zone.y1 {
        py - zone.y1
    } else {
        0.0
    };
    (dx * dx + dy * dy).sqrt()
}

/// Grid coordinates `0, step, 2*step, ...` up to `limit`, always ending
/// exactly on `limit` so items can sit flush against the far wall.
/// Empty when `limit` is negative.
pub fn grid_positions(limit: f64, step: f64) -> Vec<f64> {
    if limit < 0.0 || !limit.is_finite() {
        return Vec::new();
    }
    if step <= 0.0 || limit == 0.0 {
        return vec![0.0];
    }
    let count = (limit / step).floor() as usize;
    // clamp: k * step can land a few ulps past `limit`
    let mut out: Vec<f64> = (0..=count).map(|k| (k as f64 * step).min(limit)).collect();
    if let Some(&last) = out.last() {
        if last < limit {
            out.push(limit);
        }
    }
    out
}
