use crate::error::{LfResult, LoadForgeError};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

const BUILTIN_INSTANCES: &str = include_str!("../data/instances.json");

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    #[default]
    Basic,
    Challenging,
    Impossible,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub width: f64,
    pub depth: f64,
    pub max_weight: f64,
}

impl Container {
    /// The valid placement region `[0,width] x [0,depth]`.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.depth)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width * 0.5, self.depth * 0.5)
    }

    pub fn half_diagonal(&self) -> f64 {
        0.5 * (self.width * self.width + self.depth * self.depth).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub width: f64,
    pub depth: f64,
    pub weight: f64,
    #[serde(default)]
    pub rotatable: bool,
}

impl Item {
    /// Footprint `(width, depth)` for the given rotation state.
    /// Rotation is ignored for items that do not allow it.
    #[inline(always)]
    pub fn footprint(&self, rotated: bool) -> (f64, f64) {
        if rotated && self.rotatable {
            (self.depth, self.width)
        } else {
            (self.width, self.depth)
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.depth
    }
}

/// One immutable problem definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub container: Container,
    pub items: Vec<Item>,
}

impl Instance {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(|i| i.weight).sum()
    }

    pub fn total_area(&self) -> f64 {
        self.items.iter().map(|i| i.area()).sum()
    }

    pub fn validate(&self) -> LfResult<()> {
        let c = &self.container;
        let finite_pos = |v: f64| v.is_finite() && v > 0.0;

        if !finite_pos(c.width) || !finite_pos(c.depth) {
            return Err(LoadForgeError::Validation(format!(
                "Instance '{}': container dimensions must be positive ({} x {})",
                self.name, c.width, c.depth
            )));
        }
        if !c.max_weight.is_finite() || c.max_weight < 0.0 {
            return Err(LoadForgeError::Validation(format!(
                "Instance '{}': max_weight must be non-negative",
                self.name
            )));
        }

        let mut ids = HashSet::new();
        for item in &self.items {
            if !finite_pos(item.width) || !finite_pos(item.depth) {
                return Err(LoadForgeError::Validation(format!(
                    "Instance '{}': item {} has invalid dimensions",
                    self.name, item.id
                )));
            }
            if !item.weight.is_finite() || item.weight < 0.0 {
                return Err(LoadForgeError::Validation(format!(
                    "Instance '{}': item {} has invalid weight",
                    self.name, item.id
                )));
            }
            if !ids.insert(item.id) {
                return Err(LoadForgeError::Validation(format!(
                    "Instance '{}': duplicate item id {}",
                    self.name, item.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct InstanceFile {
    instances: Vec<Instance>,
}

/// Named, validated problem definitions. Lookup is by exact name.
#[derive(Debug, Clone)]
pub struct InstanceRepository {
    instances: Vec<Instance>,
}

impl InstanceRepository {
    /// The instance set shipped with the crate.
    pub fn builtin() -> LfResult<Self> {
        Self::from_json_str(BUILTIN_INSTANCES)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LfResult<Self> {
        let path = path.as_ref();
        debug!("Loading instances from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> LfResult<Self> {
        let file: InstanceFile = serde_json::from_str(content)?;
        Self::from_instances(file.instances)
    }

    pub fn from_instances(instances: Vec<Instance>) -> LfResult<Self> {
        let mut names = HashSet::new();
        for inst in &instances {
            inst.validate()?;
            if !names.insert(inst.name.as_str()) {
                return Err(LoadForgeError::Validation(format!(
                    "Duplicate instance name '{}'",
                    inst.name
                )));
            }
        }
        Ok(Self { instances })
    }

    pub fn get(&self, name: &str) -> LfResult<&Instance> {
        self.instances
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| LoadForgeError::UnknownInstance(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.instances.iter().map(|i| i.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Instance> {
        self.instances.iter().filter(move |i| i.category == category)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
