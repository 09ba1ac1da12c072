//! Room templates and instantiation planning
//!
//! A consumer turns each graph node into a concrete room asset. Templates are
//! matched on the exact door signature first; when nothing matches, the
//! default asset registered for the room type is used. Normal and Elite rooms
//! with no default fall back to the first template in the set.
//!
//! Resolution is a pure function of room type, door signature and the
//! template set (plus an RNG draw when several templates match); it never
//! touches the graph algorithm.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{TemplateError, TemplateLoadError};
use crate::rng::LayoutRng;

use super::{Doors, GridPos, RoomGraph, RoomNode, RoomType, WorldPos};

/// A room asset with a fixed door layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTemplate {
    /// Display name
    pub name: String,
    /// Asset key handed to the instantiating engine
    pub asset: String,
    /// Door signature this asset provides
    pub doors: Doors,
    /// Rotation (degrees about Z) so the asset's doors face the declared sides
    #[serde(default)]
    pub rotation_degrees: f32,
    /// Intended room kind
    #[serde(default)]
    pub room_type: RoomType,
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    #[serde(default = "default_common_weight")]
    pub common_weight: f32,
    #[serde(default = "default_rare_weight")]
    pub rare_weight: f32,
    #[serde(default = "default_min_enemies")]
    pub min_enemies: u32,
    #[serde(default = "default_max_enemies")]
    pub max_enemies: u32,
}

fn default_difficulty() -> u32 {
    1
}

fn default_common_weight() -> f32 {
    1.0
}

fn default_rare_weight() -> f32 {
    0.1
}

fn default_min_enemies() -> u32 {
    3
}

fn default_max_enemies() -> u32 {
    8
}

impl RoomTemplate {
    /// Template with default properties
    pub fn new(name: impl Into<String>, asset: impl Into<String>, doors: Doors) -> Self {
        Self {
            name: name.into(),
            asset: asset.into(),
            doors,
            rotation_degrees: 0.0,
            room_type: RoomType::Normal,
            difficulty: default_difficulty(),
            common_weight: default_common_weight(),
            rare_weight: default_rare_weight(),
            min_enemies: default_min_enemies(),
            max_enemies: default_max_enemies(),
        }
    }

    pub fn matches(&self, doors: Doors) -> bool {
        self.doors == doors
    }
}

/// Where an asset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssetSource {
    /// Exact door-signature match
    Template,
    /// The room type's default asset
    TypeDefault,
    /// First template in the set, used for generic rooms with nothing better
    FirstTemplate,
}

/// Outcome of resolving one room
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAsset {
    pub asset: String,
    pub rotation_degrees: f32,
    pub template: Option<String>,
    pub source: AssetSource,
}

/// All room assets known to the consumer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateSet {
    #[serde(default)]
    pub templates: Vec<RoomTemplate>,
    /// Dedicated asset per room type (start, boss, shop, ...)
    #[serde(default)]
    pub defaults: BTreeMap<RoomType, String>,
}

impl TemplateSet {
    pub fn new(templates: Vec<RoomTemplate>) -> Self {
        Self {
            templates,
            defaults: BTreeMap::new(),
        }
    }

    /// Register the default asset for a room type
    pub fn with_default(mut self, room_type: RoomType, asset: impl Into<String>) -> Self {
        self.defaults.insert(room_type, asset.into());
        self
    }

    /// Load a template set from JSON
    pub fn from_json_file(path: &Path) -> Result<Self, TemplateLoadError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    fn matching(&self, doors: Doors) -> Vec<&RoomTemplate> {
        self.templates.iter().filter(|t| t.matches(doors)).collect()
    }

    /// Resolve, choosing uniformly among exact matches
    pub fn resolve(
        &self,
        room_type: RoomType,
        doors: Doors,
        rng: &mut LayoutRng,
    ) -> Result<ResolvedAsset, TemplateError> {
        let matches = self.matching(doors);
        match rng.choose(&matches) {
            Some(template) => Ok(from_template(template, AssetSource::Template)),
            None => self.fallback(room_type, doors),
        }
    }

    /// Resolve, taking the first exact match
    pub fn resolve_first(
        &self,
        room_type: RoomType,
        doors: Doors,
    ) -> Result<ResolvedAsset, TemplateError> {
        match self.templates.iter().find(|t| t.matches(doors)) {
            Some(template) => Ok(from_template(template, AssetSource::Template)),
            None => self.fallback(room_type, doors),
        }
    }

    fn fallback(&self, room_type: RoomType, doors: Doors) -> Result<ResolvedAsset, TemplateError> {
        if let Some(asset) = self.defaults.get(&room_type) {
            return Ok(ResolvedAsset {
                asset: asset.clone(),
                rotation_degrees: 0.0,
                template: None,
                source: AssetSource::TypeDefault,
            });
        }
        if room_type.uses_generic_layout()
            && let Some(first) = self.templates.first()
        {
            return Ok(from_template(first, AssetSource::FirstTemplate));
        }
        Err(TemplateError::Unavailable { room_type, doors })
    }
}

fn from_template(template: &RoomTemplate, source: AssetSource) -> ResolvedAsset {
    ResolvedAsset {
        asset: template.asset.clone(),
        rotation_degrees: template.rotation_degrees,
        template: Some(template.name.clone()),
        source,
    }
}

/// One room ready to be instantiated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomPlacement {
    pub grid_position: GridPos,
    pub world_position: WorldPos,
    pub room_type: RoomType,
    pub doors: Doors,
    pub resolved: ResolvedAsset,
}

/// Instantiation plan for a whole layout
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstantiationPlan {
    pub placements: Vec<RoomPlacement>,
    /// Rooms with no usable asset; the rest of the plan is unaffected
    pub skipped: Vec<GridPos>,
}

/// Resolve an asset for every room in the graph
///
/// Rooms that cannot be resolved are logged and skipped.
pub fn plan_instantiation(
    graph: &RoomGraph,
    templates: &TemplateSet,
    rng: &mut LayoutRng,
) -> InstantiationPlan {
    let mut plan = InstantiationPlan::default();
    for (_, node) in graph.iter() {
        match templates.resolve(node.room_type, node.doors, rng) {
            Ok(resolved) => {
                debug!(
                    "{} room at {} uses '{}' ({:?})",
                    node.room_type, node.grid_position, resolved.asset, resolved.source
                );
                plan.placements.push(placement(graph, node, resolved));
            }
            Err(err) => {
                warn!("skipping room at {}: {}", node.grid_position, err);
                plan.skipped.push(node.grid_position);
            }
        }
    }
    plan
}

fn placement(graph: &RoomGraph, node: &RoomNode, resolved: ResolvedAsset) -> RoomPlacement {
    RoomPlacement {
        grid_position: node.grid_position,
        world_position: graph.world_position(node.grid_position),
        room_type: node.room_type,
        doors: node.doors,
        resolved,
    }
}
