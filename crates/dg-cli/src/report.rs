//! Text and JSON reports for a generated layout

use serde::Serialize;

use dg_core::RoomGraph;
use dg_core::dungeon::{DoorPlacement, InstantiationPlan};

/// Everything the CLI prints in `--json` mode
#[derive(Debug, Serialize)]
pub struct LayoutReport<'a> {
    pub seed: u64,
    pub attempts: u32,
    pub degenerate: bool,
    pub graph: &'a RoomGraph,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doors: Option<&'a [DoorPlacement]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<&'a InstantiationPlan>,
}

/// Human-readable room listing
pub fn summary(graph: &RoomGraph, seed: u64) -> String {
    let mut out = format!(
        "seed {seed}: {} rooms (target {}, min {}), max depth {}\n",
        graph.len(),
        graph.target_rooms(),
        graph.min_rooms(),
        graph.max_depth()
    );
    if graph.is_degenerate() {
        out.push_str(&format!(
            "warning: layout is {} room(s) short of the minimum\n",
            graph.shortfall()
        ));
    }

    for (id, node) in graph.iter() {
        out.push_str(&format!(
            "{:>3} {:<10} {:<8} depth {:>2}  doors {}{}\n",
            id.index(),
            node.grid_position.to_string(),
            node.room_type.to_string(),
            node.depth,
            node.doors,
            if node.is_critical_path { "  *" } else { "" }
        ));
    }

    let path: Vec<String> = graph
        .critical_path()
        .iter()
        .map(|&id| graph.node(id).grid_position.to_string())
        .collect();
    if !path.is_empty() {
        out.push_str(&format!("critical path: {}\n", path.join(" -> ")));
    }
    out
}

/// One line per placed door
pub fn door_lines(doors: &[DoorPlacement]) -> String {
    doors
        .iter()
        .map(|d| format!("{} at {} rot {}\n", d.name(), d.position, d.rotation_degrees))
        .collect()
}

/// One line per resolved room, then the skipped ones
pub fn plan_lines(plan: &InstantiationPlan) -> String {
    let mut out = String::new();
    for p in &plan.placements {
        out.push_str(&format!(
            "{} {} -> {} ({:?}) at {}\n",
            p.room_type, p.grid_position, p.resolved.asset, p.resolved.source, p.world_position
        ));
    }
    for pos in &plan.skipped {
        out.push_str(&format!("skipped {pos}: no usable asset\n"));
    }
    out
}
