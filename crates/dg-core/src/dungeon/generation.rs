//! Layout generation
//!
//! Grows a room graph breadth-first from the start room, picks the critical
//! path, places special rooms and finally derives doors from adjacency.

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::ConfigError;
use crate::rng::LayoutRng;

use super::{Direction, Doors, GridPos, NodeId, RoomGraph, RoomNode, RoomType};

/// Cumulative probabilities for spawning 1, 2 or 3 branches
const BRANCH_CUMULATIVE: [f64; 3] = [0.6, 0.9, 1.0];

/// Nodes shallower than this are always Normal at creation
const SPECIAL_MIN_DEPTH: u32 = 2;

/// Elite upgrades only happen once this share of the target exists (tenths)
const ELITE_PROGRESS_TENTHS: u64 = 7;

/// Percent chance of the Elite upgrade roll
const ELITE_CHANCE: u32 = 30;

/// Percent chance for a Normal dead end to become Treasure
const DEAD_END_TREASURE_CHANCE: u32 = 40;

/// Generate a layout from `config` with a fixed seed
pub fn generate(config: &GeneratorConfig, seed: u64) -> Result<RoomGraph, ConfigError> {
    let generator = DungeonGenerator::new(config.clone())?;
    Ok(generator.generate(seed))
}

/// Validated generator, reusable across runs
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    config: GeneratorConfig,
}

impl DungeonGenerator {
    /// Validate `config` and build a generator
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a layout from a seed
    pub fn generate(&self, seed: u64) -> RoomGraph {
        let mut rng = LayoutRng::new(seed);
        self.generate_with_rng(&mut rng)
    }

    /// Generate a layout drawing from a caller-owned RNG
    pub fn generate_with_rng(&self, rng: &mut LayoutRng) -> RoomGraph {
        let total_rooms = rng.range_inclusive(self.config.min_rooms, self.config.max_rooms);
        let mut graph = RoomGraph::with_start(
            self.config.room_spacing,
            total_rooms,
            self.config.min_rooms,
        );

        self.expand(&mut graph, total_rooms, rng);
        mark_critical_path(&mut graph);
        self.place_special_rooms(&mut graph, rng);
        graph.sync_doors();

        info!(
            "generated {} of {} rooms (seed {}, max depth {}, critical path {})",
            graph.len(),
            total_rooms,
            rng.seed(),
            graph.max_depth(),
            graph.critical_path().len()
        );
        if graph.is_degenerate() {
            warn!(
                "degenerate layout: {} rooms, {} short of min_rooms {} (seed {})",
                graph.len(),
                graph.shortfall(),
                self.config.min_rooms,
                rng.seed()
            );
        }

        graph
    }

    /// Breadth-first growth until the target is met or the frontier runs dry
    fn expand(&self, graph: &mut RoomGraph, total_rooms: u32, rng: &mut LayoutRng) {
        let mut frontier = VecDeque::from([NodeId(0)]);
        let mut rooms_created = 1u32;

        while rooms_created < total_rooms {
            let Some(current) = frontier.pop_front() else {
                break;
            };
            let (pos, depth) = {
                let node = graph.node(current);
                (node.grid_position, node.depth)
            };
            if depth >= self.config.max_branching_depth {
                continue;
            }

            let branches = branch_count(rng);
            let mut directions = available_directions(graph, pos);
            rng.shuffle(&mut directions);

            for &dir in directions.iter().take(branches) {
                if rooms_created >= total_rooms {
                    break;
                }
                let target = pos.step(dir);
                if graph.contains(target) {
                    continue;
                }

                let room_type = self.roll_room_type(depth + 1, rooms_created, total_rooms, rng);
                let mut node = RoomNode::child_of(current, depth, target, room_type);
                node.doors |= Doors::side(dir.opposite());
                let id = graph.insert(node);

                let parent = graph.node_mut(current);
                parent.doors |= Doors::side(dir);
                parent.children.push(id);

                frontier.push_back(id);
                rooms_created += 1;
                debug!("room {} {} at {} depth {}", id.index(), room_type, target, depth + 1);
            }
        }
    }

    /// Creation-time room type
    ///
    /// `made` is the number of rooms that existed before this one.
    fn roll_room_type(&self, depth: u32, made: u32, total: u32, rng: &mut LayoutRng) -> RoomType {
        if depth < SPECIAL_MIN_DEPTH || self.config.special_chance_total() == 0 {
            return RoomType::Normal;
        }

        let secret = self.config.secret_room_chance;
        let treasure = secret + self.config.treasure_chance;
        let shop = treasure + self.config.shop_chance;

        let roll = rng.rn2(100);
        if roll < secret {
            return RoomType::Secret;
        }
        if roll < treasure {
            return RoomType::Treasure;
        }
        if roll < shop {
            return RoomType::Shop;
        }

        if u64::from(made) * 10 > u64::from(total) * ELITE_PROGRESS_TENTHS
            && rng.percent(ELITE_CHANCE)
        {
            return RoomType::Elite;
        }

        RoomType::Normal
    }

    /// One Shop on the critical path, Treasure in some dead ends
    ///
    /// Skipped entirely when every special chance is zero.
    fn place_special_rooms(&self, graph: &mut RoomGraph, rng: &mut LayoutRng) {
        if self.config.special_chance_total() == 0 {
            return;
        }
        let max_depth = self.config.max_branching_depth;

        let candidates: Vec<NodeId> = graph
            .iter()
            .filter(|(_, n)| {
                n.is_critical_path
                    && n.depth > SPECIAL_MIN_DEPTH
                    && n.depth + 1 < max_depth
                    && n.room_type == RoomType::Normal
            })
            .map(|(id, _)| id)
            .collect();
        if let Some(&id) = rng.choose(&candidates) {
            graph.node_mut(id).room_type = RoomType::Shop;
            debug!("critical path shop at {}", graph.node(id).grid_position);
        }

        let dead_ends: Vec<NodeId> = graph
            .iter()
            .filter(|(_, n)| n.is_dead_end() && n.room_type == RoomType::Normal)
            .map(|(id, _)| id)
            .collect();
        for id in dead_ends {
            if rng.percent(DEAD_END_TREASURE_CHANCE) {
                graph.node_mut(id).room_type = RoomType::Treasure;
            }
        }
    }
}

/// Weighted draw of 1..=3 branches
fn branch_count(rng: &mut LayoutRng) -> usize {
    let roll = rng.unit();
    BRANCH_CUMULATIVE
        .iter()
        .position(|&p| roll <= p)
        .map_or(1, |i| i + 1)
}

/// Cardinal directions whose neighbouring slot is free
fn available_directions(graph: &RoomGraph, pos: GridPos) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&dir| !graph.contains(pos.step(dir)))
        .collect()
}

/// Mark the start-to-farthest path and turn the farthest room into the boss
///
/// The farthest room is the deepest one; ties go to the lowest grid position.
/// Single-room layouts have no boss.
fn mark_critical_path(graph: &mut RoomGraph) -> Option<NodeId> {
    let boss = graph
        .iter()
        .filter(|(_, n)| n.depth > 0)
        .max_by(|(_, a), (_, b)| {
            a.depth
                .cmp(&b.depth)
                .then_with(|| b.grid_position.cmp(&a.grid_position))
        })
        .map(|(id, _)| id)?;

    let mut cursor = Some(boss);
    while let Some(id) = cursor {
        let node = graph.node_mut(id);
        node.is_critical_path = true;
        cursor = node.parent;
    }
    graph.node_mut(boss).room_type = RoomType::Boss;
    Some(boss)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(config: GeneratorConfig) -> DungeonGenerator {
        DungeonGenerator::new(config).expect("valid config")
    }

    /// Straight corridor running east from the start room, `len` rooms deep
    fn corridor(len: i32) -> RoomGraph {
        let mut graph = RoomGraph::with_start(10.0, len as u32 + 1, 1);
        let mut prev = NodeId(0);
        for x in 1..=len {
            let depth = graph.node(prev).depth;
            let id = graph.insert(RoomNode::child_of(
                prev,
                depth,
                GridPos::new(x, 0),
                RoomType::Normal,
            ));
            graph.node_mut(prev).children.push(id);
            prev = id;
        }
        graph
    }

    fn depth_config(max_branching_depth: u32) -> GeneratorConfig {
        GeneratorConfig {
            max_branching_depth,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            min_rooms: 6,
            max_rooms: 2,
            ..Default::default()
        };
        assert!(DungeonGenerator::new(config.clone()).is_err());
        assert!(generate(&config, 1).is_err());
    }

    #[test]
    fn test_branch_count_distribution() {
        let mut rng = LayoutRng::new(99);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[branch_count(&mut rng)] += 1;
        }
        assert_eq!(counts[0], 0);
        // 60% / 30% / 10% with generous slack
        assert!((5_500..6_500).contains(&counts[1]), "{counts:?}");
        assert!((2_500..3_500).contains(&counts[2]), "{counts:?}");
        assert!((700..1_300).contains(&counts[3]), "{counts:?}");
    }

    #[test]
    fn test_shallow_rooms_are_normal() {
        let g = generator(GeneratorConfig {
            secret_room_chance: 100,
            ..Default::default()
        });
        let mut rng = LayoutRng::new(5);
        for depth in 0..SPECIAL_MIN_DEPTH {
            assert_eq!(g.roll_room_type(depth, 1, 10, &mut rng), RoomType::Normal);
        }
        assert_eq!(g.roll_room_type(2, 1, 10, &mut rng), RoomType::Secret);
    }

    #[test]
    fn test_roll_bands() {
        let mut rng = LayoutRng::new(5);
        let treasure = generator(GeneratorConfig {
            shop_chance: 0,
            treasure_chance: 100,
            secret_room_chance: 0,
            ..Default::default()
        });
        assert_eq!(treasure.roll_room_type(3, 1, 10, &mut rng), RoomType::Treasure);

        let shop = generator(GeneratorConfig {
            shop_chance: 100,
            treasure_chance: 0,
            secret_room_chance: 0,
            ..Default::default()
        });
        assert_eq!(shop.roll_room_type(3, 1, 10, &mut rng), RoomType::Shop);
    }

    #[test]
    fn test_elite_needs_progress() {
        let g = generator(GeneratorConfig {
            shop_chance: 0,
            treasure_chance: 0,
            secret_room_chance: 1,
            ..Default::default()
        });
        let mut rng = LayoutRng::new(11);
        // 7 of 10 is not *over* 70%
        for _ in 0..500 {
            let t = g.roll_room_type(4, 7, 10, &mut rng);
            assert_ne!(t, RoomType::Elite);
        }
        let elites = (0..500)
            .filter(|_| g.roll_room_type(4, 8, 10, &mut rng) == RoomType::Elite)
            .count();
        assert!(elites > 50, "expected some elite rooms, got {elites}");
    }

    #[test]
    fn test_zero_chances_never_roll() {
        let g = generator(GeneratorConfig {
            shop_chance: 0,
            treasure_chance: 0,
            secret_room_chance: 0,
            ..Default::default()
        });
        let mut rng = LayoutRng::new(1);
        let before = rng.clone().rn2(1000);
        for _ in 0..100 {
            assert_eq!(g.roll_room_type(5, 9, 10, &mut rng), RoomType::Normal);
        }
        assert_eq!(rng.rn2(1000), before, "no draws should have been consumed");
    }

    #[test]
    fn test_critical_path_tie_break() {
        let mut graph = RoomGraph::with_start(10.0, 3, 1);
        let east = graph.insert(RoomNode::child_of(
            NodeId(0),
            0,
            GridPos::new(1, 0),
            RoomType::Normal,
        ));
        let west = graph.insert(RoomNode::child_of(
            NodeId(0),
            0,
            GridPos::new(-1, 0),
            RoomType::Normal,
        ));
        graph.node_mut(NodeId(0)).children.extend([east, west]);

        let boss = mark_critical_path(&mut graph);
        assert_eq!(boss, Some(west));
        assert!(graph.node(west).is_boss());
        assert!(graph.node(west).is_critical_path);
        assert!(graph.start().is_critical_path);
        assert!(!graph.node(east).is_critical_path);
    }

    #[test]
    fn test_single_room_has_no_boss() {
        let mut graph = RoomGraph::with_start(10.0, 1, 1);
        assert_eq!(mark_critical_path(&mut graph), None);
        assert!(!graph.start().is_critical_path);
        assert!(graph.boss().is_none());
    }

    #[test]
    fn test_shop_on_critical_path() {
        // depths 0..=4, boss at 4; with max depth 6 only depth 3 qualifies
        let g = generator(depth_config(6));
        for seed in 0..50 {
            let mut graph = corridor(4);
            mark_critical_path(&mut graph);
            g.place_special_rooms(&mut graph, &mut LayoutRng::new(seed));

            let types: Vec<_> = graph.iter().map(|(_, n)| n.room_type).collect();
            assert_eq!(
                types,
                vec![
                    RoomType::Start,
                    RoomType::Normal,
                    RoomType::Normal,
                    RoomType::Shop,
                    RoomType::Boss
                ],
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_shop_respects_depth_band() {
        // max depth 5 leaves depth 3 as the only candidate; depth 4 stays Normal
        let g = generator(depth_config(5));
        for seed in 0..50 {
            let mut graph = corridor(5);
            mark_critical_path(&mut graph);
            g.place_special_rooms(&mut graph, &mut LayoutRng::new(seed));
            assert_eq!(graph.node(NodeId(3)).room_type, RoomType::Shop);
            assert_eq!(graph.node(NodeId(4)).room_type, RoomType::Normal);
            assert_eq!(graph.rooms_of_type(RoomType::Shop).count(), 1);
        }

        // too short for the band: no shop at all
        let g = generator(depth_config(4));
        let mut graph = corridor(3);
        mark_critical_path(&mut graph);
        g.place_special_rooms(&mut graph, &mut LayoutRng::new(1));
        assert_eq!(graph.rooms_of_type(RoomType::Shop).count(), 0);
    }

    #[test]
    fn test_shop_pass_ignores_shop_chance() {
        let g = generator(GeneratorConfig {
            max_branching_depth: 6,
            shop_chance: 0,
            treasure_chance: 15,
            secret_room_chance: 5,
            ..Default::default()
        });
        let mut graph = corridor(4);
        mark_critical_path(&mut graph);
        g.place_special_rooms(&mut graph, &mut LayoutRng::new(3));
        assert_eq!(graph.node(NodeId(3)).room_type, RoomType::Shop);
    }

    #[test]
    fn test_zero_chances_skip_special_pass() {
        let g = generator(GeneratorConfig {
            max_branching_depth: 6,
            shop_chance: 0,
            treasure_chance: 0,
            secret_room_chance: 0,
            ..Default::default()
        });
        let mut graph = corridor(4);
        mark_critical_path(&mut graph);
        let mut rng = LayoutRng::new(3);
        let before = rng.clone().rn2(1000);
        g.place_special_rooms(&mut graph, &mut rng);
        assert_eq!(graph.rooms_of_type(RoomType::Shop).count(), 0);
        assert_eq!(rng.rn2(1000), before);
    }

    /// Start with four neighbours; the east one continues to the boss
    fn star() -> RoomGraph {
        let mut graph = RoomGraph::with_start(10.0, 6, 1);
        let kinds = [
            (GridPos::new(1, 0), RoomType::Normal),
            (GridPos::new(-1, 0), RoomType::Normal),
            (GridPos::new(0, 1), RoomType::Secret),
            (GridPos::new(0, -1), RoomType::Normal),
        ];
        for (pos, kind) in kinds {
            let id = graph.insert(RoomNode::child_of(NodeId(0), 0, pos, kind));
            graph.node_mut(NodeId(0)).children.push(id);
        }
        let tail = graph.insert(RoomNode::child_of(
            NodeId(1),
            1,
            GridPos::new(2, 0),
            RoomType::Normal,
        ));
        graph.node_mut(NodeId(1)).children.push(tail);
        mark_critical_path(&mut graph);
        graph
    }

    #[test]
    fn test_dead_end_treasure() {
        let g = generator(GeneratorConfig::default());
        let mut treasures = 0;
        for seed in 0..1000 {
            let mut graph = star();
            g.place_special_rooms(&mut graph, &mut LayoutRng::new(seed));

            // only the two Normal dead ends are eligible
            assert_eq!(graph.node(NodeId(1)).room_type, RoomType::Normal);
            assert_eq!(graph.node(NodeId(3)).room_type, RoomType::Secret);
            assert_eq!(graph.node(NodeId(5)).room_type, RoomType::Boss);
            for id in [NodeId(2), NodeId(4)] {
                let kind = graph.node(id).room_type;
                assert!(matches!(kind, RoomType::Normal | RoomType::Treasure));
                if kind == RoomType::Treasure {
                    treasures += 1;
                }
            }
        }
        // 40% of 2000 rolls
        assert!((700..900).contains(&treasures), "treasures {treasures}");
    }

    #[test]
    fn test_boss_overrides_rolled_type() {
        let mut graph = corridor(2);
        graph.node_mut(NodeId(2)).room_type = RoomType::Treasure;
        assert_eq!(mark_critical_path(&mut graph), Some(NodeId(2)));
        assert!(graph.node(NodeId(2)).is_boss());
        assert_eq!(graph.rooms_of_type(RoomType::Treasure).count(), 0);
    }

    #[test]
    fn test_available_directions() {
        let mut graph = RoomGraph::with_start(10.0, 2, 1);
        assert_eq!(available_directions(&graph, GridPos::ORIGIN), Direction::ALL.to_vec());
        graph.insert(RoomNode::child_of(
            NodeId(0),
            0,
            GridPos::new(0, 1),
            RoomType::Normal,
        ));
        assert_eq!(
            available_directions(&graph, GridPos::ORIGIN),
            vec![Direction::South, Direction::West, Direction::East]
        );
    }

    #[test]
    fn test_same_seed_same_layout() {
        let g = generator(GeneratorConfig::default());
        let a = g.generate(1234);
        let b = g.generate(1234);
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.target_rooms(), b.target_rooms());
    }
}
