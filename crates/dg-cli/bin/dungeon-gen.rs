//! Dungeon layout generator
//!
//! Main entry point for the command-line tool.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use dg_cli::{LayoutReport, door_lines, plan_lines, summary};
use dg_core::dungeon::{
    DEFAULT_DOOR_OFFSET_FACTOR, DoorPlacement, InstantiationPlan, TemplateSet, place_doors,
    plan_instantiation,
};
use dg_core::{DungeonGenerator, GeneratorConfig, LayoutRng, RoomGraph};

/// Generate a dungeon room layout
#[derive(Parser, Debug)]
#[command(name = "dungeon-gen")]
#[command(author, version, about = "Generate a dungeon room graph", long_about = None)]
struct Args {
    /// Seed for the run (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Minimum room count
    #[arg(long = "min-rooms")]
    min_rooms: Option<u32>,

    /// Maximum room count
    #[arg(long = "max-rooms")]
    max_rooms: Option<u32>,

    /// World distance between adjacent rooms
    #[arg(long = "spacing")]
    spacing: Option<f32>,

    /// Maximum branching depth
    #[arg(long = "max-depth")]
    max_depth: Option<u32>,

    /// Shop chance (percent)
    #[arg(long = "shop-chance")]
    shop_chance: Option<u32>,

    /// Treasure chance (percent)
    #[arg(long = "treasure-chance")]
    treasure_chance: Option<u32>,

    /// Secret room chance (percent)
    #[arg(long = "secret-chance")]
    secret_chance: Option<u32>,

    /// JSON template set used to plan room instantiation
    #[arg(short = 't', long = "templates")]
    templates: Option<PathBuf>,

    /// Print door placements
    #[arg(short = 'd', long = "doors")]
    doors: bool,

    /// Print the layout as JSON
    #[arg(long = "json")]
    json: bool,

    /// Regenerate with the next seed while the layout is degenerate
    #[arg(long = "retry-degenerate", default_value_t = 0)]
    retry_degenerate: u32,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = load_config(&args)?;
    let generator = DungeonGenerator::new(config).context("invalid generator configuration")?;

    let templates = args
        .templates
        .as_deref()
        .map(|path| {
            TemplateSet::from_json_file(path)
                .with_context(|| format!("loading templates from {}", path.display()))
        })
        .transpose()?;

    let mut seed = args.seed.unwrap_or_else(|| LayoutRng::from_entropy().seed());
    let mut attempts = 1;
    let (graph, mut rng) = loop {
        let mut rng = LayoutRng::new(seed);
        let graph = generator.generate_with_rng(&mut rng);
        if graph.is_degenerate() && attempts <= args.retry_degenerate {
            warn!(
                "seed {seed} produced {} rooms, retrying with seed {}",
                graph.len(),
                seed.wrapping_add(1)
            );
            seed = seed.wrapping_add(1);
            attempts += 1;
            continue;
        }
        break (graph, rng);
    };
    info!("using seed {seed} after {attempts} attempt(s)");

    let doors = args
        .doors
        .then(|| place_doors(&graph, DEFAULT_DOOR_OFFSET_FACTOR));
    let plan = templates
        .as_ref()
        .map(|set| plan_instantiation(&graph, set, &mut rng));

    if args.json {
        let report = LayoutReport {
            seed,
            attempts,
            degenerate: graph.is_degenerate(),
            graph: &graph,
            doors: doors.as_deref(),
            plan: plan.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_text(&graph, seed, doors.as_deref(), plan.as_ref());
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(v) = args.min_rooms {
        config.min_rooms = v;
    }
    if let Some(v) = args.max_rooms {
        config.max_rooms = v;
    }
    if let Some(v) = args.spacing {
        config.room_spacing = v;
    }
    if let Some(v) = args.max_depth {
        config.max_branching_depth = v;
    }
    if let Some(v) = args.shop_chance {
        config.shop_chance = v;
    }
    if let Some(v) = args.treasure_chance {
        config.treasure_chance = v;
    }
    if let Some(v) = args.secret_chance {
        config.secret_room_chance = v;
    }

    Ok(config)
}

fn print_text(
    graph: &RoomGraph,
    seed: u64,
    doors: Option<&[DoorPlacement]>,
    plan: Option<&InstantiationPlan>,
) {
    print!("{}", summary(graph, seed));
    if let Some(doors) = doors {
        println!("\n{} doors:", doors.len());
        print!("{}", door_lines(doors));
    }
    if let Some(plan) = plan {
        println!(
            "\ninstantiation: {} placed, {} skipped",
            plan.placements.len(),
            plan.skipped.len()
        );
        print!("{}", plan_lines(plan));
    }
}
