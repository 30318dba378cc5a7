//! Rules Sandbox
//!
//! Builds a small seeded world around one city, lists the actions its
//! player can see with JSON previews, and optionally applies one of them.

use std::path::PathBuf;

use clap::Parser;
use polytopia_rules::actions::available_actions;
use polytopia_rules::core::error::Result;
use polytopia_rules::core::types::PlayerId;
use polytopia_rules::world::{ImprovementType, ResourceKind, Tech, TerrainType, World};
use polytopia_rules::RulesConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Rules Sandbox - inspect and apply actions on a generated world
#[derive(Parser, Debug)]
#[command(name = "rules_sandbox")]
#[command(about = "List and apply player actions on a seeded test world")]
struct Args {
    /// Rules file overriding the default costs and values (TOML)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Map width in tiles
    #[arg(long, default_value_t = 7)]
    width: u32,

    /// Map height in tiles
    #[arg(long, default_value_t = 7)]
    height: u32,

    /// Stars the player starts with
    #[arg(long, default_value_t = 5)]
    stars: u32,

    /// Random seed for deterministic worlds
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Index (from the listing) of the action to apply
    #[arg(long)]
    apply: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("polytopia_rules=debug")
        .init();

    let args = Args::parse();
    let config = match &args.rules {
        Some(path) => RulesConfig::load(path)?,
        None => RulesConfig::default(),
    };

    let (mut world, player) = generate_world(&args)?;
    tracing::info!(
        "Generated {}x{} world (seed {}) for {}",
        args.width,
        args.height,
        args.seed,
        player
    );

    let actions = available_actions(&world, &config, player);
    println!("=== {} visible actions ===", actions.len());
    for (index, action) in actions.iter().enumerate() {
        let preview = action.preview(&world, &config, player)?;
        println!("[{}] {}", index, preview.to_json()?);
    }

    if let Some(index) = args.apply {
        let Some(action) = actions.get(index) else {
            eprintln!("No action at index {} ({} listed)", index, actions.len());
            std::process::exit(1);
        };
        let label = action.describe(&world);
        let chain = action.apply(&mut world, &config, player)?;

        println!();
        println!("=== Applied {} ===", label);
        for consequence in &chain {
            println!("  {}", consequence);
        }
        println!("Stars left: {}", world.player(player)?.stars());
        for city in world.cities() {
            println!(
                "{}: level {}, population {}",
                city.name, city.level, city.population
            );
        }
    }

    Ok(())
}

/// A field map with random forest, mountain and shore tiles, one city in
/// the middle and a scattering of resources and improvements
fn generate_world(args: &Args) -> Result<(World, PlayerId)> {
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut world = World::new(args.width, args.height, TerrainType::Field);

    let ids: Vec<_> = world.tiles().map(|t| t.id).collect();
    for &tile in &ids {
        let terrain = match rng.gen_range(0..10) {
            0..=2 => TerrainType::Forest,
            3 => TerrainType::Mountain,
            4 => TerrainType::Shore,
            _ => TerrainType::Field,
        };
        world.set_terrain(tile, terrain)?;
    }

    let player = world.add_player("Sandbox", args.stars);
    for tech in Tech::ALL {
        world.player_mut(player)?.unlock(tech);
    }
    let (cx, cy) = (args.width / 2, args.height / 2);
    world.found_city(player, "Capital", cx, cy)?;

    for &tile in &ids {
        let terrain = world.tile(tile)?.terrain;
        if rng.gen_bool(0.4) {
            let kind = match terrain {
                TerrainType::Field if rng.gen_bool(0.5) => ResourceKind::Fruit,
                TerrainType::Field => ResourceKind::Crop,
                TerrainType::Forest => ResourceKind::Animal,
                TerrainType::Mountain => ResourceKind::Ore,
                TerrainType::Shore => ResourceKind::Fish,
                TerrainType::Ocean => ResourceKind::Whale,
            };
            world.place_resource(tile, kind)?;
        } else if terrain == TerrainType::Forest && rng.gen_bool(0.3) {
            world.place_improvement(tile, ImprovementType::LumberHut, 1)?;
        }
    }

    Ok((world, player))
}
