//! KitchenKit command line interface
//!
//! ```bash
//! # List the walls of the stored kitchen
//! kitchenkit --catalog catalog.json walls
//!
//! # Place a module at the first free slot, picking its second size
//! kitchenkit --catalog catalog.json place bm2p --size 1
//!
//! # Priced breakdown of the active wall
//! kitchenkit --catalog catalog.json estimate --tier deluxe
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use kitchenkit::{
    init_logging, load_catalog, Config, InstanceId, KitchenType, LogFormat, PlaceRequest,
    QualityTier, Session,
};

#[derive(Parser, Debug)]
#[command(name = "kitchenkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (.toml or .json); the platform config file by default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the stored layouts; overrides the settings file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Catalog feed (JSON array of entries)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the kitchen type and its walls
    Walls,

    /// Title counts and priced breakdown
    Estimate {
        /// Wall id; the active wall by default
        #[arg(long)]
        wall: Option<String>,

        /// Estimate every wall
        #[arg(long, conflicts_with = "wall")]
        all: bool,

        /// Price at this tier without storing it
        #[arg(long)]
        tier: Option<String>,
    },

    /// Place a catalog module
    Place {
        /// Module type from the catalog
        module_type: String,

        #[arg(long)]
        wall: Option<String>,

        /// Left edge in cm; needs --top-y, otherwise the first free slot is used
        #[arg(long, requires = "top_y", allow_hyphen_values = true)]
        x: Option<i32>,

        /// Distance from the ceiling to the module's top edge, in cm
        #[arg(long, requires = "x", allow_hyphen_values = true)]
        top_y: Option<i32>,

        /// Index of the size variant to use
        #[arg(long)]
        size: Option<usize>,

        /// Length of a linear module, in cm
        #[arg(long)]
        length: Option<f64>,

        /// Height of a linear module, in cm
        #[arg(long)]
        height: Option<i32>,
    },

    /// Move a placed module (y measured from the floor)
    Move {
        id: InstanceId,

        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        #[arg(long)]
        wall: Option<String>,
    },

    /// Remove a placed module
    Remove {
        id: InstanceId,

        #[arg(long)]
        wall: Option<String>,
    },

    /// Switch the kitchen shape: recta, l or c
    SetKitchenType { kitchen_type: String },

    /// Resize a wall, in meters
    SetWall {
        wall_id: String,

        #[arg(long)]
        width: f64,

        #[arg(long)]
        height: f64,

        /// Also make it the active wall
        #[arg(long)]
        activate: bool,
    },

    /// Store the pricing tier: started, premium or deluxe
    SetTier { tier: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WallRow {
    id: String,
    name: String,
    width_meters: f64,
    height_meters: f64,
    modules: usize,
    active: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WallsReport {
    kitchen_type: KitchenType,
    tier: QualityTier,
    walls: Vec<WallRow>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_tier(raw: &str) -> anyhow::Result<QualityTier> {
    raw.parse().map_err(anyhow::Error::msg)
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let mut config = Config::load_or_default(&path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }
    Ok(config)
}

fn walls_report(session: &Session) -> WallsReport {
    let project = session.project();
    WallsReport {
        kitchen_type: project.kitchen_type(),
        tier: session.tier(),
        walls: project
            .canvases()
            .iter()
            .map(|canvas| {
                let wall = canvas.wall();
                WallRow {
                    id: wall.id.clone(),
                    name: wall.name.clone(),
                    width_meters: wall.width_meters,
                    height_meters: wall.height_meters,
                    modules: canvas.instances().len(),
                    active: wall.id == project.active_wall_id(),
                }
            })
            .collect(),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let catalog = load_catalog(cli.catalog.as_deref())?;
    let mut session = Session::open(&config, catalog)?;

    match cli.command {
        Commands::Walls => print_json(&walls_report(&session)),
        Commands::Estimate { wall, all, tier } => {
            if let Some(tier) = tier {
                session = session.with_tier(parse_tier(&tier)?);
            }
            if all {
                print_json(&session.estimate_all()?)
            } else {
                print_json(&session.estimate(wall.as_deref())?)
            }
        }
        Commands::Place {
            module_type,
            wall,
            x,
            top_y,
            size,
            length,
            height,
        } => {
            let request = PlaceRequest {
                module_type,
                wall_id: wall,
                at: x.zip(top_y),
                size_index: size,
                length,
                height,
            };
            match session.place(&request)? {
                Some(id) => print_json(&serde_json::json!({ "placed": id })),
                None => anyhow::bail!("{} collides with a placed module", request.module_type),
            }
        }
        Commands::Move { id, x, y, wall } => {
            if !session.move_instance(wall.as_deref(), id, x, y)? {
                anyhow::bail!("Move of {} rejected: it would overlap another module", id);
            }
            print_json(&serde_json::json!({ "moved": id }))
        }
        Commands::Remove { id, wall } => {
            session.remove(wall.as_deref(), id)?;
            print_json(&serde_json::json!({ "removed": id }))
        }
        Commands::SetKitchenType { kitchen_type } => {
            let kitchen_type: KitchenType = kitchen_type.parse()?;
            session.set_kitchen_type(kitchen_type)?;
            print_json(&walls_report(&session))
        }
        Commands::SetWall {
            wall_id,
            width,
            height,
            activate,
        } => {
            session.set_wall_dimensions(&wall_id, width, height)?;
            if activate {
                session.set_active_wall(&wall_id)?;
            }
            print_json(&walls_report(&session))
        }
        Commands::SetTier { tier } => {
            session.set_tier(parse_tier(&tier)?)?;
            print_json(&walls_report(&session))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_logging(format)?;
    run(cli)
}
