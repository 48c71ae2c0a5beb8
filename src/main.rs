//! Command-line shell for the floor-plan engine.
//!
//! Each invocation loads the plan file, applies one operation through the
//! engine, reports the outcome as a user notice, and saves the plan back if
//! anything changed. Dimension and type arguments are validated by clap
//! before the engine ever sees them. Selection-based operations (delete,
//! rotate, drag) take a click point and go through the same pointer path an
//! interactive canvas would.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use floorplan::codec::PlanError;
use floorplan::engine::{Engine, Notice, Outcome, RejectReason};
use floorplan::geom::Point;
use floorplan::plan::{FurnitureKind, RoomType};
use floorplan::render::build_scene;

#[derive(Debug, thiserror::Error)]
enum ShellError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("failed to encode scene: {0}")]
    Scene(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "floorplan", about = "2D floor-plan editor shell")]
struct Cli {
    /// Path to the plan file.
    #[arg(long, default_value = "plan.json")]
    plan: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty plan file.
    New,
    /// List rooms and furniture in z-order.
    List,
    /// Add a room of the given size.
    AddRoom {
        width: f64,
        height: f64,
        /// Room type: bedroom, bathroom, kitchen or livingroom.
        #[arg(long, value_parser = parse_room_type)]
        kind: RoomType,
        #[arg(long, default_value_t = 10.0)]
        x: f64,
        #[arg(long, default_value_t = 10.0)]
        y: f64,
    },
    /// Add a furniture or fixture item at its default spawn position.
    /// Unrecognized kinds get the default geometry and icon.
    AddFurniture { kind: String },
    /// Click at a point and delete the room selected by it.
    DeleteRoom { x: f64, y: f64 },
    /// Click at a point and delete the furniture item selected by it.
    DeleteFurniture { x: f64, y: f64 },
    /// Click at a point and rotate the furniture item selected by it.
    Rotate { x: f64, y: f64 },
    /// Press at (from-x, from-y), drag to (to-x, to-y), release.
    Drag {
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
    },
    /// Print the display list as JSON for an external painter.
    Render,
}

fn parse_room_type(s: &str) -> Result<RoomType, String> {
    match s.to_ascii_lowercase().as_str() {
        "bedroom" => Ok(RoomType::Bedroom),
        "bathroom" => Ok(RoomType::Bathroom),
        "kitchen" => Ok(RoomType::Kitchen),
        "livingroom" => Ok(RoomType::LivingRoom),
        other => Err(format!("unknown room type `{other}` (expected bedroom, bathroom, kitchen or livingroom)")),
    }
}

fn main() -> Result<(), ShellError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut engine = Engine::new();

    if !matches!(cli.command, Command::New) {
        engine.load_plan(&cli.plan)?;
    }

    match cli.command {
        Command::New => {
            engine.save_plan(&cli.plan)?;
            println!("Created empty plan at {}", cli.plan.display());
        }
        Command::List => list_plan(&engine),
        Command::AddRoom { width, height, kind, x, y } => {
            let outcome = engine.add_room(x, y, width, height, kind);
            report(outcome, "Room added.", "Rooms cannot overlap!", "");
            save_if_applied(&engine, &cli.plan, outcome)?;
        }
        Command::AddFurniture { kind } => {
            let outcome = engine.add_furniture(FurnitureKind::from_tag(&kind));
            report(outcome, "Furniture added.", "Furniture cannot overlap!", "");
            save_if_applied(&engine, &cli.plan, outcome)?;
        }
        Command::DeleteRoom { x, y } => {
            engine.pointer_down(Point::new(x, y));
            engine.pointer_up();
            let outcome = engine.delete_selected_room();
            report(outcome, "Room deleted.", "", "No room selected to delete.");
            save_if_applied(&engine, &cli.plan, outcome)?;
        }
        Command::DeleteFurniture { x, y } => {
            engine.pointer_down(Point::new(x, y));
            engine.pointer_up();
            let outcome = engine.delete_selected_furniture();
            report(outcome, "Furniture deleted.", "", "No furniture selected to delete.");
            save_if_applied(&engine, &cli.plan, outcome)?;
        }
        Command::Rotate { x, y } => {
            engine.pointer_down(Point::new(x, y));
            engine.pointer_up();
            let outcome = engine.rotate_selected_furniture();
            report(outcome, "Furniture rotated.", "", "No furniture selected to rotate.");
            save_if_applied(&engine, &cli.plan, outcome)?;
        }
        Command::Drag { from_x, from_y, to_x, to_y } => {
            engine.pointer_down(Point::new(from_x, from_y));
            let outcome = engine.pointer_drag(Point::new(to_x, to_y));
            engine.pointer_up();
            match outcome {
                Outcome::Applied => println!("Moved."),
                Outcome::Rejected(RejectReason::RoomOverlap) => {
                    println!("Cannot move the room: Overlap detected!");
                }
                Outcome::Rejected(RejectReason::FurnitureOverlap) => {
                    println!("Furniture cannot overlap!");
                }
                Outcome::Ignored(_) => println!("Nothing selected to move."),
            }
            // A drag settles positions on release even when the last frame
            // was refused, so persist whenever something was selected.
            if !matches!(outcome, Outcome::Ignored(_)) {
                engine.save_plan(&cli.plan)?;
            }
        }
        Command::Render => {
            let scene = build_scene(&engine.plan);
            println!("{}", serde_json::to_string_pretty(&scene)?);
        }
    }

    Ok(())
}

fn report(outcome: Outcome, applied: &str, rejected: &str, ignored: &str) {
    match outcome {
        Outcome::Applied => println!("{applied}"),
        Outcome::Rejected(_) => println!("{rejected}"),
        Outcome::Ignored(Notice::NothingSelected | Notice::NoGesture) => println!("{ignored}"),
    }
}

fn save_if_applied(engine: &Engine, plan: &Path, outcome: Outcome) -> Result<(), PlanError> {
    if outcome.is_applied() {
        engine.save_plan(plan)?;
    }
    Ok(())
}

fn list_plan(engine: &Engine) {
    println!("Rooms ({}):", engine.plan.room_count());
    for (i, room) in engine.plan.rooms().iter().enumerate() {
        println!(
            "  {i}: {:?} at ({}, {}) size {}x{}",
            room.room_type, room.x, room.y, room.width, room.height
        );
    }
    println!("Furniture ({}):", engine.plan.furniture_count());
    for (i, item) in engine.plan.furniture().iter().enumerate() {
        println!(
            "  {i}: {} at ({}, {}) size {}x{} angle {:.0}°",
            item.kind.tag(),
            item.x,
            item.y,
            item.width,
            item.height,
            item.angle.to_degrees()
        );
    }
}
