use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{debug, info, trace, LevelFilter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

// Define modules used by main
mod camera;
mod world;

use camera::Camera;
use measurements::{scan_fields, Location, WorldConfig};
use world::World;

/// Headless ant colony host for the measurements library
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the colony for the configured number of ticks
    Run {
        /// Path to the world configuration file
        #[arg(short, long, default_value = "world.toml")]
        config: PathBuf,

        /// Override the number of ticks from the config
        #[arg(long)]
        ticks: Option<u32>,

        /// Zoom the camera before starting, holding the hill in place
        #[arg(long)]
        zoom: Option<f64>,
    },
    /// Parse a location string and print its canonical form
    Parse {
        #[arg(default_value = "(15.732,673.91)")]
        text: String,
    },
    /// Print the canonical form of a coordinate pair
    Format {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Print the angle at the fulcrum between two locations
    Angle { a: String, b: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    run_with_args(args)
}

fn run_with_args(args: Args) -> Result<()> {
    // Initialize the logger
    Builder::from_default_env()
        .filter(None, LevelFilter::Info)
        .init();

    match args.command {
        Command::Run { config, ticks, zoom } => run_colony(&config, ticks, zoom),
        Command::Parse { text } => {
            info!("Trying to parse the string: {}", text);
            println!("{}", parse_text(&text)?);
            Ok(())
        }
        Command::Format { x, y } => {
            println!("{}", Location::new(x, y));
            Ok(())
        }
        Command::Angle { a, b } => {
            let a: Location = a.parse().with_context(|| format!("Failed to parse location '{}'", a))?;
            let b: Location = b.parse().with_context(|| format!("Failed to parse location '{}'", b))?;
            let angle = a.angle_from_fulcrum(&b);
            println!("{:.6} rad ({:.2} deg)", angle, angle.to_degrees());
            Ok(())
        }
    }
}

fn parse_text(text: &str) -> Result<Location> {
    let (x_field, y_field) = scan_fields(text)
        .with_context(|| format!("Failed to parse location '{}'", text))?;
    trace!("Scanned x field '{}' and y field '{}'", x_field, y_field);
    text.parse::<Location>()
        .with_context(|| format!("Failed to parse location '{}'", text))
}

fn run_colony(config_path: &Path, ticks: Option<u32>, zoom: Option<f64>) -> Result<()> {
    info!("Starting anthill...");

    // --- Load Configuration ---
    let config = WorldConfig::load(config_path)?;
    let total_ticks = ticks.unwrap_or(config.timing.ticks);
    let report_interval = config.timing.report_interval;

    // --- Initialize World and Camera ---
    let mut world = World::new(&config)?;
    info!("World {} .. {} with {} ants around the hill at {}.",
        world.bounds_min, world.bounds_max, world.ants.len(), world.hill);
    for ant in &world.ants {
        debug!("Ant {} spawned at {} heading {:.3} rad", ant.id, ant.location, ant.heading());
    }

    let mut camera = Camera::new(&config.camera, world.ants[0].location)?;
    if let Some(zoom) = zoom {
        let anchor = camera.world_to_screen(&world.hill);
        camera.set_zoom(zoom, &anchor)?;
        info!("Camera zoom set to {:.2}, centered on {}.", camera.zoom(), camera.location);
    }

    // --- Main Loop ---
    info!("Running {} ticks using {} Rayon threads...", total_ticks, rayon::current_num_threads());
    let start_time = Instant::now();
    let mut total_bounces = 0;

    for _ in 0..total_ticks {
        total_bounces += world.step();
        let followed = world.ants[0].location;
        let movement = camera.pan_towards(&followed);
        trace!("Tick {} camera moved by {} to {}", world.tick, movement, camera.location);

        if world.tick % report_interval == 0 || world.tick == total_ticks {
            let visible = world.ants.iter().filter(|ant| camera.is_visible(&ant.location)).count();
            info!(
                "Tick [{}/{}] | Centroid: {} | Ant 0 at {} | Camera: {} | Visible: {}/{} | Bounces: {}",
                world.tick,
                total_ticks,
                world.centroid(),
                followed,
                camera.location,
                visible,
                world.ants.len(),
                total_bounces
            );
        }
    }

    let duration = start_time.elapsed();
    info!("Colony finished {} ticks in {:.3} seconds.", world.tick, duration.as_secs_f64());

    // --- Save Final Positions ---
    match &config.output.positions_file {
        Some(filename) => {
            let file = File::create(filename)
                .with_context(|| format!("Failed to create positions file '{}'", filename))?;
            let mut writer = BufWriter::new(file);
            for line in world.positions_text() {
                writeln!(writer, "{}", line)?;
            }
            writer.flush()
                .with_context(|| format!("Failed to write positions file '{}'", filename))?;
            info!("Final positions saved to {}", filename);
        }
        None => info!("Skipping saving final positions (no output.positions_file configured)."),
    }

    info!("Anthill Complete.");
    Ok(())
}

// Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colony_run() {
        let dir = std::env::temp_dir().join(format!("anthill-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let positions = dir.join("positions.txt");
        let config_path = dir.join("world.toml");

        let sample = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/world.toml")).unwrap();
        let config = sample.replace(
            "positions_file = \"final_positions.txt\"",
            &format!("positions_file = {:?}", positions.display().to_string()),
        );
        std::fs::write(&config_path, config).unwrap();

        let result = run_colony(&config_path, Some(20), Some(2.0));
        assert!(result.is_ok(), "Colony run failed: {:?}", result);

        let written = std::fs::read_to_string(&positions).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 16);
        for line in lines {
            let location: Location = line.parse().unwrap();
            assert_eq!(location.to_text(), line);
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn parse_text_reads_default_example() {
        let location = parse_text("(15.732,673.91)").unwrap();
        assert_eq!(location.to_text(), "(15.73,673.91)");

        let err = parse_text("(12)").unwrap_err();
        assert!(format!("{:#}", err).contains("no numeric field found for y"));
    }

    #[test]
    fn args_accept_negative_format_values() {
        let args = Args::try_parse_from(["anthill", "format", "-3.5", "2"]).unwrap();
        match args.command {
            Command::Format { x, y } => assert_eq!((x, y), (-3.5, 2.0)),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
