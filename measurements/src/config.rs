use serde::{Deserialize, Serialize};
use anyhow::{Context, Result};
use crate::location::Location;
use std::path::Path;

// World geometry. `hill` is written in the canonical "(x,y)" text form.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WorldSection {
    pub width: f64,
    pub height: f64,
    pub hill: String,
}

// Colony properties, loaded from the [colony] table
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ColonyConfig {
    pub ant_count: u32,
    pub ant_speed: f64,
    #[serde(default = "default_scatter")]
    pub scatter: f64, // Spawn jitter radius around the hill
    pub seed: u64,
}

// Camera settings. Mirrors the pan/zoom knobs of the player camera.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CameraConfig {
    pub screen: String, // Screen size in pixels, text form
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_panning_range")]
    pub panning_range: f64,
    #[serde(default = "default_camera_speed")]
    pub camera_speed: f64,
    #[serde(default = "default_hold_point_on_zoom")]
    pub hold_point_on_zoom: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TimingConfig {
    pub ticks: u32,
    #[serde(default = "default_report_interval")]
    pub report_interval: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub positions_file: Option<String>, // One text-form line per ant
}

// Main configuration structure, loaded from world.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WorldConfig {
    pub world: WorldSection,
    pub colony: ColonyConfig,
    pub camera: CameraConfig,
    pub timing: TimingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl WorldConfig {
    /// Loads the world configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file '{}'", path_ref.display()))?;
        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config in '{}'", path_ref.display()))?;

        log::debug!("Loaded world config from {}: {:?}", path_ref.display(), config);
        Ok(config)
    }

    /// Parses and validates a configuration held in memory.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: WorldConfig = toml::from_str(config_str).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            anyhow::bail!("world width and height must be positive.");
        }
        if self.colony.ant_count == 0 {
            anyhow::bail!("ant_count must be greater than 0.");
        }
        if self.colony.scatter < 0.0 {
            anyhow::bail!("scatter must not be negative.");
        }
        if self.camera.zoom <= 0.0 {
            anyhow::bail!("camera zoom must be positive.");
        }
        if self.camera.camera_speed < 0.0 {
            anyhow::bail!("camera_speed must not be negative.");
        }
        if self.timing.report_interval == 0 {
            anyhow::bail!("report_interval must be greater than 0.");
        }
        // Text-form fields must be readable up front rather than at first use.
        self.hill()?;
        self.camera.screen()?;
        Ok(())
    }

    /// The colony's spawn point.
    pub fn hill(&self) -> Result<Location> {
        self.world
            .hill
            .parse::<Location>()
            .with_context(|| format!("Failed to parse world.hill '{}'", self.world.hill))
    }

    /// Lower-left corner of the world.
    pub fn bounds_min(&self) -> Location {
        Location::origin()
    }

    /// Upper-right corner of the world.
    pub fn bounds_max(&self) -> Location {
        Location::new(self.world.width, self.world.height)
    }
}

impl CameraConfig {
    /// Screen size in pixels.
    pub fn screen(&self) -> Result<Location> {
        self.screen
            .parse::<Location>()
            .with_context(|| format!("Failed to parse camera.screen '{}'", self.screen))
    }
}

fn default_scatter() -> f64 {
    25.0
}

fn default_zoom() -> f64 {
    1.0
}

fn default_panning_range() -> f64 {
    60.0
}

fn default_camera_speed() -> f64 {
    20.0
}

fn default_hold_point_on_zoom() -> bool {
    true
}

fn default_report_interval() -> u32 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[world]
width = 1000.0
height = 800.0
hill = "(500.00,400.00)"

[colony]
ant_count = 12
ant_speed = 4.0
seed = 7

[camera]
screen = "(800.00,600.00)"

[timing]
ticks = 100
"#;

    #[test]
    fn parses_sample_with_defaults() {
        let config = WorldConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.hill().unwrap(), Location::new(500.0, 400.0));
        assert_eq!(config.camera.screen().unwrap(), Location::new(800.0, 600.0));
        assert_eq!(config.colony.scatter, 25.0);
        assert_eq!(config.camera.zoom, 1.0);
        assert_eq!(config.camera.panning_range, 60.0);
        assert_eq!(config.camera.camera_speed, 20.0);
        assert!(config.camera.hold_point_on_zoom);
        assert_eq!(config.timing.report_interval, 50);
        assert!(config.output.positions_file.is_none());
        assert_eq!(config.bounds_max(), Location::new(1000.0, 800.0));
    }

    #[test]
    fn rejects_unreadable_hill() {
        let bad = SAMPLE.replace("(500.00,400.00)", "center");
        let err = WorldConfig::from_toml_str(&bad).unwrap_err();
        assert!(format!("{:#}", err).contains("world.hill"));
    }

    #[test]
    fn rejects_empty_colony() {
        let bad = SAMPLE.replace("ant_count = 12", "ant_count = 0");
        assert!(WorldConfig::from_toml_str(&bad).is_err());
    }

    #[test]
    fn rejects_zero_zoom() {
        let bad = SAMPLE.replace("screen = \"(800.00,600.00)\"", "screen = \"(800.00,600.00)\"\nzoom = 0.0");
        assert!(WorldConfig::from_toml_str(&bad).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(WorldConfig::load("does/not/exist.toml").is_err());
    }
}
