pub mod config;
pub mod location;
pub mod measurement;
pub mod parse;

// Re-export key types for easier use by dependent crates
pub use config::{WorldConfig, WorldSection, ColonyConfig, CameraConfig, TimingConfig, OutputConfig};
pub use location::Location;
pub use measurement::{Clearable, Comparable, Copyable, Measurement, clear_all, copy_all, strictly_within};
pub use parse::{Axis, ParseLocationError, parse_location, scan_fields};
