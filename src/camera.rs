use anyhow::Result;
use measurements::{strictly_within, CameraConfig, Location};

/// Maps between world coordinates and screen pixels.
///
/// `location` is the world point shown at the center of the screen.
#[derive(Debug, Clone)]
pub struct Camera {
    pub location: Location,
    pub screen: Location,
    zoom: f64,
    pub panning_range: f64,
    pub camera_speed: f64,
    pub hold_point_on_zoom: bool,
}

impl Camera {
    /// Creates a camera centered on `location`.
    pub fn new(config: &CameraConfig, location: Location) -> Result<Self> {
        let screen = config.screen()?;
        if !screen.is_greater_than(&Location::origin()) {
            anyhow::bail!("Screen size {} must be positive on both axes.", screen);
        }
        Ok(Self {
            location,
            screen,
            zoom: config.zoom,
            panning_range: config.panning_range,
            camera_speed: config.camera_speed,
            hold_point_on_zoom: config.hold_point_on_zoom,
        })
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    fn half_screen(&self) -> Location {
        self.screen * 0.5
    }

    pub fn world_to_screen(&self, world: &Location) -> Location {
        let mut screen = world.copy();
        screen.revert(&self.location);
        screen.scale(self.zoom);
        screen.apply_delta(&self.half_screen());
        screen
    }

    pub fn screen_to_world(&self, screen: &Location) -> Location {
        let inverse_zoom = Location::new(self.zoom, self.zoom).reciprocal();
        let mut world = screen.copy();
        world.revert(&self.half_screen());
        world.scale_by(&inverse_zoom);
        world.apply_delta(&self.location);
        world
    }

    /// True if `world` lands strictly inside the screen rectangle.
    pub fn is_visible(&self, world: &Location) -> bool {
        strictly_within(&self.world_to_screen(world), &Location::origin(), &self.screen)
    }

    /// Moves the camera toward `target`, at most `camera_speed` per axis.
    ///
    /// The camera only moves on an axis once the target is farther than
    /// `panning_range` from the center, and stops as soon as it is back at
    /// that distance. Returns the applied movement.
    pub fn pan_towards(&mut self, target: &Location) -> Location {
        let mut offset = target.copy();
        offset.revert(&self.location);
        let movement = Location::new(
            pan_axis(offset.x, self.panning_range, self.camera_speed),
            pan_axis(offset.y, self.panning_range, self.camera_speed),
        );
        self.location.apply_delta(&movement);
        movement
    }

    /// Changes the zoom factor.
    ///
    /// With `hold_point_on_zoom`, the world point under `anchor` (screen
    /// pixels) stays under it after the change.
    pub fn set_zoom(&mut self, zoom: f64, anchor: &Location) -> Result<()> {
        if !(zoom > 0.0) {
            anyhow::bail!("Zoom must be positive, got {}.", zoom);
        }
        if !self.hold_point_on_zoom {
            self.zoom = zoom;
            return Ok(());
        }
        let held = self.screen_to_world(anchor);
        self.zoom = zoom;
        let drifted = self.screen_to_world(anchor);
        self.location.apply_delta(&(held - drifted));
        Ok(())
    }
}

fn pan_axis(offset: f64, range: f64, speed: f64) -> f64 {
    let excess = offset.abs() - range;
    if excess <= 0.0 {
        0.0
    } else {
        excess.min(speed).copysign(offset)
    }
}
