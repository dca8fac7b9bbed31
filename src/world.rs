use anyhow::Result;
use log::{debug, trace, warn};
use measurements::{strictly_within, Location, WorldConfig};
use rand::distr::Uniform;
use rand::prelude::*;
use rayon::prelude::*;

/// A single ant: where it is and how far it moves each tick.
#[derive(Debug, Clone)]
pub struct Ant {
    pub id: u32,
    pub location: Location,
    pub velocity: Location,
}

impl Ant {
    /// Heading of the ant's velocity, in radians, measured from the origin.
    /// Ranges over [-pi/2, pi/2] and does not tell left from right.
    pub fn heading(&self) -> f64 {
        self.velocity.angle_from_fulcrum(&Location::origin())
    }

    /// Moves the ant one tick. An ant that would leave the open rectangle
    /// `(min, max)` stays put and reverses the offending velocity component(s).
    /// Returns `true` if the ant bounced.
    fn advance(&mut self, min: &Location, max: &Location) -> bool {
        self.location.apply_delta(&self.velocity);
        if strictly_within(&self.location, min, max) {
            return false;
        }
        self.location.revert(&self.velocity);

        let next = self.location + self.velocity;
        let mut flip = Location::new(1.0, 1.0);
        if next.x <= min.x || next.x >= max.x {
            flip.set_x(-1.0);
        }
        if next.y <= min.y || next.y >= max.y {
            flip.set_y(-1.0);
        }
        self.velocity.scale_by(&flip);
        true
    }
}

/// The colony world: a rectangle with a hill in it and ants walking around.
pub struct World {
    pub bounds_min: Location,
    pub bounds_max: Location,
    pub hill: Location,
    pub ants: Vec<Ant>,
    /// Number of completed ticks.
    pub tick: u32,
}

impl World {
    /// Creates the world and places the colony's ants around the hill.
    pub fn new(config: &WorldConfig) -> Result<Self> {
        let bounds_min = config.bounds_min();
        let bounds_max = config.bounds_max();
        let hill = config.hill()?;
        if !strictly_within(&hill, &bounds_min, &bounds_max) {
            anyhow::bail!("Hill {} lies outside the world {} .. {}.", hill, bounds_min, bounds_max);
        }

        let mut rng = StdRng::seed_from_u64(config.colony.seed);
        let ants = place_ants(config, &hill, &bounds_min, &bounds_max, &mut rng)?;

        Ok(Self { bounds_min, bounds_max, hill, ants, tick: 0 })
    }

    /// Advances every ant by one tick. Returns how many ants bounced.
    pub fn step(&mut self) -> usize {
        let (min, max) = (self.bounds_min, self.bounds_max);
        let bounced: usize = self
            .ants
            .par_iter_mut()
            .map(|ant| {
                let bounced = ant.advance(&min, &max);
                if bounced {
                    trace!("Ant {} bounced at {}, velocity now {}", ant.id, ant.location, ant.velocity);
                }
                bounced as usize
            })
            .sum();
        self.tick += 1;
        if bounced > 0 {
            debug!("Tick {}: {} ant(s) bounced off the world edge.", self.tick, bounced);
        }
        bounced
    }

    /// Mean location of all ants.
    pub fn centroid(&self) -> Location {
        let mut sum = Location::origin();
        for ant in &self.ants {
            sum.apply_delta(&ant.location);
        }
        sum.scale(1.0 / self.ants.len() as f64);
        sum
    }

    /// One canonical text line per ant, in ant order.
    pub fn positions_text(&self) -> Vec<String> {
        self.ants.iter().map(|ant| ant.location.to_text()).collect()
    }
}

fn place_ants(
    config: &WorldConfig,
    hill: &Location,
    bounds_min: &Location,
    bounds_max: &Location,
    rng: &mut StdRng,
) -> Result<Vec<Ant>> {
    let count = config.colony.ant_count;
    let scatter = config.colony.scatter;
    if scatter * 2.0 > config.world.width.min(config.world.height) {
        warn!("Scatter radius {:.2} is large for the world; some ants will spawn on the hill.", scatter);
    }

    let angle_dist = Uniform::new(0.0f64, std::f64::consts::TAU)?;
    let mut ants = Vec::with_capacity(count as usize);
    for id in 0..count {
        let spawn_angle = rng.sample(angle_dist);
        let radius = if scatter > 0.0 { rng.random_range(0.0..scatter) } else { 0.0 };
        let mut location = Location::new(spawn_angle.cos(), spawn_angle.sin());
        location.scale(radius);
        location.apply_delta(hill);
        if !strictly_within(&location, bounds_min, bounds_max) {
            location.duplicate(hill);
        }

        let heading = rng.sample(angle_dist);
        let mut velocity = Location::new(heading.cos(), heading.sin());
        velocity.scale(config.colony.ant_speed);

        ants.push(Ant { id, location, velocity });
    }
    Ok(ants)
}
