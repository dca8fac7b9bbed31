use measurements::{parse_location, Location, Measurement, WorldConfig};
use rand::prelude::*;
use rand::rngs::StdRng;

const SAMPLES: usize = 500;

fn random_location(rng: &mut StdRng, lo: f64, hi: f64) -> Location {
    Location::new(rng.random_range(lo..hi), rng.random_range(lo..hi))
}

// Dyadic values keep add/sub exact, so the inverse law can be checked bit for bit.
fn random_dyadic(rng: &mut StdRng) -> Location {
    let x = rng.random_range(-4096..4096) as f64 / 64.0;
    let y = rng.random_range(-4096..4096) as f64 / 64.0;
    Location::new(x, y)
}

#[test]
fn copy_is_equal_and_independent() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..SAMPLES {
        let p = random_location(&mut rng, -1e6, 1e6);
        let mut q = p.copy();
        assert!(q.equals(&p));
        q.apply_delta_xy(1.0, 1.0);
        q.negate();
        assert!(p.equals(&p.copy()));
        assert_ne!(q, p);
    }
}

#[test]
fn revert_restores_apply_delta() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..SAMPLES {
        let original = random_dyadic(&mut rng);
        let delta = random_dyadic(&mut rng);
        let mut p = original;
        p.apply_delta(&delta);
        p.revert(&delta);
        assert_eq!(p.x.to_bits(), original.x.to_bits());
        assert_eq!(p.y.to_bits(), original.y.to_bits());
    }
}

#[test]
fn negate_opposite_and_scale_agree() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..SAMPLES {
        let p = random_location(&mut rng, -1e3, 1e3);

        let mut twice = p;
        twice.negate();
        twice.negate();
        assert_eq!(twice, p);

        let mut negated = p;
        negated.negate();
        assert_eq!(p.opposite(), negated);

        let mut scaled = p;
        scaled.scale(-1.0);
        assert_eq!(scaled, negated);
    }
}

#[test]
fn greater_than_is_irreflexive() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..SAMPLES {
        let p = random_location(&mut rng, -100.0, 100.0);
        assert!(!p.is_greater_than(&p));
        assert!(!p.is_less_than(&p));
    }
    assert!(!Location::new(1.0, 5.0).is_greater_than(&Location::new(3.0, 2.0)));
    assert!(!Location::new(3.0, 2.0).is_greater_than(&Location::new(1.0, 5.0)));
}

#[test]
fn text_round_trip_for_non_negative_values() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..SAMPLES {
        let p = random_location(&mut rng, 0.0, 1e5);
        let text = p.to_text();
        let parsed = parse_location(&text).unwrap();
        // Parsing the text gives back exactly the rounded value.
        assert_eq!(parsed.to_text(), text);
        assert!((parsed.x - p.x).abs() <= 0.005 + 1e-9, "{} -> {}", p, parsed);
        assert!((parsed.y - p.y).abs() <= 0.005 + 1e-9, "{} -> {}", p, parsed);
    }
}

#[test]
fn text_round_trip_drops_negative_signs() {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..SAMPLES {
        let p = random_location(&mut rng, -1e4, -1.0);
        let parsed: Location = p.to_text().parse().unwrap();
        assert!(parsed.x > 0.0 && parsed.y > 0.0);
        assert!(!parsed.equals(&p));
        assert_eq!(parsed.opposite().to_text(), p.to_text());
    }
}

#[test]
fn swap_twice_restores() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let p = random_location(&mut rng, -1e3, 1e3);
        let mut q = p;
        q.swap();
        assert_eq!((q.x, q.y), (p.y, p.x));
        q.swap();
        assert_eq!(q, p);
    }
}

#[test]
fn reciprocal_worked_example() {
    let r = Location::new(0.0, 2.0).reciprocal();
    assert!(r.x.is_infinite() && r.x > 0.0);
    assert_eq!(r.y, 0.5);
}

fn total<M: Measurement>(items: &[M], reference: &M) -> usize {
    items.iter().filter(|m| m.is_greater_or_equal(reference)).count()
}

#[test]
fn locations_work_through_the_measurement_traits() {
    let items = [
        Location::new(1.0, 1.0),
        Location::new(2.0, 2.0),
        Location::new(0.0, 3.0),
        Location::new(1.0, 5.0),
    ];
    // (1,1) equals, (2,2) is strictly greater, the other two are mixed.
    assert_eq!(total(&items, &Location::new(1.0, 1.0)), 2);

    let mut targets = [Location::origin(); 4];
    assert_eq!(measurements::copy_all(&items, &mut targets), 4);
    assert_eq!(targets, items);
    measurements::clear_all(&mut targets);
    assert!(targets.iter().all(|t| *t == Location::origin()));

    let lower = Location::origin();
    let upper = Location::new(10.0, 10.0);
    assert!(measurements::strictly_within(&Location::new(5.0, 5.0), &lower, &upper));
    assert!(!measurements::strictly_within(&Location::new(0.0, 5.0), &lower, &upper));
}

#[test]
fn serde_uses_plain_fields() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Holder {
        velocity: Location,
    }
    let holder: Holder = toml::from_str("velocity = { x = -1.5, y = 2.0 }").unwrap();
    assert_eq!(holder.velocity, Location::new(-1.5, 2.0));
}

#[test]
fn sample_world_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../world.toml");
    let config = WorldConfig::load(path).unwrap();
    assert!(config.colony.ant_count > 0);
    assert!(config.hill().unwrap().is_greater_than(&config.bounds_min()));
}
