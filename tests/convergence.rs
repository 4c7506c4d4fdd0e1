//! Convergence checks on instances with a known optimum.
//!
//! ACO gives no optimality guarantee, so each check passes when at least one
//! of a handful of seeds reaches the optimum within the cycle limit.

use antpath::prelude::*;
use std::f64::consts::PI;

const SEEDS: [u64; 5] = [1, 2, 3, 42, 1234];
const MAX_CYCLES: u64 = 50;

fn square() -> Vec<City> {
    vec![
        City::new(0.0, 0.0),
        City::new(0.0, 10.0),
        City::new(10.0, 10.0),
        City::new(10.0, 0.0),
    ]
}

/// Regular polygon; the optimal tour is its perimeter.
fn polygon(n: usize, radius: f64) -> (Vec<City>, f64) {
    let cities = (0..n)
        .map(|k| {
            let theta = 2.0 * PI * k as f64 / n as f64;
            City::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect();
    let side = 2.0 * radius * (PI / n as f64).sin();
    (cities, side * n as f64)
}

/// Cycle at which `optimum` was first reached, if it was.
fn cycles_to_optimum(cities: &[City], seed: u64, optimum: f64) -> Option<u64> {
    let config = AcoConfig::builder().seed(seed).build();
    let mut colony = Colony::new(cities.to_vec(), &config).unwrap();
    while colony.cycle() < MAX_CYCLES {
        colony.run_cycles(1, config.driver.steps_per_tick);
        if (colony.best_length() - optimum).abs() < 1e-9 {
            return Some(colony.cycle());
        }
    }
    None
}

#[test]
fn square_converges_to_perimeter() {
    let reached: Vec<u64> = SEEDS
        .iter()
        .filter_map(|&seed| cycles_to_optimum(&square(), seed, 40.0))
        .collect();
    assert!(
        !reached.is_empty(),
        "no seed reached 40 within {MAX_CYCLES} cycles"
    );
}

#[test]
fn octagon_converges_to_perimeter() {
    let (cities, optimum) = polygon(8, 100.0);
    let reached = SEEDS
        .iter()
        .any(|&seed| cycles_to_optimum(&cities, seed, optimum).is_some());
    assert!(reached, "no seed found the octagon perimeter {optimum:.4}");
}

#[test]
fn best_never_below_optimum() {
    let (cities, optimum) = polygon(6, 50.0);
    let config = AcoConfig::builder().seed(9).build();
    let mut colony = Colony::new(cities, &config).unwrap();
    colony.run_cycles(10, 17);
    assert!(colony.best_length() >= optimum - 1e-9);
}

#[test]
fn two_cities_settle_in_first_cycle() {
    let cities = vec![City::new(-1.0, 2.0), City::new(5.0, 10.0)];
    let mut colony = Colony::new(cities, &AcoConfig::default()).unwrap();
    assert_eq!(colony.run_cycles(1, 2), 1);
    assert!((colony.best_length() - 20.0).abs() < 1e-12);

    colony.run_cycles(5, 2);
    assert!((colony.best_length() - 20.0).abs() < 1e-12);
}

#[test]
fn random_instance_improves_over_first_cycle() {
    let mut rng = SimRng::new(77);
    let instance = TspInstance::random(15, 800.0, 600.0, &mut rng);
    let config = AcoConfig::builder().seed(77).build();
    let mut colony = Colony::new(instance.cities.clone(), &config).unwrap();

    colony.run_cycles(1, 64);
    let first = colony.best_length();
    colony.run_cycles(20, 64);
    assert!(colony.best_length() <= first);

    let best = colony.best().unwrap();
    let recomputed = instance.tour_length(&best.path);
    assert!((best.length - recomputed).abs() < 1e-6);
}
