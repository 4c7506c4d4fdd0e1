//! The shipped experiment files load and solve.

use antpath::cli::{solve, verify, DriveStop};
use antpath::prelude::*;
use std::path::PathBuf;

fn experiment(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("experiments")
        .join(name)
}

#[test]
fn colony_yaml_spells_out_defaults() {
    let config = AcoConfig::load(experiment("colony.yaml")).unwrap();
    assert_eq!(config, AcoConfig::default());
}

#[test]
fn square_yaml_solves_to_optimum() {
    let instance = TspInstance::load(experiment("square.yaml")).unwrap();
    assert_eq!(instance.city_count(), 4);

    let config = AcoConfig::builder().max_cycles(20).build();
    let outcome = solve(&instance, &config, false).unwrap();
    assert_eq!(outcome.stop, DriveStop::Finished);
    assert!(outcome.optimality_gap.is_some_and(|g| g.abs() < 1e-9));
}

#[test]
fn circle12_yaml_matches_declared_optimum() {
    let instance = TspInstance::load(experiment("circle12.yaml")).unwrap();
    let perimeter: Vec<usize> = (0..12).collect();
    let optimum = instance.meta.optimal_known.unwrap();
    assert!((instance.tour_length(&perimeter) - optimum).abs() < 1e-3);
}

#[test]
fn circle12_yaml_is_reproducible() {
    let instance = TspInstance::load(experiment("circle12.yaml")).unwrap();
    let config = AcoConfig::builder().seed(5).max_cycles(3).build();
    let summary = verify(&instance, &config, 2).unwrap();
    assert!(summary.identical);
}
