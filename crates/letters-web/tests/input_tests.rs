// Host-side tests for pure picking math.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec3;
use input::*;

#[test]
fn ray_sphere_hit_reports_the_near_surface() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0)
        .expect("ray through the center must hit");
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn ray_sphere_misses_off_axis() {
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(5.0, 0.0, 5.0), 2.0).is_none());
}

#[test]
fn ray_sphere_ignores_spheres_behind_the_origin() {
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
}

#[test]
fn grazing_ray_still_hits() {
    // passes 1.9 units from a radius-2 center
    let t = ray_sphere(Vec3::new(1.9, 0.0, 0.0), Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!(t.is_some());
}

#[test]
fn pick_letter_chooses_the_nearest_hit() {
    let centers = [
        Vec3::new(0.0, 0.0, 8.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(10.0, 0.0, 4.0),
    ];
    let (index, t) =
        pick_letter(&centers, Vec3::ZERO, Vec3::Z, 1.0).expect("two letters on the ray");
    assert_eq!(index, 1);
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn pick_letter_returns_none_when_nothing_is_under_the_ray() {
    let centers = [Vec3::new(10.0, 0.0, 4.0)];
    assert!(pick_letter(&centers, Vec3::ZERO, Vec3::Z, 1.0).is_none());
}

#[test]
fn pick_letter_handles_the_empty_table() {
    assert!(pick_letter(&[], Vec3::ZERO, Vec3::Z, 1.0).is_none());
}
