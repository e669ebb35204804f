use glam::Vec3;
use orrery::registry::{self, MOON, PLANETS};
use orrery::SolarSystem;

fn assert_close(actual: Vec3, expected: Vec3, tolerance: f32) {
    assert!(
        (actual - expected).length() < tolerance,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn earth_after_one_tick() {
    let mut system = SolarSystem::default();
    system.tick();

    let earth = system.find_body("Earth").unwrap();
    assert!((earth.current_angle - 0.01).abs() < 1e-7);
    assert_close(earth.position, Vec3::new(149.9925, 0.0, 1.49999), 1e-3);
}

#[test]
fn mercury_after_one_hundred_ticks() {
    let mut system = SolarSystem::default();
    system.advance(100);

    let mercury = system.find_body("Mercury").unwrap();
    assert!((mercury.current_angle - 4.0).abs() < 1e-4);
    assert_close(
        mercury.position,
        Vec3::new(70.0 * 4.0f32.cos(), 0.0, 70.0 * 4.0f32.sin()),
        1e-2,
    );
}

#[test]
fn untouched_system_sits_on_the_x_axis() {
    let system = SolarSystem::default();
    for (state, body) in system.bodies.iter().zip(&PLANETS) {
        assert_eq!(state.position, Vec3::new(body.orbital_distance as f32, 0.0, 0.0));
    }
}

#[test]
fn stepping_one_at_a_time_matches_advance() {
    let mut stepped = SolarSystem::default();
    for _ in 0..37 {
        stepped.tick();
    }

    let mut advanced = SolarSystem::default();
    advanced.advance(37);

    assert_eq!(stepped.ticks, advanced.ticks);
    for (a, b) in stepped.bodies.iter().zip(&advanced.bodies) {
        assert_eq!(a.position, b.position);
    }
    assert_eq!(stepped.moons[0].position, advanced.moons[0].position);
}

#[test]
fn moon_rides_along_with_earth() {
    let mut system = SolarSystem::default();
    system.advance(1000);

    let earth = registry::find("Earth").unwrap();
    let earth_state = system.find_body(earth.name).unwrap();
    let moon = &system.moons[0];

    let offset = moon.position - earth_state.position;
    assert!(offset.y.abs() < f32::EPSILON);
    assert!((offset.length() - MOON.offset as f32).abs() < 1e-3);
    assert!((earth_state.position.length() - earth.orbital_distance as f32).abs() < 1e-2);
}

#[test]
fn bodies_without_moon_flag_have_no_moons() {
    let system = SolarSystem::default();
    for (i, state) in system.bodies.iter().enumerate() {
        if !state.body.has_moon {
            assert_eq!(system.moons_of(i).count(), 0, "{}", state.body.name);
        }
    }
}

#[test]
fn orbits_keep_their_pace_after_an_hour() {
    let mut system = SolarSystem::default();
    system.advance(216_000);

    let mercury = system.find_body("Mercury").unwrap();
    let angle = 216_000.0_f64 * 0.04;
    assert!((mercury.current_angle - angle).abs() < 1e-6);
    assert_close(
        mercury.position,
        Vec3::new(70.0 * angle.cos() as f32, 0.0, 70.0 * angle.sin() as f32),
        1e-3,
    );

    let before = mercury.current_angle;
    system.tick();
    let mercury = system.find_body("Mercury").unwrap();
    assert!((mercury.current_angle - before - 0.04).abs() < 1e-9);
}
