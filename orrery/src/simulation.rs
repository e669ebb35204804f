//! Tick-driven circular orbit model
//!
//! Every tick advances each angle by a fixed increment, so motion is tied to
//! the number of frames drawn rather than wall-clock time. Angles are never
//! wrapped and grow for as long as the scene runs, so they are kept in `f64`;
//! positions are narrowed to `f32` for rendering.

use glam::{DVec3, Vec3};

use crate::registry::{CelestialBody, Satellite, Star, MOON, PLANETS, PLANET_SPIN_PER_TICK, SUN};

/// Point on a circle of `radius` in the XZ plane
fn on_orbit(radius: f64, angle: f64) -> DVec3 {
    DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// A planet's place on its orbit
#[derive(Debug, Clone)]
pub struct OrbitalState {
    pub body: &'static CelestialBody,
    pub current_angle: f64,
    pub position: Vec3,
    /// Accumulated self-rotation about Y
    pub spin: f64,
}

impl OrbitalState {
    pub fn new(body: &'static CelestialBody) -> Self {
        Self {
            body,
            current_angle: 0.0,
            position: on_orbit(body.orbital_distance, 0.0).as_vec3(),
            spin: 0.0,
        }
    }

    /// Full-precision position on the orbit
    pub fn exact_position(&self) -> DVec3 {
        on_orbit(self.body.orbital_distance, self.current_angle)
    }

    fn tick(&mut self) {
        self.current_angle += self.body.angular_speed;
        self.position = self.exact_position().as_vec3();
        self.spin += PLANET_SPIN_PER_TICK;
    }
}

/// A moon circling one of the planets
#[derive(Debug, Clone)]
pub struct MoonState {
    pub satellite: &'static Satellite,
    /// Index into [`SolarSystem::bodies`]
    pub parent: usize,
    pub angle: f64,
    pub position: Vec3,
}

impl MoonState {
    pub fn new(satellite: &'static Satellite, parent: usize, parent_position: DVec3) -> Self {
        Self {
            satellite,
            parent,
            angle: 0.0,
            position: (parent_position + on_orbit(satellite.offset, 0.0)).as_vec3(),
        }
    }

    fn tick(&mut self, parent_position: DVec3) {
        self.angle += self.satellite.angular_speed;
        self.position = (parent_position + on_orbit(self.satellite.offset, self.angle)).as_vec3();
    }
}

/// All mutable scene state, owned by the host loop
#[derive(Debug, Clone)]
pub struct SolarSystem {
    pub star: &'static Star,
    pub sun_spin: f64,
    pub bodies: Vec<OrbitalState>,
    pub moons: Vec<MoonState>,
    pub ticks: u64,
}

impl SolarSystem {
    /// Build the state for `planets`, giving every body flagged `has_moon` one moon
    pub fn new(star: &'static Star, planets: &'static [CelestialBody]) -> Self {
        let bodies: Vec<OrbitalState> = planets.iter().map(OrbitalState::new).collect();

        let moons = bodies
            .iter()
            .enumerate()
            .filter(|(_, state)| state.body.has_moon)
            .map(|(i, state)| MoonState::new(&MOON, i, state.exact_position()))
            .collect();

        Self {
            star,
            sun_spin: 0.0,
            bodies,
            moons,
            ticks: 0,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.sun_spin += self.star.spin_per_tick;

        for body in &mut self.bodies {
            body.tick();
        }

        // Moons follow the parent's already-updated position
        for moon in &mut self.moons {
            moon.tick(self.bodies[moon.parent].exact_position());
        }

        self.ticks += 1;
        log::trace!("tick {}", self.ticks);
    }

    /// Advance `ticks` frames
    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Find body by name
    pub fn find_body(&self, name: &str) -> Option<&OrbitalState> {
        self.bodies.iter().find(|b| b.body.name == name)
    }

    /// Moons orbiting the body at `index`
    pub fn moons_of(&self, index: usize) -> impl Iterator<Item = &MoonState> {
        self.moons.iter().filter(move |m| m.parent == index)
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new(&SUN, &PLANETS)
    }
}
