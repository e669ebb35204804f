//! Static descriptors for the bodies in the scene
//!
//! Sizes, distances and speeds are relative display values, not physical ones.
//! Speeds are radians per tick. Distances and speeds are `f64` because angles
//! accumulate for as long as the scene runs.

/// A planet on a circular orbit around the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub name: &'static str,
    pub radius: f32,
    pub orbital_distance: f64,
    pub angular_speed: f64,
    pub texture_ref: &'static str,
    pub has_moon: bool,
}

/// The central star; it only spins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub name: &'static str,
    pub radius: f32,
    pub spin_per_tick: f64,
    pub texture_ref: &'static str,
}

/// Template for a moon circling its parent planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Satellite {
    pub name: &'static str,
    pub radius: f32,
    /// Distance from the parent's centre
    pub offset: f64,
    pub angular_speed: f64,
    /// `0xRRGGBB` flat colour; moons are untextured
    pub color: u32,
}

pub const SUN: Star = Star {
    name: "Sun",
    radius: 50.0,
    spin_per_tick: 0.004,
    texture_ref: "/img/sun.jpg",
};

pub const MOON: Satellite = Satellite {
    name: "Moon",
    radius: 1.7,
    offset: 10.0,
    angular_speed: 0.02,
    color: 0xAAAAAA,
};

/// Self-rotation applied to every planet each tick, independent of its orbit
pub const PLANET_SPIN_PER_TICK: f64 = 0.02;

pub static PLANETS: [CelestialBody; 8] = [
    CelestialBody {
        name: "Mercury",
        radius: 2.0,
        orbital_distance: 70.0,
        angular_speed: 0.04,
        texture_ref: "/img/mercury.jpg",
        has_moon: false,
    },
    CelestialBody {
        name: "Venus",
        radius: 6.0,
        orbital_distance: 110.0,
        angular_speed: 0.015,
        texture_ref: "/img/venus.jpg",
        has_moon: false,
    },
    CelestialBody {
        name: "Earth",
        radius: 6.4,
        orbital_distance: 150.0,
        angular_speed: 0.01,
        texture_ref: "/img/earth.jpg",
        has_moon: true,
    },
    CelestialBody {
        name: "Mars",
        radius: 3.4,
        orbital_distance: 200.0,
        angular_speed: 0.008,
        texture_ref: "/img/mars.jpg",
        has_moon: false,
    },
    CelestialBody {
        name: "Jupiter",
        radius: 20.0,
        orbital_distance: 300.0,
        angular_speed: 0.002,
        texture_ref: "/img/jupiter.jpg",
        has_moon: false,
    },
    CelestialBody {
        name: "Saturn",
        radius: 18.0,
        orbital_distance: 400.0,
        angular_speed: 0.0009,
        texture_ref: "/img/saturn.jpg",
        has_moon: false,
    },
    CelestialBody {
        name: "Uranus",
        radius: 15.0,
        orbital_distance: 500.0,
        angular_speed: 0.0004,
        texture_ref: "/img/uranus.jpg",
        has_moon: false,
    },
    CelestialBody {
        name: "Neptune",
        radius: 13.0,
        orbital_distance: 600.0,
        angular_speed: 0.0001,
        texture_ref: "/img/neptune.jpg",
        has_moon: false,
    },
];

/// Find planet by name
pub fn find(name: &str) -> Option<&'static CelestialBody> {
    PLANETS.iter().find(|b| b.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_planets_in_order() {
        let names: Vec<_> = PLANETS.iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
    }

    #[test]
    fn test_only_earth_has_a_moon() {
        let with_moon: Vec<_> = PLANETS.iter().filter(|b| b.has_moon).map(|b| b.name).collect();
        assert_eq!(with_moon, ["Earth"]);
    }

    #[test]
    fn test_orbits_are_outside_the_sun_and_increasing() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].orbital_distance < pair[1].orbital_distance);
        }
        assert!(PLANETS
            .iter()
            .all(|b| b.orbital_distance - f64::from(b.radius) > f64::from(SUN.radius)));
    }

    #[test]
    fn test_every_body_has_a_texture() {
        assert!(SUN.texture_ref.ends_with(".jpg"));
        for body in &PLANETS {
            assert!(body.texture_ref.starts_with("/img/"), "{}", body.name);
            assert!(body.texture_ref.ends_with(".jpg"), "{}", body.name);
        }
    }

    #[test]
    fn test_find() {
        let earth = find("Earth").unwrap();
        assert_eq!(earth.orbital_distance, 150.0);
        assert_eq!(earth.angular_speed, 0.01);
        assert!(find("Pluto").is_none());
    }
}
