//! Scripted camera path used by the headless host.

use glam::DVec3;

/// A figure-eight flight over the world at constant height above the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFlight {
    /// Half-width of the figure-eight, in world units.
    pub radius: f64,
    /// Ground speed along the path, in world units per second.
    pub speed: f64,
    /// Height above the terrain surface.
    pub altitude: f64,
}

impl CameraFlight {
    /// Path covering most of a world of edge `world_size`.
    pub fn over_world(world_size: f64, speed: f64, altitude: f64) -> Self {
        Self {
            radius: (world_size * 0.4).max(1.0),
            speed,
            altitude,
        }
    }

    /// Camera position at simulation time `t`, resting `altitude` above `ground(x, z)`.
    pub fn position_at(&self, t: f64, ground: impl Fn(f64, f64) -> f64) -> DVec3 {
        // Angular rate that gives roughly `speed` along a lemniscate of this size.
        let omega = self.speed / self.radius;
        let theta = t * omega;
        let denom = 1.0 + theta.sin().powi(2);
        let x = self.radius * theta.cos() / denom;
        let z = self.radius * theta.sin() * theta.cos() / denom;
        DVec3::new(x, ground(x, z) + self.altitude, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_east_tip() {
        let flight = CameraFlight::over_world(2000.0, 120.0, 40.0);
        let p = flight.position_at(0.0, |_, _| 10.0);
        assert_eq!(p, DVec3::new(800.0, 50.0, 0.0));
    }

    #[test]
    fn test_stays_over_the_world() {
        let flight = CameraFlight::over_world(2000.0, 120.0, 40.0);
        for i in 0..500 {
            let p = flight.position_at(i as f64 * 0.37, |_, _| 0.0);
            assert!(p.x.abs() <= 800.0 + 1e-9 && p.z.abs() <= 800.0 + 1e-9);
            assert_eq!(p.y, 40.0);
        }
    }

    #[test]
    fn test_follows_ground() {
        let flight = CameraFlight::over_world(2000.0, 120.0, 5.0);
        let p = flight.position_at(3.0, |x, z| x * 0.1 + z);
        assert!((p.y - (p.x * 0.1 + p.z + 5.0)).abs() < 1e-9);
    }
}
