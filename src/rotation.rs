use std::time::{Duration, Instant};

extern crate nalgebra_glm as glm;
use glm::Mat4;

/// Rotation for one frame. `radians` drives the transform, `degrees` is
/// only reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAngle {
    pub radians: f32,
    pub degrees: f32,
}

impl RotationAngle {
    /// The elapsed seconds are used directly as the angle in radians.
    pub fn from_elapsed(elapsed: Duration) -> Self {
        let radians = elapsed.as_secs_f32();
        return Self {
            radians,
            degrees: radians * (180.0 / std::f32::consts::PI),
        };
    }

    /// Identity rotated about +Z by `radians`.
    pub fn transform(&self) -> Mat4 {
        return rotation_about_z(self.radians);
    }
}

pub fn rotation_about_z(radians: f32) -> Mat4 {
    return glm::rotate(&Mat4::identity(), radians, &glm::vec3(0.0, 0.0, 1.0));
}

/// Wall clock started when the window is created. Nothing else about the
/// rotation carries over between frames.
#[derive(Debug, Clone, Copy)]
pub struct RotationClock {
    started: Instant,
}

impl RotationClock {
    pub fn start_now() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started: Instant) -> Self {
        Self { started }
    }

    pub fn angle_at(&self, now: Instant) -> RotationAngle {
        RotationAngle::from_elapsed(now.saturating_duration_since(self.started))
    }

    pub fn angle(&self) -> RotationAngle {
        self.angle_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn assert_mat_eq(a: &Mat4, b: &Mat4) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-4, "{} != {}\n{}\n{}", x, y, a, b);
        }
    }

    #[test]
    fn zero_time_is_identity() {
        let angle = RotationAngle::from_elapsed(Duration::ZERO);
        assert_eq!(angle.radians, 0.0);
        assert_mat_eq(&angle.transform(), &Mat4::identity());
    }

    #[test]
    fn rotation_is_pure_z_rotation() {
        let t = 0.75f32;
        let m = rotation_about_z(t);
        // column-major: column 0 is the image of +X
        assert!((m[(0, 0)] - t.cos()).abs() < 1e-6);
        assert!((m[(1, 0)] - t.sin()).abs() < 1e-6);
        assert!((m[(0, 1)] + t.sin()).abs() < 1e-6);
        assert!((m[(1, 1)] - t.cos()).abs() < 1e-6);
        assert!((m[(2, 2)] - 1.0).abs() < 1e-6);
        assert!((m[(3, 3)] - 1.0).abs() < 1e-6);
        assert!(m[(2, 0)].abs() < 1e-6);
        assert!(m[(0, 3)].abs() < 1e-6);
    }

    #[test]
    fn relative_rotation_is_the_time_difference() {
        for &(t1, t2) in &[(2.5f32, 1.0f32), (0.3, 4.0), (10.0, 10.0)] {
            let inverse = rotation_about_z(t2).try_inverse().unwrap();
            assert_mat_eq(&(rotation_about_z(t1) * inverse), &rotation_about_z(t1 - t2));
        }
    }

    #[test]
    fn column_major_slice_puts_sin_at_index_one() {
        let m = rotation_about_z(PI / 2.0);
        let s = m.as_slice();
        assert!(s[0].abs() < 1e-6);
        assert!((s[1] - 1.0).abs() < 1e-6);
        assert!((s[4] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn degrees_follow_radians() {
        let angle = RotationAngle::from_elapsed(Duration::from_secs_f32(PI));
        assert!((angle.radians - PI).abs() < 1e-6);
        assert!((angle.degrees - 180.0).abs() < 1e-3);
    }

    #[test]
    fn clock_reports_seconds_since_start() {
        let start = Instant::now();
        let clock = RotationClock::started_at(start);
        let angle = clock.angle_at(start + Duration::from_millis(1500));
        assert!((angle.radians - 1.5).abs() < 1e-6);
    }

    #[test]
    fn clock_never_goes_negative() {
        let start = Instant::now() + Duration::from_secs(5);
        let clock = RotationClock::started_at(start);
        assert_eq!(clock.angle_at(Instant::now()).radians, 0.0);
    }
}
