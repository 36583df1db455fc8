//! Rays and the two intersection tests the interface needs: the globe's
//! bounding sphere and the terminal's flat screen.

use glam::{Vec2, Vec3};

/// A half-line with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction. Zero if the ray was built from a zero vector.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalising `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the first sphere surface in front of the origin.
    ///
    /// When the origin is inside the sphere this is the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let (t_near, t_far) = ray_sphere_intersect(self.origin, self.direction, center, radius)?;
        if t_near >= 0.0 {
            Some(t_near)
        } else if t_far >= 0.0 {
            Some(t_far)
        } else {
            None
        }
    }

    /// Distance to an oriented rectangle, if the ray crosses it in front of
    /// the origin. Both faces count.
    pub fn intersect_quad(&self, quad: &Quad) -> Option<f32> {
        let normal = quad.normal();
        let denom = self.direction.dot(normal);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (quad.center - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        let offset = self.at(t) - quad.center;
        let inside = offset.dot(quad.right).abs() <= quad.half_extents.x
            && offset.dot(quad.up).abs() <= quad.half_extents.y;
        inside.then_some(t)
    }
}

/// A flat rectangle in 3D. `right` and `up` are unit and orthogonal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    /// Centre point.
    pub center: Vec3,
    /// In-plane horizontal axis.
    pub right: Vec3,
    /// In-plane vertical axis.
    pub up: Vec3,
    /// Half width along `right`, half height along `up`.
    pub half_extents: Vec2,
}

impl Quad {
    /// Plane normal (`right × up`).
    pub fn normal(&self) -> Vec3 {
        self.right.cross(self.up)
    }
}

/// Ray-sphere intersection returning `(t_near, t_far)`, or `None` on a miss.
/// `dir` must be unit length.
pub fn ray_sphere_intersect(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<(f32, f32)> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    Some((-b - sqrt_disc, -b + sqrt_disc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_from_outside() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_hit_from_inside_returns_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_behind_is_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_sphere_miss() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, 5.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_ray_direction_is_normalised() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    }

    fn screen() -> Quad {
        Quad {
            center: Vec3::new(0.0, 1.0, -3.0),
            right: Vec3::X,
            up: Vec3::Y,
            half_extents: Vec2::new(0.8, 0.45),
        }
    }

    #[test]
    fn test_quad_hit() {
        let ray = Ray::new(Vec3::new(0.2, 1.1, 0.0), Vec3::NEG_Z);
        let t = ray.intersect_quad(&screen()).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_quad_miss_outside_extents() {
        let ray = Ray::new(Vec3::new(1.0, 1.0, 0.0), Vec3::NEG_Z);
        assert!(ray.intersect_quad(&screen()).is_none());
    }

    #[test]
    fn test_quad_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, -3.0), Vec3::X);
        assert!(ray.intersect_quad(&screen()).is_none());
    }
}
