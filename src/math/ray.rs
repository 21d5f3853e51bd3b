use glam::Vec3;

use super::Box3;

/// Half-line from `origin` along `direction` (not necessarily unit length).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `near` through `far`, as produced by unprojecting a pixel.
    pub fn through(near: Vec3, far: Vec3) -> Self {
        Self { origin: near, direction: (far - near).normalize() }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance from `point` to the closest point on the infinite line.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        let dir = self.direction.normalize();
        let to_point = point - self.origin;
        (to_point - dir * to_point.dot(dir)).length()
    }

    /// Slab test against a box. Returns the entry distance, or the exit
    /// distance when the origin is inside, or `None` on a miss.
    pub fn intersect_box(&self, bounds: &Box3) -> Option<f32> {
        const EPSILON: f32 = 1e-8;

        // Clamp near-zero components so the reciprocal stays finite.
        let inv = |d: f32| {
            if d.abs() < EPSILON {
                1.0 / EPSILON.copysign(d)
            } else {
                1.0 / d
            }
        };
        let inv_dir = Vec3::new(inv(self.direction.x), inv(self.direction.y), inv(self.direction.z));

        let t_min = (bounds.min - self.origin) * inv_dir;
        let t_max = (bounds.max - self.origin) * inv_dir;

        let t1 = t_min.min(t_max);
        let t2 = t_min.max(t_max);

        let t_near = t1.max_element();
        let t_far = t2.min_element();

        if t_near > t_far || t_far < 0.0 {
            return None;
        }

        if t_near < 0.0 {
            (t_far > 0.001).then_some(t_far)
        } else {
            Some(t_near)
        }
    }
}
