use glam::{Vec2, Vec3};
use std::ops::{Add, Div, Mul, Sub};

use super::Matrix4;

/// Component-wise operations a vector type needs to bound a region.
pub trait BoundsVector:
    Copy
    + PartialEq
    + std::fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f32, Output = Self>
    + Div<f32, Output = Self>
{
    const ZERO: Self;
    /// Every component at `f32::MAX`.
    const MAX: Self;
    /// Every component at `-f32::MAX`.
    const MIN: Self;

    fn component_min(self, other: Self) -> Self;
    fn component_max(self, other: Self) -> Self;
    /// True when any component of `self` is strictly less than `other`'s.
    fn any_lt(self, other: Self) -> bool;
}

macro_rules! impl_bounds_vector {
    ($t:ty) => {
        impl BoundsVector for $t {
            const ZERO: Self = <$t>::ZERO;
            const MAX: Self = <$t>::splat(f32::MAX);
            const MIN: Self = <$t>::splat(-f32::MAX);

            fn component_min(self, other: Self) -> Self {
                self.min(other)
            }

            fn component_max(self, other: Self) -> Self {
                self.max(other)
            }

            fn any_lt(self, other: Self) -> bool {
                self.cmplt(other).any()
            }
        }
    };
}

impl_bounds_vector!(Vec2);
impl_bounds_vector!(Vec3);

/// Axis-aligned min/max pair.
///
/// The default box is empty (`min` at the largest value, `max` at the
/// smallest), so extending it by a point yields that point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds<V: BoundsVector> {
    pub min: V,
    pub max: V,
}

pub type Box2 = Bounds<Vec2>;
pub type Box3 = Bounds<Vec3>;

impl<V: BoundsVector> Default for Bounds<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V: BoundsVector> Bounds<V> {
    pub fn new(min: V, max: V) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self { min: V::MAX, max: V::MIN }
    }

    pub fn infinite() -> Self {
        Self { min: V::MIN, max: V::MAX }
    }

    pub fn is_empty(&self) -> bool {
        self.max.any_lt(self.min)
    }

    pub fn is_infinite(&self) -> bool {
        self.min == V::MIN && self.max == V::MAX
    }

    pub fn center(&self) -> V {
        (self.max + self.min) / 2.0
    }

    /// Extent of the box; zero for an empty box.
    pub fn size(&self) -> V {
        if self.is_empty() {
            V::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn contains(&self, point: V) -> bool {
        !point.any_lt(self.min) && !self.max.any_lt(point)
    }

    pub fn extend_by(&mut self, point: V) {
        self.min = self.min.component_min(point);
        self.max = self.max.component_max(point);
    }

    pub fn extend_by_box(&mut self, other: &Bounds<V>) {
        self.min = self.min.component_min(other.min);
        self.max = self.max.component_max(other.max);
    }

    pub fn union(&self, other: &Bounds<V>) -> Bounds<V> {
        let mut r = *self;
        r.extend_by_box(other);
        r
    }

    /// Scales the box about `centre` by `factor`.
    pub fn scaled_about(&self, centre: V, factor: f32) -> Bounds<V> {
        Bounds {
            min: (self.min - centre) * factor + centre,
            max: (self.max - centre) * factor + centre,
        }
    }
}

impl Box2 {
    /// Scales each axis about the centre independently.
    pub fn scaled_about_axes(&self, scale: Vec2) -> Box2 {
        let centre = self.center();
        Box2 {
            min: (self.min - centre) * scale + centre,
            max: (self.max - centre) * scale + centre,
        }
    }
}

impl Box3 {
    /// Replaces the box with the tightest box enclosing it after `m`.
    ///
    /// Affine matrices use Arvo's method; projective ones transform all
    /// eight corners. Empty and infinite boxes are left alone.
    pub fn transform(&mut self, m: &Matrix4) {
        if self.is_empty() || self.is_infinite() {
            return;
        }

        if m.is_affine() {
            self.affine_transform(m);
            return;
        }

        let (lo, hi) = (self.min, self.max);
        *self = Box3::empty();
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 4 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 1 == 0 { lo.z } else { hi.z },
            );
            self.extend_by(m.project_point(corner));
        }
    }

    pub fn transformed(&self, m: &Matrix4) -> Box3 {
        let mut r = *self;
        r.transform(m);
        r
    }

    /// Like [`Box3::transform`] but the caller guarantees `m` is affine.
    pub fn affine(&mut self, m: &Matrix4) {
        if !self.is_empty() && !self.is_infinite() {
            self.affine_transform(m);
        }
    }

    fn affine_transform(&mut self, m: &Matrix4) {
        let lo = self.min.to_array();
        let hi = self.max.to_array();
        let mut new_min = [0.0f32; 3];
        let mut new_max = [0.0f32; 3];

        for i in 0..3 {
            new_min[i] = m[3][i];
            new_max[i] = m[3][i];

            for j in 0..3 {
                let a = m[j][i] * lo[j];
                let b = m[j][i] * hi[j];
                if a < b {
                    new_min[i] += a;
                    new_max[i] += b;
                } else {
                    new_min[i] += b;
                    new_max[i] += a;
                }
            }
        }

        self.min = Vec3::from_array(new_min);
        self.max = Vec3::from_array(new_max);
    }
}
