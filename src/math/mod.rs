mod bounds;
mod matrix;
mod ray;
mod scalar;

pub use bounds::{Bounds, BoundsVector, Box2, Box3};
pub use matrix::Matrix4;
pub use ray::Ray;
pub use scalar::{aspect_ratio, degrees_to_radians, lerp, lerp_factor, tan_half_fov};
