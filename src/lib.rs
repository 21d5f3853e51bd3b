pub mod camera;
pub mod cli;
pub mod config;
pub mod controller;
pub mod input;
pub mod math;
pub mod types;

pub use camera::{Camera, Transformations};
pub use controller::{CameraController, Motion, ViewportMask};
pub use input::{gesture_for, Modifiers, PointerButton, PointerEvent};
pub use math::{Box2, Box3, Matrix4, Ray};
pub use types::ViewUniform;
