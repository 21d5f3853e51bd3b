use glam::{IVec2, Vec2, Vec3};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::CameraController;
use crate::math::{lerp, tan_half_fov, Box2, Matrix4};

/// Smallest centre of interest or window scale a dolly may produce.
pub const DOLLY_EPSILON: f32 = 1.0e-6;

const DOLLY_SPEED: f32 = 2.5;
const TUMBLE_PIXELS_PER_RADIAN: f32 = 100.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    /// Pan parallel to the image plane.
    Track,
    /// Orbit about the centre of interest.
    Tumble,
    /// Move toward the centre of interest, or zoom the window when orthographic.
    Dolly,
}

/// An in-progress drag.
///
/// Every update is computed from the snapshot taken when the drag began,
/// so intermediate positions never accumulate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionState {
    kind: Motion,
    start: IVec2,
    transform: Matrix4,
    centre_of_interest: f32,
    screen_window: Box2,
    /// Viewport-fitted window, the one pixels map through.
    fitted_window: Box2,
}

impl MotionState {
    pub fn new(kind: Motion, start: IVec2, controller: &CameraController<'_>) -> Self {
        let camera = controller.camera();
        Self {
            kind,
            start,
            transform: *camera.transform(),
            centre_of_interest: controller.centre_of_interest,
            screen_window: *camera.screen_window(),
            fitted_window: controller.screen_window(),
        }
    }

    pub fn kind(&self) -> Motion {
        self.kind
    }

    pub fn start(&self) -> IVec2 {
        self.start
    }

    pub(super) fn update(&self, controller: &mut CameraController<'_>, position: IVec2) {
        trace!("{:?} update at {}", self.kind, position);
        match self.kind {
            Motion::Track => self.track(controller, position),
            Motion::Tumble => self.tumble(controller, position),
            Motion::Dolly => self.dolly(controller, position),
        }
    }

    pub(super) fn finish(&self, controller: &mut CameraController<'_>, position: IVec2) {
        self.update(controller, position);
    }

    fn track(&self, controller: &mut CameraController<'_>, position: IVec2) {
        let speed = controller.camera.screen_window().size() * 2.0;
        let viewport = controller.viewport.as_vec2();
        let delta = (position - self.start).as_vec2();

        let mut translate = Vec3::new(
            -speed.x * delta.x / viewport.x,
            speed.y * delta.y / viewport.y,
            0.0,
        );

        let fov = controller.fov();
        if controller.camera.perspective() && fov != 0.0 {
            translate *= tan_half_fov(fov) * controller.centre_of_interest;
        }

        let mut transform = self.transform;
        transform.translate(translate);
        controller.camera.set_transform(transform);
    }

    fn tumble(&self, controller: &mut CameraController<'_>, position: IVec2) {
        let pivot = self
            .transform
            .transform_point(Vec3::new(0.0, 0.0, -self.centre_of_interest));
        let delta = position - self.start;

        let mut rotation = Matrix4::from_translation(pivot);

        if delta.x != 0 {
            let y_rotate = -(delta.x as f32) / TUMBLE_PIXELS_PER_RADIAN;
            rotation.rotate(Vec3::new(0.0, y_rotate, 0.0));
        }

        if delta.y != 0 {
            let axis = self.transform.transform_vector(Vec3::X).normalize();
            let x_rotate = -(delta.y as f32) / TUMBLE_PIXELS_PER_RADIAN;
            rotation = Matrix4::from_axis_angle(axis, x_rotate) * rotation;
        }

        rotation.translate(-pivot);
        controller.camera.set_transform(self.transform * rotation);
    }

    fn dolly(&self, controller: &mut CameraController<'_>, position: IVec2) {
        let viewport = controller.viewport.as_vec2();
        let delta = (position - self.start).as_vec2() / viewport;
        let mut d = delta.x - delta.y;

        if controller.camera.perspective() {
            d *= DOLLY_SPEED * self.centre_of_interest;
            let centre_of_interest = self.centre_of_interest - d;
            if centre_of_interest > DOLLY_EPSILON {
                let mut transform = self.transform;
                transform.translate(Vec3::new(0.0, 0.0, -d));
                controller.camera.set_transform(transform);
                controller.centre_of_interest = centre_of_interest;
            } else {
                debug!("dolly would pass the centre of interest, ignoring");
            }
        } else {
            // Fitting scales about the window centre, so zooming the camera
            // window about a point zooms the fitted one about it too.
            let ndc = self.start.as_vec2() / viewport;
            let fitted = &self.fitted_window;
            let centre = Vec2::new(
                lerp(fitted.min.x, fitted.max.x, ndc.x),
                lerp(fitted.max.y, fitted.min.y, ndc.y),
            );
            let window = &self.screen_window;

            let scale = 1.0 - d;
            if scale > DOLLY_EPSILON {
                controller
                    .camera
                    .set_screen_window(window.scaled_about(centre, scale));
            } else {
                debug!("dolly would collapse the screen window, ignoring");
            }
        }
    }
}
