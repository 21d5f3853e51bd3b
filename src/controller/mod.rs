//! Interactive camera manipulation.
//!
//! A [`CameraController`] borrows one [`Camera`] for its whole lifetime and
//! draws it into a viewport whose aspect ratio may differ from the camera's
//! resolution. Projections are fitted so the mismatch only ever adds
//! letterbox or pillarbox margin.

mod mask;
mod motion;

pub use mask::{ViewportMask, MASK_INDICES};
pub use motion::{Motion, MotionState, DOLLY_EPSILON};

use glam::{IVec2, Vec2, Vec3};
use log::debug;

use crate::camera::{Camera, Transformations};
use crate::math::{aspect_ratio, tan_half_fov, Box2, Box3, Matrix4};

/// Extra distance in front of the box when framing orthographically.
const ORTHO_FRAME_MARGIN: f32 = 0.1;
/// Nudge applied to a home position straight above or below the origin.
const HOME_POLE_NUDGE: f32 = 0.00001;

/// Drives one borrowed [`Camera`] from pointer gestures inside a viewport.
pub struct CameraController<'a> {
    camera: &'a mut Camera,
    viewport: IVec2,
    home: Vec3,
    centre_of_interest: f32,
    motion: Option<MotionState>,
}

impl<'a> CameraController<'a> {
    /// Takes control of `camera`, records its position as home and moves it
    /// there looking at the origin. The viewport starts at the camera's
    /// resolution.
    pub fn new(camera: &'a mut Camera) -> Self {
        let viewport = camera.resolution();
        let home = camera.position();
        let mut controller = Self {
            camera,
            viewport,
            home,
            centre_of_interest: 0.0,
            motion: None,
        };
        controller.home();
        controller
    }

    /// Switches to another camera, dropping any gesture in progress.
    pub fn set_camera(&mut self, camera: &'a mut Camera) {
        self.dispose();
        self.home = camera.position();
        self.camera = camera;
        self.home();
    }

    pub fn camera(&self) -> &Camera {
        &*self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut *self.camera
    }

    pub fn viewport(&self) -> IVec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, size: IVec2) {
        self.viewport = size;
    }

    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.viewport)
    }

    pub fn centre_of_interest(&self) -> f32 {
        self.centre_of_interest
    }

    pub fn perspective(&self) -> bool {
        self.camera.perspective()
    }

    pub fn transform(&self) -> &Matrix4 {
        self.camera.transform()
    }

    pub fn view_matrix(&self) -> Matrix4 {
        self.camera.view_matrix()
    }

    /// Camera fov, narrowed when the viewport is wider than the camera.
    pub fn fov(&self) -> f32 {
        self.camera.fov() * self.wide_viewport_factor()
    }

    /// Camera focal length, scaled like [`CameraController::fov`].
    pub fn focal_length(&self) -> f32 {
        self.camera.focal_length() * self.wide_viewport_factor()
    }

    fn wide_viewport_factor(&self) -> f32 {
        let viewport_aspect = self.aspect_ratio();
        let camera_aspect = self.camera.aspect_ratio();
        if viewport_aspect > camera_aspect {
            camera_aspect / viewport_aspect
        } else {
            1.0
        }
    }

    /// The camera's screen window grown along one axis to the viewport's
    /// aspect ratio: taller for a narrower viewport, wider for a wider one.
    pub fn screen_window(&self) -> Box2 {
        let window = *self.camera.screen_window();
        let viewport_aspect = self.aspect_ratio();
        let camera_aspect = self.camera.aspect_ratio();

        if camera_aspect > viewport_aspect {
            window.scaled_about_axes(Vec2::new(1.0, camera_aspect / viewport_aspect))
        } else if viewport_aspect > camera_aspect {
            window.scaled_about_axes(Vec2::new(viewport_aspect / camera_aspect, 1.0))
        } else {
            window
        }
    }

    /// Projection for drawing into the viewport.
    pub fn projection_matrix(&self) -> Matrix4 {
        let planes = self.camera.clipping_planes();
        self.camera.frustum(&self.screen_window(), planes.x, planes.y)
    }

    /// Pixel-space projection for overlays such as the viewport mask.
    pub fn pixel_projection(&self) -> Matrix4 {
        Matrix4::screen_ortho(self.viewport)
    }

    /// Near and far world-space points under a viewport pixel.
    pub fn unproject(&self, raster: Vec2) -> (Vec3, Vec3) {
        self.camera
            .unproject_through(raster, self.viewport.as_vec2(), &self.screen_window())
    }

    /// Viewport pixel of a world-space point.
    pub fn project(&self, world: Vec3) -> Vec2 {
        self.camera
            .project_through(world, self.viewport.as_vec2(), &self.screen_window())
    }

    pub fn transformations(&self, model: &Matrix4) -> Transformations {
        Transformations::new(self.projection_matrix(), self.camera.transform(), model)
    }

    pub fn transformations_with(&self, projection: Matrix4, model: &Matrix4) -> Transformations {
        Transformations::new(projection, self.camera.transform(), model)
    }

    /// Border geometry between the viewport and the camera's frame.
    pub fn viewport_mask(&self) -> ViewportMask {
        ViewportMask::new(self.viewport, self.camera.resolution())
    }

    /// Begins a drag gesture at `position`, discarding any unfinished one.
    pub fn motion_start(&mut self, motion: Motion, position: IVec2) {
        if let Some(previous) = self.motion.take() {
            debug!("discarding unfinished {:?} gesture", previous.kind());
        }
        debug!("{:?} gesture started at {}", motion, position);
        self.motion = Some(MotionState::new(motion, position, self));
    }

    /// Moves the active gesture to `position`. Ignored when idle.
    pub fn motion_update(&mut self, position: IVec2) {
        if let Some(state) = self.motion {
            state.update(self, position);
        }
    }

    /// Applies a final update and returns to idle. Ignored when idle.
    pub fn motion_end(&mut self, position: IVec2) {
        if let Some(state) = self.motion.take() {
            state.finish(self, position);
            debug!(
                "{:?} gesture from {} ended at {}",
                state.kind(),
                state.start(),
                position
            );
        }
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Kind of the gesture in progress, if any.
    pub fn motion(&self) -> Option<Motion> {
        self.motion.map(|state| state.kind())
    }

    fn dispose(&mut self) {
        self.motion = None;
    }

    /// Looks at the origin from the recorded home position.
    pub fn home(&mut self) {
        if self.home.normalize().y.abs() == 1.0 {
            self.home.x += HOME_POLE_NUDGE;
        }

        self.camera
            .set_transform(Matrix4::look_at(self.home, Vec3::ZERO, Vec3::Y).inverse());
        self.centre_of_interest = self.home.length();

        if !self.camera.perspective() {
            let resolution = self.camera.resolution();
            self.camera.reset_screen(resolution);
        }
    }

    pub fn home_position(&self) -> Vec3 {
        self.home
    }

    /// Sets the centre of interest to the camera's distance from `point`.
    pub fn focus_on(&mut self, point: Vec3) {
        self.centre_of_interest = self.camera.position().distance(point);
    }

    /// Frames `bounds` keeping the current view and up directions.
    pub fn frame(&mut self, bounds: &Box3) {
        let view_direction = self.camera.view_direction();
        let up = self.camera.up_direction();
        self.frame_from(bounds, view_direction, up);
    }

    /// Looks along `view_direction` at the centre of `bounds` and backs off
    /// until the box fits the screen window.
    pub fn frame_from(&mut self, bounds: &Box3, view_direction: Vec3, up: Vec3) {
        let mut camera_matrix = Matrix4::rotation_with_up_dir(Vec3::NEG_Z, view_direction, up);
        camera_matrix *= Matrix4::from_translation(bounds.center());

        let camera_box = bounds.transformed(&camera_matrix.inverse());
        let camera_size = camera_box.size();
        let near = self.camera.clipping_planes().x;
        let mut window = *self.camera.screen_window();
        let window_size = window.size();

        if self.camera.perspective() {
            // Assumes the screen window is centred on the view axis.
            let z0 = camera_size.x / window_size.x;
            let z1 = camera_size.y / window_size.y;
            self.centre_of_interest =
                z0.max(z1) / tan_half_fov(self.camera.fov()) + camera_box.max.z + near;
            camera_matrix.translate(Vec3::new(0.0, 0.0, self.centre_of_interest));
        } else {
            self.centre_of_interest = camera_box.max.z + near + ORTHO_FRAME_MARGIN;
            camera_matrix.translate(Vec3::new(0.0, 0.0, self.centre_of_interest));

            let scale = (camera_size.x / window_size.x).max(camera_size.y / window_size.y);
            let half = window_size * scale * 0.5;
            let centre = camera_box.center();
            let centre = Vec2::new(centre.x, centre.y);
            window = Box2::new(centre - half, centre + half);
        }

        debug!(
            "framed box {:?}..{:?} at distance {}",
            bounds.min, bounds.max, self.centre_of_interest
        );
        self.camera.set_transform(camera_matrix);
        self.camera.set_screen_window(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vec3, resolution: IVec2) -> Camera {
        Camera::new(position, resolution, 35.0)
    }

    #[test]
    fn test_new_looks_at_origin() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0), IVec2::new(640, 480));
        let controller = CameraController::new(&mut camera);
        assert_eq!(controller.viewport(), IVec2::new(640, 480));
        assert!((controller.centre_of_interest() - 10.0).abs() < 1e-5);
        let dir = controller.camera().view_direction();
        assert!((dir - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_home_from_pole_is_finite() {
        let mut camera = camera_at(Vec3::new(0.0, 10.0, 0.0), IVec2::new(640, 480));
        let controller = CameraController::new(&mut camera);
        let t = controller.transform();
        assert!(t.m.iter().flatten().all(|v| v.is_finite()));
        assert!(controller.home_position().x > 0.0);
    }

    #[test]
    fn test_home_restores_pose_after_motion() {
        let mut camera = camera_at(Vec3::new(3.0, 4.0, 5.0), IVec2::new(640, 480));
        let mut controller = CameraController::new(&mut camera);
        let start = *controller.transform();
        controller.motion_start(Motion::Tumble, IVec2::new(10, 10));
        controller.motion_end(IVec2::new(60, 40));
        assert_ne!(*controller.transform(), start);
        controller.home();
        assert!(controller.transform().abs_diff_eq(&start, 1e-5));
    }

    #[test]
    fn test_screen_window_matching_aspect_is_camera_window() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0), IVec2::new(1280, 720));
        let mut controller = CameraController::new(&mut camera);
        controller.set_viewport(IVec2::new(1920, 1080));
        assert_eq!(controller.screen_window(), *controller.camera().screen_window());
    }

    #[test]
    fn test_screen_window_wider_viewport_grows_x() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0), IVec2::new(1000, 1000));
        let mut controller = CameraController::new(&mut camera);
        controller.set_viewport(IVec2::new(2000, 1000));
        let w = controller.screen_window();
        assert!((w.max.x - 2.0).abs() < 1e-6);
        assert!((w.max.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_screen_window_narrower_viewport_grows_y() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0), IVec2::new(1000, 1000));
        let mut controller = CameraController::new(&mut camera);
        controller.set_viewport(IVec2::new(500, 1000));
        let w = controller.screen_window();
        assert!((w.max.x - 1.0).abs() < 1e-6);
        assert!((w.max.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_focal_length_follows_fov_rule() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0), IVec2::new(1000, 1000));
        let focal = camera.focal_length();
        let mut controller = CameraController::new(&mut camera);
        controller.set_viewport(IVec2::new(2000, 1000));
        assert!((controller.focal_length() - focal * 0.5).abs() < 1e-5);
        controller.set_viewport(IVec2::new(500, 1000));
        assert_eq!(controller.focal_length(), focal);
    }

    #[test]
    fn test_projection_matches_camera_when_aspects_agree() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0), IVec2::new(1280, 720));
        let controller = CameraController::new(&mut camera);
        let expected = controller.camera().projection_matrix();
        assert!(controller.projection_matrix().abs_diff_eq(&expected, 1e-6));
    }

    #[test]
    fn test_focus_on() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0), IVec2::new(640, 480));
        let mut controller = CameraController::new(&mut camera);
        controller.focus_on(Vec3::new(0.0, 0.0, 4.0));
        assert!((controller.centre_of_interest() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_motion_end_returns_to_idle() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0), IVec2::new(640, 480));
        let mut controller = CameraController::new(&mut camera);
        assert!(!controller.is_moving());
        controller.motion_start(Motion::Track, IVec2::new(0, 0));
        assert_eq!(controller.motion(), Some(Motion::Track));
        controller.motion_end(IVec2::new(5, 5));
        assert!(!controller.is_moving());
        assert_eq!(controller.motion(), None);
    }

    #[test]
    fn test_update_without_start_is_ignored() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0), IVec2::new(640, 480));
        let mut controller = CameraController::new(&mut camera);
        let before = *controller.transform();
        controller.motion_update(IVec2::new(100, 100));
        controller.motion_end(IVec2::new(100, 100));
        assert_eq!(*controller.transform(), before);
    }

    #[test]
    fn test_set_camera_rehomes_and_drops_gesture() {
        let mut first = camera_at(Vec3::new(0.0, 0.0, 10.0), IVec2::new(640, 480));
        let mut second = camera_at(Vec3::new(0.0, 0.0, 3.0), IVec2::new(640, 480));
        let mut controller = CameraController::new(&mut first);
        controller.motion_start(Motion::Dolly, IVec2::new(0, 0));
        controller.set_camera(&mut second);
        assert!(!controller.is_moving());
        assert!((controller.centre_of_interest() - 3.0).abs() < 1e-5);
    }
}
