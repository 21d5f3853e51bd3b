use glam::{IVec2, Vec2, Vec3};

use crate::math::{aspect_ratio, lerp, lerp_factor, tan_half_fov, Box2, Matrix4, Ray};

pub const DEFAULT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const DEFAULT_RESOLUTION: IVec2 = IVec2::new(1280, 720);
pub const DEFAULT_FOV: f32 = 50.0;
pub const DEFAULT_CLIPPING_PLANES: Vec2 = Vec2::new(0.1, 1.0e8);

/// A single lens and sensor.
///
/// The screen window is the visible region at unit distance, in units where
/// the shorter axis spans `[-1, 1]` by default. In perspective mode it is
/// further scaled by `tan(fov / 2)`, so `fov` is the full angle covered by
/// that `[-1, 1]` span. Every projection below is derived from the window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    transform: Matrix4,
    resolution: IVec2,
    screen_window: Box2,
    clipping_planes: Vec2,
    fov: f32,
    perspective: bool,
}

/// View, projection and derived matrices computed from one projection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transformations {
    pub view: Matrix4,
    pub projection: Matrix4,
    pub model_view: Matrix4,
    pub model_view_projection: Matrix4,
    pub eye: Vec3,
}

impl Transformations {
    /// `transform` is camera-to-world; `model` is object-to-world.
    pub fn new(projection: Matrix4, transform: &Matrix4, model: &Matrix4) -> Self {
        let view = transform.inverse();
        let model_view = *model * view;
        Self {
            view,
            projection,
            model_view,
            model_view_projection: model_view * projection,
            eye: transform.translation(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION, DEFAULT_RESOLUTION, DEFAULT_FOV)
    }
}

impl Camera {
    /// Camera at `position` with an unrotated transform.
    pub fn new(position: Vec3, resolution: IVec2, fov: f32) -> Self {
        Self::with_transform(Matrix4::from_translation(position), resolution, fov)
    }

    pub fn with_transform(transform: Matrix4, resolution: IVec2, fov: f32) -> Self {
        let mut camera = Self {
            transform,
            resolution,
            screen_window: Box2::empty(),
            clipping_planes: DEFAULT_CLIPPING_PLANES,
            fov,
            perspective: true,
        };
        camera.reset_screen(resolution);
        camera
    }

    /// Camera-to-world transform.
    pub fn transform(&self) -> &Matrix4 {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Matrix4) {
        self.transform = transform;
    }

    pub fn view_matrix(&self) -> Matrix4 {
        self.transform.inverse()
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation()
    }

    pub fn view_direction(&self) -> Vec3 {
        self.transform.transform_vector(Vec3::NEG_Z)
    }

    pub fn up_direction(&self) -> Vec3 {
        self.transform.transform_vector(Vec3::Y)
    }

    pub fn resolution(&self) -> IVec2 {
        self.resolution
    }

    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.resolution)
    }

    /// Changes the pixel resolution, adapting the screen window.
    ///
    /// With `fit_horizontal` the vertical extent is rescaled by the aspect
    /// change so the horizontal framing is kept. Otherwise both axes scale
    /// about the window centre by the resolution ratio.
    pub fn set_resolution(&mut self, resolution: IVec2, fit_horizontal: bool) {
        if self.screen_window.is_empty() {
            self.resolution = resolution;
            self.reset_screen(resolution);
            return;
        }

        if fit_horizontal {
            let y_scale = aspect_ratio(self.resolution) / aspect_ratio(resolution);
            self.screen_window.min.y *= y_scale;
            self.screen_window.max.y *= y_scale;
        } else {
            let centre = self.screen_window.center();
            let scale = resolution.as_vec2() / self.resolution.as_vec2();
            self.screen_window.min = centre + (self.screen_window.min - centre) * scale;
            self.screen_window.max = centre + (self.screen_window.max - centre) * scale;
        }

        self.resolution = resolution;
    }

    /// Recomputes the default window: the shorter axis spans `[-1, 1]`.
    pub fn reset_screen(&mut self, resolution: IVec2) {
        let aspect = aspect_ratio(resolution);
        self.screen_window = if aspect < 1.0 {
            Box2::new(Vec2::new(-1.0, -1.0 / aspect), Vec2::new(1.0, 1.0 / aspect))
        } else {
            Box2::new(Vec2::new(-aspect, -1.0), Vec2::new(aspect, 1.0))
        };
    }

    pub fn screen_window(&self) -> &Box2 {
        &self.screen_window
    }

    pub fn set_screen_window(&mut self, window: Box2) {
        self.screen_window = window;
    }

    /// Near and far clip distances as `(near, far)`.
    pub fn clipping_planes(&self) -> Vec2 {
        self.clipping_planes
    }

    pub fn set_clipping_planes(&mut self, planes: Vec2) {
        self.clipping_planes = planes;
    }

    /// Full field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    pub fn perspective(&self) -> bool {
        self.perspective
    }

    pub fn set_perspective(&mut self, perspective: bool) {
        self.perspective = perspective;
    }

    pub fn focal_length(&self) -> f32 {
        1.0 / tan_half_fov(self.fov)
    }

    /// World-space points on the near and far planes under a raster position.
    /// Raster origin is top-left.
    pub fn unproject(&self, raster: Vec2) -> (Vec3, Vec3) {
        self.unproject_through(raster, self.resolution.as_vec2(), &self.screen_window)
    }

    pub fn ray(&self, raster: Vec2) -> Ray {
        let (near, far) = self.unproject(raster);
        Ray::through(near, far)
    }

    /// Raster position of a world-space point.
    pub fn project(&self, world: Vec3) -> Vec2 {
        self.project_through(world, self.resolution.as_vec2(), &self.screen_window)
    }

    pub fn projection_matrix(&self) -> Matrix4 {
        self.projection_matrix_with(self.clipping_planes.x, self.clipping_planes.y)
    }

    pub fn projection_matrix_with(&self, near: f32, far: f32) -> Matrix4 {
        self.frustum(&self.screen_window, near, far)
    }

    /// All matrices for drawing an object placed by `model`.
    pub fn transformations(&self, model: &Matrix4) -> Transformations {
        Transformations::new(self.projection_matrix(), &self.transform, model)
    }

    /// Same as [`Camera::transformations`] with a caller-supplied projection.
    pub fn transformations_with(&self, projection: Matrix4, model: &Matrix4) -> Transformations {
        Transformations::new(projection, &self.transform, model)
    }

    pub(crate) fn unproject_through(&self, raster: Vec2, size: Vec2, window: &Box2) -> (Vec3, Vec3) {
        let ndc = raster / size;
        let screen = Vec2::new(
            lerp(window.min.x, window.max.x, ndc.x),
            lerp(window.max.y, window.min.y, ndc.y),
        );
        let (near_distance, far_distance) = (self.clipping_planes.x, self.clipping_planes.y);

        let (near, far) = if self.perspective {
            let d = tan_half_fov(self.fov);
            let direction = Vec3::new(screen.x * d, screen.y * d, -1.0);
            (direction * near_distance, direction * far_distance)
        } else {
            (
                Vec3::new(screen.x, screen.y, -near_distance),
                Vec3::new(screen.x, screen.y, -far_distance),
            )
        };

        (self.transform.transform_point(near), self.transform.transform_point(far))
    }

    pub(crate) fn project_through(&self, world: Vec3, size: Vec2, window: &Box2) -> Vec2 {
        let camera = self.view_matrix().transform_point(world);

        let screen = if self.perspective {
            Vec2::new(camera.x, camera.y) / -camera.z / tan_half_fov(self.fov)
        } else {
            Vec2::new(camera.x, camera.y)
        };

        Vec2::new(
            lerp_factor(screen.x, window.min.x, window.max.x) * size.x,
            lerp_factor(screen.y, window.max.y, window.min.y) * size.y,
        )
    }

    /// Projection for an arbitrary (possibly off-centre) screen window.
    pub(crate) fn frustum(&self, window: &Box2, near: f32, far: f32) -> Matrix4 {
        if !self.perspective {
            return Matrix4::ortho(window.min.x, window.max.x, window.min.y, window.max.y, near, far);
        }

        let t = tan_half_fov(self.fov);
        let width = window.max.x - window.min.x;
        let height = window.max.y - window.min.y;
        let range_inv = 1.0 / (far - near);

        Matrix4::from_rows([
            [2.0 / (width * t), 0.0, 0.0, 0.0],
            [0.0, 2.0 / (height * t), 0.0, 0.0],
            [
                (window.max.x + window.min.x) / width,
                (window.max.y + window.min.y) / height,
                -(far + near) * range_inv,
                -1.0,
            ],
            [0.0, 0.0, -2.0 * far * near * range_inv, 0.0],
        ])
    }
}
