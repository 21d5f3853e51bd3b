use glam::{IVec2, Vec2};

/// Two triangles per quad, quad 0 then quad 1.
pub const MASK_INDICES: [u32; 12] = [0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7];

/// Two pixel-space quads covering the part of the viewport outside the
/// camera's frame: top and bottom bands when the viewport is taller than
/// the camera, left and right bands otherwise. When the aspect ratios
/// agree both quads collapse to zero area.
///
/// Vertices are interleaved `x, y` pairs with the origin at the top left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportMask {
    pub vertices: [f32; 16],
    pub indices: [u32; 12],
}

impl ViewportMask {
    pub fn new(viewport: IVec2, resolution: IVec2) -> Self {
        let vx = viewport.x as f32;
        let vy = viewport.y as f32;

        #[rustfmt::skip]
        let mut vertices = [
            0.0, 0.0,  vx, 0.0,  vx, vy,  0.0, vy,
            0.0, 0.0,  vx, 0.0,  vx, vy,  0.0, vy,
        ];

        // Cross-multiplied so equal aspect ratios compare exactly.
        let viewport_cross = viewport.x as i64 * resolution.y as i64;
        let camera_cross = resolution.x as i64 * viewport.y as i64;

        if viewport_cross < camera_cross {
            let mask_y = (vy - vx * resolution.y as f32 / resolution.x as f32) * 0.5;
            vertices[5] = mask_y;
            vertices[7] = mask_y;
            vertices[9] = vy - mask_y;
            vertices[11] = vy - mask_y;
            vertices[13] = vy;
            vertices[15] = vy;
        } else {
            let mask_x = if viewport_cross == camera_cross {
                0.0
            } else {
                (vx - vy * resolution.x as f32 / resolution.y as f32) * 0.5
            };
            vertices[2] = mask_x;
            vertices[4] = mask_x;
            vertices[8] = vx - mask_x;
            vertices[14] = vx - mask_x;
            vertices[10] = vx;
            vertices[12] = vx;
        }

        Self {
            vertices,
            indices: MASK_INDICES,
        }
    }

    pub fn vertex(&self, index: usize) -> Vec2 {
        Vec2::new(self.vertices[index * 2], self.vertices[index * 2 + 1])
    }

    /// Shoelace area of quad 0 or 1.
    pub fn quad_area(&self, quad: usize) -> f32 {
        let base = quad * 4;
        let mut twice_area = 0.0;
        for i in 0..4 {
            let a = self.vertex(base + i);
            let b = self.vertex(base + (i + 1) % 4);
            twice_area += a.x * b.y - b.x * a.y;
        }
        (twice_area * 0.5).abs()
    }

    pub fn is_degenerate(&self) -> bool {
        self.quad_area(0) == 0.0 && self.quad_area(1) == 0.0
    }
}
