use glam::{IVec2, Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Index, IndexMut, Mul, MulAssign, Sub};

/// 4x4 transform stored row-major and applied to row vectors (`p' = p * M`).
///
/// Translation lives in the last row. A matrix whose last column is exactly
/// `(0, 0, 0, 1)` is affine; anything else is treated as projective.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    pub const IDENTITY: Matrix4 = Matrix4::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const ZERO: Matrix4 = Matrix4::from_rows([[0.0; 4]; 4]);

    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn from_translation(t: Vec3) -> Self {
        let mut r = Self::IDENTITY;
        r.set_translation(t);
        r
    }

    pub fn from_scale(s: Vec3) -> Self {
        Self::from_rows([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation of `angle` radians about `axis` (normalized internally).
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let u = axis.normalize();
        let (sine, cosine) = angle.sin_cos();
        let t = 1.0 - cosine;

        Self::from_rows([
            [u.x * u.x * t + cosine, u.x * u.y * t + u.z * sine, u.x * u.z * t - u.y * sine, 0.0],
            [u.x * u.y * t - u.z * sine, u.y * u.y * t + cosine, u.y * u.z * t + u.x * sine, 0.0],
            [u.x * u.z * t + u.y * sine, u.y * u.z * t - u.x * sine, u.z * u.z * t + cosine, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// World-to-camera matrix for an eye at `eye` looking at `center`.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let forward = (center - eye).normalize();
        let side = forward.cross(up).normalize();
        let up = side.cross(forward);

        let rotation = Self::from_rows([
            [side.x, up.x, -forward.x, 0.0],
            [side.y, up.y, -forward.y, 0.0],
            [side.z, up.z, -forward.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        Self::from_translation(-eye) * rotation
    }

    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let i_width = 1.0 / (right - left);
        let i_height = 1.0 / (top - bottom);
        let i_depth = 1.0 / (far - near);

        Self::from_rows([
            [2.0 * i_width, 0.0, 0.0, 0.0],
            [0.0, 2.0 * i_height, 0.0, 0.0],
            [0.0, 0.0, -2.0 * i_depth, 0.0],
            [
                -(right + left) * i_width,
                -(top + bottom) * i_height,
                -(far + near) * i_depth,
                1.0,
            ],
        ])
    }

    /// Maps pixel coordinates `[0, w] x [0, h]` onto normalized device coordinates.
    pub fn screen_ortho(viewport: IVec2) -> Self {
        Self::from_rows([
            [2.0 / viewport.x as f32, 0.0, 0.0, 0.0],
            [0.0, 2.0 / viewport.y as f32, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [-1.0, -1.0, 0.0, 1.0],
        ])
    }

    /// Rotation taking +Z onto `target_dir`, with +Y as close to `up_dir` as possible.
    pub fn align_z_axis_with_target_dir(target_dir: Vec3, up_dir: Vec3) -> Self {
        let target_dir = if target_dir.length() == 0.0 { Vec3::Z } else { target_dir };
        let mut up_dir = if up_dir.length() == 0.0 { Vec3::Y } else { up_dir };

        // Parallel up and target: pick any perpendicular up instead.
        if up_dir.cross(target_dir).length() == 0.0 {
            up_dir = target_dir.cross(Vec3::X);
            if up_dir.length() == 0.0 {
                up_dir = target_dir.cross(Vec3::Z);
            }
        }

        let perp = up_dir.cross(target_dir);
        let target_up = target_dir.cross(perp);

        let x = perp.normalize();
        let y = target_up.normalize();
        let z = target_dir.normalize();

        Self::from_rows([
            [x.x, x.y, x.z, 0.0],
            [y.x, y.y, y.z, 0.0],
            [z.x, z.y, z.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation taking `from_dir` onto `to_dir` while keeping `up_dir` up.
    /// A zero `from_dir` yields identity.
    pub fn rotation_with_up_dir(from_dir: Vec3, to_dir: Vec3, up_dir: Vec3) -> Self {
        if from_dir.length() == 0.0 {
            return Self::IDENTITY;
        }
        let from_to_z = Self::align_z_axis_with_target_dir(from_dir, Vec3::Y).transposed();
        let z_to_target = Self::align_z_axis_with_target_dir(to_dir, up_dir);
        from_to_z * z_to_target
    }

    pub fn is_affine(&self) -> bool {
        let m = &self.m;
        m[0][3] == 0.0 && m[1][3] == 0.0 && m[2][3] == 0.0 && m[3][3] == 1.0
    }

    pub fn transposed(&self) -> Self {
        let m = &self.m;
        Self::from_rows([
            [m[0][0], m[1][0], m[2][0], m[3][0]],
            [m[0][1], m[1][1], m[2][1], m[3][1]],
            [m[0][2], m[1][2], m[2][2], m[3][2]],
            [m[0][3], m[1][3], m[2][3], m[3][3]],
        ])
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.m;

        let s0 = m[0][0] * m[1][1] - m[1][0] * m[0][1];
        let s1 = m[0][0] * m[1][2] - m[1][0] * m[0][2];
        let s2 = m[0][0] * m[1][3] - m[1][0] * m[0][3];
        let s3 = m[0][1] * m[1][2] - m[1][1] * m[0][2];
        let s4 = m[0][1] * m[1][3] - m[1][1] * m[0][3];
        let s5 = m[0][2] * m[1][3] - m[1][2] * m[0][3];

        let c5 = m[2][2] * m[3][3] - m[3][2] * m[2][3];
        let c4 = m[2][1] * m[3][3] - m[3][1] * m[2][3];
        let c3 = m[2][1] * m[3][2] - m[3][1] * m[2][2];
        let c2 = m[2][0] * m[3][3] - m[3][0] * m[2][3];
        let c1 = m[2][0] * m[3][2] - m[3][0] * m[2][2];
        let c0 = m[2][0] * m[3][1] - m[3][0] * m[2][1];

        s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
    }

    /// Inverse of the matrix, or identity when it is singular.
    ///
    /// Affine matrices go through the closed-form cofactor inverse of the
    /// upper 3x3; projective ones fall back to Gauss-Jordan elimination.
    pub fn inverse(&self) -> Self {
        if !self.is_affine() {
            return self.gauss_jordan_inverse();
        }

        let m = &self.m;
        let mut s = Self::from_rows([
            [
                m[1][1] * m[2][2] - m[2][1] * m[1][2],
                m[2][1] * m[0][2] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[1][1] * m[0][2],
                0.0,
            ],
            [
                m[2][0] * m[1][2] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[2][0] * m[0][2],
                m[1][0] * m[0][2] - m[0][0] * m[1][2],
                0.0,
            ],
            [
                m[1][0] * m[2][1] - m[2][0] * m[1][1],
                m[2][0] * m[0][1] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[1][0] * m[0][1],
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        let r = m[0][0] * s.m[0][0] + m[0][1] * s.m[1][0] + m[0][2] * s.m[2][0];

        if r.abs() >= 1.0 {
            for row in s.m.iter_mut().take(3) {
                for v in row.iter_mut().take(3) {
                    *v /= r;
                }
            }
        } else {
            let mr = r.abs() / f32::MIN_POSITIVE;
            for row in s.m.iter_mut().take(3) {
                for v in row.iter_mut().take(3) {
                    if mr > v.abs() {
                        *v /= r;
                    } else {
                        return Self::IDENTITY;
                    }
                }
            }
        }

        for j in 0..3 {
            s.m[3][j] = -m[3][0] * s.m[0][j] - m[3][1] * s.m[1][j] - m[3][2] * s.m[2][j];
        }

        s
    }

    fn gauss_jordan_inverse(&self) -> Self {
        let mut t = self.m;
        let mut s = Self::IDENTITY.m;

        // Forward elimination with partial pivoting.
        for i in 0..3 {
            let mut pivot = i;
            let mut pivot_size = t[i][i].abs();

            for (j, row) in t.iter().enumerate().skip(i + 1) {
                let size = row[i].abs();
                if size > pivot_size {
                    pivot = j;
                    pivot_size = size;
                }
            }

            if pivot_size == 0.0 {
                return Self::IDENTITY;
            }

            if pivot != i {
                t.swap(i, pivot);
                s.swap(i, pivot);
            }

            for j in (i + 1)..4 {
                let f = t[j][i] / t[i][i];
                for k in 0..4 {
                    t[j][k] -= f * t[i][k];
                    s[j][k] -= f * s[i][k];
                }
            }
        }

        // Backward substitution.
        for i in (0..4).rev() {
            let f = t[i][i];
            if f == 0.0 {
                return Self::IDENTITY;
            }

            for k in 0..4 {
                t[i][k] /= f;
                s[i][k] /= f;
            }

            for j in 0..i {
                let f = t[j][i];
                for k in 0..4 {
                    t[j][k] -= f * t[i][k];
                    s[j][k] -= f * s[i][k];
                }
            }
        }

        Self::from_rows(s)
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[3][0], self.m[3][1], self.m[3][2])
    }

    pub fn set_translation(&mut self, t: Vec3) {
        self.m[3] = [t.x, t.y, t.z, 1.0];
    }

    /// Translates in the matrix's local frame (`self = T(v) * self`).
    pub fn translate(&mut self, v: Vec3) {
        for i in 0..4 {
            self.m[3][i] += v.x * self.m[0][i] + v.y * self.m[1][i] + v.z * self.m[2][i];
        }
    }

    /// Scales the local axes (`self = S(s) * self`).
    pub fn scale(&mut self, s: Vec3) {
        for (row, factor) in self.m.iter_mut().zip(s.to_array()) {
            for v in row.iter_mut() {
                *v *= factor;
            }
        }
    }

    /// Pre-multiplies by an XYZ Euler rotation given in radians.
    pub fn rotate(&mut self, r: Vec3) {
        let (sin_rx, cos_rx) = r.x.sin_cos();
        let (sin_ry, cos_ry) = r.y.sin_cos();
        let (sin_rz, cos_rz) = r.z.sin_cos();

        let rot = [
            [cos_rz * cos_ry, sin_rz * cos_ry, -sin_ry],
            [
                -sin_rz * cos_rx + cos_rz * sin_ry * sin_rx,
                cos_rz * cos_rx + sin_rz * sin_ry * sin_rx,
                cos_ry * sin_rx,
            ],
            [
                sin_rz * sin_rx + cos_rz * sin_ry * cos_rx,
                -cos_rz * sin_rx + sin_rz * sin_ry * cos_rx,
                cos_ry * cos_rx,
            ],
        ];

        let p = self.m;
        for (i, r) in rot.iter().enumerate() {
            for j in 0..4 {
                self.m[i][j] = p[0][j] * r[0] + p[1][j] * r[1] + p[2][j] * r[2];
            }
        }
    }

    /// Local X, Y and Z axes as stored in the first three rows.
    pub fn x_axis(&self) -> Vec3 {
        Vec3::new(self.m[0][0], self.m[0][1], self.m[0][2])
    }

    pub fn y_axis(&self) -> Vec3 {
        Vec3::new(self.m[1][0], self.m[1][1], self.m[1][2])
    }

    pub fn z_axis(&self) -> Vec3 {
        Vec3::new(self.m[2][0], self.m[2][1], self.m[2][2])
    }

    /// Transforms a point, ignoring the projective column.
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0],
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1],
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2],
        )
    }

    /// Transforms a point and divides by the resulting `w` when it is non-zero.
    pub fn project_point(&self, v: Vec3) -> Vec3 {
        let h = self.transform_vec4(v.extend(1.0));
        if h.w != 0.0 {
            h.truncate() / h.w
        } else {
            h.truncate()
        }
    }

    /// Transforms a direction (no translation).
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
        )
    }

    /// Multiplies by the transposed upper 3x3. Call it on the inverse to carry normals.
    pub fn transform_normal(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    pub fn transform_vec4(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
            m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
        )
    }

    pub fn abs_diff_eq(&self, other: &Matrix4, max_abs_diff: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= max_abs_diff)
    }

    /// Flat row-major copy, ready for a uniform buffer.
    pub fn to_array(&self) -> [f32; 16] {
        bytemuck::cast(self.m)
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let mut r = Matrix4::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                r.m[i][j] = self.m[i][0] * rhs.m[0][j]
                    + self.m[i][1] * rhs.m[1][j]
                    + self.m[i][2] * rhs.m[2][j]
                    + self.m[i][3] * rhs.m[3][j];
            }
        }
        r
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Matrix4) {
        *self = *self * rhs;
    }
}

impl Mul<f32> for Matrix4 {
    type Output = Matrix4;

    fn mul(mut self, rhs: f32) -> Matrix4 {
        self.m.iter_mut().flatten().for_each(|v| *v *= rhs);
        self
    }
}

impl Add for Matrix4 {
    type Output = Matrix4;

    fn add(mut self, rhs: Matrix4) -> Matrix4 {
        for (a, b) in self.m.iter_mut().flatten().zip(rhs.m.iter().flatten()) {
            *a += b;
        }
        self
    }
}

impl Sub for Matrix4 {
    type Output = Matrix4;

    fn sub(mut self, rhs: Matrix4) -> Matrix4 {
        for (a, b) in self.m.iter_mut().flatten().zip(rhs.m.iter().flatten()) {
            *a -= b;
        }
        self
    }
}

impl Index<usize> for Matrix4 {
    type Output = [f32; 4];

    fn index(&self, row: usize) -> &[f32; 4] {
        &self.m[row]
    }
}

impl IndexMut<usize> for Matrix4 {
    fn index_mut(&mut self, row: usize) -> &mut [f32; 4] {
        &mut self.m[row]
    }
}

// A row-vector matrix is the transpose of glam's column-vector matrix, so the
// rows here are glam's columns and the memory layout is identical.
impl From<Matrix4> for Mat4 {
    fn from(m: Matrix4) -> Mat4 {
        Mat4::from_cols_array_2d(&m.m)
    }
}

impl From<Mat4> for Matrix4 {
    fn from(m: Mat4) -> Matrix4 {
        Matrix4::from_rows(m.to_cols_array_2d())
    }
}
