use crate::camera::Transformations;
use crate::math::Matrix4;

/// View uniform buffer data for GPU
///
/// Matrices are row-major for row vectors, which a column-major shader
/// reads as the transpose it expects for `M * v`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniform {
    pub view: [f32; 16],
    pub projection: [f32; 16],
    pub model_view_projection: [f32; 16],
    pub eye: [f32; 3],
    pub _pad: f32,
}

impl ViewUniform {
    pub fn new(view: &Matrix4, projection: &Matrix4, model_view_projection: &Matrix4, eye: [f32; 3]) -> Self {
        Self {
            view: view.to_array(),
            projection: projection.to_array(),
            model_view_projection: model_view_projection.to_array(),
            eye,
            _pad: 0.0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl From<&Transformations> for ViewUniform {
    fn from(t: &Transformations) -> Self {
        Self::new(&t.view, &t.projection, &t.model_view_projection, t.eye.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_uniform_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<ViewUniform>(), 3 * 64 + 16);
        assert_eq!(std::mem::size_of::<ViewUniform>() % 16, 0);
    }

    #[test]
    fn test_from_transformations() {
        let transform = Matrix4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let t = Transformations::new(Matrix4::IDENTITY, &transform, &Matrix4::IDENTITY);
        let u = ViewUniform::from(&t);
        assert_eq!(u.eye, [1.0, 2.0, 3.0]);
        assert_eq!(&u.view[12..15], &[-1.0, -2.0, -3.0]);
        assert_eq!(u.as_bytes().len(), std::mem::size_of::<ViewUniform>());
    }

    #[test]
    fn test_matrix_casts_to_bytes() {
        let bytes = bytemuck::bytes_of(&Matrix4::IDENTITY);
        assert_eq!(bytes.len(), 64);
    }
}
