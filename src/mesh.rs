//! GPU mesh primitives and spatial transforms.
//!
//! The backdrop needs exactly two primitives: an axis-aligned box for cubelet
//! bodies and a +Z-facing quad for stickers. Geometry is generated CPU-side
//! (so it can be tested without a device) and uploaded once; meshes are
//! immutable after creation.

use crate::gpu::GpuContext;
use glam::{Mat4, Quat, Vec3};

/// A vertex with position and normal. Solid-color shading needs nothing else.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex3d {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Vertices and indices for a box of the given edge length, centered at the
/// origin. Each face has its own vertices for flat shading; CCW winding.
pub fn box_geometry(size: f32) -> (Vec<Vertex3d>, Vec<u32>) {
    let h = size * 0.5;
    #[rustfmt::skip]
    let vertices = vec![
        // Front face (Z+)
        Vertex3d::new([-h, -h,  h], [ 0.0,  0.0,  1.0]),
        Vertex3d::new([ h, -h,  h], [ 0.0,  0.0,  1.0]),
        Vertex3d::new([ h,  h,  h], [ 0.0,  0.0,  1.0]),
        Vertex3d::new([-h,  h,  h], [ 0.0,  0.0,  1.0]),
        // Back face (Z-)
        Vertex3d::new([ h, -h, -h], [ 0.0,  0.0, -1.0]),
        Vertex3d::new([-h, -h, -h], [ 0.0,  0.0, -1.0]),
        Vertex3d::new([-h,  h, -h], [ 0.0,  0.0, -1.0]),
        Vertex3d::new([ h,  h, -h], [ 0.0,  0.0, -1.0]),
        // Top face (Y+)
        Vertex3d::new([-h,  h,  h], [ 0.0,  1.0,  0.0]),
        Vertex3d::new([ h,  h,  h], [ 0.0,  1.0,  0.0]),
        Vertex3d::new([ h,  h, -h], [ 0.0,  1.0,  0.0]),
        Vertex3d::new([-h,  h, -h], [ 0.0,  1.0,  0.0]),
        // Bottom face (Y-)
        Vertex3d::new([-h, -h, -h], [ 0.0, -1.0,  0.0]),
        Vertex3d::new([ h, -h, -h], [ 0.0, -1.0,  0.0]),
        Vertex3d::new([ h, -h,  h], [ 0.0, -1.0,  0.0]),
        Vertex3d::new([-h, -h,  h], [ 0.0, -1.0,  0.0]),
        // Right face (X+)
        Vertex3d::new([ h, -h,  h], [ 1.0,  0.0,  0.0]),
        Vertex3d::new([ h, -h, -h], [ 1.0,  0.0,  0.0]),
        Vertex3d::new([ h,  h, -h], [ 1.0,  0.0,  0.0]),
        Vertex3d::new([ h,  h,  h], [ 1.0,  0.0,  0.0]),
        // Left face (X-)
        Vertex3d::new([-h, -h, -h], [-1.0,  0.0,  0.0]),
        Vertex3d::new([-h, -h,  h], [-1.0,  0.0,  0.0]),
        Vertex3d::new([-h,  h,  h], [-1.0,  0.0,  0.0]),
        Vertex3d::new([-h,  h, -h], [-1.0,  0.0,  0.0]),
    ];

    #[rustfmt::skip]
    let indices: Vec<u32> = vec![
        0,  1,  2,  2,  3,  0,  // front
        4,  5,  6,  6,  7,  4,  // back
        8,  9,  10, 10, 11, 8,  // top
        12, 13, 14, 14, 15, 12, // bottom
        16, 17, 18, 18, 19, 16, // right
        20, 21, 22, 22, 23, 20, // left
    ];

    (vertices, indices)
}

/// Vertices and indices for a square quad of the given side length, centered
/// at the origin, facing +Z.
pub fn quad_geometry(size: f32) -> (Vec<Vertex3d>, Vec<u32>) {
    let h = size * 0.5;
    let n = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex3d::new([-h, -h, 0.0], n),
        Vertex3d::new([h, -h, 0.0], n),
        Vertex3d::new([h, h, 0.0], n),
        Vertex3d::new([-h, h, 0.0], n),
    ];
    let indices = vec![0, 1, 2, 2, 3, 0];
    (vertices, indices)
}

/// GPU-resident geometry with vertex and index buffers.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Upload raw vertex and index data.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex3d], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// A box with the given edge length, centered at the origin.
    pub fn cube(gpu: &GpuContext, size: f32) -> Self {
        let (vertices, indices) = box_geometry(size);
        Self::new(gpu, &vertices, &indices)
    }

    /// A +Z-facing square quad with the given side length.
    pub fn quad(gpu: &GpuContext, size: f32) -> Self {
        let (vertices, indices) = quad_geometry(size);
        Self::new(gpu, &vertices, &indices)
    }
}

/// Position, rotation, and scale, combined into a matrix in SRT order.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_geometry_spans_its_size() {
        let (vertices, indices) = box_geometry(0.95);
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for v in &vertices {
            for c in v.position {
                assert!(c.abs() <= 0.475 + 1e-6);
            }
        }
    }

    #[test]
    fn quad_faces_positive_z() {
        let (vertices, indices) = quad_geometry(0.78);
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 6);
        for v in &vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn transform_matrix_applies_scale_then_translation() {
        let t = Transform::new()
            .position(Vec3::new(6.0, 0.3, 0.0))
            .uniform_scale(0.85);
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(6.85, 0.3, 0.0)).length() < 1e-6);
    }
}
