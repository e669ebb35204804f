//! Sphere mesh generation and GPU upload

use std::f32::consts::PI;
use wgpu::util::DeviceExt;

/// Vertex with position, normal and texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// CPU-side triangle mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Unit UV sphere. `width_segments` runs around the equator, `height_segments` pole to pole.
    ///
    /// The texture's top row maps to the north pole (+Y) and `u` wraps once around the Y axis,
    /// so equirectangular planet maps apply without flipping.
    pub fn uv_sphere(width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut vertices =
            Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * 2.0 * PI;

                let position = [
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                ];

                vertices.push(MeshVertex {
                    position,
                    // Unit sphere: the normal is the position
                    normal: position,
                    uv: [u, v],
                });
            }
        }

        let row = width_segments + 1;
        let mut indices = Vec::new();
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // Pole rows collapse to a single triangle per segment
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Upload to GPU buffers
    pub fn upload(&self, device: &wgpu::Device, label: &str) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

/// Mesh resident on the GPU
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let mesh = Mesh::uv_sphere(32, 32);
        assert_eq!(mesh.vertices.len(), 33 * 33);
        // Two triangles per quad, minus one per segment at each pole
        assert_eq!(mesh.indices.len(), 3 * 32 * (2 * 32 - 2));
    }

    #[test]
    fn test_sphere_vertices_on_unit_sphere() {
        let mesh = Mesh::uv_sphere(16, 16);
        for vertex in &mesh.vertices {
            let [x, y, z] = vertex.position;
            let length = (x * x + y * y + z * z).sqrt();
            assert!((length - 1.0).abs() < 1e-5, "vertex off sphere: {length}");
            assert_eq!(vertex.position, vertex.normal);
        }
    }

    #[test]
    fn test_sphere_indices_in_range() {
        let mesh = Mesh::uv_sphere(16, 16);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_sphere_poles_and_uvs() {
        let mesh = Mesh::uv_sphere(8, 4);
        let first = mesh.vertices.first().unwrap();
        let last = mesh.vertices.last().unwrap();

        assert!((first.position[1] - 1.0).abs() < 1e-6);
        assert!((last.position[1] + 1.0).abs() < 1e-6);
        assert_eq!(first.uv, [0.0, 0.0]);
        assert_eq!(last.uv, [1.0, 1.0]);
    }

    #[test]
    fn test_degenerate_segments_are_raised() {
        let mesh = Mesh::uv_sphere(0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
        assert!(!mesh.indices.is_empty());
    }
}
