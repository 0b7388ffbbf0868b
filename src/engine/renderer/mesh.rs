// Triangle meshes: CPU-side data, procedural generators, GPU upload

use super::{GpuContext, MeshVertex};
use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

/// Indexed triangle list kept on the CPU until upload
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Flat XZ plane centered at the origin, facing +Y, UVs spanning [0, 1]
    ///
    /// `resolution_x`/`resolution_z` are the number of subdivisions per side.
    pub fn plane(width: f32, length: f32, resolution_x: u32, resolution_z: u32) -> Self {
        let res_x = resolution_x.max(1);
        let res_z = resolution_z.max(1);

        let mut vertices = Vec::with_capacity(((res_x + 1) * (res_z + 1)) as usize);
        for z in 0..=res_z {
            let v = z as f32 / res_z as f32;
            for x in 0..=res_x {
                let u = x as f32 / res_x as f32;
                vertices.push(MeshVertex::new(
                    Vec3::new((u - 0.5) * width, 0.0, (v - 0.5) * length),
                    Vec3::Y,
                    Vec2::new(u, v),
                ));
            }
        }

        let row = res_x + 1;
        let mut indices = Vec::with_capacity((res_x * res_z * 6) as usize);
        for z in 0..res_z {
            for x in 0..res_x {
                let i = z * row + x;
                // Counter-clockwise seen from above
                indices.extend_from_slice(&[i, i + row, i + 1, i + 1, i + row, i + row + 1]);
            }
        }

        Self { vertices, indices }
    }

    /// Whether there is anything to draw
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Replace normals with area-weighted vertex normals from the triangles
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if a >= normals.len() || b >= normals.len() || c >= normals.len() {
                continue;
            }
            let pa = Vec3::from(self.vertices[a].position);
            let pb = Vec3::from(self.vertices[b].position);
            let pc = Vec3::from(self.vertices[c].position);
            let face = (pb - pa).cross(pc - pa);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal.try_normalize().unwrap_or(Vec3::Y).to_array();
        }
    }
}

/// GPU-resident triangle mesh
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl Mesh {
    /// Upload mesh data; returns None for empty meshes
    pub fn upload(gpu: &GpuContext, data: &MeshData, label: &str) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Some(Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_counts() {
        let plane = MeshData::plane(200.0, 200.0, 3, 3);
        assert_eq!(plane.vertices.len(), 16);
        assert_eq!(plane.indices.len(), 3 * 3 * 6);
    }

    #[test]
    fn test_plane_extent_is_centered() {
        let plane = MeshData::plane(10.0, 4.0, 3, 3);
        let xs: Vec<f32> = plane.vertices.iter().map(|v| v.position[0]).collect();
        let zs: Vec<f32> = plane.vertices.iter().map(|v| v.position[2]).collect();

        assert_relative_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -5.0);
        assert_relative_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 5.0);
        assert_relative_eq!(zs.iter().cloned().fold(f32::MAX, f32::min), -2.0);
        assert_relative_eq!(zs.iter().cloned().fold(f32::MIN, f32::max), 2.0);
        assert!(plane.vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn test_plane_indices_in_range() {
        let plane = MeshData::plane(1.0, 1.0, 4, 2);
        let count = plane.vertices.len() as u32;
        assert!(plane.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_plane_winding_faces_up() {
        let mut plane = MeshData::plane(2.0, 2.0, 1, 1);
        plane.compute_normals();
        for vertex in &plane.vertices {
            assert_relative_eq!(vertex.normal[1], 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_compute_normals_for_wall() {
        let mut wall = MeshData {
            vertices: vec![
                MeshVertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO, Vec2::ZERO),
                MeshVertex::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, Vec2::ZERO),
                MeshVertex::new(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, Vec2::ZERO),
            ],
            indices: vec![0, 1, 2],
        };
        wall.compute_normals();
        assert_eq!(wall.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_mesh() {
        assert!(MeshData::default().is_empty());
    }
}
