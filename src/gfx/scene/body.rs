use std::ops::Range;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, SquareMatrix, Vector3};
use wgpu::Device;

use super::vertex::Vertex3D;
use crate::content::PlanetData;
use crate::gfx::geometry::GeometryData;
use crate::gfx::picking::SphereBound;
use crate::motion::BodyMotion;

/// Extra emissive applied while the cursor hovers a body.
const HIGHLIGHT_BOOST: f32 = 0.4;

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let vertices = geometry
            .vertices
            .iter()
            .zip(geometry.normals.iter())
            .map(|(&position, &normal)| Vertex3D { position, normal })
            .collect();

        Self {
            vertices,
            indices: geometry.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
            index_count: geometry.indices.len() as u32,
        }
    }

    fn upload(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// Per-body uniform content. MUST match the BodyUniform struct in
/// shader.wgsl exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct BodyUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    /// x = emissive strength, rest padding.
    params: [f32; 4],
}

pub struct BodyGpuResources {
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Sun,
    Planet,
    Ring,
    Probe,
    Drifter,
    Cursor,
}

/// One renderable scene entity. Bodies tagged with a `payload` are
/// selectable by the gesture raycast; the payload is handed back verbatim
/// on a confirmed selection.
pub struct Body {
    pub name: String,
    pub kind: BodyKind,
    pub mesh: Mesh,
    pub transform: Matrix4<f32>,
    pub color: [f32; 3],
    pub emissive: f32,
    pub highlight: bool,
    pub visible: bool,
    /// World-space bounding sphere radius for picking.
    pub bounding_radius: f32,
    pub payload: Option<Arc<PlanetData>>,
    pub motion: BodyMotion,
    pub gpu_resources: Option<BodyGpuResources>,
}

impl Body {
    pub fn new(name: impl Into<String>, kind: BodyKind, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            kind,
            mesh,
            transform: Matrix4::identity(),
            color: [1.0, 1.0, 1.0],
            emissive: 0.0,
            highlight: false,
            visible: true,
            bounding_radius: 1.0,
            payload: None,
            motion: BodyMotion::Fixed,
            gpu_resources: None,
        }
    }

    /// World-space position (the transform's translation column).
    pub fn position(&self) -> Vector3<f32> {
        self.transform.w.truncate()
    }

    pub fn bound(&self) -> SphereBound {
        SphereBound::new(self.position(), self.bounding_radius)
    }

    pub fn init_gpu_resources(&mut self, device: &Device, layout: &wgpu::BindGroupLayout) {
        self.mesh.upload(device);

        let uniform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Body Uniform Buffer"),
                contents: bytemuck::bytes_of(&self.uniform()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Body Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(BodyGpuResources {
            uniform_buffer,
            bind_group,
        });
    }

    /// Sync the current transform and material to the GPU.
    pub fn write_uniform(&self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            queue.write_buffer(
                &gpu_resources.uniform_buffer,
                0,
                bytemuck::bytes_of(&self.uniform()),
            );
        }
    }

    fn uniform(&self) -> BodyUniform {
        let emissive = if self.highlight {
            self.emissive + HIGHLIGHT_BOOST
        } else {
            self.emissive
        };
        BodyUniform {
            model: self.transform.into(),
            color: [self.color[0], self.color[1], self.color[2], 1.0],
            params: [emissive, 0.0, 0.0, 0.0],
        }
    }
}

pub trait DrawBody<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_body(&mut self, body: &'a Body);
}

impl<'a, 'b> DrawBody<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_body(&mut self, body: &'b Body) {
        if !body.visible {
            return;
        }
        if let Some(gpu_resources) = &body.gpu_resources {
            self.set_bind_group(1, &gpu_resources.bind_group, &[]);
            self.draw_mesh(&body.mesh);
        }
    }
}
