use glam::Vec3;
use web_sys as web;

use crate::constants::{ANCHOR_RADIUS_PX, ROPE_ALPHA, ROPE_WIDTH_PX};

pub const MAX_LETTERS: usize = 4;
pub const MAX_ROPES: usize = 8;

/// One letter, already projected to canvas UV space.
#[derive(Clone, Copy, Debug)]
pub struct LetterInstance {
    pub uv: [f32; 2],
    pub px_per_unit: f32,
    pub angle: f32,
    pub color: [f32; 3],
    pub highlight: f32,
    pub glyph: u32,
    pub metalness: f32,
    pub roughness: f32,
}

/// One rope line, both endpoints in canvas UV space (anchor first).
#[derive(Clone, Copy, Debug)]
pub struct RopeInstance {
    pub a_uv: [f32; 2],
    pub b_uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LetterPacked {
    pos_scale: [f32; 4],
    color: [f32; 4],
    meta: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct RopePacked {
    endpoints: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    resolution: [f32; 2],
    time: f32,
    letter_count: f32,
    letters: [LetterPacked; MAX_LETTERS],
    ropes: [RopePacked; MAX_ROPES],
    counts: [f32; 4],
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(letters_core::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_fullscreen"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_scene"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            width,
            height,
            time_accum: 0.0,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn render(
        &mut self,
        dt_sec: f32,
        letters: &[LetterInstance],
        ropes: &[RopeInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec;

        let mut u = SceneUniforms {
            resolution: [self.width as f32, self.height as f32],
            time: self.time_accum,
            letter_count: letters.len().min(MAX_LETTERS) as f32,
            letters: [LetterPacked {
                pos_scale: [0.0; 4],
                color: [0.0; 4],
                meta: [0.0; 4],
            }; MAX_LETTERS],
            ropes: [RopePacked {
                endpoints: [0.0; 4],
            }; MAX_ROPES],
            counts: [
                ropes.len().min(MAX_ROPES) as f32,
                ANCHOR_RADIUS_PX,
                ROPE_WIDTH_PX,
                ROPE_ALPHA,
            ],
        };
        for (i, l) in letters.iter().take(MAX_LETTERS).enumerate() {
            u.letters[i] = LetterPacked {
                pos_scale: [l.uv[0], l.uv[1], l.px_per_unit, l.angle],
                color: [l.color[0], l.color[1], l.color[2], l.highlight],
                meta: [l.glyph as f32, l.metalness, l.roughness, 0.0],
            };
        }
        for (i, r) in ropes.iter().take(MAX_ROPES).enumerate() {
            u.ropes[i] = RopePacked {
                endpoints: [r.a_uv[0], r.a_uv[1], r.b_uv[0], r.b_uv[1]],
            };
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.35,
                            g: 0.45,
                            b: 0.40,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// World-unit size of a letter glyph; used to turn a projected center into a
/// pixel scale for the SDF shader.
pub fn px_per_world_unit(uv_center: [f32; 2], uv_offset: [f32; 2], width: f32, height: f32) -> f32 {
    let dx = (uv_offset[0] - uv_center[0]) * width;
    let dy = (uv_offset[1] - uv_center[1]) * height;
    (dx * dx + dy * dy).sqrt()
}

/// Roll of a body around the view axis, for the flat glyph rendering.
pub fn roll_angle(orientation: glam::Quat) -> f32 {
    let x_axis = orientation * Vec3::X;
    x_axis.y.atan2(x_axis.x)
}
