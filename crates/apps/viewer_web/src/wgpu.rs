#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use gpu::{
        ColorVertex, CullFace, GlobeUniforms, MeshVertex, RasterState, SphereInstance, SphereMesh,
    };
    use scene::components::Blending;
    use std::borrow::Cow;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use crate::app::GlobeGeometry;
    use crate::textures::TextureImage;

    #[derive(Debug)]
    struct MeshBuffers {
        vertices: ::wgpu::Buffer,
        indices: ::wgpu::Buffer,
        index_count: u32,
    }

    #[derive(Debug)]
    struct VertexList {
        buffer: ::wgpu::Buffer,
        count: u32,
    }

    #[derive(Debug)]
    pub struct WgpuContext {
        _instance: &'static ::wgpu::Instance,
        surface: ::wgpu::Surface<'static>,
        device: ::wgpu::Device,
        queue: ::wgpu::Queue,
        config: ::wgpu::SurfaceConfiguration,
        canvas: web_sys::HtmlCanvasElement,
        depth_view: ::wgpu::TextureView,
        group_uniforms: ::wgpu::Buffer,
        root_uniforms: ::wgpu::Buffer,
        group_bind_group: ::wgpu::BindGroup,
        root_bind_group: ::wgpu::BindGroup,
        earth_textures: ::wgpu::BindGroup,
        points_pipeline: ::wgpu::RenderPipeline,
        earth_pipeline: ::wgpu::RenderPipeline,
        markers_pipeline: ::wgpu::RenderPipeline,
        lines_pipeline: ::wgpu::RenderPipeline,
        atmosphere_pipeline: ::wgpu::RenderPipeline,
        stars: VertexList,
        earth: MeshBuffers,
        marker_mesh: MeshBuffers,
        marker_instances: VertexList,
        group_lines: VertexList,
        root_lines: VertexList,
        atmosphere: MeshBuffers,
    }

    const GLOBALS_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    group: mat4x4<f32>,
    sun_dir: vec4<f32>,
    sun_color: vec4<f32>,
    ambient: vec4<f32>,
    params: vec4<f32>,
    eye: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;
"#;

    // Stars and lines: pre-colored vertices.
    const COLOR_SHADER: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec4<f32>) -> VsOut {
    return VsOut(globals.view_proj * globals.group * vec4<f32>(position, 1.0), color);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

    const EARTH_SHADER: &str = r#"
@group(1) @binding(0)
var day_tex: texture_2d<f32>;
@group(1) @binding(1)
var height_tex: texture_2d<f32>;
@group(1) @binding(2)
var tex_sampler: sampler;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
) -> VsOut {
    let h = textureSampleLevel(height_tex, tex_sampler, uv, 0.0).r;
    let displaced = position + normal * (h * globals.params.x);
    let world = globals.group * vec4<f32>(displaced, 1.0);
    let n = (globals.group * vec4<f32>(normal, 0.0)).xyz;
    return VsOut(globals.view_proj * world, n, uv);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let l = normalize(globals.sun_dir.xyz);
    let diffuse = max(dot(n, l), 0.0) * globals.sun_dir.w * globals.sun_color.rgb;
    let base = textureSample(day_tex, tex_sampler, in.uv).rgb;
    return vec4<f32>(base * (globals.ambient.rgb + diffuse), 1.0);
}
"#;

    const MARKER_SHADER: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) center: vec3<f32>,
    @location(2) radius: f32,
    @location(3) color: vec4<f32>,
) -> VsOut {
    let world = globals.group * vec4<f32>(center + position * radius, 1.0);
    return VsOut(globals.view_proj * world, color);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

    // Fresnel-style glow on the inside of the shell.
    const ATMOSPHERE_SHADER: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> VsOut {
    return VsOut(globals.view_proj * vec4<f32>(position, 1.0), position, normal);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let v = normalize(globals.eye.xyz - in.world_pos);
    let intensity = pow(max(0.7 - dot(n, v), 0.0), 2.0);
    return vec4<f32>(0.3, 0.6, 1.0, 1.0) * intensity;
}
"#;

    const ADDITIVE: ::wgpu::BlendState = ::wgpu::BlendState {
        color: ::wgpu::BlendComponent {
            src_factor: ::wgpu::BlendFactor::One,
            dst_factor: ::wgpu::BlendFactor::One,
            operation: ::wgpu::BlendOperation::Add,
        },
        alpha: ::wgpu::BlendComponent {
            src_factor: ::wgpu::BlendFactor::One,
            dst_factor: ::wgpu::BlendFactor::One,
            operation: ::wgpu::BlendOperation::Add,
        },
    };

    const MESH_ATTRIBUTES: [::wgpu::VertexAttribute; 3] =
        ::wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
    const COLOR_ATTRIBUTES: [::wgpu::VertexAttribute; 2] =
        ::wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];
    const INSTANCE_ATTRIBUTES: [::wgpu::VertexAttribute; 3] =
        ::wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x4];

    fn mesh_layout(attributes: &[::wgpu::VertexAttribute]) -> ::wgpu::VertexBufferLayout<'_> {
        ::wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as ::wgpu::BufferAddress,
            step_mode: ::wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }

    fn color_layout() -> ::wgpu::VertexBufferLayout<'static> {
        ::wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as ::wgpu::BufferAddress,
            step_mode: ::wgpu::VertexStepMode::Vertex,
            attributes: &COLOR_ATTRIBUTES,
        }
    }

    fn create_depth_view(
        device: &::wgpu::Device,
        config: &::wgpu::SurfaceConfiguration,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some("routeglobe-depth"),
            size: ::wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: ::wgpu::TextureFormat::Depth24Plus,
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        tex.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    fn depth_state(write: bool) -> ::wgpu::DepthStencilState {
        ::wgpu::DepthStencilState {
            format: ::wgpu::TextureFormat::Depth24Plus,
            depth_write_enabled: write,
            depth_compare: ::wgpu::CompareFunction::LessEqual,
            stencil: ::wgpu::StencilState::default(),
            bias: ::wgpu::DepthBiasState::default(),
        }
    }

    fn blend_state(raster: RasterState) -> ::wgpu::BlendState {
        match raster.blending {
            Blending::Normal => ::wgpu::BlendState::ALPHA_BLENDING,
            Blending::Additive => ADDITIVE,
        }
    }

    fn cull_mode(raster: RasterState) -> Option<::wgpu::Face> {
        raster.cull.map(|face| match face {
            CullFace::Front => ::wgpu::Face::Front,
            CullFace::Back => ::wgpu::Face::Back,
        })
    }

    struct PipelineDesc<'a> {
        label: &'a str,
        layout: &'a ::wgpu::PipelineLayout,
        shader: &'a ::wgpu::ShaderModule,
        buffers: &'a [::wgpu::VertexBufferLayout<'a>],
        format: ::wgpu::TextureFormat,
        topology: ::wgpu::PrimitiveTopology,
        cull_mode: Option<::wgpu::Face>,
        blend: ::wgpu::BlendState,
        depth: Option<::wgpu::DepthStencilState>,
    }

    fn create_pipeline(device: &::wgpu::Device, desc: PipelineDesc<'_>) -> ::wgpu::RenderPipeline {
        device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(desc.layout),
            vertex: ::wgpu::VertexState {
                module: desc.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: desc.buffers,
            },
            fragment: Some(::wgpu::FragmentState {
                module: desc.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format: desc.format,
                    blend: Some(desc.blend),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                cull_mode: desc.cull_mode,
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: desc.depth,
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn create_shader(device: &::wgpu::Device, label: &str, body: &str) -> ::wgpu::ShaderModule {
        device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Owned(format!("{GLOBALS_SHADER}{body}"))),
        })
    }

    /// Buffers may not be empty; empty lists upload one zeroed element and
    /// draw nothing.
    fn vertex_list<T: bytemuck::Pod>(
        device: &::wgpu::Device,
        label: &str,
        items: &[T],
    ) -> VertexList {
        let zero = [T::zeroed()];
        let contents: &[u8] = if items.is_empty() {
            bytemuck::cast_slice::<T, u8>(&zero)
        } else {
            bytemuck::cast_slice::<T, u8>(items)
        };
        VertexList {
            buffer: device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: ::wgpu::BufferUsages::VERTEX,
            }),
            count: items.len() as u32,
        }
    }

    fn mesh_buffers(device: &::wgpu::Device, label: &str, mesh: &SphereMesh) -> MeshBuffers {
        let vertices = vertex_list(device, label, &mesh.vertices).buffer;
        let indices: &[u32] = if mesh.indices.is_empty() {
            &[0, 0, 0]
        } else {
            &mesh.indices
        };
        MeshBuffers {
            vertices,
            indices: device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: ::wgpu::BufferUsages::INDEX,
            }),
            index_count: mesh.indices.len() as u32,
        }
    }

    fn upload_texture(
        device: &::wgpu::Device,
        queue: &::wgpu::Queue,
        label: &str,
        image: &TextureImage,
        format: ::wgpu::TextureFormat,
    ) -> ::wgpu::TextureView {
        let size = ::wgpu::Extent3d {
            width: image.width.max(1),
            height: image.height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format,
            usage: ::wgpu::TextureUsages::TEXTURE_BINDING | ::wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            ::wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: ::wgpu::Origin3d::ZERO,
                aspect: ::wgpu::TextureAspect::All,
            },
            &image.rgba,
            ::wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(image.height),
            },
            size,
        );
        texture.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    pub async fn init_wgpu_from_canvas_id(
        canvas_id: &str,
        width: u32,
        height: u32,
        geometry: &GlobeGeometry,
        day: &TextureImage,
        displacement: &TextureImage,
    ) -> Result<WgpuContext, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window missing"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("document missing"))?;
        let canvas_elem = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas missing"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        canvas_elem.set_width(width.max(1));
        canvas_elem.set_height(height.max(1));

        // The surface must not outlive its instance; leak the instance for
        // the lifetime of the page.
        let instance: &'static ::wgpu::Instance = Box::leak(Box::new(::wgpu::Instance::new(
            &::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            },
        )));

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas_elem.clone()))
            .map_err(|e| JsValue::from_str(&format!("surface error: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter error: {e}")))?;

        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("routeglobe-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("device error: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .cloned()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().cloned())
            .ok_or_else(|| JsValue::from_str("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .cloned()
            .unwrap_or(::wgpu::CompositeAlphaMode::Auto);

        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        let globals_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("routeglobe-globals-bgl"),
            entries: &[::wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: ::wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: ::wgpu::BindingType::Buffer {
                    ty: ::wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_entry = |binding: u32, visibility: ::wgpu::ShaderStages| {
            ::wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: ::wgpu::BindingType::Texture {
                    sample_type: ::wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: ::wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }
        };
        let earth_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("routeglobe-earth-bgl"),
            entries: &[
                texture_entry(0, ::wgpu::ShaderStages::FRAGMENT),
                texture_entry(1, ::wgpu::ShaderStages::VERTEX),
                ::wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: ::wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: ::wgpu::BindingType::Sampler(::wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let uniform_buffer = |label: &str| {
            device.create_buffer(&::wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<GlobeUniforms>() as u64,
                usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let group_uniforms = uniform_buffer("routeglobe-group-globals");
        let root_uniforms = uniform_buffer("routeglobe-root-globals");

        let globals_bind_group = |label: &str, buffer: &::wgpu::Buffer| {
            device.create_bind_group(&::wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &globals_layout,
                entries: &[::wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            })
        };
        let group_bind_group = globals_bind_group("routeglobe-group-bg", &group_uniforms);
        let root_bind_group = globals_bind_group("routeglobe-root-bg", &root_uniforms);

        let day_view = upload_texture(
            &device,
            &queue,
            "routeglobe-earth-day",
            day,
            ::wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let height_view = upload_texture(
            &device,
            &queue,
            "routeglobe-earth-displacement",
            displacement,
            ::wgpu::TextureFormat::Rgba8Unorm,
        );
        let sampler = device.create_sampler(&::wgpu::SamplerDescriptor {
            label: Some("routeglobe-earth-sampler"),
            address_mode_u: ::wgpu::AddressMode::Repeat,
            address_mode_v: ::wgpu::AddressMode::ClampToEdge,
            mag_filter: ::wgpu::FilterMode::Linear,
            min_filter: ::wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let earth_textures = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("routeglobe-earth-bg"),
            layout: &earth_layout,
            entries: &[
                ::wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ::wgpu::BindingResource::TextureView(&day_view),
                },
                ::wgpu::BindGroupEntry {
                    binding: 1,
                    resource: ::wgpu::BindingResource::TextureView(&height_view),
                },
                ::wgpu::BindGroupEntry {
                    binding: 2,
                    resource: ::wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let globals_pipeline_layout =
            device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
                label: Some("routeglobe-globals-pipeline-layout"),
                bind_group_layouts: &[&globals_layout],
                immediate_size: 0,
            });
        let earth_pipeline_layout =
            device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
                label: Some("routeglobe-earth-pipeline-layout"),
                bind_group_layouts: &[&globals_layout, &earth_layout],
                immediate_size: 0,
            });

        let color_shader = create_shader(&device, "routeglobe-color-shader", COLOR_SHADER);
        let earth_shader = create_shader(&device, "routeglobe-earth-shader", EARTH_SHADER);
        let marker_shader = create_shader(&device, "routeglobe-marker-shader", MARKER_SHADER);
        let atmosphere_shader =
            create_shader(&device, "routeglobe-atmosphere-shader", ATMOSPHERE_SHADER);

        let points_pipeline = create_pipeline(
            &device,
            PipelineDesc {
                label: "routeglobe-stars-pipeline",
                layout: &globals_pipeline_layout,
                shader: &color_shader,
                buffers: &[color_layout()],
                format,
                topology: ::wgpu::PrimitiveTopology::PointList,
                cull_mode: None,
                blend: blend_state(geometry.raster.stars),
                depth: None,
            },
        );
        let earth_pipeline = create_pipeline(
            &device,
            PipelineDesc {
                label: "routeglobe-earth-pipeline",
                layout: &earth_pipeline_layout,
                shader: &earth_shader,
                buffers: &[mesh_layout(&MESH_ATTRIBUTES)],
                format,
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                cull_mode: cull_mode(geometry.raster.earth),
                blend: blend_state(geometry.raster.earth),
                depth: Some(depth_state(true)),
            },
        );
        let markers_pipeline = create_pipeline(
            &device,
            PipelineDesc {
                label: "routeglobe-markers-pipeline",
                layout: &globals_pipeline_layout,
                shader: &marker_shader,
                buffers: &[
                    mesh_layout(&MESH_ATTRIBUTES[..1]),
                    ::wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<SphereInstance>()
                            as ::wgpu::BufferAddress,
                        step_mode: ::wgpu::VertexStepMode::Instance,
                        attributes: &INSTANCE_ATTRIBUTES,
                    },
                ],
                format,
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                cull_mode: cull_mode(geometry.raster.markers),
                blend: blend_state(geometry.raster.markers),
                depth: Some(depth_state(true)),
            },
        );
        let lines_pipeline = create_pipeline(
            &device,
            PipelineDesc {
                label: "routeglobe-lines-pipeline",
                layout: &globals_pipeline_layout,
                shader: &color_shader,
                buffers: &[color_layout()],
                format,
                topology: ::wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                blend: blend_state(geometry.raster.lines),
                depth: Some(depth_state(false)),
            },
        );
        let atmosphere_pipeline = create_pipeline(
            &device,
            PipelineDesc {
                label: "routeglobe-atmosphere-pipeline",
                layout: &globals_pipeline_layout,
                shader: &atmosphere_shader,
                buffers: &[mesh_layout(&MESH_ATTRIBUTES[..2])],
                format,
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                cull_mode: cull_mode(geometry.raster.atmosphere),
                blend: blend_state(geometry.raster.atmosphere),
                depth: Some(depth_state(false)),
            },
        );

        Ok(WgpuContext {
            _instance: instance,
            surface,
            stars: vertex_list(&device, "routeglobe-stars", &geometry.stars),
            earth: mesh_buffers(&device, "routeglobe-earth", &geometry.earth),
            marker_mesh: mesh_buffers(&device, "routeglobe-marker-mesh", &geometry.marker_mesh),
            marker_instances: vertex_list(&device, "routeglobe-markers", &geometry.markers),
            group_lines: vertex_list(&device, "routeglobe-group-lines", &geometry.lines.group),
            root_lines: vertex_list(&device, "routeglobe-root-lines", &geometry.lines.world),
            atmosphere: mesh_buffers(&device, "routeglobe-atmosphere", &geometry.atmosphere),
            device,
            queue,
            config,
            canvas: canvas_elem,
            depth_view,
            group_uniforms,
            root_uniforms,
            group_bind_group,
            root_bind_group,
            earth_textures,
            points_pipeline,
            earth_pipeline,
            markers_pipeline,
            lines_pipeline,
            atmosphere_pipeline,
        })
    }

    pub fn resize_wgpu(ctx: &mut WgpuContext, width: u32, height: u32) {
        ctx.config.width = width.max(1);
        ctx.config.height = height.max(1);
        ctx.canvas.set_width(ctx.config.width);
        ctx.canvas.set_height(ctx.config.height);
        ctx.surface.configure(&ctx.device, &ctx.config);
        ctx.depth_view = create_depth_view(&ctx.device, &ctx.config);
    }

    pub fn render_globe(
        ctx: &WgpuContext,
        group: &GlobeUniforms,
        root: &GlobeUniforms,
    ) -> Result<(), JsValue> {
        let frame = ctx
            .surface
            .get_current_texture()
            .map_err(|e| JsValue::from_str(&format!("surface acquire failed: {e}")))?;
        let view = frame
            .texture
            .create_view(&::wgpu::TextureViewDescriptor::default());

        ctx.queue
            .write_buffer(&ctx.group_uniforms, 0, bytemuck::bytes_of(group));
        ctx.queue
            .write_buffer(&ctx.root_uniforms, 0, bytemuck::bytes_of(root));

        let mut encoder = ctx
            .device
            .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                label: Some("routeglobe-encoder"),
            });

        // Pass 1: clear to black and draw the starfield (no depth attachment).
        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("routeglobe-stars-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(::wgpu::Color::BLACK),
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            if ctx.stars.count > 0 {
                rpass.set_pipeline(&ctx.points_pipeline);
                rpass.set_bind_group(0, &ctx.root_bind_group, &[]);
                rpass.set_vertex_buffer(0, ctx.stars.buffer.slice(..));
                rpass.draw(0..ctx.stars.count, 0..1);
            }
        }

        // Pass 2: globe, markers, lines, then the atmosphere shell.
        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("routeglobe-globe-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Load,
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_view,
                    depth_ops: Some(::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(1.0),
                        store: ::wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            if ctx.earth.index_count > 0 {
                rpass.set_pipeline(&ctx.earth_pipeline);
                rpass.set_bind_group(0, &ctx.group_bind_group, &[]);
                rpass.set_bind_group(1, &ctx.earth_textures, &[]);
                rpass.set_vertex_buffer(0, ctx.earth.vertices.slice(..));
                rpass.set_index_buffer(ctx.earth.indices.slice(..), ::wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..ctx.earth.index_count, 0, 0..1);
            }

            if ctx.marker_instances.count > 0 && ctx.marker_mesh.index_count > 0 {
                rpass.set_pipeline(&ctx.markers_pipeline);
                rpass.set_bind_group(0, &ctx.group_bind_group, &[]);
                rpass.set_vertex_buffer(0, ctx.marker_mesh.vertices.slice(..));
                rpass.set_vertex_buffer(1, ctx.marker_instances.buffer.slice(..));
                rpass.set_index_buffer(
                    ctx.marker_mesh.indices.slice(..),
                    ::wgpu::IndexFormat::Uint32,
                );
                rpass.draw_indexed(
                    0..ctx.marker_mesh.index_count,
                    0,
                    0..ctx.marker_instances.count,
                );
            }

            rpass.set_pipeline(&ctx.lines_pipeline);
            if ctx.group_lines.count > 0 {
                rpass.set_bind_group(0, &ctx.group_bind_group, &[]);
                rpass.set_vertex_buffer(0, ctx.group_lines.buffer.slice(..));
                rpass.draw(0..ctx.group_lines.count, 0..1);
            }
            if ctx.root_lines.count > 0 {
                rpass.set_bind_group(0, &ctx.root_bind_group, &[]);
                rpass.set_vertex_buffer(0, ctx.root_lines.buffer.slice(..));
                rpass.draw(0..ctx.root_lines.count, 0..1);
            }

            if ctx.atmosphere.index_count > 0 {
                rpass.set_pipeline(&ctx.atmosphere_pipeline);
                rpass.set_bind_group(0, &ctx.root_bind_group, &[]);
                rpass.set_vertex_buffer(0, ctx.atmosphere.vertices.slice(..));
                rpass.set_index_buffer(
                    ctx.atmosphere.indices.slice(..),
                    ::wgpu::IndexFormat::Uint32,
                );
                rpass.draw_indexed(0..ctx.atmosphere.index_count, 0, 0..1);
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use gpu::GlobeUniforms;
    use wasm_bindgen::prelude::JsValue;

    use crate::app::GlobeGeometry;
    use crate::textures::TextureImage;

    #[derive(Debug, Default)]
    pub struct WgpuContext;

    pub async fn init_wgpu_from_canvas_id(
        _canvas_id: &str,
        _width: u32,
        _height: u32,
        _geometry: &GlobeGeometry,
        _day: &TextureImage,
        _displacement: &TextureImage,
    ) -> Result<WgpuContext, JsValue> {
        Err(JsValue::from_str(
            "wgpu initialization is only available on wasm32 targets",
        ))
    }

    pub fn resize_wgpu(_ctx: &mut WgpuContext, _width: u32, _height: u32) {}

    pub fn render_globe(
        _ctx: &WgpuContext,
        _group: &GlobeUniforms,
        _root: &GlobeUniforms,
    ) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "wgpu rendering is only available on wasm32 targets",
        ))
    }
}

pub use imp::{WgpuContext, init_wgpu_from_canvas_id, render_globe, resize_wgpu};
