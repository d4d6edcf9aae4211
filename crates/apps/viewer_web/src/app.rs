//! Browser-independent half of the viewer: asset loading, per-frame stepping,
//! and the geometry handed to the GPU backend.

use foundation::math::{Mat4, Vec3};
use formats::{CameraConfig, FlightDataset, GlobeConfig, GlobeScene, build_globe_scene};
use gpu::{
    Camera3D, ColorVertex, GlobeUniforms, LineBatch, MeshVertex, RasterState, RenderCommand,
    RenderFrame, Renderer, SphereInstance, SphereMesh, marker_instances, point_vertices,
};
use runtime::{FrameReport, GlobeViewState, InputEvent, InputQueue, Viewport};
use scene::components::{MaterialKind, Role, Shape3D, TextureSlot};
use scene::prefabs::{apply_view_rotation, set_light_rig_angle};

use crate::textures::{MAX_TEXTURE_DIMENSION, TextureImage};

/// Where the viewer reads its files from. Paths are relative to the data root.
#[allow(async_fn_in_trait)]
pub trait AssetSource {
    async fn fetch_text(&self, path: &str) -> Result<String, String>;
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, String>;
}

#[derive(Debug)]
pub struct LoadedGlobe {
    pub dataset: FlightDataset,
    pub config: GlobeConfig,
    pub day: TextureImage,
    pub displacement: TextureImage,
    /// Non-fatal problems (missing config, undecodable textures).
    pub warnings: Vec<String>,
}

/// Fetch datasets, optional config and textures.
///
/// Missing datasets are fatal. A missing config falls back to defaults and
/// textures fall back to 1x1 placeholders; both are reported as warnings.
pub async fn load_globe_assets(source: &impl AssetSource) -> Result<LoadedGlobe, String> {
    let mut warnings = Vec::new();

    let airports = source.fetch_text(formats::AIRPORTS_FILE_NAME).await?;
    let routes = source.fetch_text(formats::ROUTES_FILE_NAME).await?;
    let dataset = FlightDataset::from_json_strs(&airports, &routes).map_err(|e| e.to_string())?;

    let config = match source.fetch_text(formats::CONFIG_FILE_NAME).await {
        Ok(text) => GlobeConfig::from_json_str(&text).map_err(|e| e.to_string())?,
        Err(err) => {
            warnings.push(format!("{}: {err}; using defaults", formats::CONFIG_FILE_NAME));
            GlobeConfig::default()
        }
    };

    let day = load_texture(
        source,
        config.scene.textures.path(TextureSlot::EarthDay),
        TextureImage::day_placeholder,
        &mut warnings,
    )
    .await;
    let displacement = load_texture(
        source,
        config.scene.textures.path(TextureSlot::EarthDisplacement),
        TextureImage::flat_displacement,
        &mut warnings,
    )
    .await;

    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    Ok(LoadedGlobe {
        dataset,
        config,
        day,
        displacement,
        warnings,
    })
}

async fn load_texture(
    source: &impl AssetSource,
    path: &str,
    fallback: fn() -> TextureImage,
    warnings: &mut Vec<String>,
) -> TextureImage {
    let bytes = match source.fetch_bytes(path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warnings.push(format!("texture {path}: {err}; using placeholder"));
            return fallback();
        }
    };
    match TextureImage::decode(&bytes, MAX_TEXTURE_DIMENSION) {
        Ok(texture) => texture,
        Err(err) => {
            warnings.push(format!("texture {path}: {err}; using placeholder"));
            fallback()
        }
    }
}

pub fn camera_from_config(config: &CameraConfig) -> Camera3D {
    let [px, py, pz] = config.position;
    let [tx, ty, tz] = config.target;
    Camera3D::look_at(
        Vec3::new(px, py, pz),
        Vec3::new(tx, ty, tz),
        config.fov_y_deg.to_radians(),
        config.near,
        config.far,
    )
}

/// Static geometry uploaded once at startup.
#[derive(Debug, Clone)]
pub struct GlobeGeometry {
    /// Earth sphere in group space.
    pub earth: SphereMesh,
    pub displacement_scale: f64,
    /// Atmosphere shell in world space.
    pub atmosphere: SphereMesh,
    /// Unit sphere instanced for every marker.
    pub marker_mesh: SphereMesh,
    pub markers: Vec<SphereInstance>,
    pub lines: LineBatch,
    pub stars: Vec<ColorVertex>,
    pub raster: GlobeRaster,
}

/// Per-pipeline blend and cull settings taken from the scene materials.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct GlobeRaster {
    pub earth: RasterState,
    pub atmosphere: RasterState,
    pub markers: RasterState,
    pub lines: RasterState,
    pub stars: RasterState,
}

impl GlobeRaster {
    pub fn from_frame(frame: &RenderFrame) -> Self {
        Self {
            earth: frame.raster_state(Role::Earth),
            atmosphere: frame.raster_state(Role::Atmosphere),
            markers: frame.raster_state(Role::Marker),
            lines: frame.raster_state(Role::FlightArc),
            stars: frame.raster_state(Role::Starfield),
        }
    }
}

impl GlobeGeometry {
    pub fn from_frame(frame: &RenderFrame, scene: &GlobeScene) -> Self {
        let earth_cmd = frame.with_role(Role::Earth).next();
        let displacement_scale = earth_cmd
            .and_then(|cmd| match cmd.material.kind {
                MaterialKind::Standard {
                    displacement_map: Some(_),
                    displacement_scale,
                    ..
                } => Some(displacement_scale),
                _ => None,
            })
            .unwrap_or(0.0);

        let marker_mesh = frame
            .with_role(Role::Marker)
            .find_map(|cmd| match cmd.shape {
                Shape3D::Sphere {
                    width_segments,
                    height_segments,
                    ..
                } => Some(SphereMesh::generate(1.0, width_segments, height_segments)),
                _ => None,
            })
            .unwrap_or_else(|| SphereMesh::generate(1.0, 32, 24));

        Self {
            earth: earth_cmd.and_then(|c| sphere_in(c, c.model)).unwrap_or_else(empty_mesh),
            displacement_scale,
            atmosphere: frame
                .with_role(Role::Atmosphere)
                .next()
                .and_then(|c| sphere_in(c, c.world))
                .unwrap_or_else(empty_mesh),
            marker_mesh,
            markers: marker_instances(frame),
            lines: LineBatch::from_frame(frame, &scene.world),
            stars: point_vertices(frame, &scene.world),
            raster: GlobeRaster::from_frame(frame),
        }
    }
}

fn empty_mesh() -> SphereMesh {
    SphereMesh {
        vertices: Vec::new(),
        indices: Vec::new(),
    }
}

/// Sphere mesh for `cmd` with positions and normals mapped through `m`.
fn sphere_in(cmd: &RenderCommand, m: Mat4) -> Option<SphereMesh> {
    let Shape3D::Sphere {
        radius,
        width_segments,
        height_segments,
    } = cmd.shape
    else {
        return None;
    };
    let mut mesh = SphereMesh::generate(radius, width_segments, height_segments);
    if m != Mat4::IDENTITY {
        for v in &mut mesh.vertices {
            let [x, y, z] = v.position.map(f64::from);
            let [nx, ny, nz] = v.normal.map(f64::from);
            let normal = m
                .transform_vector(Vec3::new(nx, ny, nz))
                .try_normalize()
                .unwrap_or(Vec3::new(nx, ny, nz));
            *v = MeshVertex {
                position: m.transform_point(Vec3::new(x, y, z)).as_f32_array(),
                normal: normal.as_f32_array(),
                uv: v.uv,
            };
        }
    }
    Some(mesh)
}

/// The running globe: scene, view state, and camera.
#[derive(Debug)]
pub struct GlobeApp {
    scene: GlobeScene,
    config: GlobeConfig,
    camera: Camera3D,
    view: GlobeViewState,
    input: InputQueue,
    last_timestamp_ms: Option<f64>,
}

impl GlobeApp {
    pub fn new(scene: GlobeScene, config: GlobeConfig, viewport: Viewport) -> Self {
        Self {
            camera: camera_from_config(&config.camera),
            view: GlobeViewState::new(config.animation, viewport),
            scene,
            config,
            input: InputQueue::new(),
            last_timestamp_ms: None,
        }
    }

    pub fn from_loaded(loaded: &LoadedGlobe, viewport: Viewport) -> Self {
        let scene = build_globe_scene(&loaded.dataset, &loaded.config);
        Self::new(scene, loaded.config.clone(), viewport)
    }

    pub fn scene(&self) -> &GlobeScene {
        &self.scene
    }

    pub fn view(&self) -> &GlobeViewState {
        &self.view
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.view.set_viewport(viewport);
    }

    /// Step the view state to an animation-frame timestamp (milliseconds)
    /// and copy the result onto the scene.
    ///
    /// The first call has a zero delta; timestamps that go backwards are
    /// treated as zero elapsed time.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameReport {
        let dt_s = self
            .last_timestamp_ms
            .map(|last| ((timestamp_ms - last) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.last_timestamp_ms = Some(timestamp_ms);

        let report = self.view.step_frame(dt_s, &mut self.input);
        let rotation = self.view.rotation();
        apply_view_rotation(&mut self.scene.world, self.scene.group, &rotation);
        set_light_rig_angle(
            &mut self.scene.world,
            &self.scene.light_rig,
            self.view.light_angle(),
        );
        report
    }

    pub fn geometry(&self) -> GlobeGeometry {
        GlobeGeometry::from_frame(&Renderer::collect(&self.scene.world), &self.scene)
    }

    /// Uniforms for group-space geometry and for world-space geometry.
    pub fn uniforms(&self) -> (GlobeUniforms, GlobeUniforms) {
        let world = &self.scene.world;
        let aspect = self.view.viewport().aspect();
        let lighting = Renderer::lighting(world);
        let displacement = self.config.scene.globe.displacement_scale;
        let group = GlobeUniforms::new(
            &self.camera,
            aspect,
            world.world_matrix(self.scene.group),
            &lighting,
            displacement,
        );
        let root =
            GlobeUniforms::new(&self.camera, aspect, Mat4::IDENTITY, &lighting, displacement);
        (group, root)
    }
}
