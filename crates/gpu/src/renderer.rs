use foundation::color::Rgb;
use foundation::math::{Mat4, Vec3};
use scene::components::{Blending, Light, Material, Role, Shape3D, Side};
use scene::entity::EntityId;
use scene::world::World;

/// Space a command's `model` matrix maps into.
///
/// Geometry under the globe group is uploaded once in group space and turned
/// on the GPU by the per-frame group matrix; everything else is already in
/// world space.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderSpace {
    Group,
    World,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderCommand {
    pub entity: EntityId,
    pub role: Option<Role>,
    pub shape: Shape3D,
    pub material: Material,
    pub space: RenderSpace,
    /// Object-to-`space` matrix.
    pub model: Mat4,
    /// Object-to-world matrix.
    pub world: Mat4,
}

/// Lights reduced to what the earth shader consumes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightingState {
    /// World-space unit vector pointing from the origin toward the sun.
    pub sun_direction: Vec3,
    pub sun_color: Rgb,
    pub sun_intensity: f32,
    pub ambient_color: Rgb,
    pub ambient_intensity: f32,
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            sun_direction: Vec3::X,
            sun_color: Rgb::WHITE,
            sun_intensity: 0.0,
            ambient_color: Rgb::WHITE,
            ambient_intensity: 0.0,
        }
    }
}

/// Triangle winding the rasterizer drops.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CullFace {
    Front,
    Back,
}

/// Blend and cull settings a pipeline takes from its material.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RasterState {
    pub blending: Blending,
    pub cull: Option<CullFace>,
}

impl Default for RasterState {
    fn default() -> Self {
        Self::from_material(&Material::basic(Rgb::WHITE))
    }
}

impl RasterState {
    /// Drawing a side means culling the opposite one.
    pub fn from_material(material: &Material) -> Self {
        let cull = match material.side {
            Side::Front => Some(CullFace::Back),
            Side::Back => Some(CullFace::Front),
            Side::Double => None,
        };
        Self {
            blending: material.blending,
            cull,
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderFrame {
    pub commands: Vec<RenderCommand>,
    pub lighting: LightingState,
}

impl RenderFrame {
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &RenderCommand> {
        self.commands.iter().filter(move |c| c.role == Some(role))
    }

    /// Raster state of the first command with `role`; default when absent.
    pub fn raster_state(&self, role: Role) -> RasterState {
        self.with_role(role)
            .next()
            .map(|c| RasterState::from_material(&c.material))
            .unwrap_or_default()
    }
}

pub struct Renderer;

impl Renderer {
    /// One command per visible drawable, in entity order.
    pub fn collect(world: &World) -> RenderFrame {
        let mut frame = RenderFrame {
            commands: Vec::new(),
            lighting: Self::lighting(world),
        };
        for (entity, _, drawable) in world.drawables_3d() {
            let world_matrix = world.world_matrix(entity);
            let (space, model) = match group_relative_matrix(world, entity) {
                Some(m) => (RenderSpace::Group, m),
                None => (RenderSpace::World, world_matrix),
            };
            frame.commands.push(RenderCommand {
                entity,
                role: world.role(entity),
                shape: drawable.shape,
                material: world
                    .material(entity)
                    .unwrap_or_else(|| Material::basic(Rgb::WHITE)),
                space,
                model,
                world: world_matrix,
            });
        }
        frame
    }

    /// Sum of ambient lights plus the first directional light.
    pub fn lighting(world: &World) -> LightingState {
        let mut state = LightingState::default();
        let mut have_sun = false;
        for (entity, _, light) in world.lights() {
            match light {
                Light::Directional {
                    color, intensity, ..
                } if !have_sun => {
                    let position = world.world_matrix(entity).transform_point(Vec3::ZERO);
                    if let Some(dir) = position.try_normalize() {
                        state.sun_direction = dir;
                    }
                    state.sun_color = color;
                    state.sun_intensity = intensity;
                    have_sun = true;
                }
                Light::Directional { .. } => {}
                Light::Ambient { color, intensity } => {
                    state.ambient_color = color;
                    state.ambient_intensity += intensity;
                }
            }
        }
        state
    }
}

/// Matrix from `entity` into the space of its nearest `GlobeGroup` ancestor,
/// or `None` when it has no such ancestor.
fn group_relative_matrix(world: &World, entity: EntityId) -> Option<Mat4> {
    let mut m = world
        .transform(entity)
        .map(|t| t.matrix())
        .unwrap_or(Mat4::IDENTITY);
    let mut current = world.parent(entity);
    // Bounded walk: parent cycles never reach a group.
    for _ in 0..64 {
        let p = current?;
        if world.role(p) == Some(Role::GlobeGroup) {
            return Some(m);
        }
        if let Some(t) = world.transform(p) {
            m = t.matrix() * m;
        }
        current = world.parent(p);
    }
    None
}
