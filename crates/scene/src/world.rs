use crate::components::{
    Drawable3D, Light, Material, PointCloud, PointCloudId, Polyline, PolylineId, Role, Transform,
    Visibility,
};
use crate::entity::EntityId;
use foundation::math::Mat4;

/// Upper bound on parent-chain length; deeper chains are treated as cycles.
const MAX_HIERARCHY_DEPTH: usize = 64;

#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    parents: Vec<Option<EntityId>>,
    visibility: Vec<Option<Visibility>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    materials: Vec<Option<Material>>,
    lights: Vec<Option<Light>>,
    roles: Vec<Option<Role>>,
    polylines: Vec<Polyline>,
    point_clouds: Vec<PointCloud>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId::from_slot(self.next_index as usize);
        self.next_index += 1;
        let idx = id.slot();
        self.ensure_capacity(idx);
        id
    }

    /// Spawn an entity with an identity transform attached to `parent`.
    pub fn spawn_child(&mut self, parent: EntityId) -> EntityId {
        let entity = self.spawn();
        self.set_transform(entity, Transform::identity());
        self.set_parent(entity, parent);
        entity
    }

    pub fn entity_count(&self) -> usize {
        self.next_index as usize
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.slot());
        self.transforms[entity.slot()] = Some(transform);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms.get(entity.slot()).and_then(|t| *t)
    }

    pub fn transform_mut(&mut self, entity: EntityId) -> Option<&mut Transform> {
        self.transforms
            .get_mut(entity.slot())
            .and_then(|t| t.as_mut())
    }

    pub fn set_parent(&mut self, entity: EntityId, parent: EntityId) {
        self.ensure_capacity(entity.slot());
        self.parents[entity.slot()] = Some(parent);
    }

    pub fn parent(&self, entity: EntityId) -> Option<EntityId> {
        self.parents.get(entity.slot()).and_then(|p| *p)
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        self.ensure_capacity(entity.slot());
        self.visibility[entity.slot()] = Some(visibility);
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.slot());
        self.drawables_3d[entity.slot()] = Some(drawable);
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<Drawable3D> {
        self.drawables_3d.get(entity.slot()).and_then(|d| *d)
    }

    pub fn set_material(&mut self, entity: EntityId, material: Material) {
        self.ensure_capacity(entity.slot());
        self.materials[entity.slot()] = Some(material);
    }

    pub fn material(&self, entity: EntityId) -> Option<Material> {
        self.materials.get(entity.slot()).and_then(|m| *m)
    }

    pub fn set_light(&mut self, entity: EntityId, light: Light) {
        self.ensure_capacity(entity.slot());
        self.lights[entity.slot()] = Some(light);
    }

    pub fn set_role(&mut self, entity: EntityId, role: Role) {
        self.ensure_capacity(entity.slot());
        self.roles[entity.slot()] = Some(role);
    }

    pub fn role(&self, entity: EntityId) -> Option<Role> {
        self.roles.get(entity.slot()).and_then(|r| *r)
    }

    pub fn entities_with_role(&self, role: Role) -> Vec<EntityId> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == Some(role))
            .map(|(idx, _)| EntityId::from_slot(idx))
            .collect()
    }

    pub fn add_polyline(&mut self, polyline: Polyline) -> PolylineId {
        let id = PolylineId(self.polylines.len() as u32);
        self.polylines.push(polyline);
        id
    }

    pub fn polyline(&self, id: PolylineId) -> Option<&Polyline> {
        self.polylines.get(id.0 as usize)
    }

    pub fn add_point_cloud(&mut self, cloud: PointCloud) -> PointCloudId {
        let id = PointCloudId(self.point_clouds.len() as u32);
        self.point_clouds.push(cloud);
        id
    }

    pub fn point_cloud(&self, id: PointCloudId) -> Option<&PointCloud> {
        self.point_clouds.get(id.0 as usize)
    }

    /// Effective visibility: hidden if the entity or any ancestor is hidden.
    pub fn is_visible(&self, entity: EntityId) -> bool {
        let mut current = Some(entity);
        let mut depth = 0;
        while let Some(e) = current {
            let visible = self
                .visibility
                .get(e.slot())
                .and_then(|v| *v)
                .map(|v| v.visible)
                .unwrap_or(true);
            if !visible {
                return false;
            }
            depth += 1;
            if depth > MAX_HIERARCHY_DEPTH {
                break;
            }
            current = self.parent(e);
        }
        true
    }

    /// Object-to-world matrix: the entity's transform composed with every
    /// ancestor's. Entities without a transform contribute identity.
    pub fn world_matrix(&self, entity: EntityId) -> Mat4 {
        let mut m = self
            .transform(entity)
            .map(|t| t.matrix())
            .unwrap_or(Mat4::IDENTITY);
        let mut current = self.parent(entity);
        let mut depth = 0;
        while let Some(p) = current {
            if let Some(t) = self.transform(p) {
                m = t.matrix() * m;
            }
            depth += 1;
            if depth >= MAX_HIERARCHY_DEPTH {
                tracing::warn!(entity = entity.index(), "parent chain too deep; truncating");
                break;
            }
            current = self.parent(p);
        }
        m
    }

    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, Drawable3D)> {
        self.collect_visible(&self.drawables_3d)
    }

    pub fn lights(&self) -> Vec<(EntityId, Transform, Light)> {
        self.collect_visible(&self.lights)
    }

    fn collect_visible<T: Copy>(&self, column: &[Option<T>]) -> Vec<(EntityId, Transform, T)> {
        let mut out = Vec::new();
        for (idx, item) in column.iter().enumerate() {
            let Some(item) = item else { continue };
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            let entity = EntityId::from_slot(idx);
            if !self.is_visible(entity) {
                continue;
            }

            out.push((entity, transform, *item));
        }
        out
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.parents.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.materials.resize(new_len, None);
            self.lights.resize(new_len, None);
            self.roles.resize(new_len, None);
        }
    }
}
