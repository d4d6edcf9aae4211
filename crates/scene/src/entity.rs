use std::fmt;

/// Row of an entity in the world's component columns. Entities are never despawned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn from_slot(slot: usize) -> Self {
        EntityId(slot as u32)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    /// Column position for this entity.
    pub fn slot(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.index())
    }
}
