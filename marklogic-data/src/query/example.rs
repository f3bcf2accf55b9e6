use crate::mapping::{EntityType, MarklogicEntity};

/// Probe instance for a query by example.
///
/// Every populated property of the probe becomes an equality constraint;
/// unset properties and empty collections match anything.
pub struct Example<T: MarklogicEntity> {
    probe: T,
}

impl<T: MarklogicEntity> Example<T> {
    pub fn of(probe: T) -> Self {
        Example { probe }
    }

    pub fn probe(&self) -> &T {
        &self.probe
    }

    pub fn probe_type(&self) -> EntityType {
        EntityType::of::<T>()
    }

    pub fn into_probe(self) -> T {
        self.probe
    }
}
