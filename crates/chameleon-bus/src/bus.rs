use crate::unit::{DeviceId, UnitDescriptor};

/// Unit enumeration service of the carrier bus.
///
/// The bus layer keeps units of one type in discovery order; `find_unit`
/// returns `None` once `index` runs past the last instance of that type.
/// Callers iterating over instances must stop at the first `None` rather
/// than probing further indices.
pub trait ChameleonBus {
    fn find_unit(&self, id: DeviceId, index: usize) -> Option<UnitDescriptor>;
}
