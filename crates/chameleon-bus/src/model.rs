//! In-memory carrier-board model.
//!
//! Stands in for a real chameleon carrier in tests and scenario harnesses:
//! units are registered with shared byte buffers as their BAR backings, so a
//! test can keep a second handle on a BAR and observe every register write a
//! driver performs through its mapped window.

use std::sync::{Arc, Mutex};

use crate::bus::ChameleonBus;
use crate::resource::{MapError, MappedWindow, RegisterWindow, ResourceMapper};
use crate::unit::{BusBinding, DeviceId, UnitDescriptor};

/// Shared backing store for one BAR.
///
/// Cloning yields another handle on the same bytes; the model hands clones
/// out as mapped windows while tests keep their own for inspection.
#[derive(Clone)]
pub struct SharedBar {
    base: u64,
    mem: Arc<Mutex<Vec<u8>>>,
}

impl SharedBar {
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            mem: Arc::new(Mutex::new(vec![0; size])),
        }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn len(&self) -> u64 {
        self.mem.lock().expect("bar memory poisoned").len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads a little-endian `u32` at `offset` (inspection side).
    pub fn peek32(&self, offset: u64) -> u32 {
        let mem = self.mem.lock().expect("bar memory poisoned");
        let at = offset as usize;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&mem[at..at + 4]);
        u32::from_le_bytes(bytes)
    }

    /// Writes a little-endian `u32` at `offset` (hardware side, e.g. to
    /// pre-seed a register before the driver binds).
    pub fn poke32(&self, offset: u64, value: u32) {
        let mut mem = self.mem.lock().expect("bar memory poisoned");
        let at = offset as usize;
        mem[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }
}

impl RegisterWindow for SharedBar {
    fn read32(&mut self, offset: u64) -> u32 {
        self.peek32(offset)
    }

    fn write32(&mut self, offset: u64, value: u32) {
        self.poke32(offset, value)
    }
}

struct ModelUnit {
    desc: UnitDescriptor,
    bar: SharedBar,
}

/// One modeled carrier bus holding any number of units across any number of
/// simulated cards (distinct [`BusBinding`]s).
#[derive(Default)]
pub struct FpgaCarrier {
    units: Vec<ModelUnit>,
    unmappable: Vec<DeviceId>,
}

impl FpgaCarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a unit backed by `bar`. The instance index is assigned in
    /// registration order per device type, matching discovery order on real
    /// carriers.
    pub fn add_unit(
        &mut self,
        id: DeviceId,
        binding: BusBinding,
        bar_index: u8,
        offset: u32,
        bar: &SharedBar,
    ) -> UnitDescriptor {
        let instance = self
            .units
            .iter()
            .filter(|u| u.desc.device_id == id)
            .count();
        let desc = UnitDescriptor {
            device_id: id,
            instance,
            binding,
            bar: bar_index,
            offset,
        };
        self.units.push(ModelUnit {
            desc: desc.clone(),
            bar: bar.clone(),
        });
        desc
    }

    /// Makes every future `map_bar` of units with this device type fail,
    /// simulating a mapping-primitive failure.
    pub fn fail_maps_for(&mut self, id: DeviceId) {
        self.unmappable.push(id);
    }
}

impl ChameleonBus for FpgaCarrier {
    fn find_unit(&self, id: DeviceId, index: usize) -> Option<UnitDescriptor> {
        self.units
            .iter()
            .filter(|u| u.desc.device_id == id)
            .nth(index)
            .map(|u| u.desc.clone())
    }
}

impl ResourceMapper for FpgaCarrier {
    fn map_bar(&self, unit: &UnitDescriptor) -> Result<MappedWindow, MapError> {
        if self.unmappable.contains(&unit.device_id) {
            return Err(MapError::MapFailed {
                bar: unit.bar,
                reason: "simulated ioremap failure",
            });
        }
        let model = self
            .units
            .iter()
            .find(|u| u.desc.device_id == unit.device_id && u.desc.instance == unit.instance)
            .ok_or(MapError::NoSuchBar { bar: unit.bar })?;
        Ok(MappedWindow::new(
            model.bar.base(),
            model.bar.len(),
            Box::new(model.bar.clone()),
        ))
    }
}
