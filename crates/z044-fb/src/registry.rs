//! Arena of bound devices and the host-registration seam.
//!
//! Device handles are arena indices, never raw pointers into mapped memory.
//! Every device sits behind its own mutex; the control operations are
//! read-modify-write sequences that are not atomic against other callers on
//! the same register, so all mutating operations must run under that lock as
//! a unit.
//! Teardown takes the slot out of the arena first, so no new lock attempts
//! can reach a device once removal has started.

use std::sync::{Arc, Mutex};

use chameleon_bus::{ChameleonBus, ResourceMapper, UnitDescriptor};
use tracing::{info, warn};

use crate::binder::find_memory_unit;
use crate::config::Config;
use crate::device::{DisplayDevice, ModeDescriptor};
use crate::error::{Error, Result};

/// Handle into the registry's arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct DeviceHandle(usize);

/// Opaque handle the host display subsystem returns at registration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct HostHandle(pub u64);

/// Host display-subsystem registration seam.
///
/// The host receives a read-only [`ModeDescriptor`] view; the core never
/// depends on the host's internal data layout.
pub trait DisplayHost {
    fn register(&mut self, descriptor: &ModeDescriptor) -> std::result::Result<HostHandle, String>;
    fn unregister(&mut self, handle: HostHandle);
}

struct Bound {
    device: Arc<Mutex<DisplayDevice>>,
    host: Option<HostHandle>,
}

/// Registry of bound display instances. Multi-instance tolerant: one
/// instance failing to bind leaves the others untouched.
#[derive(Default)]
pub struct DisplayRegistry {
    slots: Vec<Option<Bound>>,
}

impl DisplayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently bound devices.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full probe flow for one discovered display unit: locate the
    /// frame-memory companion, bind, register with the host (if any), and
    /// insert into the arena.
    ///
    /// Any failure aborts binding of this one instance; the unit stays
    /// unregistered and the registry is unchanged.
    pub fn probe(
        &mut self,
        bus: &dyn ChameleonBus,
        mapper: &dyn ResourceMapper,
        config: Config,
        display_unit: &UnitDescriptor,
        mut host: Option<&mut dyn DisplayHost>,
    ) -> Result<DeviceHandle> {
        let memory_unit = find_memory_unit(bus, display_unit)?;
        let instance = self.slots.iter().filter(|s| s.is_some()).count();
        let device = DisplayDevice::bind(display_unit, &memory_unit, mapper, config, instance)?;

        let host_handle = match host.as_deref_mut() {
            Some(host) => Some(
                host.register(&device.mode_descriptor())
                    .map_err(Error::HostRegistration)?,
            ),
            None => None,
        };
        info!(name = device.name(), "display instance bound");

        let bound = Bound {
            device: Arc::new(Mutex::new(device)),
            host: host_handle,
        };
        let index = match self.slots.iter().position(Option::is_none) {
            Some(free) => {
                self.slots[free] = Some(bound);
                free
            }
            None => {
                self.slots.push(Some(bound));
                self.slots.len() - 1
            }
        };
        Ok(DeviceHandle(index))
    }

    /// The device behind `handle`, if still bound. All mutating control
    /// operations must be performed while holding the returned lock.
    pub fn device(&self, handle: DeviceHandle) -> Option<Arc<Mutex<DisplayDevice>>> {
        self.slots
            .get(handle.0)
            .and_then(|slot| slot.as_ref())
            .map(|bound| Arc::clone(&bound.device))
    }

    /// Removes a bound device: unregister from the host, then tear down.
    /// The handle is dead afterwards; `InvalidDevice` on reuse.
    pub fn remove(
        &mut self,
        handle: DeviceHandle,
        host: Option<&mut dyn DisplayHost>,
    ) -> Result<()> {
        let slot = self.slots.get_mut(handle.0).ok_or(Error::InvalidDevice)?;
        let bound = slot.take().ok_or(Error::InvalidDevice)?;
        if let (Some(host), Some(host_handle)) = (host, bound.host) {
            host.unregister(host_handle);
        }
        match Arc::try_unwrap(bound.device) {
            Ok(mutex) => match mutex.into_inner() {
                Ok(device) => device.teardown(),
                Err(poisoned) => poisoned.into_inner().teardown(),
            },
            // A leaked clone keeps the windows mapped until it drops; that
            // is a lifecycle bug in the caller, not something the core can
            // repair here.
            Err(_) => warn!("device still referenced at removal, windows unmap with the last reference"),
        }
        Ok(())
    }
}
