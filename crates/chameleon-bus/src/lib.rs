//! Chameleon FPGA carrier-bus model.
//!
//! MEN carrier boards expose a table of IP cores ("units") inside one FPGA
//! sitting on the PCI bus. This crate provides the pieces a unit driver needs
//! to talk to that bus without depending on any real enumeration or mapping
//! primitives:
//! - unit descriptors and the bus-binding tuple that identifies the physical
//!   card a unit lives on ([`UnitDescriptor`], [`BusBinding`]),
//! - the enumeration seam ([`ChameleonBus`]): look up the n-th unit of a
//!   given device type,
//! - the resource seam ([`ResourceMapper`], [`MappedWindow`],
//!   [`RegisterWindow`]): map a unit's BAR and perform 32-bit register I/O
//!   against it,
//! - an in-memory carrier-board model ([`FpgaCarrier`]) backed by shared
//!   byte buffers, used by driver tests to stand in for real hardware.

mod bus;
mod model;
mod resource;
mod unit;

pub use bus::ChameleonBus;
pub use model::{FpgaCarrier, SharedBar};
pub use resource::{MapError, MappedWindow, RegisterWindow, ResourceMapper};
pub use unit::{BusBinding, DeviceId, UnitDescriptor, Z024_SRAM, Z043_SDRAM, Z044_DISP};
