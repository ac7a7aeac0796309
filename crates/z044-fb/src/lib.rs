//! Driver core for the MEN 16Z044 display controller.
//!
//! The 16Z044 is a fixed-function display unit inside an FPGA on a carrier
//! card, paired with a frame-memory unit (16Z043 SDRAM or 16Z024 SRAM) on
//! the same card. The FPGA bitstream fixes the resolution; the driver reads
//! the 2-bit code the hardware reports and derives all geometry from a
//! four-entry table. Runtime control is a single 32-bit register mutated
//! strictly read-modify-write with an explicit commit bit, plus a flat-panel
//! sub-register and a frame-offset register for virtual-screen paging.
//!
//! Structure:
//! - [`geometry`] — the resolution table and mode derivation,
//! - [`regs`] — register offsets and the control-register bit layout,
//! - [`binder`] — pairing a display unit with its frame memory by bus
//!   location,
//! - [`device`] — bound-device state, bind/teardown lifecycle, and the
//!   runtime operations (blank, refresh rate, byte swap, test pattern,
//!   flat panel, virtual screen),
//! - [`registry`] — the arena of bound instances and the host-registration
//!   seam,
//! - [`command`] — the ioctl-style command codes and dispatch,
//! - [`config`] — startup options (refresh rate, byte-swap policy).
//!
//! Bus enumeration and resource mapping come from the `chameleon-bus` crate;
//! everything here talks to hardware exclusively through its
//! [`chameleon_bus::RegisterWindow`] seam, which is what makes the whole
//! driver testable against an in-memory carrier model.

pub mod binder;
pub mod command;
pub mod config;
mod control;
pub mod device;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod regs;
pub mod registry;

pub use binder::{find_display_unit, find_memory_unit, MEMORY_UNIT_IDS};
pub use command::{dispatch, Command};
pub use config::{ByteSwapMode, Config, RefreshRate};
pub use device::{DisplayDevice, ModeDescriptor, WindowRange, DEVICE_NAME};
pub use error::{Error, Result};
pub use geometry::{lookup, ModeInfo, ResolutionEntry, RESOLUTIONS};
pub use palette::{pack_rgb565, PaletteEntry, PALETTE_LEN};
pub use registry::{DeviceHandle, DisplayHost, DisplayRegistry, HostHandle};
