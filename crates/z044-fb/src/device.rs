//! Bound device state and lifecycle.

use chameleon_bus::{MappedWindow, ResourceMapper, UnitDescriptor};
use tracing::{debug, info};

use crate::config::{Config, RefreshRate};
use crate::error::{Error, Result};
use crate::geometry::{self, ModeInfo};
use crate::palette::{default_palette, pack_rgb565, PaletteEntry, PALETTE_LEN};
use crate::regs::{DispCtrl, Z044_DISP_CTRL};

/// Base name of registered instances ("fb16z044_0", "fb16z044_1", ...).
pub const DEVICE_NAME: &str = "fb16z044";

/// Instance names are bounded; anything longer is truncated.
const NAME_LEN_MAX: usize = 32;

/// Byte range of a mapped hardware window, as advertised to the host
/// display subsystem.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowRange {
    pub base: u64,
    pub len: u64,
}

/// Read-only registration view handed to the host display subsystem.
///
/// The host gets geometry and window ranges, nothing else; it never sees the
/// driver's internal layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeDescriptor {
    pub name: String,
    pub mode: ModeInfo,
    pub frame_memory: WindowRange,
    pub registers: WindowRange,
}

/// One bound 16Z044 instance.
///
/// Exclusively owns both mapped windows for its lifetime. The hardware
/// registers are the single source of truth for control state: mutations go
/// through read-modify-write on the register, and the mirrored fields here
/// only cache the last written intent. The exception is the resolution code,
/// which is read from hardware once at bind.
#[derive(Debug)]
pub struct DisplayDevice {
    name: String,
    resolution_index: u8,
    mode: ModeInfo,
    pub(crate) byte_swap: bool,
    pub(crate) refresh: RefreshRate,
    /// Per-device additive byte offset of the control register, as supplied
    /// by the discovery layer.
    pub(crate) ctrl_offset: u64,
    pub(crate) regs: MappedWindow,
    pub(crate) vram: MappedWindow,
    palette: [PaletteEntry; PALETTE_LEN],
    pseudo_palette: [u16; PALETTE_LEN],
}

impl DisplayDevice {
    /// Maps the windows of a discovered display/memory unit pair, derives
    /// geometry from the hardware resolution code and brings the device into
    /// its default state (unblanked, configured refresh rate, flat panel
    /// enabled, byte swap per policy).
    ///
    /// Fails if mapping fails or if the display unit's resource window is
    /// zero-sized or zero-based; the default-state writes themselves cannot
    /// fail on an already-validated window.
    pub fn bind(
        display_unit: &UnitDescriptor,
        memory_unit: &UnitDescriptor,
        mapper: &dyn ResourceMapper,
        config: Config,
        instance: usize,
    ) -> Result<Self> {
        let vram = mapper.map_bar(memory_unit)?;
        debug!(base = vram.base(), len = vram.len(), "mapped frame memory");

        let mut regs = mapper.map_bar(display_unit)?;
        if regs.base() == 0 || regs.len() == 0 {
            return Err(Error::InvalidResourceDescriptor {
                base: regs.base(),
                size: regs.len(),
            });
        }

        let ctrl_offset = Z044_DISP_CTRL + u64::from(display_unit.offset);
        let code = (regs.read32(ctrl_offset) & DispCtrl::RES_MASK.bits()) as u8;
        let entry = geometry::lookup(code);
        info!(
            width = entry.width,
            height = entry.height,
            "16Z044 found, resolution {}x{}",
            entry.width,
            entry.height
        );

        let mut name = format!("{DEVICE_NAME}_{instance}");
        name.truncate(NAME_LEN_MAX);

        let mut device = Self {
            name,
            resolution_index: code,
            mode: ModeInfo::for_entry(entry),
            byte_swap: false,
            refresh: RefreshRate::Hz60,
            ctrl_offset,
            regs,
            vram,
            palette: default_palette(),
            pseudo_palette: [0; PALETTE_LEN],
        };

        // Known default state, in this order.
        device.set_blank(false)?;
        if config.byte_swap.enabled() {
            device.set_byte_swap(true)?;
        }
        device.set_refresh_rate(config.refresh.hz())?;
        device.set_flat_panel(true)?;

        Ok(device)
    }

    /// Tears the device down. Both windows unmap when the device drops;
    /// consuming `self` makes a second teardown unrepresentable.
    pub fn teardown(self) {}

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The 2-bit hardware code read at bind time.
    pub fn resolution_index(&self) -> u8 {
        self.resolution_index
    }

    pub fn mode(&self) -> &ModeInfo {
        &self.mode
    }

    pub fn width(&self) -> u16 {
        self.mode.xres
    }

    pub fn height(&self) -> u16 {
        self.mode.yres
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.mode.bits_per_pixel
    }

    pub fn bytes_per_pixel(&self) -> u16 {
        self.mode.bytes_per_pixel
    }

    /// Last written byte-swap intent.
    pub fn byte_swap_enabled(&self) -> bool {
        self.byte_swap
    }

    /// Last written refresh rate in Hz.
    pub fn refresh_rate_hz(&self) -> u32 {
        self.refresh.hz()
    }

    pub fn frame_memory_len(&self) -> u64 {
        self.vram.len()
    }

    pub fn mode_descriptor(&self) -> ModeDescriptor {
        ModeDescriptor {
            name: self.name.clone(),
            mode: self.mode.clone(),
            frame_memory: WindowRange {
                base: self.vram.base(),
                len: self.vram.len(),
            },
            registers: WindowRange {
                base: self.regs.base(),
                len: self.regs.len(),
            },
        }
    }

    pub fn palette(&self) -> &[PaletteEntry; PALETTE_LEN] {
        &self.palette
    }

    /// RGB565 words derived from the palette, in register order.
    pub fn pseudo_palette(&self) -> &[u16; PALETTE_LEN] {
        &self.pseudo_palette
    }

    /// Stores one color register and its packed RGB565 form.
    pub fn set_color_reg(&mut self, index: usize, red: u16, green: u16, blue: u16) -> Result<()> {
        if index >= PALETTE_LEN {
            return Err(Error::PaletteIndexOutOfRange { index });
        }
        self.palette[index] = PaletteEntry { red, green, blue };
        self.pseudo_palette[index] = pack_rgb565(red, green, blue);
        Ok(())
    }

    /// Test-only constructor bypassing discovery and mapping.
    #[cfg(test)]
    pub(crate) fn for_tests(regs: MappedWindow, vram: MappedWindow, ctrl_offset: u64) -> Self {
        Self {
            name: format!("{DEVICE_NAME}_test"),
            resolution_index: 2,
            mode: ModeInfo::for_entry(geometry::lookup(2)),
            byte_swap: false,
            refresh: RefreshRate::Hz60,
            ctrl_offset,
            regs,
            vram,
            palette: default_palette(),
            pseudo_palette: [0; PALETTE_LEN],
        }
    }
}
