use core::fmt;

use thiserror::Error;

use crate::unit::UnitDescriptor;

/// 32-bit register access into a mapped hardware window.
///
/// This is the `readl`/`writel` seam: accesses are little-endian, 32 bits
/// wide, addressed by byte offset from the window start, and assumed to
/// complete synchronously. Reads take `&mut self` because register reads on
/// real hardware may have side effects.
pub trait RegisterWindow: Send {
    fn read32(&mut self, offset: u64) -> u32;
    fn write32(&mut self, offset: u64, value: u32);
}

/// Failure of the underlying mapping primitive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("unit decodes in bar {bar} but the carrier reports no such bar")]
    NoSuchBar { bar: u8 },
    #[error("mapping primitive failed for bar {bar}: {reason}")]
    MapFailed { bar: u8, reason: &'static str },
}

/// Owned mapped view of one BAR.
///
/// The window unmaps when dropped; there is no explicit unmap call. A driver
/// that must not outlive its mappings simply owns its windows.
pub struct MappedWindow {
    base: u64,
    len: u64,
    mem: Box<dyn RegisterWindow>,
}

impl MappedWindow {
    pub fn new(base: u64, len: u64, mem: Box<dyn RegisterWindow>) -> Self {
        Self { base, len, mem }
    }

    /// Physical base address the window was mapped from.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Length of the window in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn read32(&mut self, offset: u64) -> u32 {
        debug_assert!(offset + 4 <= self.len, "register read past window");
        self.mem.read32(offset)
    }

    pub fn write32(&mut self, offset: u64, value: u32) {
        debug_assert!(offset + 4 <= self.len, "register write past window");
        self.mem.write32(offset, value)
    }
}

impl fmt::Debug for MappedWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedWindow")
            .field("base", &format_args!("{:#x}", self.base))
            .field("len", &format_args!("{:#x}", self.len))
            .finish_non_exhaustive()
    }
}

/// Resource-mapping service: turns a discovered unit's BAR into a
/// [`MappedWindow`].
pub trait ResourceMapper {
    fn map_bar(&self, unit: &UnitDescriptor) -> Result<MappedWindow, MapError>;
}
