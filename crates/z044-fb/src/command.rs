//! Device-control command surface.
//!
//! External callers drive the control operations through numeric command
//! codes (the ioctl wire encoding); the typed [`Command`] enum keeps that
//! encoding out of the core API. Codes follow the Linux `_IO`/`_IOW` layout
//! with magic `'F'` and base number 40.

use crate::device::DisplayDevice;
use crate::error::Result;

const IOC_NONE: u32 = 0;
const IOC_WRITE: u32 = 1;
const IOC_MAGIC: u32 = b'F' as u32;
const IOC_BASE: u32 = 40;

/// `_IOC(dir, 'F', 40 + nr, size)`: dir in bits 30..=31, size in bits
/// 16..=29, magic in bits 8..=15, number in bits 0..=7.
const fn ioc(dir: u32, nr: u32, size: u32) -> u32 {
    (dir << 30) | (size << 16) | (IOC_MAGIC << 8) | (IOC_BASE + nr)
}

pub const FBIO_ENABLE_TEST: u32 = ioc(IOC_NONE, 0, 0);
pub const FBIO_DISABLE_TEST: u32 = ioc(IOC_NONE, 1, 0);
pub const FBIO_ENABLE_75HZ: u32 = ioc(IOC_NONE, 2, 0);
pub const FBIO_ENABLE_60HZ: u32 = ioc(IOC_NONE, 3, 0);
// Numbers 4..=7 stay reserved for resolution switching.
pub const FBIO_BLANK: u32 = ioc(IOC_NONE, 8, 0);
pub const FBIO_UNBLANK: u32 = ioc(IOC_NONE, 9, 0);
pub const FBIO_SWAP_ON: u32 = ioc(IOC_NONE, 10, 0);
pub const FBIO_SWAP_OFF: u32 = ioc(IOC_NONE, 11, 0);
pub const FBIO_SET_SCREEN: u32 = ioc(IOC_WRITE, 12, 4);

/// Decoded device-control command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    EnableTestPattern,
    DisableTestPattern,
    Refresh75Hz,
    Refresh60Hz,
    Blank,
    Unblank,
    ByteSwapOn,
    ByteSwapOff,
    SetScreen(u32),
}

impl Command {
    /// Decodes a raw command word; `arg` is consumed only by commands that
    /// carry a payload. Unknown codes decode to `None` and the caller
    /// reports them as unsupported.
    pub fn from_raw(code: u32, arg: u32) -> Option<Self> {
        match code {
            FBIO_ENABLE_TEST => Some(Self::EnableTestPattern),
            FBIO_DISABLE_TEST => Some(Self::DisableTestPattern),
            FBIO_ENABLE_75HZ => Some(Self::Refresh75Hz),
            FBIO_ENABLE_60HZ => Some(Self::Refresh60Hz),
            FBIO_BLANK => Some(Self::Blank),
            FBIO_UNBLANK => Some(Self::Unblank),
            FBIO_SWAP_ON => Some(Self::ByteSwapOn),
            FBIO_SWAP_OFF => Some(Self::ByteSwapOff),
            FBIO_SET_SCREEN => Some(Self::SetScreen(arg)),
            _ => None,
        }
    }

    /// The wire code this command decodes from.
    pub const fn raw(self) -> u32 {
        match self {
            Self::EnableTestPattern => FBIO_ENABLE_TEST,
            Self::DisableTestPattern => FBIO_DISABLE_TEST,
            Self::Refresh75Hz => FBIO_ENABLE_75HZ,
            Self::Refresh60Hz => FBIO_ENABLE_60HZ,
            Self::Blank => FBIO_BLANK,
            Self::Unblank => FBIO_UNBLANK,
            Self::ByteSwapOn => FBIO_SWAP_ON,
            Self::ByteSwapOff => FBIO_SWAP_OFF,
            Self::SetScreen(_) => FBIO_SET_SCREEN,
        }
    }
}

/// Applies a decoded command to a bound device.
pub fn dispatch(device: &mut DisplayDevice, command: Command) -> Result<()> {
    match command {
        Command::EnableTestPattern => device.set_test_pattern(true),
        Command::DisableTestPattern => device.set_test_pattern(false),
        Command::Refresh75Hz => device.set_refresh_rate(75),
        Command::Refresh60Hz => device.set_refresh_rate(60),
        Command::Blank => device.set_blank(true),
        Command::Unblank => device.set_blank(false),
        Command::ByteSwapOn => device.set_byte_swap(true),
        Command::ByteSwapOff => device.set_byte_swap(false),
        Command::SetScreen(index) => device.select_virtual_screen(index),
    }
}
