//! Runtime control operations.
//!
//! Every mutation of the main control register follows the same discipline:
//! read the current value, change exactly one logical field, OR in the
//! commit bit, write it back. Nothing ever writes a field without reading
//! first, so unrelated fields survive every operation. There is no hardware
//! locking behind this; callers with concurrent access must serialize whole
//! operations on one device (see [`crate::registry`]).

use tracing::debug;

use crate::config::RefreshRate;
use crate::device::DisplayDevice;
use crate::error::{Error, Result};
use crate::regs::{DispCtrl, FP_ENABLE_MASK, Z044_DISP_FOFFS, Z044_FP_CTRL};

impl DisplayDevice {
    fn read_ctrl(&mut self) -> DispCtrl {
        DispCtrl::from_bits_retain(self.regs.read32(self.ctrl_offset))
    }

    /// Writes the main control register with the commit bit set; writes
    /// without it have no observable effect.
    fn commit_ctrl(&mut self, ctrl: DispCtrl) {
        self.regs.write32(self.ctrl_offset, (ctrl | DispCtrl::CHANGE).bits());
    }

    fn ensure_registers(&self) -> Result<()> {
        if self.regs.base() == 0 || self.regs.is_empty() {
            return Err(Error::InvalidDevice);
        }
        Ok(())
    }

    /// Blanks (`true`) or unblanks (`false`) the output. Setting, not
    /// toggling: repeating the call is a no-op on the register value.
    pub fn set_blank(&mut self, blank: bool) -> Result<()> {
        let mut ctrl = self.read_ctrl();
        ctrl.set(DispCtrl::ONOFF, blank);
        self.commit_ctrl(ctrl);
        Ok(())
    }

    /// Switches between the two supported refresh rates.
    ///
    /// Anything other than 60 or 75 Hz is rejected before any register
    /// access; the mirrored rate updates only after the write.
    pub fn set_refresh_rate(&mut self, hz: u32) -> Result<()> {
        let rate = RefreshRate::try_from_hz(hz)?;
        debug!(hz, "setting refresh rate");
        let mut ctrl = self.read_ctrl();
        ctrl.set(DispCtrl::REFRESH, rate == RefreshRate::Hz75);
        self.commit_ctrl(ctrl);
        self.refresh = rate;
        Ok(())
    }

    /// Enables or disables 16bpp byte swapping.
    pub fn set_byte_swap(&mut self, enabled: bool) -> Result<()> {
        let mut ctrl = self.read_ctrl();
        ctrl.remove(DispCtrl::BYTESWAP);
        if enabled {
            ctrl.insert(DispCtrl::BYTESWAP);
        }
        self.commit_ctrl(ctrl);
        self.byte_swap = enabled;
        Ok(())
    }

    /// Enables or disables the hardware test pattern (a colored frame at the
    /// edges of the screen).
    pub fn set_test_pattern(&mut self, enabled: bool) -> Result<()> {
        self.ensure_registers()?;
        let mut ctrl = self.read_ctrl();
        ctrl.set(DispCtrl::DEBUG, enabled);
        self.commit_ctrl(ctrl);
        Ok(())
    }

    /// Switches the flat-panel interface on or off.
    ///
    /// The flat-panel sub-register is disjoint from the main control
    /// register: clear the low 3 bits, set all of them when enabling, and
    /// write without the commit bit.
    pub fn set_flat_panel(&mut self, enabled: bool) -> Result<()> {
        let offset = self.ctrl_offset + Z044_FP_CTRL;
        let mut value = self.regs.read32(offset);
        value &= !FP_ENABLE_MASK;
        if enabled {
            value |= FP_ENABLE_MASK;
        }
        self.regs.write32(offset, value);
        Ok(())
    }

    /// Number of virtual screens the frame memory holds at the current
    /// geometry: `memsize / ((xres * yres) / bytes_per_pixel)`.
    pub fn max_screens(&self) -> u32 {
        let pixels = u64::from(self.width()) * u64::from(self.height());
        (self.frame_memory_len() / (pixels / u64::from(self.bytes_per_pixel()))) as u32
    }

    /// Repoints the output to virtual screen `index` within frame memory.
    ///
    /// The bound is inclusive (`index > max_screens` rejects), matching the
    /// shipping behavior. On success the byte offset
    /// `index * xres * yres * bytes_per_pixel` goes to the frame-offset
    /// register; no read-modify-write, it is a plain offset register.
    pub fn select_virtual_screen(&mut self, index: u32) -> Result<()> {
        let max = self.max_screens();
        debug!(screens = max, "virtual screens available");
        if index > max {
            return Err(Error::ScreenIndexOutOfRange { index, max });
        }
        let offset = u64::from(index)
            * u64::from(self.width())
            * u64::from(self.height())
            * u64::from(self.bytes_per_pixel());
        self.regs.write32(Z044_DISP_FOFFS, offset as u32);
        Ok(())
    }

    /// Current hardware resolution code (0..=3). Pure diagnostic read; does
    /// not participate in any modify-write race.
    pub fn resolution_code(&mut self) -> u8 {
        (self.read_ctrl().bits() & DispCtrl::RES_MASK.bits()) as u8
    }
}
