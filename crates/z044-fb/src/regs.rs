//! Register map of the 16Z044 display controller.
//!
//! Offsets are byte offsets within the unit's register BAR. The control
//! register additionally sits behind a per-device byte offset reported by the
//! discovery layer; the frame-offset register does not (hardware quirk,
//! preserved from the shipping FPGA designs).

use bitflags::bitflags;

/// Display control register.
pub const Z044_DISP_CTRL: u64 = 0x00;

/// Frame-offset register: byte offset into frame memory the output scans
/// from. Plain offset register, no read-modify-write or commit needed.
pub const Z044_DISP_FOFFS: u64 = 0x08;

/// Flat-panel control sub-register, relative to the control-register address.
pub const Z044_FP_CTRL: u64 = 0x0C;

/// Low 3 bits of the flat-panel sub-register; all three set = panel enabled.
/// Writes to this sub-register take effect without [`DispCtrl::CHANGE`].
pub const FP_ENABLE_MASK: u32 = 0x7;

bitflags! {
    /// Bit layout of the 32-bit display control register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DispCtrl: u32 {
        /// 2-bit hardware resolution code. Baked into the FPGA bitstream;
        /// changing it requires reconfiguration, so the driver only reads it.
        const RES_MASK = 0x3;
        /// Refresh rate select: clear = 60 Hz, set = 75 Hz.
        const REFRESH = 1 << 2;
        /// Swap the two bytes of each 16bpp pixel (big-endian hosts).
        const BYTESWAP = 1 << 3;
        /// Test pattern: a colored frame at the screen edges.
        const DEBUG = 1 << 4;
        /// Output off. With the bit set the graphics output goes completely
        /// idle and most monitors enter power save.
        const ONOFF = 1 << 30;
        /// Commit bit: a control-register write only takes effect on the
        /// hardware when this bit is set in the written value.
        const CHANGE = 1 << 31;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_and_blank_bits_match_hardware() {
        assert_eq!(DispCtrl::CHANGE.bits(), 0x8000_0000);
        assert_eq!(DispCtrl::ONOFF.bits(), 0x4000_0000);
        assert_eq!(DispCtrl::RES_MASK.bits(), 0x3);
    }

    #[test]
    fn field_bits_are_disjoint() {
        let all = DispCtrl::RES_MASK
            | DispCtrl::REFRESH
            | DispCtrl::BYTESWAP
            | DispCtrl::DEBUG
            | DispCtrl::ONOFF
            | DispCtrl::CHANGE;
        let sum = DispCtrl::RES_MASK.bits()
            + DispCtrl::REFRESH.bits()
            + DispCtrl::BYTESWAP.bits()
            + DispCtrl::DEBUG.bits()
            + DispCtrl::ONOFF.bits()
            + DispCtrl::CHANGE.bits();
        assert_eq!(all.bits(), sum);
    }
}
