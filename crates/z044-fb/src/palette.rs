//! Legacy 16-entry color map.
//!
//! The hardware scans RGB565 directly; the palette only exists for color-map
//! compatibility with the host console layer. It is never read back from
//! hardware.

/// Number of palette registers.
pub const PALETTE_LEN: usize = 16;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PaletteEntry {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

/// Fixed default fill used at bind time (dark red, matching the legacy
/// no-console-table path).
pub(crate) fn default_palette() -> [PaletteEntry; PALETTE_LEN] {
    [PaletteEntry { red: 0x55, green: 0, blue: 0 }; PALETTE_LEN]
}

/// Packs 16-bit color components into the RGB565 word the hardware scans.
pub fn pack_rgb565(red: u16, green: u16, blue: u16) -> u16 {
    (red & 0xf800) | ((green & 0xfc00) >> 5) | ((blue & 0xf800) >> 11)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rgb565_packing() {
        assert_eq!(pack_rgb565(0, 0, 0), 0x0000);
        assert_eq!(pack_rgb565(0xffff, 0xffff, 0xffff), 0xffff);
        assert_eq!(pack_rgb565(0xffff, 0, 0), 0xf800);
        assert_eq!(pack_rgb565(0, 0xffff, 0), 0x07e0);
        assert_eq!(pack_rgb565(0, 0, 0xffff), 0x001f);
        // Low bits below the component fields do not bleed through.
        assert_eq!(pack_rgb565(0x07ff, 0x03ff, 0x07ff), 0x0000);
    }

    #[test]
    fn default_fill_is_dark_red() {
        let palette = default_palette();
        assert_eq!(palette.len(), PALETTE_LEN);
        assert!(palette
            .iter()
            .all(|e| *e == PaletteEntry { red: 0x55, green: 0, blue: 0 }));
    }
}
