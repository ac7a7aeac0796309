//! Fixed display geometry and mode derivation.
//!
//! The 16Z044 cannot switch resolution at runtime; one of four presets is
//! baked into the FPGA bitstream and reported through the low two bits of the
//! control register. All geometry derives from that code.

use tracing::warn;

/// One geometry preset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResolutionEntry {
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u16,
}

/// The four presets, indexed by the 2-bit hardware resolution code.
pub const RESOLUTIONS: [ResolutionEntry; 4] = [
    ResolutionEntry { width: 640, height: 480, bits_per_pixel: 16 },
    ResolutionEntry { width: 800, height: 600, bits_per_pixel: 16 },
    ResolutionEntry { width: 1024, height: 768, bits_per_pixel: 16 },
    ResolutionEntry { width: 1280, height: 1024, bits_per_pixel: 16 },
];

/// Geometry for a hardware resolution code.
///
/// The code is masked to 2 bits, so this is total; callers never see an
/// error path here.
pub fn lookup(code: u8) -> ResolutionEntry {
    RESOLUTIONS[(code & 0x3) as usize]
}

/// Placement of one color component within a pixel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ColorField {
    pub offset: u8,
    pub length: u8,
}

impl ColorField {
    const fn new(offset: u8, length: u8) -> Self {
        Self { offset, length }
    }
}

/// Display-mode parameter block derived from the detected resolution.
///
/// This is the geometry view the host display subsystem consumes at
/// registration time. Timing fields are nominal: the hardware generates its
/// own timing from the bitstream, so only the pixel clock is reported.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModeInfo {
    pub xres: u16,
    pub yres: u16,
    /// No hardware panning: virtual size always equals visible size.
    pub xres_virtual: u16,
    pub yres_virtual: u16,
    pub bits_per_pixel: u16,
    pub bytes_per_pixel: u16,
    /// Length of one scanline in bytes.
    pub line_length: u32,
    pub red: ColorField,
    pub green: ColorField,
    pub blue: ColorField,
    /// Pixel clock in picoseconds.
    pub pixclock: u32,
    pub interlaced: bool,
}

impl ModeInfo {
    /// Derives the mode block for `entry`.
    ///
    /// Depths other than 15/16 bpp are not supported by the hardware; they
    /// are logged and the color fields stay zeroed, but the rest of the
    /// geometry is still populated best-effort. This permissiveness is
    /// load-bearing: binding must not abort on an odd depth report.
    pub fn for_entry(entry: ResolutionEntry) -> Self {
        let bytes_per_pixel = entry.bits_per_pixel >> 3;
        let mut mode = Self {
            xres: entry.width,
            yres: entry.height,
            xres_virtual: entry.width,
            yres_virtual: entry.height,
            bits_per_pixel: entry.bits_per_pixel,
            bytes_per_pixel,
            line_length: u32::from(entry.width) * u32::from(bytes_per_pixel),
            red: ColorField::default(),
            green: ColorField::default(),
            blue: ColorField::default(),
            pixclock: 25_000,
            interlaced: false,
        };
        match entry.bits_per_pixel {
            15 | 16 => {
                mode.red = ColorField::new(11, 5);
                mode.green = ColorField::new(5, 6);
                mode.blue = ColorField::new(0, 5);
            }
            bpp => warn!(bpp, "no support for this depth, color fields left unset"),
        }
        mode
    }
}
