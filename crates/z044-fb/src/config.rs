//! Startup configuration.
//!
//! Two knobs exist, matching the module parameters of the original unit:
//! the default refresh rate and the pixel byte-swap policy. Both are applied
//! once at bind time to reach a known hardware state; later changes go
//! through the control operations.

use tracing::warn;

use crate::error::{Error, Result};

/// Vertical refresh rate. The hardware supports exactly these two.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RefreshRate {
    #[default]
    Hz60,
    Hz75,
}

impl RefreshRate {
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz60 => 60,
            Self::Hz75 => 75,
        }
    }

    pub fn try_from_hz(hz: u32) -> Result<Self> {
        match hz {
            60 => Ok(Self::Hz60),
            75 => Ok(Self::Hz75),
            _ => Err(Error::UnsupportedRefreshRate { hz }),
        }
    }
}

/// Pixel byte-swap policy.
///
/// `Auto` resolves from the compile target's endianness; byte order is a
/// property of the host the image is built for, never probed at runtime.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ByteSwapMode {
    #[default]
    Auto,
    On,
    Off,
}

impl ByteSwapMode {
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => cfg!(target_endian = "big"),
            Self::On => true,
            Self::Off => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
    pub refresh: RefreshRate,
    pub byte_swap: ByteSwapMode,
}

impl Config {
    /// Parses a comma-separated startup option string (`"ref60"`/`"ref75"`).
    ///
    /// The last recognized token wins; unknown tokens are logged and
    /// ignored, empty tokens skipped.
    pub fn parse_mode_options(options: &str) -> Self {
        let mut config = Self::default();
        for token in options.split(',') {
            match token.trim() {
                "" => {}
                "ref60" => config.refresh = RefreshRate::Hz60,
                "ref75" => config.refresh = RefreshRate::Hz75,
                other => warn!(option = other, "ignoring unknown mode option"),
            }
        }
        config
    }
}
