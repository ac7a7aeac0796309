use chameleon_bus::MapError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Driver-core error kinds.
///
/// Discovery and binding failures abort binding of that one device instance
/// only; control-operation failures surface synchronously to the caller and
/// are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Discovery exhausted all candidates for a requested unit.
    #[error("unit not found on carrier bus")]
    NotFound,

    /// No frame-memory unit shares the display unit's bus location.
    #[error("no frame-memory unit on the display unit's card")]
    NoMatchingMemoryUnit,

    /// The bus layer reported a slot with a zero-sized or zero-based
    /// resource window: a bus position without a real controller behind it.
    #[error("invalid resource descriptor: base={base:#x} size={size:#x}")]
    InvalidResourceDescriptor { base: u64, size: u64 },

    #[error(transparent)]
    Map(#[from] MapError),

    /// Operation on an unbound, unmapped or torn-down device.
    #[error("invalid device")]
    InvalidDevice,

    /// The hardware only supports 60 Hz and 75 Hz.
    #[error("unsupported refresh rate {hz} Hz (supported: 60, 75)")]
    UnsupportedRefreshRate { hz: u32 },

    #[error("virtual screen {index} out of range (maximum {max})")]
    ScreenIndexOutOfRange { index: u32, max: u32 },

    #[error("palette register {index} out of range")]
    PaletteIndexOutOfRange { index: usize },

    #[error("host display subsystem rejected registration: {0}")]
    HostRegistration(String),
}
