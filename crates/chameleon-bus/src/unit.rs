/// Position of a physical carrier card on the peripheral bus.
///
/// Two units belong to the same physical card iff all three fields match
/// exactly. This is the only valid join key when pairing related units; a
/// unit of the right type on a *different* card must never be matched.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct BusBinding {
    /// FPGA unit group as reported by the chameleon table.
    pub group: u16,
    /// PCI device/function byte of the carrier.
    pub devfn: u8,
    /// PCI bus number of the carrier.
    pub bus: u8,
}

impl BusBinding {
    pub const fn new(group: u16, devfn: u8, bus: u8) -> Self {
        Self { group, devfn, bus }
    }

    /// Packs this binding into a compact `u32` for logging and map keys.
    ///
    /// Layout (LSB..MSB): bits 0..=7 devfn, bits 8..=15 bus, bits 16..=31
    /// group.
    pub const fn pack_u32(self) -> u32 {
        ((self.group as u32) << 16) | ((self.bus as u32) << 8) | (self.devfn as u32)
    }
}

impl core::cmp::Ord for BusBinding {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.group, self.bus, self.devfn).cmp(&(other.group, other.bus, other.devfn))
    }
}

impl core::cmp::PartialOrd for BusBinding {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Chameleon device code of an FPGA unit type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DeviceId(pub u16);

/// 16Z044 display controller unit.
pub const Z044_DISP: DeviceId = DeviceId(44);
/// 16Z043 SDRAM unit (primary frame-memory family).
pub const Z043_SDRAM: DeviceId = DeviceId(43);
/// 16Z024 SRAM unit (alternate frame-memory family on older revisions).
pub const Z024_SRAM: DeviceId = DeviceId(24);

/// One discovered FPGA unit, as handed to a driver's probe entry point.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnitDescriptor {
    pub device_id: DeviceId,
    /// Discovery-order index among units of the same type.
    pub instance: usize,
    pub binding: BusBinding,
    /// BAR of the carrier's PCI function this unit decodes in.
    pub bar: u8,
    /// Byte offset of the unit's registers within that BAR.
    pub offset: u32,
}
