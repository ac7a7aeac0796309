//! Pairing a display unit with its frame memory.
//!
//! A 16Z044 never comes alone: the same FPGA carries a memory unit holding
//! the pixel framebuffer. Which memory family that is depends on the
//! hardware revision, so the binder searches an ordered candidate list. The
//! only valid join key is bus-binding equality; a memory unit of the right
//! type on a different card must never be picked up, no matter how early it
//! is enumerated.

use chameleon_bus::{ChameleonBus, DeviceId, UnitDescriptor, Z024_SRAM, Z043_SDRAM, Z044_DISP};
use tracing::debug;

use crate::error::{Error, Result};

/// Frame-memory unit families that may accompany a 16Z044, in priority
/// order.
pub const MEMORY_UNIT_IDS: [DeviceId; 2] = [Z043_SDRAM, Z024_SRAM];

/// Looks up the `index`-th display unit on the bus.
pub fn find_display_unit(bus: &dyn ChameleonBus, index: usize) -> Result<UnitDescriptor> {
    bus.find_unit(Z044_DISP, index).ok_or(Error::NotFound)
}

/// Finds the frame-memory unit sharing `display`'s bus location.
///
/// For each candidate family, instances are enumerated from 0 until the bus
/// reports no more of that type; the first instance whose bus binding equals
/// the display unit's wins. Families are tried strictly in
/// [`MEMORY_UNIT_IDS`] order. Failing to find a companion is fatal to
/// binding this display instance but not to the rest of the system.
pub fn find_memory_unit(
    bus: &dyn ChameleonBus,
    display: &UnitDescriptor,
) -> Result<UnitDescriptor> {
    for id in MEMORY_UNIT_IDS {
        let mut index = 0;
        while let Some(unit) = bus.find_unit(id, index) {
            if unit.binding == display.binding {
                debug!(
                    device_id = unit.device_id.0,
                    instance = unit.instance,
                    binding = unit.binding.pack_u32(),
                    "found frame-memory companion"
                );
                return Ok(unit);
            }
            index += 1;
        }
    }
    Err(Error::NoMatchingMemoryUnit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chameleon_bus::{BusBinding, FpgaCarrier, SharedBar, Z044_DISP};
    use pretty_assertions::assert_eq;

    const CARD_A: BusBinding = BusBinding::new(0, 0x40, 2);
    const CARD_B: BusBinding = BusBinding::new(0, 0x48, 2);

    fn bar() -> SharedBar {
        SharedBar::new(0x9000_0000, 0x1000)
    }

    #[test]
    fn companion_on_the_same_card_is_found() {
        let mut carrier = FpgaCarrier::new();
        let disp = carrier.add_unit(Z044_DISP, CARD_A, 0, 0x100, &bar());
        let sdram = carrier.add_unit(Z043_SDRAM, CARD_A, 1, 0, &bar());

        assert_eq!(find_memory_unit(&carrier, &disp), Ok(sdram));
    }

    #[test]
    fn binding_equality_beats_enumeration_order() {
        // A decoy SDRAM on another card is enumerated first; the binder must
        // skip it and keep walking instances until the bindings match.
        let mut carrier = FpgaCarrier::new();
        carrier.add_unit(Z043_SDRAM, CARD_B, 1, 0, &bar());
        let disp = carrier.add_unit(Z044_DISP, CARD_A, 0, 0x100, &bar());
        let sdram = carrier.add_unit(Z043_SDRAM, CARD_A, 1, 0, &bar());

        assert_eq!(find_memory_unit(&carrier, &disp), Ok(sdram));
    }

    #[test]
    fn sdram_family_outranks_sram_even_when_both_match() {
        let mut carrier = FpgaCarrier::new();
        let disp = carrier.add_unit(Z044_DISP, CARD_A, 0, 0x100, &bar());
        carrier.add_unit(Z024_SRAM, CARD_A, 1, 0, &bar());
        let sdram = carrier.add_unit(Z043_SDRAM, CARD_A, 1, 0, &bar());

        assert_eq!(find_memory_unit(&carrier, &disp), Ok(sdram));
    }

    #[test]
    fn alternate_family_is_used_when_primary_is_absent() {
        let mut carrier = FpgaCarrier::new();
        let disp = carrier.add_unit(Z044_DISP, CARD_A, 0, 0x100, &bar());
        carrier.add_unit(Z043_SDRAM, CARD_B, 1, 0, &bar());
        let sram = carrier.add_unit(Z024_SRAM, CARD_A, 1, 0, &bar());

        assert_eq!(find_memory_unit(&carrier, &disp), Ok(sram));
    }

    #[test]
    fn no_companion_on_the_card_is_fatal_for_this_instance() {
        let mut carrier = FpgaCarrier::new();
        let disp = carrier.add_unit(Z044_DISP, CARD_A, 0, 0x100, &bar());
        carrier.add_unit(Z043_SDRAM, CARD_B, 1, 0, &bar());
        carrier.add_unit(Z024_SRAM, CARD_B, 1, 0, &bar());

        assert_eq!(
            find_memory_unit(&carrier, &disp),
            Err(Error::NoMatchingMemoryUnit)
        );
    }
}
