//! End-to-end probe flow against the in-memory carrier model: two cards on
//! one bus, each with its own display/memory pair, driven through the
//! command surface.

use chameleon_bus::{BusBinding, ChameleonBus, FpgaCarrier, SharedBar, Z024_SRAM, Z043_SDRAM, Z044_DISP};
use pretty_assertions::assert_eq;
use z044_fb::regs::{DispCtrl, Z044_DISP_FOFFS};
use z044_fb::{Command, Config, DisplayRegistry, Error};

const CARD_A: BusBinding = BusBinding::new(0, 0x40, 2);
const CARD_B: BusBinding = BusBinding::new(1, 0x50, 3);

struct Card {
    regs: SharedBar,
    #[allow(dead_code)]
    vram: SharedBar,
}

/// Adds a display unit plus a frame-memory companion for one card.
fn add_card(
    carrier: &mut FpgaCarrier,
    binding: BusBinding,
    resolution_code: u32,
    memory_id: chameleon_bus::DeviceId,
    vram_len: usize,
) -> Card {
    let regs = SharedBar::new(0x8000_0000 + u64::from(binding.pack_u32()), 0x1000);
    let vram = SharedBar::new(0xA000_0000 + u64::from(binding.pack_u32()), vram_len);
    regs.poke32(0, resolution_code);
    carrier.add_unit(Z044_DISP, binding, 0, 0, &regs);
    carrier.add_unit(memory_id, binding, 1, 0, &vram);
    Card { regs, vram }
}

#[test]
fn two_cards_bind_independently() {
    let mut carrier = FpgaCarrier::new();
    let card_a = add_card(&mut carrier, CARD_A, 2, Z043_SDRAM, 1024 * 768 * 2 * 4);
    let card_b = add_card(&mut carrier, CARD_B, 1, Z024_SRAM, 800 * 600 * 2 * 2);

    let mut registry = DisplayRegistry::new();
    let disp_a = carrier.find_unit(Z044_DISP, 0).unwrap();
    let disp_b = carrier.find_unit(Z044_DISP, 1).unwrap();

    let handle_a = registry
        .probe(&carrier, &carrier, Config::default(), &disp_a, None)
        .unwrap();
    let handle_b = registry
        .probe(&carrier, &carrier, Config::default(), &disp_b, None)
        .unwrap();
    assert_eq!(registry.len(), 2);

    {
        let device = registry.device(handle_a).unwrap();
        let device = device.lock().unwrap();
        assert_eq!(device.name(), "fb16z044_0");
        assert_eq!((device.width(), device.height()), (1024, 768));
        let descriptor = device.mode_descriptor();
        assert_eq!(descriptor.mode.line_length, 2048);
        assert_eq!(descriptor.frame_memory.len, 1024 * 768 * 2 * 4);
    }
    {
        let device = registry.device(handle_b).unwrap();
        let device = device.lock().unwrap();
        assert_eq!(device.name(), "fb16z044_1");
        assert_eq!((device.width(), device.height()), (800, 600));
    }

    // Both register windows reached the default state independently.
    for card in [&card_a, &card_b] {
        let ctrl = DispCtrl::from_bits_retain(card.regs.peek32(0));
        assert!(!ctrl.contains(DispCtrl::ONOFF));
        assert!(ctrl.contains(DispCtrl::CHANGE));
    }
}

#[test]
fn command_surface_drives_the_hardware() {
    let mut carrier = FpgaCarrier::new();
    let card = add_card(&mut carrier, CARD_A, 2, Z043_SDRAM, 1024 * 768 * 2 * 4);

    let mut registry = DisplayRegistry::new();
    let disp = carrier.find_unit(Z044_DISP, 0).unwrap();
    let handle = registry
        .probe(&carrier, &carrier, Config::default(), &disp, None)
        .unwrap();
    let device = registry.device(handle).unwrap();
    let mut device = device.lock().unwrap();

    // Raw wire codes, as an external dispatcher would hand them in.
    let blank = Command::from_raw(z044_fb::command::FBIO_BLANK, 0).unwrap();
    z044_fb::dispatch(&mut device, blank).unwrap();
    assert!(DispCtrl::from_bits_retain(card.regs.peek32(0)).contains(DispCtrl::ONOFF));

    let refresh = Command::from_raw(z044_fb::command::FBIO_ENABLE_75HZ, 0).unwrap();
    z044_fb::dispatch(&mut device, refresh).unwrap();
    assert!(DispCtrl::from_bits_retain(card.regs.peek32(0)).contains(DispCtrl::REFRESH));
    assert_eq!(device.refresh_rate_hz(), 75);

    let screen = Command::from_raw(z044_fb::command::FBIO_SET_SCREEN, 2).unwrap();
    z044_fb::dispatch(&mut device, screen).unwrap();
    assert_eq!(card.regs.peek32(Z044_DISP_FOFFS), 2 * 1024 * 768 * 2);

    // An out-of-range screen surfaces the typed error and leaves the
    // register untouched.
    let before = card.regs.peek32(Z044_DISP_FOFFS);
    let max = device.max_screens();
    let err = z044_fb::dispatch(&mut device, Command::SetScreen(max + 1)).unwrap_err();
    assert_eq!(err, Error::ScreenIndexOutOfRange { index: max + 1, max });
    assert_eq!(card.regs.peek32(Z044_DISP_FOFFS), before);
}

#[test]
fn a_card_missing_its_memory_does_not_poison_the_bus() {
    let mut carrier = FpgaCarrier::new();
    // Card A is complete; card B has a display unit but no memory companion.
    add_card(&mut carrier, CARD_A, 0, Z043_SDRAM, 0x0010_0000);
    let lone_regs = SharedBar::new(0x8800_0000, 0x1000);
    carrier.add_unit(Z044_DISP, CARD_B, 0, 0, &lone_regs);

    let mut registry = DisplayRegistry::new();
    let disp_a = carrier.find_unit(Z044_DISP, 0).unwrap();
    let disp_b = carrier.find_unit(Z044_DISP, 1).unwrap();

    assert_eq!(
        registry.probe(&carrier, &carrier, Config::default(), &disp_b, None),
        Err(Error::NoMatchingMemoryUnit)
    );
    // The complete card still binds.
    registry
        .probe(&carrier, &carrier, Config::default(), &disp_a, None)
        .unwrap();
    assert_eq!(registry.len(), 1);
}
