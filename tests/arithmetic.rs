//! Arithmetic boundary scenarios for the `8XY_` register-to-register family,
//! covering carry/borrow/shift edge cases against concrete byte values.

use chip8_core::Machine;

/// Load `V0 = v0`, `V1 = v1`, then execute a single `8XY_` opcode, and
/// return `(V0, VF)` afterwards.
fn run_8xy(v0: u8, v1: u8, opcode: u16) -> (u8, u8) {
    let mut machine = Machine::new();
    let rom = [
        0x60,
        v0,
        0x61,
        v1,
        (opcode >> 8) as u8,
        (opcode & 0xFF) as u8,
        0x00,
        0x00,
    ];
    machine.load_program(&rom).unwrap();

    machine.step().unwrap();
    machine.step().unwrap();
    machine.step().unwrap();

    (machine.register(0), machine.register(0xF))
}

#[test]
fn add_with_carry() {
    assert_eq!(run_8xy(0xFF, 0x01, 0x8014), (0x00, 1));
}

#[test]
fn sub_without_borrow() {
    assert_eq!(run_8xy(0x01, 0x02, 0x8015), (0xFF, 0));
}

#[test]
fn sub_to_zero_sets_no_borrow_flag() {
    assert_eq!(run_8xy(0x02, 0x02, 0x8015), (0x00, 1));
}

#[test]
fn shift_right_copies_vy_before_shifting() {
    assert_eq!(run_8xy(0x00, 0x03, 0x8016), (0x01, 1));
}

#[test]
fn shift_left_copies_vy_before_shifting() {
    assert_eq!(run_8xy(0x00, 0x81, 0x801E), (0x02, 1));
}

#[test]
fn or_and_xor_clear_vf() {
    let mut machine = Machine::new();
    machine
        .load_program(&[
            0x60, 0xF0, // V0 = 0xF0
            0x61, 0x0F, // V1 = 0x0F
            0x6F, 0x01, // VF = 1 (should be clobbered by the OR below)
            0x80, 0x11, // V0 |= V1
            0x00, 0x00,
        ])
        .unwrap();

    for _ in 0..4 {
        machine.step().unwrap();
    }

    assert_eq!(machine.register(0), 0xFF);
    assert_eq!(machine.register(0xF), 0);
}

#[test]
fn add_immediate_does_not_touch_vf() {
    let mut machine = Machine::new();
    machine
        .load_program(&[
            0x6F, 0x01, // VF = 1
            0x60, 0xFF, // V0 = 0xFF
            0x70, 0x02, // V0 += 2, wraps to 0x01
            0x00, 0x00,
        ])
        .unwrap();

    for _ in 0..3 {
        machine.step().unwrap();
    }

    assert_eq!(machine.register(0), 0x01);
    assert_eq!(machine.register(0xF), 1);
}
