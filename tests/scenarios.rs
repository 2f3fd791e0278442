//! End-to-end scenarios, one per `step()` contract in the spec's worked
//! examples: jumps/calls, draw/collision, the blocking wait-for-key opcode,
//! BCD, and the font-sprite address lookup.

use chip8_core::Machine;

#[test]
fn jump_then_set_then_add() {
    let mut machine = Machine::new();
    machine
        .load_program(&[0x12, 0x04, 0x00, 0x00, 0x60, 0x05, 0x70, 0x03, 0x00, 0x00])
        .unwrap();

    assert!(machine.step().unwrap()); // 1204: jump to 0x204
    assert!(machine.step().unwrap()); // 6005: V0 = 5
    assert!(machine.step().unwrap()); // 7003: V0 += 3

    assert_eq!(machine.pc(), 0x208);
    assert_eq!(machine.register(0), 0x08);
    assert_eq!(machine.step().unwrap(), false);
}

#[test]
fn call_then_set_then_return() {
    let mut rom = vec![0u8; 10];
    rom[0] = 0x22;
    rom[1] = 0x06; // 2206: call 0x206
    rom[6] = 0x60;
    rom[7] = 0x42; // 6042: V0 = 0x42
    rom[8] = 0x00;
    rom[9] = 0xEE; // 00EE: return

    let mut machine = Machine::new();
    machine.load_program(&rom).unwrap();

    assert!(machine.step().unwrap());
    assert_eq!(machine.stack_pointer(), 1);
    assert_eq!(machine.pc(), 0x206);

    assert!(machine.step().unwrap());
    assert_eq!(machine.register(0), 0x42);

    assert!(machine.step().unwrap());
    assert_eq!(machine.stack_pointer(), 0);
    assert_eq!(machine.pc(), 0x202);

    assert_eq!(machine.step().unwrap(), false);
}

#[test]
fn draw_sprite_then_redraw_collides_and_clears() {
    let mut machine = Machine::new();
    machine
        .load_program(&[
            0x12, 0x06, // jump to 0x206
            0xFF, 0x00, // data: sprite row at 0x202
            0x00, 0x00, // padding (skipped)
            0xA2, 0x02, // I = 0x202
            0xD0, 0x11, // draw V0,V1,1 row
            0xD0, 0x11, // draw again: collision, clears
            0x00, 0x00,
        ])
        .unwrap();

    machine.step().unwrap(); // jump
    machine.step().unwrap(); // set I

    machine.step().unwrap(); // first draw
    assert_eq!(machine.register(0xF), 0);
    for x in 0..8 {
        assert_eq!(machine.frame_buffer()[x], 1);
    }

    machine.step().unwrap(); // second draw
    assert_eq!(machine.register(0xF), 1);
    for x in 0..8 {
        assert_eq!(machine.frame_buffer()[x], 0);
    }
}

#[test]
fn wait_for_key_blocks_until_a_key_is_pressed() {
    let mut machine = Machine::new();
    machine
        .load_program(&[0xF0, 0x0A, 0x61, 0x23, 0x00, 0x00])
        .unwrap();

    for _ in 0..5 {
        assert!(machine.step().unwrap());
        assert!(machine.is_blocked());
        assert_eq!(machine.register(0), 0x00);
    }

    machine.keypad.set_pressed(0x7);
    assert!(machine.step().unwrap());
    assert!(!machine.is_blocked());
    assert_eq!(machine.register(0), 0x07);

    assert!(machine.step().unwrap());
    assert_eq!(machine.register(1), 0x23);
}

#[test]
fn bcd_decomposes_register_into_memory() {
    let mut machine = Machine::new();
    machine
        .load_program(&[0x60, 0x9C, 0xA3, 0x00, 0xF0, 0x33, 0x00, 0x00])
        .unwrap();

    machine.step().unwrap(); // V0 = 0x9C (156)
    machine.step().unwrap(); // I = 0x300
    machine.step().unwrap(); // BCD

    assert_eq!(&machine.memory()[0x300..0x303], &[1, 5, 6]);
}

#[test]
fn font_sprite_address_lookup() {
    let mut machine = Machine::new();
    machine
        .load_program(&[0x60, 0x0A, 0xF0, 0x29, 0x00, 0x00])
        .unwrap();

    machine.step().unwrap(); // V0 = 0xA
    machine.step().unwrap(); // I = font sprite for digit A

    assert_eq!(machine.index(), 0x50 + 5 * 0xA);
}
