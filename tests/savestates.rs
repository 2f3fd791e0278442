//! Exercises the optional `savestates` feature: a `MachineSnapshot` must
//! survive a JSON round trip byte-for-byte, the way a host's save-file
//! format would rely on.

#![cfg(feature = "savestates")]

use chip8_core::Machine;

#[test]
fn snapshot_round_trips_through_json() {
    let mut machine = Machine::new();
    machine
        .load_program(&[0x60, 0x2A, 0xA3, 0x00, 0xD0, 0x01, 0x00, 0x00])
        .unwrap();

    machine.step().unwrap();
    machine.step().unwrap();
    machine.step().unwrap();

    let snapshot = machine.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: chip8_core::MachineSnapshot = serde_json::from_str(&json).unwrap();

    let mut reloaded = Machine::new();
    reloaded.load_state(&restored);

    assert_eq!(reloaded.memory(), machine.memory());
    assert_eq!(reloaded.pc(), machine.pc());
    assert_eq!(reloaded.index(), machine.index());
    assert_eq!(reloaded.frame_buffer(), machine.frame_buffer());
}
