/*
Copyright 2020 Anish Jewalikar

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Implementation of a Chip-8 interpreter's state, lifecycle, and
//! fetch-decode-execute stepper. Opcode semantics themselves live in
//! `crate::executor`, as a second `impl Machine` block.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bits::concat_bytes;
use crate::decode::decode;
use crate::error::Chip8Error;
use crate::font::FONT_SPRITES;
use crate::keypad::Keypad;
use crate::quirks::QuirkProfile;

/// Size of the addressable memory, in bytes.
pub const MEMORY_SIZE: usize = 0x1000;
/// Number of general-purpose registers (V0..VF).
pub const NUM_REGISTERS: usize = 16;
/// Number of call-stack entries (SP ranges over `0..=STACK_SIZE`).
pub const STACK_SIZE: usize = 16;
/// Frame buffer width, in pixels.
pub const FRAME_WIDTH: usize = 64;
/// Frame buffer height, in pixels.
pub const FRAME_HEIGHT: usize = 32;
/// Memory address the first program byte is loaded at.
pub const PROGRAM_START: u16 = 0x200;
/// Largest ROM `load_program` will accept.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Where the stepper currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Normal execution; the next `step()` will fetch and dispatch.
    Running,
    /// Parked on `FX0A`, re-running it until a key is pressed.
    Blocked,
    /// The program has run off the end (fetched `0x0000`); `step()` will
    /// keep returning `Ok(false)` until `reset`/`load_program` runs again.
    Halted,
}

/// A verbatim copy of every piece of state that defines a `Machine`, used by
/// [`crate::Debugger`] to implement `undo`.
///
/// Deliberately excludes the RNG: the spec does not require replaying
/// `CXNN` draws identically across undo/redo, only the rest of the machine.
///
/// `memory` and `frame_buffer` are stored as `Vec<u8>` rather than fixed-size
/// arrays: serde only implements `Serialize`/`Deserialize` for arrays up to
/// length 32, which neither field fits under the `savestates` feature.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "savestates", derive(serde::Serialize, serde::Deserialize))]
pub struct MachineSnapshot {
    pub(crate) memory: Vec<u8>,
    pub(crate) registers: [u8; NUM_REGISTERS],
    pub(crate) stack: [u16; STACK_SIZE],
    pub(crate) frame_buffer: Vec<u8>,
    pub(crate) pc: u16,
    pub(crate) index: u16,
    pub(crate) sp: u8,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) blocked: bool,
}

/// A Chip-8 interpreter's full state: memory, registers, stack, frame
/// buffer, timers, and the keypad.
///
/// # Example
///
/// ```rust
/// use chip8_core::Machine;
///
/// let mut machine = Machine::new();
/// machine.load_program(&[0x00, 0x00]).unwrap();
/// machine.step().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Machine {
    pub(crate) memory: Box<[u8; MEMORY_SIZE]>,
    pub(crate) registers: [u8; NUM_REGISTERS],
    pub(crate) stack: [u16; STACK_SIZE],
    pub(crate) frame_buffer: Box<[u8; FRAME_WIDTH * FRAME_HEIGHT]>,
    pub(crate) pc: u16,
    pub(crate) index: u16,
    pub(crate) sp: u8,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) blocked: bool,

    /// Keyboard state. Public: a host mutates this directly between steps.
    pub keypad: Keypad,

    pub(crate) quirks: QuirkProfile,

    rng: StdRng,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Create a new `Machine`, entropy-seeded, using the `ClassicCosmac`
    /// quirk profile.
    pub fn new() -> Self {
        Self::with_quirks(QuirkProfile::default())
    }

    /// Create a new `Machine` whose `CXNN` draws are deterministic, seeded
    /// from `seed`. Useful for tests.
    pub fn with_seed(seed: u64) -> Self {
        let mut machine = Self::new();
        machine.rng = StdRng::seed_from_u64(seed);
        machine
    }

    /// Create a new `Machine` configured with a specific dialect profile.
    /// The profile is fixed for the lifetime of the machine; it survives
    /// `reset()`/`load_program()`.
    pub fn with_quirks(quirks: QuirkProfile) -> Self {
        let mut memory = Box::new([0u8; MEMORY_SIZE]);
        memory[0..FONT_SPRITES.len()].copy_from_slice(&FONT_SPRITES);

        Self {
            memory,
            registers: [0; NUM_REGISTERS],
            stack: [0; STACK_SIZE],
            frame_buffer: Box::new([0; FRAME_WIDTH * FRAME_HEIGHT]),
            pc: PROGRAM_START,
            index: 0,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            blocked: false,
            keypad: Keypad::new(),
            quirks,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reset the interpreter to its initial state: memory zeroed (fonts
    /// re-written at `0x050`), registers/stack/frame buffer cleared,
    /// `PC = 0x200`, `I = SP = 0`, timers zeroed, every key released, and
    /// `blocked` cleared. The quirk profile and RNG are untouched.
    pub fn reset(&mut self) {
        self.memory.iter_mut().for_each(|b| *b = 0);
        self.memory[0..FONT_SPRITES.len()].copy_from_slice(&FONT_SPRITES);

        self.registers = [0; NUM_REGISTERS];
        self.stack = [0; STACK_SIZE];
        self.frame_buffer.iter_mut().for_each(|p| *p = 0);

        self.pc = PROGRAM_START;
        self.index = 0;
        self.sp = 0;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.blocked = false;

        self.keypad.reset();
    }

    /// Reset, then copy `rom` into memory starting at `0x200`.
    ///
    /// Fails without mutating the machine if `rom` is longer than
    /// [`MAX_ROM_SIZE`] (3584) bytes.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge(rom.len()));
        }

        self.reset();
        self.memory[PROGRAM_START as usize..PROGRAM_START as usize + rom.len()]
            .copy_from_slice(rom);

        Ok(())
    }

    /// Saturating-subtract `n` from the delay and sound timers
    /// independently, clamped at zero. The only way wall-clock time enters
    /// the core.
    pub fn decrement_timers(&mut self, n: u8) {
        self.delay_timer = self.delay_timer.saturating_sub(n);
        self.sound_timer = self.sound_timer.saturating_sub(n);
    }

    /// The 64x32 frame buffer, one byte per pixel (0 or 1), row-major:
    /// index `x + y * 64`.
    pub fn frame_buffer(&self) -> &[u8] {
        self.frame_buffer.as_ref()
    }

    /// The full 4096-byte memory.
    pub fn memory(&self) -> &[u8] {
        self.memory.as_ref()
    }

    /// The value of register `Vi` (`i` in `0..16`).
    pub fn register(&self, i: u8) -> u8 {
        self.registers[i as usize]
    }

    /// The current program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// The current value of the index register, `I`.
    pub fn index(&self) -> u16 {
        self.index
    }

    /// The current stack pointer, `0..=16`.
    pub fn stack_pointer(&self) -> u8 {
        self.sp
    }

    /// The current delay timer value.
    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    /// The current sound timer value.
    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// Whether the machine is currently blocked on `FX0A`.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// The configured dialect quirk profile.
    pub fn quirks(&self) -> QuirkProfile {
        self.quirks
    }

    /// Overwrite register `Vi` (`i` in `0..16`). Used by
    /// [`crate::Debugger`] for live editing; opcode handlers mutate
    /// `self.registers` directly instead.
    pub(crate) fn set_register(&mut self, i: u8, value: u8) {
        self.registers[i as usize] = value;
    }

    /// Overwrite the byte at `addr`. Used by [`crate::Debugger`] for live
    /// editing. No-op if `addr` is out of range.
    pub(crate) fn set_memory_byte(&mut self, addr: u16, value: u8) {
        if let Some(slot) = self.memory.get_mut(addr as usize) {
            *slot = value;
        }
    }

    /// Overwrite the program counter. Used by [`crate::Debugger`] for live
    /// editing.
    pub(crate) fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    /// Overwrite the index register. Used by [`crate::Debugger`] for live
    /// editing.
    pub(crate) fn set_index(&mut self, index: u16) {
        self.index = index;
    }

    /// Capture every field needed to restore this machine later via
    /// [`Machine::load_state`]. The RNG is not part of the snapshot.
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            memory: self.memory.as_ref().to_vec(),
            registers: self.registers,
            stack: self.stack,
            frame_buffer: self.frame_buffer.as_ref().to_vec(),
            pc: self.pc,
            index: self.index,
            sp: self.sp,
            delay_timer: self.delay_timer,
            sound_timer: self.sound_timer,
            blocked: self.blocked,
        }
    }

    /// Restore every field captured by [`Machine::snapshot`], verbatim.
    /// Keypad state and the RNG are untouched.
    pub fn load_state(&mut self, snapshot: &MachineSnapshot) {
        self.memory.copy_from_slice(&snapshot.memory);
        self.registers = snapshot.registers;
        self.stack = snapshot.stack;
        self.frame_buffer.copy_from_slice(&snapshot.frame_buffer);
        self.pc = snapshot.pc;
        self.index = snapshot.index;
        self.sp = snapshot.sp;
        self.delay_timer = snapshot.delay_timer;
        self.sound_timer = snapshot.sound_timer;
        self.blocked = snapshot.blocked;
    }

    /// Where the stepper currently stands, without mutating anything.
    pub fn state(&self) -> StepState {
        if self.blocked {
            return StepState::Blocked;
        }

        let pc = self.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return StepState::Running;
        }

        if self.memory[pc] == 0 && self.memory[pc + 1] == 0 {
            StepState::Halted
        } else {
            StepState::Running
        }
    }

    /// Fetch-decode-execute one instruction.
    ///
    /// If `blocked` is set, rewinds the program counter by 2 before
    /// fetching so the same `FX0A` re-runs. Returns `Ok(false)` without
    /// mutating anything further once the fetched word is `0x0000`
    /// (program end). Otherwise advances the program counter by 2 and
    /// dispatches the decoded instruction; a dispatch failure leaves the
    /// machine exactly as it was before the failing instruction.
    pub fn step(&mut self) -> Result<bool, Chip8Error> {
        if self.blocked {
            self.pc = self.pc.wrapping_sub(2);
        }

        let pc = self.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Chip8Error::AddressOutOfRange(self.pc));
        }

        let raw = concat_bytes(self.memory[pc], self.memory[pc + 1]);
        if raw == 0x0000 {
            return Ok(false);
        }

        self.pc = self.pc.wrapping_add(2);

        let ins = decode(raw);
        self.dispatch(ins)?;

        Ok(true)
    }

    /// Generate a uniformly random byte, used by `CXNN`.
    pub(crate) fn random_byte(&mut self) -> u8 {
        use rand::RngCore;
        (self.rng.next_u32() & 0xFF) as u8
    }
}
