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

//! A CHIP-8 interpreter core: fetch-decode-execute state machine plus a
//! reversible step-debugger.
//!
//! This crate contains only the core described by its specification — the
//! machine state, opcode executors, timer contract, keypad model, and
//! debugger. It has no ROM loader, no renderer, and no input backend; a host
//! supplies those by calling [`Machine::load_program`], reading
//! [`Machine::frame_buffer`], and mutating [`Machine::keypad`].
//!
//! ```rust
//! use chip8_core::Machine;
//!
//! let mut machine = Machine::new();
//! machine.load_program(&[0x60, 0x2A, 0x00, 0x00]).unwrap();
//!
//! while machine.step().unwrap() {}
//! assert_eq!(machine.register(0), 0x2A);
//! ```

pub mod bits;
pub mod debugger;
pub mod decode;
mod executor;
pub mod error;
pub mod font;
pub mod keypad;
pub mod machine;
pub mod quirks;

pub use debugger::{Debugger, EventKind};
pub use decode::Instruction;
pub use error::Chip8Error;
pub use keypad::{Key, Keypad};
pub use machine::{Machine, MachineSnapshot, StepState};
pub use quirks::QuirkProfile;
