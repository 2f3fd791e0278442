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

//! The typed failures the decoder, executor, and debugger can surface.

use thiserror::Error;

/// Everything that can go wrong executing or stepping a [`crate::Machine`].
///
/// A failing operation never mutates the machine: see the commit-or-nothing
/// policy documented on [`crate::Machine::step`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Chip8Error {
    /// A `0NNN` machine call, or any opcode whose low nibble/low byte does
    /// not match a defined instruction form.
    #[error("unsupported opcode: {0:#06x}")]
    UnsupportedOpcode(u16),

    /// A jump/call target, or a memory access, fell outside `0..4096`.
    #[error("address {0:#06x} is out of range")]
    AddressOutOfRange(u16),

    /// `2NNN` (call) was executed with the stack already full (SP == 16).
    #[error("call stack is full")]
    StackOverflow,

    /// `00EE` (return) was executed with an empty stack (SP == 0), or
    /// `Debugger::undo` was called with no snapshot to restore.
    #[error("call stack (or snapshot stack) is empty")]
    StackUnderflow,

    /// A category 5/8/9/E/F opcode had a low nibble/byte that is not one of
    /// the defined variants for that category.
    #[error("malformed instruction: {0:#06x}")]
    BadInstructionFormat(u16),

    /// `Machine::load_program` was given a ROM longer than 3584 bytes.
    #[error("rom is {0} bytes, the maximum is {max} bytes", max = crate::machine::MAX_ROM_SIZE)]
    RomTooLarge(usize),
}
