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

//! A reversible step-debugger wrapping a [`Machine`]. Each `step()` records a
//! full snapshot before executing, so any number of steps can be undone in
//! reverse order; the debugger owns no machine state of its own beyond that
//! snapshot stack.

use crate::bits::concat_bytes;
use crate::decode::{decode, Instruction};
use crate::error::Chip8Error;
use crate::machine::{Machine, MachineSnapshot};

/// Which direction a `Debugger` callback fired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A forward `step()` ran.
    Step,
    /// An `undo()` restored a prior snapshot.
    Undo,
}

/// Wraps a `&mut Machine`, recording a LIFO stack of snapshots so steps can
/// be undone.
///
/// `undo()` on an empty stack fails with [`Chip8Error::StackUnderflow`] and
/// leaves the machine untouched; it is the same error the core itself uses
/// for an empty call stack, since both are "nothing to pop".
pub struct Debugger<'a> {
    machine: &'a mut Machine,
    snapshots: Vec<MachineSnapshot>,
    callbacks: Vec<Box<dyn FnMut(EventKind, Instruction) + 'a>>,
}

impl<'a> Debugger<'a> {
    /// Wrap `machine`, starting with an empty snapshot stack.
    pub fn new(machine: &'a mut Machine) -> Self {
        Self {
            machine,
            snapshots: Vec::new(),
            callbacks: Vec::new(),
        }
    }

    /// Subscribe a callback invoked after every non-silent `step()`/`undo()`
    /// with the kind of event and the instruction it concerns.
    pub fn on_exec<F>(&mut self, f: F)
    where
        F: FnMut(EventKind, Instruction) + 'a,
    {
        self.callbacks.push(Box::new(f));
    }

    /// Snapshot the machine, step it, and (on success) notify subscribers
    /// with the instruction that ran. The snapshot is recorded whether or
    /// not the step succeeds, since a failing step may still have rewound
    /// the program counter out of a blocked wait.
    pub fn step(&mut self) -> Result<bool, Chip8Error> {
        let snapshot = self.machine.snapshot();
        let ins = self.current_instruction();
        self.snapshots.push(snapshot);

        let ran = self.machine.step()?;
        self.dispatch(EventKind::Step, ins);
        Ok(ran)
    }

    /// Same as [`Debugger::step`], without notifying subscribers.
    pub fn step_silent(&mut self) -> Result<bool, Chip8Error> {
        let snapshot = self.machine.snapshot();
        self.snapshots.push(snapshot);
        self.machine.step()
    }

    /// Pop and restore the most recent snapshot, then notify subscribers
    /// with the instruction now current. Returns whether further snapshots
    /// remain to undo. Fails with [`Chip8Error::StackUnderflow`], leaving
    /// the machine untouched, if there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, Chip8Error> {
        let snapshot = self.snapshots.pop().ok_or(Chip8Error::StackUnderflow)?;
        self.machine.load_state(&snapshot);

        let ins = self.current_instruction();
        self.dispatch(EventKind::Undo, ins);
        Ok(!self.snapshots.is_empty())
    }

    /// Same as [`Debugger::undo`], without notifying subscribers.
    pub fn undo_silent(&mut self) -> Result<bool, Chip8Error> {
        let snapshot = self.snapshots.pop().ok_or(Chip8Error::StackUnderflow)?;
        self.machine.load_state(&snapshot);
        Ok(!self.snapshots.is_empty())
    }

    /// Number of snapshots currently recorded (i.e. how many `undo()` calls
    /// would succeed before the stack is empty).
    pub fn snapshot_depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Read-only access to the wrapped machine, for inspection beyond the
    /// passthroughs below.
    pub fn machine(&self) -> &Machine {
        self.machine
    }

    /// Mutable access to the wrapped machine. Mutating directly through
    /// this reference bypasses the snapshot stack; prefer `step`/`undo` for
    /// anything that should be undoable.
    pub fn machine_mut(&mut self) -> &mut Machine {
        self.machine
    }

    /// The full 4096-byte memory.
    pub fn memory(&self) -> &[u8] {
        self.machine.memory()
    }

    /// The value of register `Vi`.
    pub fn register(&self, i: u8) -> u8 {
        self.machine.register(i)
    }

    /// The current program counter.
    pub fn pc(&self) -> u16 {
        self.machine.pc()
    }

    /// The current value of the index register, `I`.
    pub fn index(&self) -> u16 {
        self.machine.index()
    }

    /// The 64x32 frame buffer, one byte per pixel.
    pub fn frame_buffer(&self) -> &[u8] {
        self.machine.frame_buffer()
    }

    /// Overwrite register `Vi` for live editing. Not undoable by itself;
    /// wrap it in a `step`/`undo` pair if that matters.
    pub fn set_register(&mut self, i: u8, value: u8) {
        self.machine.set_register(i, value);
    }

    /// Overwrite the byte at `addr` for live editing.
    pub fn set_memory_byte(&mut self, addr: u16, value: u8) {
        self.machine.set_memory_byte(addr, value);
    }

    /// Overwrite the program counter for live editing.
    pub fn set_pc(&mut self, pc: u16) {
        self.machine.set_pc(pc);
    }

    /// Overwrite the index register for live editing.
    pub fn set_index(&mut self, index: u16) {
        self.machine.set_index(index);
    }

    fn dispatch(&mut self, kind: EventKind, ins: Instruction) {
        for callback in &mut self.callbacks {
            callback(kind, ins);
        }
    }

    /// Decode the instruction the next (or, if blocked, the re-run) `step()`
    /// would fetch, without mutating anything. Mirrors the rewind
    /// `Machine::step` itself performs while blocked.
    fn current_instruction(&self) -> Instruction {
        let pc = if self.machine.is_blocked() {
            self.machine.pc().wrapping_sub(2)
        } else {
            self.machine.pc()
        };

        let memory = self.machine.memory();
        let pc = pc as usize;
        let raw = if pc + 1 < memory.len() {
            concat_bytes(memory[pc], memory[pc + 1])
        } else {
            0
        };

        decode(raw)
    }
}
