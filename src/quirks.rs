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

//! The one piece of dialect configuration this spec exposes: how the
//! shift opcodes and `BNNN` behave across the classic/modern/SUPER-CHIP
//! CHIP-8 lineage.

/// Selects among CHIP-8 dialect variants for the opcodes where they disagree.
///
/// Everything else in the instruction set is dialect-independent and is not
/// gated by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuirkProfile {
    /// The original COSMAC VIP behavior: `8XY6`/`8XYE` copy VY into VX before
    /// shifting, and `BNNN` always indexes with V0.
    #[default]
    ClassicCosmac,

    /// `8XY6`/`8XYE` shift VX in place, ignoring VY. `BNNN` still indexes
    /// with V0.
    Modern,

    /// Same shift behavior as `Modern`, and `BNNN` indexes with VX (the
    /// register named by the high nibble of NNN) instead of V0.
    SuperChip,
}

impl QuirkProfile {
    /// Whether `8XY6`/`8XYE` should ignore VY and shift VX in place.
    pub fn shift_ignores_vy(self) -> bool {
        matches!(self, QuirkProfile::Modern | QuirkProfile::SuperChip)
    }

    /// Whether `BNNN` should index with VX instead of V0.
    pub fn jump_uses_vx(self) -> bool {
        matches!(self, QuirkProfile::SuperChip)
    }

    /// Whether `FX55`/`FX65` should leave `I` untouched instead of advancing
    /// it by `X + 1`.
    pub fn load_store_leaves_index(self) -> bool {
        matches!(self, QuirkProfile::Modern | QuirkProfile::SuperChip)
    }
}
