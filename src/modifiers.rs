//! Shift, rotate, and extension modifiers, plus the modifier groups the
//! matcher tables reference.

/// Modifier identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ModId {
    /// Logical shift left.
    Lsl = 1,
    /// Logical shift right.
    Lsr = 2,
    /// Arithmetic shift right.
    Asr = 3,
    /// Rotate right.
    Ror = 4,
    /// Shift left, inserting ones.
    Msl = 5,
    /// Signed extend from 64 bits.
    Sxtx = 6,
    /// Signed extend from 32 bits.
    Sxtw = 7,
    /// Signed extend from 16 bits.
    Sxth = 8,
    /// Signed extend from 8 bits.
    Sxtb = 9,
    /// Unsigned extend from 64 bits.
    Uxtx = 10,
    /// Unsigned extend from 32 bits.
    Uxtw = 11,
    /// Unsigned extend from 16 bits.
    Uxth = 12,
    /// Unsigned extend from 8 bits.
    Uxtb = 13,
}

impl ModId {
    /// True for the shift/rotate modifiers, which require an amount.
    pub const fn requires_amount(self) -> bool {
        matches!(
            self,
            ModId::Lsl | ModId::Lsr | ModId::Asr | ModId::Ror | ModId::Msl
        )
    }
}

/// A shift, rotate, or extension modifier argument.
///
/// Shift and rotate modifiers require an amount; extension modifiers may be
/// bare. The amount is stored bitwise-complemented so that zero uniquely
/// means "unset" while every real amount (including zero) round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mod {
    /// Modifier identifier.
    pub id: ModId,
    /// Bitwise complement of the shift/rotate amount; zero indicates unset.
    pub amount_inv: u8,
}

impl Mod {
    /// Bare `LSL` modifier.
    pub const LSL: Mod = Mod::bare(ModId::Lsl);
    /// Bare `LSR` modifier.
    pub const LSR: Mod = Mod::bare(ModId::Lsr);
    /// Bare `ASR` modifier.
    pub const ASR: Mod = Mod::bare(ModId::Asr);
    /// Bare `ROR` modifier.
    pub const ROR: Mod = Mod::bare(ModId::Ror);
    /// Bare `MSL` modifier.
    pub const MSL: Mod = Mod::bare(ModId::Msl);
    /// Bare `SXTX` modifier.
    pub const SXTX: Mod = Mod::bare(ModId::Sxtx);
    /// Bare `SXTW` modifier.
    pub const SXTW: Mod = Mod::bare(ModId::Sxtw);
    /// Bare `SXTH` modifier.
    pub const SXTH: Mod = Mod::bare(ModId::Sxth);
    /// Bare `SXTB` modifier.
    pub const SXTB: Mod = Mod::bare(ModId::Sxtb);
    /// Bare `UXTX` modifier.
    pub const UXTX: Mod = Mod::bare(ModId::Uxtx);
    /// Bare `UXTW` modifier.
    pub const UXTW: Mod = Mod::bare(ModId::Uxtw);
    /// Bare `UXTH` modifier.
    pub const UXTH: Mod = Mod::bare(ModId::Uxth);
    /// Bare `UXTB` modifier.
    pub const UXTB: Mod = Mod::bare(ModId::Uxtb);

    const fn bare(id: ModId) -> Self {
        Mod { id, amount_inv: 0 }
    }

    /// Attach a shift or rotate amount.
    pub const fn amount(self, amount: u8) -> Mod {
        Mod {
            id: self.id,
            amount_inv: !amount,
        }
    }

    /// True if a shift or rotate amount is set.
    pub const fn has_amount(self) -> bool {
        self.amount_inv != 0
    }

    /// The shift or rotate amount. Only meaningful if [`Mod::has_amount`]
    /// returns true.
    pub const fn get_amount(self) -> u8 {
        !self.amount_inv
    }
}

/// Named modifier group, referenced by matcher programs that accept any
/// member of the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr)]
#[repr(u8)]
pub enum ModGroup {
    /// All extensions, plus `LSL`.
    Extends = 1,
    /// Extensions from a 32-bit source register.
    ExtendsW = 2,
    /// Extensions from a 64-bit source register, plus `LSL`.
    ExtendsX = 3,
    /// `LSL`, `LSR`, `ASR`.
    Shifts = 4,
    /// `LSL`, `LSR`, `ASR`, `ROR`.
    Rotates = 5,
}

impl ModGroup {
    /// Members of the group.
    pub const fn members(self) -> &'static [ModId] {
        use ModId::*;
        match self {
            ModGroup::Extends => &[Uxtb, Uxth, Uxtw, Uxtx, Sxtb, Sxth, Sxtw, Sxtx, Lsl],
            ModGroup::ExtendsW => &[Uxtb, Uxth, Uxtw, Sxtb, Sxth, Sxtw],
            ModGroup::ExtendsX => &[Uxtx, Sxtx, Lsl],
            ModGroup::Shifts => &[Lsl, Lsr, Asr],
            ModGroup::Rotates => &[Lsl, Lsr, Asr, Ror],
        }
    }

    /// True if `id` belongs to the group.
    pub fn contains(self, id: ModId) -> bool {
        self.members().contains(&id)
    }
}
