//! The encoder interpreter: walks a matched encoding's command program over
//! the flattened operand slots, validating each operand and depositing its
//! bits into the 32-bit opcode.
//!
//! A64 instructions have a fixed length of 32 bits and are always stored
//! little-endian (Arm Architecture Reference Manual for A-profile, B2.6.2).

use crate::assembler::{Assembler, Reloc};
use crate::error::Error;
use crate::flatten::Flat;
use crate::modifiers::ModId;
use crate::symbols::{self, Symbol};

/// Command operator bytes, as stored in the command stream.
pub(crate) mod cmd {
    /// Register id, 5-bit field at bit 0.
    pub const R0: u8 = 1;
    /// Register id, 5-bit field at bit 5.
    pub const R5: u8 = 2;
    /// Register id, 5-bit field at bit 10.
    pub const R10: u8 = 3;
    /// Register id, 5-bit field at bit 16.
    pub const R16: u8 = 4;
    /// Register id below 16, 4-bit field at bit 16.
    pub const R_LO16: u8 = 5;
    /// Register id except 31, 5-bit field at bit 16.
    pub const R_NZ16: u8 = 6;
    /// Even register id, 5-bit field at the given offset.
    pub const R_EVEN: u8 = 7;
    /// The register must equal the previous register plus one (mod 32);
    /// encodes nothing.
    pub const R_NEXT: u8 = 8;
    /// SIMD 128-bit width indicator at bit 30.
    pub const RWIDTH30: u8 = 9;
    /// Unsigned immediate: (offset, bitlen).
    pub const UBITS: u8 = 10;
    /// Unsigned scaled immediate: (offset, bitlen, shift).
    pub const USCALED: u8 = 11;
    /// Immediate restricted to a two-entry alternatives list:
    /// (offset, list index).
    pub const UALT2: u8 = 12;
    /// Immediate restricted to a four-entry alternatives list:
    /// (offset, list index).
    pub const UALT4: u8 = 13;
    /// Immediate within [min, max], encoded as value-min: (offset, min, max).
    pub const URANGE: u8 = 14;
    /// Immediate within (add-2^bitlen, add], encoded as add-value:
    /// (offset, bitlen, add).
    pub const USUB: u8 = 15;
    /// Immediate within [0, 2^bitlen), encoded as -value mod 2^bitlen:
    /// (offset, bitlen).
    pub const UNEGMOD: u8 = 16;
    /// Previous immediate plus this one minus one, mod 2^bitlen:
    /// (offset, bitlen).
    pub const USUMDEC: u8 = 17;
    /// Immediate split bitwise across fields at bits [11, 21, 20]: (count).
    pub const UFIELDS11: u8 = 18;
    /// Immediate split bitwise across fields at bits [30, 12, 11, 10]:
    /// (count).
    pub const UFIELDS30: u8 = 19;
    /// Single-bit immediate at bit 21.
    pub const UFIELDS21: u8 = 20;
    /// Signed 9-bit immediate at bit 12.
    pub const SBITS: u8 = 21;
    /// Signed scaled 7-bit immediate at bit 15: (shift).
    pub const SSCALED: u8 = 22;
    /// Check: immediate fits in the given bit length.
    pub const CHK_UBITS: u8 = 23;
    /// Check: immediate within [1, 2^shift - previous immediate]: (shift).
    pub const CHK_USUM: u8 = 24;
    /// Check: signed 10-bit immediate scaled by 8.
    pub const CHK_SSCALED: u8 = 25;
    /// Check: immediate within [1, max]: (max).
    pub const CHK_URANGE1: u8 = 26;
    /// Deposit an unsigned bit slice without advancing:
    /// (offset, bitlen, start).
    pub const USLICE: u8 = 27;
    /// Deposit a signed bit slice without advancing:
    /// (offset, bitlen, start).
    pub const SSLICE: u8 = 28;
    /// Special immediate form: (offset, special kind).
    pub const SPECIAL: u8 = 29;
    /// Shift/rotate kind, 2-bit field at bit 22.
    pub const ROTATES: u8 = 30;
    /// Extension kind, 3-bit field at bit 13; LSL maps to UXTW.
    pub const EXTENDS_W: u8 = 31;
    /// Extension kind, 3-bit field at bit 13; LSL maps to UXTX.
    pub const EXTENDS_X: u8 = 32;
    /// Condition code, 4-bit field at the given offset.
    pub const COND: u8 = 33;
    /// Condition code with inverted low bit; AL/NV rejected: (offset).
    pub const COND_INV: u8 = 34;
    /// Symbol from a named operation set: (offset, set).
    pub const LIT_LIST: u8 = 35;
    /// PC-relative displacement or label reference: (relocation kind).
    pub const OFFSET: u8 = 36;
    /// Advance the operand cursor.
    pub const ADV: u8 = 37;
    /// Move the operand cursor back.
    pub const BACK: u8 = 38;
}

/// Relocation kinds, stored as the argument of [`cmd::OFFSET`].
pub(crate) mod rel {
    /// B, BL: 26-bit field at bit 0, word aligned, +/-128 MiB.
    pub const B: u8 = 39;
    /// B.cond, CBZ/CBNZ, LDR literal, LDRSW, PRFM: 19-bit field at bit 5,
    /// word aligned, +/-1 MiB.
    pub const B_COND: u8 = 40;
    /// ADR: split 21-bit field, byte aligned, +/-1 MiB.
    pub const ADR: u8 = 41;
    /// ADRP: split 21-bit field over the page offset, page aligned,
    /// +/-4 GiB.
    pub const ADRP: u8 = 42;
    /// TBZ/TBNZ: 14-bit field at bit 5, word aligned, +/-32 KiB.
    pub const TBZ: u8 = 43;
}

/// Operation-set selectors, stored as the second argument of
/// [`cmd::LIT_LIST`].
pub(crate) mod symset {
    /// Address translation operations.
    pub const ATOPS: u8 = 44;
    /// Data cache operations.
    pub const DCOPS: u8 = 45;
    /// Instruction cache operations.
    pub const ICOPS: u8 = 46;
    /// Translation table operations.
    pub const TLBIOPS: u8 = 47;
    /// Barrier operations.
    pub const BARRIEROPS: u8 = 48;
    /// Immediate-form system registers.
    pub const MSRIMMOPS: u8 = 49;
    /// Control registers C0 to C15.
    pub const CONTROLREGS: u8 = 50;
}

/// Special immediate kinds, stored as the second argument of
/// [`cmd::SPECIAL`].
pub(crate) mod special {
    /// 32-bit wide-move immediate, pre-inverted.
    pub const WIDE_INV32: u8 = 1;
    /// 64-bit wide-move immediate, pre-inverted.
    pub const WIDE_INV64: u8 = 2;
    /// 32-bit wide-move immediate.
    pub const WIDE32: u8 = 3;
    /// 64-bit wide-move immediate.
    pub const WIDE64: u8 = 4;
    /// 8-bit-to-64-bit bit-stretched immediate.
    pub const STRETCHED: u8 = 5;
    /// 32-bit logical (bitmask) immediate.
    pub const LOGICAL32: u8 = 6;
    /// 64-bit logical (bitmask) immediate.
    pub const LOGICAL64: u8 = 7;
    /// 8-bit float immediate.
    pub const FLOAT: u8 = 8;
    /// 8-bit float immediate, split field.
    pub const FLOAT_SPLIT: u8 = 9;
}

/// Argument byte count per command operator.
pub(crate) const CMD_ARG_COUNTS: [u8; 39] = {
    let mut counts = [0u8; 39];
    counts[cmd::R_EVEN as usize] = 1;
    counts[cmd::UBITS as usize] = 2;
    counts[cmd::USCALED as usize] = 3;
    counts[cmd::UALT2 as usize] = 2;
    counts[cmd::UALT4 as usize] = 2;
    counts[cmd::URANGE as usize] = 3;
    counts[cmd::USUB as usize] = 3;
    counts[cmd::UNEGMOD as usize] = 2;
    counts[cmd::USUMDEC as usize] = 2;
    counts[cmd::UFIELDS11 as usize] = 1;
    counts[cmd::UFIELDS30 as usize] = 1;
    counts[cmd::SSCALED as usize] = 1;
    counts[cmd::CHK_UBITS as usize] = 1;
    counts[cmd::CHK_USUM as usize] = 1;
    counts[cmd::CHK_URANGE1 as usize] = 1;
    counts[cmd::USLICE as usize] = 3;
    counts[cmd::SSLICE as usize] = 3;
    counts[cmd::SPECIAL as usize] = 2;
    counts[cmd::COND as usize] = 1;
    counts[cmd::COND_INV as usize] = 1;
    counts[cmd::LIT_LIST as usize] = 2;
    counts[cmd::OFFSET as usize] = 1;
    counts
};

/// Two-entry alternatives lists, indexed by the table argument of
/// [`cmd::UALT2`].
pub(crate) const ALTS2: [[u16; 2]; 10] = [
    [0, 0],
    [0, 1],
    [0, 2],
    [0, 3],
    [0, 4],
    [0, 8],
    [0, 12],
    [0, 16],
    [8, 16],
    [90, 270],
];

/// Four-entry alternatives lists, indexed by the table argument of
/// [`cmd::UALT4`].
pub(crate) const ALTS4: [[u16; 4]; 3] = [
    [0, 8, 16, 24],
    [0, 16, 32, 48],
    [0, 90, 180, 270],
];

impl Assembler {
    /// Runs the matched encoding's command program and writes the composed
    /// instruction word to the code buffer.
    pub(crate) fn encode(&mut self) -> Result<(), Error> {
        let pc = self.pc as usize;
        if pc + 4 > self.code.len() {
            return Err(Error::InvalidEncoding);
        }
        self.flatten_args();
        self.pending_relocs.clear();

        let mut opcode = self.opcode;
        let mut cursor = 0usize;
        for ci in 0..self.cmds.len() {
            let op = self.cmds[ci];
            match op.op {
                cmd::ADV => {
                    cursor += 1;
                    continue;
                }
                cmd::BACK => {
                    cursor = cursor.checked_sub(1).ok_or(Error::InvalidEncoding)?;
                    continue;
                }
                cmd::RWIDTH30 => {
                    if self.simd_size == 0 || self.simd_size == 16 {
                        opcode |= 1 << 30;
                    }
                    continue;
                }
                _ => {}
            }

            let slot = *self.flat.get(cursor).ok_or(Error::InvalidEncoding)?;
            match slot {
                Flat::Reg(id) => {
                    let reg = id as u32;
                    match op.op {
                        cmd::R0 => opcode |= reg,
                        cmd::R5 => opcode |= reg << 5,
                        cmd::R10 => opcode |= reg << 10,
                        cmd::R16 => opcode |= reg << 16,
                        cmd::R_NZ16 => {
                            if id == 31 {
                                return Err(Error::InvalidEncoding);
                            }
                            opcode |= reg << 16;
                        }
                        cmd::R_LO16 => {
                            if id >= 16 {
                                return Err(Error::InvalidEncoding);
                            }
                            opcode |= reg << 16;
                        }
                        cmd::R_EVEN => {
                            if id & 1 != 0 {
                                return Err(Error::InvalidEncoding);
                            }
                            opcode |= reg << op.x[0];
                        }
                        cmd::R_NEXT => {
                            let prev = cursor
                                .checked_sub(1)
                                .and_then(|i| self.flat.get(i).copied());
                            match prev {
                                Some(Flat::Reg(p)) if id == p.wrapping_add(1) % 32 => {}
                                _ => return Err(Error::InvalidEncoding),
                            }
                        }
                        _ => return Err(Error::InvalidEncoding),
                    }
                }

                Flat::Mod(id) => match op.op {
                    cmd::ROTATES => {
                        opcode |= match id {
                            ModId::Lsl => 0b00 << 22,
                            ModId::Lsr => 0b01 << 22,
                            ModId::Asr => 0b10 << 22,
                            ModId::Ror => 0b11 << 22,
                            _ => return Err(Error::InvalidEncoding),
                        };
                    }
                    cmd::EXTENDS_W | cmd::EXTENDS_X => {
                        opcode |= match id {
                            ModId::Uxtb => 0b000 << 13,
                            ModId::Uxth => 0b001 << 13,
                            ModId::Uxtw => 0b010 << 13,
                            ModId::Uxtx => 0b011 << 13,
                            ModId::Sxtb => 0b100 << 13,
                            ModId::Sxth => 0b101 << 13,
                            ModId::Sxtw => 0b110 << 13,
                            ModId::Sxtx => 0b111 << 13,
                            ModId::Lsl if op.op == cmd::EXTENDS_W => 0b010 << 13,
                            ModId::Lsl => 0b011 << 13,
                            _ => return Err(Error::InvalidEncoding),
                        };
                    }
                    _ => return Err(Error::InvalidEncoding),
                },

                Flat::Imm(v) => match op.op {
                    cmd::COND => {
                        let offset = op.x[0];
                        let lo = Symbol::EQ as u64;
                        let hi = Symbol::NV as u64;
                        if v < lo || v > hi {
                            return Err(Error::InvalidEncoding);
                        }
                        opcode |= ((v - lo) as u32) << offset;
                    }
                    cmd::COND_INV => {
                        let offset = op.x[0];
                        let lo = Symbol::EQ as u64;
                        let hi = Symbol::AL as u64;
                        if v < lo || v >= hi {
                            return Err(Error::InvalidEncoding);
                        }
                        opcode |= (((v - lo) as u32) ^ 1) << offset;
                    }
                    cmd::LIT_LIST => {
                        let (offset, list_sym) = (op.x[0], op.x[1]);
                        let raw = u8::try_from(v).map_err(|_| Error::InvalidEncoding)?;
                        if !sym_list_contains(list_sym, raw) {
                            return Err(Error::InvalidEncoding);
                        }
                        let value = if list_sym == symset::CONTROLREGS {
                            (raw - Symbol::C0 as u8) as u32
                        } else {
                            match Symbol::from_repr(raw) {
                                Some(sym) => sym.value() as u32,
                                None => return Err(Error::InvalidEncoding),
                            }
                        };
                        opcode |= value << offset;
                    }
                    cmd::UALT2 => {
                        let (offset, list_idx) = (op.x[0], op.x[1] as usize);
                        let i = check_alt(&ALTS2[list_idx], v).ok_or(Error::InvalidEncoding)?;
                        opcode |= (i as u32) << offset;
                    }
                    cmd::UALT4 => {
                        let (offset, list_idx) = (op.x[0], op.x[1] as usize);
                        let i = check_alt(&ALTS4[list_idx], v).ok_or(Error::InvalidEncoding)?;
                        opcode |= (i as u32) << offset;
                    }
                    cmd::UBITS => {
                        let (offset, bitlen) = (op.x[0], op.x[1]);
                        let mask = (1u32 << bitlen) - 1;
                        if !unsigned_in_range(v, 0, mask, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                        opcode |= ((v as u32) & mask) << offset;
                    }
                    cmd::SBITS => {
                        const OFFSET: u8 = 12;
                        const MASK: i32 = (1 << 9) - 1;
                        const HALF: i32 = -(1 << 8);
                        if !signed_in_range(v as i64, HALF, MASK + HALF, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                        opcode |= ((v as u32) & MASK as u32) << OFFSET;
                    }
                    cmd::USCALED => {
                        let (offset, bitlen, shift) = (op.x[0], op.x[1], op.x[2]);
                        let mask = (1u32 << bitlen) - 1;
                        if !unsigned_in_range(v, 0, mask, shift) {
                            return Err(Error::InvalidEncoding);
                        }
                        opcode |= (((v as u32) >> shift) & mask) << offset;
                    }
                    cmd::SSCALED => {
                        let shift = op.x[0];
                        const OFFSET: u8 = 15;
                        const MASK: i32 = (1 << 7) - 1;
                        const HALF: i32 = -(1 << 6);
                        if !signed_in_range(v as i64, HALF, MASK + HALF, shift) {
                            return Err(Error::InvalidEncoding);
                        }
                        opcode |= (((v as u32) >> shift) & MASK as u32) << OFFSET;
                    }
                    cmd::USLICE | cmd::SSLICE => {
                        let (offset, bitlen, start) = (op.x[0], op.x[1], op.x[2]);
                        let mask = (1u32 << bitlen) - 1;
                        opcode |= (((v as u32) >> start) & mask) << offset;
                    }
                    cmd::URANGE => {
                        let (offset, min, max) = (op.x[0], op.x[1] as u32, op.x[2] as u32);
                        if !unsigned_in_range(v, min, max, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                        opcode |= ((v as u32) - min) << offset;
                    }
                    cmd::USUB => {
                        let (offset, bitlen, add) = (op.x[0], op.x[1], op.x[2] as u32);
                        let mask = (1u32 << bitlen) - 1;
                        if !unsigned_in_range(v, add.wrapping_sub(mask), add, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                        opcode |= (add.wrapping_sub(v as u32) & mask) << offset;
                    }
                    cmd::UNEGMOD => {
                        let (offset, bitlen) = (op.x[0], op.x[1]);
                        let mask = (1u32 << bitlen) - 1;
                        if !unsigned_in_range(v, 0, mask, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                        let add = 1u64 << bitlen;
                        opcode |= (((add - v) as u32) & mask) << offset;
                    }
                    cmd::USUMDEC => {
                        let (offset, bitlen) = (op.x[0], op.x[1]);
                        let mask = (1u64 << bitlen) - 1;
                        let prev = cursor
                            .checked_sub(1)
                            .and_then(|i| self.flat.get(i).copied());
                        let prev = match prev {
                            Some(Flat::Imm(p)) => p,
                            _ => return Err(Error::InvalidEncoding),
                        };
                        opcode |= ((prev.wrapping_add(v).wrapping_sub(1) & mask) as u32) << offset;
                    }
                    cmd::UFIELDS11 => {
                        let count = op.x[0] as usize;
                        let mask = (1u32 << count) - 1;
                        if !unsigned_in_range(v, 0, mask, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                        const FIELDS: [u8; 3] = [20, 21, 11];
                        for (i, b) in FIELDS[3 - count..].iter().enumerate() {
                            opcode |= (((v as u32) >> i) & 1) << b;
                        }
                    }
                    cmd::UFIELDS30 => {
                        let count = op.x[0] as usize;
                        let mask = (1u32 << count) - 1;
                        if !unsigned_in_range(v, 0, mask, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                        const FIELDS: [u8; 4] = [10, 11, 12, 30];
                        for (i, b) in FIELDS[4 - count..].iter().enumerate() {
                            opcode |= (((v as u32) >> i) & 1) << b;
                        }
                    }
                    cmd::UFIELDS21 => {
                        if v & 1 != v {
                            return Err(Error::InvalidEncoding);
                        }
                        opcode |= ((v as u32) & 1) << 21;
                    }
                    cmd::SPECIAL => {
                        let (offset, kind) = (op.x[0], op.x[1]);
                        let enc =
                            enc_special_imm(offset, kind, v).ok_or(Error::InvalidEncoding)?;
                        opcode |= enc;
                    }
                    cmd::OFFSET => {
                        let enc =
                            enc_offset(op.x[0], v as i64).ok_or(Error::InvalidEncoding)?;
                        opcode |= enc;
                    }
                    cmd::CHK_UBITS => {
                        let mask = (1u32 << op.x[0]) - 1;
                        if !unsigned_in_range(v, 0, mask, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                    }
                    cmd::CHK_USUM => {
                        let shift = op.x[0];
                        let prev = cursor
                            .checked_sub(1)
                            .and_then(|i| self.flat.get(i).copied());
                        let prev = match prev {
                            Some(Flat::Imm(p)) => p,
                            _ => return Err(Error::InvalidEncoding),
                        };
                        let max = (1u64 << shift).saturating_sub(prev);
                        let max = u32::try_from(max).map_err(|_| Error::InvalidEncoding)?;
                        if !unsigned_in_range(v, 1, max, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                    }
                    cmd::CHK_SSCALED => {
                        const MASK: i32 = (1 << 10) - 1;
                        const HALF: i32 = -(1 << 9);
                        if !signed_in_range(v as i64, HALF, MASK + HALF, 3) {
                            return Err(Error::InvalidEncoding);
                        }
                    }
                    cmd::CHK_URANGE1 => {
                        if !unsigned_in_range(v, 1, op.x[0] as u32, 0) {
                            return Err(Error::InvalidEncoding);
                        }
                    }
                    _ => return Err(Error::InvalidEncoding),
                },

                Flat::Label(label) => {
                    if op.op != cmd::OFFSET {
                        return Err(Error::InvalidEncoding);
                    }
                    self.pending_relocs.push(Reloc {
                        inst_pc: self.pc,
                        kind: op.x[0],
                        label,
                    });
                }

                Flat::Default => match op.op {
                    cmd::R0 => opcode |= 0b11111,
                    cmd::R5 => opcode |= 0b11111 << 5,
                    cmd::R10 => opcode |= 0b11111 << 10,
                    cmd::R16 => opcode |= 0b11111 << 16,
                    cmd::EXTENDS_W => opcode |= 0b010 << 13,
                    cmd::EXTENDS_X => opcode |= 0b011 << 13,
                    cmd::UALT2 => {
                        let (offset, list_idx) = (op.x[0], op.x[1] as usize);
                        let i = check_alt(&ALTS2[list_idx], 0).ok_or(Error::InvalidEncoding)?;
                        opcode |= (i as u32) << offset;
                    }
                    cmd::UALT4 => {
                        let (offset, list_idx) = (op.x[0], op.x[1] as usize);
                        let i = check_alt(&ALTS4[list_idx], 0).ok_or(Error::InvalidEncoding)?;
                        opcode |= (i as u32) << offset;
                    }
                    _ => return Err(Error::InvalidEncoding),
                },
            }

            match op.op {
                cmd::USLICE
                | cmd::SSLICE
                | cmd::CHK_UBITS
                | cmd::CHK_USUM
                | cmd::CHK_SSCALED
                | cmd::CHK_URANGE1 => {}
                _ => cursor += 1,
            }
        }

        self.code[pc..pc + 4].copy_from_slice(&opcode.to_le_bytes());
        self.relocs.append(&mut self.pending_relocs);
        self.pc += 4;
        Ok(())
    }
}

/// Membership test for the operation set named by a literal-list command.
fn sym_list_contains(list_sym: u8, raw: u8) -> bool {
    let list: &[Symbol] = match list_sym {
        symset::ATOPS => symbols::ATOPS,
        symset::DCOPS => symbols::DCOPS,
        symset::ICOPS => symbols::ICOPS,
        symset::TLBIOPS => symbols::TLBIOPS,
        symset::BARRIEROPS => symbols::BARRIEROPS,
        symset::MSRIMMOPS => symbols::MSRIMMOPS,
        symset::CONTROLREGS => {
            return (Symbol::C0 as u8..=Symbol::C15 as u8).contains(&raw);
        }
        _ => return false,
    };
    list.iter().any(|s| *s as u8 == raw)
}

/// Finds a value in an alternatives list, searching from last to first;
/// returns its index.
fn check_alt(alts: &[u16], v: u64) -> Option<u8> {
    for i in (0..alts.len()).rev() {
        if v == alts[i] as u64 {
            return Some(i as u8);
        }
    }
    None
}

/// The scaled value must reconstruct `v` exactly (alignment) and lie within
/// [min, max].
fn unsigned_in_range(v: u64, min: u32, max: u32, scale: u8) -> bool {
    let scaled = v >> scale;
    scaled << scale == v && scaled >= min as u64 && scaled <= max as u64
}

/// Signed counterpart of [`unsigned_in_range`].
fn signed_in_range(v: i64, min: i32, max: i32, scale: u8) -> bool {
    let scaled = v >> scale;
    scaled << scale == v && scaled >= min as i64 && scaled <= max as i64
}

/// Encodes a PC-relative displacement for the given relocation kind.
pub(crate) fn enc_offset(kind: u8, imm: i64) -> Option<u32> {
    match kind {
        rel::B => {
            const MASK: i32 = (1 << 26) - 1;
            const HALF: i32 = -(1 << 25);
            if !signed_in_range(imm, HALF, MASK + HALF, 2) {
                return None;
            }
            Some(((imm as u32) >> 2) & MASK as u32)
        }
        rel::B_COND => {
            const MASK: i32 = (1 << 19) - 1;
            const HALF: i32 = -(1 << 18);
            if !signed_in_range(imm, HALF, MASK + HALF, 2) {
                return None;
            }
            Some((((imm as u32) >> 2) & MASK as u32) << 5)
        }
        rel::ADR => {
            const MASK: i32 = (1 << 21) - 1;
            const HALF: i32 = -(1 << 20);
            if !signed_in_range(imm, HALF, MASK + HALF, 0) {
                return None;
            }
            let low = (((imm as u32) >> 2) & 0x7FFFF) << 5;
            Some(low | ((imm as u32) & 3) << 29)
        }
        rel::ADRP => {
            const MASK: i32 = (1 << 21) - 1;
            const HALF: i32 = -(1 << 20);
            if !signed_in_range(imm, HALF, MASK + HALF, 12) {
                return None;
            }
            let low = (((imm as u64) >> 14) as u32 & 0x7FFFF) << 5;
            Some(low | (((imm as u64) >> 12) as u32 & 3) << 29)
        }
        rel::TBZ => {
            const MASK: i32 = (1 << 14) - 1;
            const HALF: i32 = -(1 << 13);
            if !signed_in_range(imm, HALF, MASK + HALF, 2) {
                return None;
            }
            Some((((imm as u32) >> 2) & MASK as u32) << 5)
        }
        _ => None,
    }
}

/// Dispatches to one of the special immediate encoders.
pub(crate) fn enc_special_imm(offset: u8, kind: u8, v: u64) -> Option<u32> {
    match kind {
        special::WIDE_INV64 => enc_imm_wide64(offset, !v),
        special::WIDE_INV32 => enc_imm_wide32(offset, v, true),
        special::WIDE64 => enc_imm_wide64(offset, v),
        special::WIDE32 => enc_imm_wide32(offset, v, false),
        special::STRETCHED => enc_imm_stretched(offset, v),
        special::LOGICAL32 => enc_imm_logical32(offset, v),
        special::LOGICAL64 => enc_imm_logical64(offset, v),
        special::FLOAT => enc_imm_float(offset, v),
        special::FLOAT_SPLIT => enc_imm_float_split(offset, v),
        _ => None,
    }
}

/// 32-bit logical (bitmask) immediate: a rotation of a repeated run of ones
/// within a power-of-two element size. Zero and all-ones are not
/// representable.
pub(crate) fn enc_imm_logical32(offset: u8, v: u64) -> Option<u32> {
    if v > u32::MAX as u64 {
        return None;
    }
    let v = v as u32;
    let transitions = v ^ v.rotate_right(1);
    let div = transitions.count_ones();
    if div == 0 {
        return None;
    }
    let elem_size = 64 / div;
    if v != v.rotate_left(elem_size) {
        return None;
    }
    let elem = (v as u64 & ((1u64 << elem_size) - 1)) as u32;
    let ones = elem.count_ones();
    let imms = (!((elem_size << 1) - 1) & 0x3F) | (ones - 1);
    let immr = if elem & 1 != 0 {
        ones - (!elem).trailing_zeros()
    } else {
        elem_size - elem.trailing_zeros()
    };
    let enc = (immr << 6) | imms;
    Some(enc << offset)
}

/// 64-bit logical (bitmask) immediate, including the N bit.
pub(crate) fn enc_imm_logical64(offset: u8, v: u64) -> Option<u32> {
    let transitions = v ^ v.rotate_right(1);
    let div = transitions.count_ones() as u64;
    if div == 0 {
        return None;
    }
    let elem_size = 128 / div;
    if v != v.rotate_left(elem_size as u32) {
        return None;
    }
    let elem = v & ((1u128 << elem_size) - 1) as u64;
    let ones = elem.count_ones() as u64;
    let mut imms = (!((elem_size << 1) - 1) & 0x7F) | (ones - 1);
    let immr = if elem & 1 != 0 {
        ones - (!elem).trailing_zeros() as u64
    } else {
        elem_size - elem.trailing_zeros() as u64
    };
    let n: u32 = if imms & 0x40 == 0 { 1 } else { 0 };
    imms &= 0x3F;
    let enc = (n << 12) | ((immr as u32) << 6) | imms as u32;
    Some(enc << offset)
}

/// 8-bit-to-64-bit bit-stretch: each source bit replicates into one byte of
/// the value. The recovered byte is deposited as two disjoint fields.
pub(crate) fn enc_imm_stretched(offset: u8, v: u64) -> Option<u32> {
    let mut chk = v & 0x0101_0101_0101_0101;
    chk |= chk << 1;
    chk |= chk << 2;
    chk |= chk << 4;
    if v != chk {
        return None;
    }
    let mut masked = v & 0x8040_2010_0804_0201;
    masked |= masked >> 32;
    masked |= masked >> 16;
    masked |= masked >> 8;
    let enc = (masked as u32) & 0xFF;
    let mut opcode = (enc & 0x1F) << offset;
    opcode |= (enc & 0xE0) << (offset + 6);
    Some(opcode)
}

/// 64-bit wide-move immediate: a 16-bit chunk shifted by a multiple of 16.
pub(crate) fn enc_imm_wide64(offset: u8, v: u64) -> Option<u32> {
    let pos = v.trailing_zeros() & 0b110000;
    let masked = ((v >> pos) & 0xFFFF) as u32;
    if (masked as u64) << pos != v {
        return None;
    }
    let enc = masked | (pos << 12);
    Some(enc << offset)
}

/// 32-bit wide-move immediate, optionally pre-inverted at 32-bit width.
pub(crate) fn enc_imm_wide32(offset: u8, v: u64, invert: bool) -> Option<u32> {
    if v > u32::MAX as u64 {
        return None;
    }
    let v = if invert { !(v as u32) } else { v as u32 };
    let pos = v.trailing_zeros() & 0b10000;
    let masked = (v >> pos) & 0xFFFF;
    if masked << pos != v {
        return None;
    }
    let enc = masked | (pos << 12);
    Some(enc << offset)
}

/// 8-bit float immediate: sign, 3 exponent bits, 4 mantissa bits.
pub(crate) fn enc_imm_float(offset: u8, v: u64) -> Option<u32> {
    let enc = (((v >> 24) & 0x80) | ((v >> 19) & 0x7F)) as u32;
    let chk = ((v as u32) >> 25) & 0x3F;
    if (chk == 0b100000 || chk == 0b011111) && (v as u32) & 0x7FFFF == 0 {
        Some(enc << offset)
    } else {
        None
    }
}

/// 8-bit float immediate deposited as two disjoint fields.
pub(crate) fn enc_imm_float_split(offset: u8, v: u64) -> Option<u32> {
    let enc = (((v >> 24) & 0x80) | ((v >> 19) & 0x7F)) as u32;
    let chk = ((v as u32) >> 25) & 0x3F;
    if (chk == 0b100000 || chk == 0b011111) && (v as u32) & 0x7FFFF == 0 {
        let mut opcode = (enc & 0x1F) << offset;
        opcode |= (enc & 0xE0) << (offset + 6);
        Some(opcode)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_immediates() {
        // 0x55555555: two-bit element 0b01 repeated; immr 0, imms 0b111100.
        assert_eq!(enc_imm_logical32(0, 0x5555_5555), Some(0b0_111100));
        assert_eq!(enc_imm_logical32(10, 0x5555_5555), Some(0b0_111100 << 10));
        // Zero and all-ones have no transitions.
        assert_eq!(enc_imm_logical32(0, 0), None);
        assert_eq!(enc_imm_logical32(0, 0xFFFF_FFFF), None);
        assert_eq!(enc_imm_logical64(0, 0), None);
        assert_eq!(enc_imm_logical64(0, u64::MAX), None);
        // 64-bit element with a single run sets the N bit.
        assert_eq!(enc_imm_logical64(0, 0xFF), Some((1 << 12) | 0b000111));
    }

    #[test]
    fn wide_move_immediates() {
        assert_eq!(enc_imm_wide64(5, 0x41D1_0000_0000), Some(0x241D1 << 5));
        assert_eq!(enc_imm_wide64(0, 0), Some(0));
        assert_eq!(enc_imm_wide64(0, 0x1_0001), None);
        assert_eq!(enc_imm_wide32(0, 0xFFFF_0001, false), None);
        assert_eq!(enc_imm_wide32(0, 0xABCD_0000, false), Some(0xABCD | 16 << 12));
        assert_eq!(enc_imm_wide32(0, 0x1_0000_0000, false), None);
    }

    #[test]
    fn stretched_immediates() {
        // Every byte must be 0x00 or 0xFF; bytes 0 and 6 set -> 0x41.
        assert_eq!(
            enc_imm_stretched(0, 0x00FF_0000_0000_00FF),
            Some(0x01 | (0x40 << 6))
        );
        assert_eq!(enc_imm_stretched(0, 0x1200_0000_0000_0000), None);
    }

    #[test]
    fn float_immediates() {
        // 1.8125f32 == 0x3FE80000 -> 0x7D.
        assert_eq!(enc_imm_float(13, 1.8125f32.to_bits() as u64), Some(0x7D << 13));
        // 0.1 is not representable in the 8-bit form.
        assert_eq!(enc_imm_float(13, 0.1f32.to_bits() as u64), None);
        // -20.0f32 == 0xC1A00000 -> 0xB4, split into 0x14 and 0xA0.
        let split = enc_imm_float_split(5, (-20.0f32).to_bits() as u64);
        assert_eq!(split, Some((0x14 << 5) | (0xA0 << 11)));
    }

    #[test]
    fn offset_ranges() {
        // B: +/-128 MiB, word aligned.
        assert_eq!(enc_offset(rel::B, 4), Some(1));
        assert_eq!(enc_offset(rel::B, 2), None);
        assert_eq!(enc_offset(rel::B, 128 * 1024 * 1024 - 4), Some(0x1FF_FFFF));
        assert_eq!(enc_offset(rel::B, 128 * 1024 * 1024), None);
        assert_eq!(enc_offset(rel::B, -128 * 1024 * 1024), Some(0x200_0000));
        assert_eq!(enc_offset(rel::B, -128 * 1024 * 1024 - 4), None);
        // Conditional branches: +/-1 MiB.
        assert_eq!(enc_offset(rel::B_COND, 1024 * 1024 - 4), Some(0x3FFFF << 5));
        assert_eq!(enc_offset(rel::B_COND, 1024 * 1024), None);
        // ADR: byte granular.
        assert_eq!(enc_offset(rel::ADR, 1), Some(1 << 29));
        assert_eq!(enc_offset(rel::ADR, 601_617), Some(0x2049_7080));
        // ADRP: page aligned.
        assert_eq!(enc_offset(rel::ADRP, 4096), Some(1 << 29));
        assert_eq!(enc_offset(rel::ADRP, 4095), None);
        // TBZ: +/-32 KiB.
        assert_eq!(enc_offset(rel::TBZ, 32 * 1024 - 4), Some(0x1FFF << 5));
        assert_eq!(enc_offset(rel::TBZ, 32 * 1024), None);
    }
}
