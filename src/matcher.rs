//! Operand matching: the per-encoding predicate programs that select one
//! encoding of a mnemonic for a given operand tuple.

use crate::args::Arg;
use crate::assembler::Assembler;
use crate::modifiers::ModGroup;
use crate::registers::{Reg, RegFamily, RegType};

/// A matching or encoding operator decoded from the pattern or command
/// streams. Operators are used internally, and exposed for debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EncOp {
    /// Operator byte.
    pub op: u8,
    /// Operator arguments; only the first `arg_count` bytes are meaningful.
    pub x: [u8; 3],
}

/// Matcher operator bytes, as stored in the pattern stream.
pub(crate) mod mat {
    /// Literal symbol.
    pub const LIT_SYMBOL: u8 = 1;
    /// Literal integer immediate.
    pub const LIT_INT: u8 = 2;
    /// Literal float immediate.
    pub const LIT_FLOAT: u8 = 3;
    /// Any symbol.
    pub const SYMBOL: u8 = 4;
    /// Condition code symbol.
    pub const COND: u8 = 5;
    /// 32/64-bit integer immediate.
    pub const IMM: u8 = 6;
    /// 32-bit float immediate.
    pub const FLOAT: u8 = 7;
    /// Scalar 32-bit integer register (except WSP).
    pub const W: u8 = 8;
    /// Scalar 64-bit integer register (except XSP).
    pub const X: u8 = 9;
    /// 32-bit stack pointer register (except WZR).
    pub const WSP: u8 = 10;
    /// 64-bit stack pointer register (except XZR).
    pub const XSP: u8 = 11;
    /// Scalar SIMD 8-bit register.
    pub const B: u8 = 12;
    /// Scalar SIMD 16-bit register.
    pub const H: u8 = 13;
    /// Scalar SIMD 32-bit register.
    pub const S: u8 = 14;
    /// Scalar SIMD 64-bit register.
    pub const D: u8 = 15;
    /// Scalar SIMD 128-bit register.
    pub const Q: u8 = 16;
    /// Vector register with elements of a given size; total width latches
    /// the per-instruction SIMD width.
    pub const V: u8 = 17;
    /// Vector register with a given element size and lane count.
    pub const V_STATIC: u8 = 18;
    /// Vector register with element specifier of a given size; lane count
    /// unchecked.
    pub const V_ELEMENT: u8 = 19;
    /// Vector register with element specifier of a given size and a fixed
    /// element index encoded in the table.
    pub const V_ELEMENT_STATIC: u8 = 20;
    /// Vector register with a given element size and lane count, with an
    /// element specifier.
    pub const V_STATIC_ELEMENT: u8 = 21;
    /// Register list with a given length and element size; total width
    /// latches the per-instruction SIMD width.
    pub const REG_LIST: u8 = 22;
    /// Register list with a given length, element size, and lane count.
    pub const REG_LIST_STATIC: u8 = 23;
    /// Register list with element specifier, with a given length and
    /// element size.
    pub const REG_LIST_ELEMENT: u8 = 24;
    /// Jump offset: immediate or label.
    pub const OFFSET: u8 = 25;
    /// Memory reference with base register, post-indexable.
    pub const REF_BASE: u8 = 26;
    /// Memory reference with base register and immediate offset.
    pub const REF_OFFSET: u8 = 27;
    /// Pre-indexed memory reference.
    pub const REF_PRE: u8 = 28;
    /// Memory reference with base and index registers.
    pub const REF_INDEX: u8 = 29;
    /// A single literal modifier.
    pub const LIT_MOD: u8 = 30;
    /// Any modifier from a named group.
    pub const MOD: u8 = 31;
    /// Sentinel: matchers after this point are optional.
    pub const END: u8 = 32;
}

/// Argument byte count per matcher operator.
pub(crate) const MATCHER_ARG_COUNTS: [u8; 33] = {
    let mut counts = [0u8; 33];
    counts[mat::LIT_SYMBOL as usize] = 1;
    counts[mat::LIT_INT as usize] = 1;
    counts[mat::LIT_FLOAT as usize] = 1;
    counts[mat::V as usize] = 1;
    counts[mat::V_STATIC as usize] = 2;
    counts[mat::V_ELEMENT as usize] = 1;
    counts[mat::V_ELEMENT_STATIC as usize] = 2;
    counts[mat::V_STATIC_ELEMENT as usize] = 2;
    counts[mat::REG_LIST as usize] = 2;
    counts[mat::REG_LIST_STATIC as usize] = 3;
    counts[mat::REG_LIST_ELEMENT as usize] = 2;
    counts[mat::LIT_MOD as usize] = 1;
    counts[mat::MOD as usize] = 1;
    counts
};

/// Flat slot count per matcher operator; the flattener pads every matcher
/// position to exactly this many slots.
pub(crate) const MATCHER_FLAT_COUNTS: [u8; 33] = {
    let mut counts = [1u8; 33];
    counts[0] = 0;
    counts[mat::LIT_SYMBOL as usize] = 0;
    counts[mat::LIT_INT as usize] = 0;
    counts[mat::LIT_FLOAT as usize] = 0;
    counts[mat::V_ELEMENT as usize] = 2;
    counts[mat::V_STATIC_ELEMENT as usize] = 2;
    counts[mat::REG_LIST_ELEMENT as usize] = 2;
    counts[mat::REF_OFFSET as usize] = 2;
    counts[mat::REF_PRE as usize] = 2;
    counts[mat::REF_INDEX as usize] = 4;
    counts[mat::MOD as usize] = 2;
    counts[mat::END as usize] = 0;
    counts
};

impl Assembler {
    /// Returns true if the encoding at the current iterator position
    /// matches the supplied operands.
    pub(crate) fn match_pattern(&mut self) -> bool {
        self.simd_size = 0;
        let mut required = self.pattern.len();
        let mut optional = 0;
        for (i, m) in self.pattern.iter().enumerate() {
            if m.op == mat::END {
                required = i;
                optional = self.pattern.len() - (i + 1);
                break;
            }
        }
        let count = self.args.len();
        if count != required && count != required + optional {
            return false;
        }
        for i in 0..required {
            if !self.match_arg(self.args[i], self.pattern[i]) {
                return false;
            }
        }
        if count == required || optional == 0 {
            return true;
        }
        for i in 0..optional {
            // Skip the sentinel between required and optional matchers.
            if !self.match_arg(self.args[required + i], self.pattern[required + 1 + i]) {
                return false;
            }
        }
        true
    }

    fn match_arg(&mut self, arg: Arg, m: EncOp) -> bool {
        match arg {
            Arg::Reg(reg) => {
                if !check_reg(reg) {
                    return false;
                }
                match m.op {
                    mat::W => reg.ty == RegType::W,
                    mat::X => reg.ty == RegType::X,
                    mat::WSP => {
                        reg.ty == RegType::WSP
                            || (reg.ty == RegType::W && reg != crate::registers::WZR)
                    }
                    mat::XSP => {
                        reg.ty == RegType::XSP
                            || (reg.ty == RegType::X && reg != crate::registers::XZR)
                    }
                    mat::B => reg.ty == RegType::B,
                    mat::H => reg.ty == RegType::H,
                    mat::S => reg.ty == RegType::S,
                    mat::D => reg.ty == RegType::D,
                    mat::Q => reg.ty == RegType::Q,
                    mat::V => {
                        !reg.has_elem()
                            && reg.is_vec()
                            && reg.ty.elem_size_raw() == m.x[0]
                            && self.match_or_latch_simd_width(reg)
                    }
                    mat::V_STATIC => {
                        !reg.has_elem()
                            && reg.ty.elem_size_raw() == m.x[0]
                            && reg.lanes() == m.x[1]
                    }
                    mat::V_ELEMENT => reg.has_elem() && reg.ty.elem_size_raw() == m.x[0],
                    mat::V_ELEMENT_STATIC => {
                        reg.has_elem()
                            && reg.ty.elem_size_raw() == m.x[0]
                            && reg.elem() == m.x[1]
                    }
                    mat::V_STATIC_ELEMENT => {
                        reg.has_elem()
                            && reg.ty.elem_size_raw() == m.x[0]
                            && reg.lanes() == m.x[1]
                    }
                    _ => false,
                }
            }

            Arg::RegList(list) => {
                if !check_reg(list.first) {
                    return false;
                }
                let first = list.first;
                match m.op {
                    mat::REG_LIST => {
                        !first.has_elem()
                            && list.len == m.x[0]
                            && first.ty.elem_size_raw() == m.x[1]
                            && self.match_or_latch_simd_width(first)
                    }
                    mat::REG_LIST_STATIC => {
                        !first.has_elem()
                            && list.len == m.x[0]
                            && first.ty.elem_size_raw() == m.x[1]
                            && first.lanes() == m.x[2]
                    }
                    mat::REG_LIST_ELEMENT => {
                        first.has_elem()
                            && list.len == m.x[0]
                            && first.ty.elem_size_raw() == m.x[1]
                    }
                    _ => false,
                }
            }

            Arg::Imm(imm) => match m.op {
                mat::IMM | mat::OFFSET => true,
                mat::LIT_INT => imm == m.x[0] as i32,
                _ => false,
            },

            Arg::Wide(imm) => match m.op {
                mat::IMM | mat::OFFSET => true,
                mat::LIT_INT => imm == m.x[0] as u64,
                _ => false,
            },

            Arg::Float(imm) => match m.op {
                mat::FLOAT => true,
                mat::LIT_FLOAT => imm == m.x[0] as f32,
                _ => false,
            },

            Arg::Mod(modifier) => match m.op {
                mat::MOD => match ModGroup::from_repr(m.x[0]) {
                    Some(group) => group.contains(modifier.id),
                    None => false,
                },
                mat::LIT_MOD => modifier.id as u8 == m.x[0],
                _ => false,
            },

            Arg::Ref(r) => {
                (m.op == mat::REF_BASE || m.op == mat::REF_OFFSET)
                    && check_reg(r.base)
                    && check_ref_base(r.base)
            }

            Arg::RefOffset(r) => {
                m.op == mat::REF_OFFSET && check_reg(r.base) && check_ref_base(r.base)
            }

            Arg::RefPre(r) => {
                m.op == mat::REF_PRE && check_reg(r.base) && check_ref_base(r.base)
            }

            Arg::RefIndex(r) => {
                m.op == mat::REF_INDEX
                    && check_reg(r.base)
                    && check_reg(r.index)
                    && check_ref_base(r.base)
                    && r.index.family() == RegFamily::Int
            }

            Arg::Label(label) => {
                if label.id as usize >= self.label_pc.len() {
                    return false;
                }
                m.op == mat::OFFSET
            }

            Arg::Sym(sym) => match m.op {
                mat::SYMBOL | mat::COND => true,
                mat::LIT_SYMBOL => sym as u8 == m.x[0],
                _ => false,
            },
        }
    }

    /// The first size-flexible vector matcher within an encoding latches the
    /// register's total byte width; later flexible matchers must agree.
    fn match_or_latch_simd_width(&mut self, reg: Reg) -> bool {
        match reg.family() {
            RegFamily::Int | RegFamily::Sp | RegFamily::Scalar => true,
            _ => {
                let width = reg.ty.bytes();
                if self.simd_size != 0 {
                    return self.simd_size == width;
                }
                self.simd_size = width;
                true
            }
        }
    }
}

/// Validates a register's composite type before any matcher-specific check:
/// the id, element index, and family must be mutually consistent.
fn check_reg(reg: Reg) -> bool {
    match reg.family() {
        RegFamily::Int | RegFamily::Sp => {
            let id_ok = if reg.family() == RegFamily::Sp {
                reg.id == 31
            } else {
                reg.id < 32
            };
            id_ok && !reg.has_elem()
        }
        RegFamily::Scalar => reg.id < 32 && !reg.has_elem(),
        RegFamily::Vec32 | RegFamily::Vec64 | RegFamily::Vec128 => {
            reg.id < 32 && (!reg.has_elem() || reg.elem() < reg.lanes())
        }
    }
}

/// References may only base on integer or SP registers.
fn check_ref_base(reg: Reg) -> bool {
    matches!(reg.family(), RegFamily::Int | RegFamily::Sp)
}
