//! Flattening: unnesting matched operands into the linear slot sequence the
//! command programs consume positionally.

use crate::args::Arg;
use crate::assembler::Assembler;
use crate::matcher::{mat, MATCHER_FLAT_COUNTS};
use crate::modifiers::ModId;
use crate::symbols::Symbol;

/// An internal operand slot, flattened for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flat {
    /// Register number.
    Reg(u8),
    /// Immediate value; floats are bit-reinterpreted, signed immediates are
    /// sign-extended.
    Imm(u64),
    /// Modifier identifier.
    Mod(ModId),
    /// Label reference.
    Label(crate::args::Label),
    /// The operand was omitted; the consuming command applies its default.
    Default,
}

impl Assembler {
    /// Unnests the matched operands to the internal form before encoding.
    ///
    /// Every matcher position expands to exactly its declared flat slot
    /// count; omitted or short operands are padded with [`Flat::Default`].
    pub(crate) fn flatten_args(&mut self) {
        self.flat.clear();
        let mut cursor = 0usize;
        for pi in 0..self.pattern.len() {
            let m = self.pattern[pi];
            if m.op == mat::END {
                continue;
            }
            let flat_count = MATCHER_FLAT_COUNTS[m.op as usize] as usize;
            let before = self.flat.len();
            if let Some(&arg) = self.args.get(cursor) {
                match arg {
                    Arg::Reg(reg) => {
                        self.flat.push(Flat::Reg(reg.id));
                        if reg.has_elem() && m.op != mat::V_ELEMENT_STATIC {
                            self.flat.push(Flat::Imm(reg.elem() as u64));
                        }
                    }
                    Arg::RegList(list) => {
                        self.flat.push(Flat::Reg(list.first.id));
                        if list.first.has_elem() && m.op != mat::V_ELEMENT_STATIC {
                            self.flat.push(Flat::Imm(list.first.elem() as u64));
                        }
                    }
                    Arg::Imm(imm) => self.flat.push(Flat::Imm(imm as i64 as u64)),
                    Arg::Wide(imm) => self.flat.push(Flat::Imm(imm)),
                    Arg::Float(imm) => self.flat.push(Flat::Imm(imm.to_bits() as u64)),
                    Arg::Ref(r) => self.flat.push(Flat::Reg(r.base.id)),
                    Arg::RefOffset(r) => {
                        self.flat.push(Flat::Reg(r.base.id));
                        self.flat.push(Flat::Imm(r.offset as i64 as u64));
                    }
                    Arg::RefPre(r) => {
                        self.flat.push(Flat::Reg(r.base.id));
                        self.flat.push(Flat::Imm(r.offset as i64 as u64));
                    }
                    Arg::RefIndex(r) => {
                        self.flat.push(Flat::Reg(r.base.id));
                        self.flat.push(Flat::Reg(r.index.id));
                        if let Some(modifier) = r.modifier {
                            self.flat.push(Flat::Mod(modifier.id));
                            if modifier.has_amount() {
                                self.flat.push(Flat::Imm(modifier.get_amount() as u64));
                            }
                        }
                    }
                    Arg::Mod(modifier) => {
                        if flat_count >= 2 {
                            self.flat.push(Flat::Mod(modifier.id));
                        }
                        if modifier.has_amount() {
                            self.flat.push(Flat::Imm(modifier.get_amount() as u64));
                        }
                    }
                    Arg::Label(label) => self.flat.push(Flat::Label(label)),
                    Arg::Sym(sym) => match sym {
                        // Alias markers select an encoding variant; they
                        // never encode a field.
                        Symbol::INVERTED | Symbol::LOGICAL => {}
                        _ => self.flat.push(Flat::Imm(sym as u8 as u64)),
                    },
                }
            }

            let mut added = self.flat.len() - before;
            while added < flat_count {
                self.flat.push(Flat::Default);
                added += 1;
            }

            cursor += 1;
        }
    }
}
