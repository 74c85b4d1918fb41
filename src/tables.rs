//! The bundled encoding tables: a pattern stream of per-mnemonic matcher
//! programs and a command stream of per-encoding encoder programs.
//!
//! Stream layout. For each mnemonic the pattern stream holds
//! `{encoding-count, then per encoding: matcher-count, matcher bytes...,
//! 16-bit big-endian offset into the command stream}`; each matcher is an
//! operator byte followed by its argument bytes. At its offset in the
//! command stream an encoding holds `{4-byte big-endian base opcode,
//! command-count, command bytes...}`. The streams are assembled once from
//! the definition list below and consumed read-only; the engine's
//! correctness is determined by the stream-interpretation contract, not by
//! any particular table values.

use lazy_static::lazy_static;
use strum::EnumCount;

use crate::encoder::{cmd, rel, special, symset};
use crate::matcher::mat;
use crate::mnemonic::Mnemonic;
use crate::modifiers::{ModGroup, ModId};
use crate::registers::Size;
use crate::symbols::Symbol;

/// The assembled tables.
pub(crate) struct Tables {
    /// Pattern stream: per-mnemonic matcher programs.
    pub patterns: Vec<u8>,
    /// Command stream: per-encoding base opcodes and encoder programs.
    pub commands: Vec<u8>,
    /// Pattern-stream offset per mnemonic id.
    pub offsets: Vec<u16>,
}

lazy_static! {
    pub(crate) static ref TABLES: Tables = build();
}

/// Matcher definition; serialized into the pattern stream.
#[derive(Clone, Copy)]
enum M {
    LitSym(Symbol),
    LitInt(u8),
    LitFloat(u8),
    Sym,
    Cond,
    Imm,
    Float,
    W,
    X,
    Wsp,
    Xsp,
    B,
    H,
    S,
    D,
    Q,
    V(Size),
    VStatic(Size, u8),
    VElem(Size),
    VElemStatic(Size, u8),
    VStaticElem(Size, u8),
    List(u8, Size),
    ListStatic(u8, Size, u8),
    ListElem(u8, Size),
    Offset,
    RefBase,
    RefOffset,
    RefPre,
    RefIndex,
    LitMod(ModId),
    ModG(ModGroup),
    End,
}

impl M {
    fn write(self, out: &mut Vec<u8>) {
        match self {
            M::LitSym(sym) => out.extend([mat::LIT_SYMBOL, sym as u8]),
            M::LitInt(v) => out.extend([mat::LIT_INT, v]),
            M::LitFloat(v) => out.extend([mat::LIT_FLOAT, v]),
            M::Sym => out.push(mat::SYMBOL),
            M::Cond => out.push(mat::COND),
            M::Imm => out.push(mat::IMM),
            M::Float => out.push(mat::FLOAT),
            M::W => out.push(mat::W),
            M::X => out.push(mat::X),
            M::Wsp => out.push(mat::WSP),
            M::Xsp => out.push(mat::XSP),
            M::B => out.push(mat::B),
            M::H => out.push(mat::H),
            M::S => out.push(mat::S),
            M::D => out.push(mat::D),
            M::Q => out.push(mat::Q),
            M::V(size) => out.extend([mat::V, size as u8]),
            M::VStatic(size, lanes) => out.extend([mat::V_STATIC, size as u8, lanes]),
            M::VElem(size) => out.extend([mat::V_ELEMENT, size as u8]),
            M::VElemStatic(size, idx) => {
                out.extend([mat::V_ELEMENT_STATIC, size as u8, idx])
            }
            M::VStaticElem(size, lanes) => {
                out.extend([mat::V_STATIC_ELEMENT, size as u8, lanes])
            }
            M::List(len, size) => out.extend([mat::REG_LIST, len, size as u8]),
            M::ListStatic(len, size, lanes) => {
                out.extend([mat::REG_LIST_STATIC, len, size as u8, lanes])
            }
            M::ListElem(len, size) => {
                out.extend([mat::REG_LIST_ELEMENT, len, size as u8])
            }
            M::Offset => out.push(mat::OFFSET),
            M::RefBase => out.push(mat::REF_BASE),
            M::RefOffset => out.push(mat::REF_OFFSET),
            M::RefPre => out.push(mat::REF_PRE),
            M::RefIndex => out.push(mat::REF_INDEX),
            M::LitMod(id) => out.extend([mat::LIT_MOD, id as u8]),
            M::ModG(group) => out.extend([mat::MOD, group as u8]),
            M::End => out.push(mat::END),
        }
    }
}

/// Command definition; serialized into the command stream.
#[derive(Clone, Copy)]
enum C {
    R0,
    R5,
    R10,
    R16,
    RLo16,
    RNz16,
    REven(u8),
    RNext,
    Rwidth30,
    Ubits(u8, u8),
    Uscaled(u8, u8, u8),
    UAlt2(u8, u8),
    UAlt4(u8, u8),
    Urange(u8, u8, u8),
    Usub(u8, u8, u8),
    Unegmod(u8, u8),
    Usumdec(u8, u8),
    Ufields11(u8),
    Ufields30(u8),
    Ufields21,
    Sbits,
    Sscaled(u8),
    ChkUbits(u8),
    ChkUsum(u8),
    ChkSscaled,
    ChkUrange1(u8),
    Uslice(u8, u8, u8),
    Sslice(u8, u8, u8),
    Special(u8, u8),
    Rotates,
    ExtendsW,
    ExtendsX,
    CondAt(u8),
    CondInv(u8),
    LitList(u8, u8),
    Rel(u8),
    Adv,
    Back,
}

impl C {
    fn write(self, out: &mut Vec<u8>) {
        match self {
            C::R0 => out.push(cmd::R0),
            C::R5 => out.push(cmd::R5),
            C::R10 => out.push(cmd::R10),
            C::R16 => out.push(cmd::R16),
            C::RLo16 => out.push(cmd::R_LO16),
            C::RNz16 => out.push(cmd::R_NZ16),
            C::REven(off) => out.extend([cmd::R_EVEN, off]),
            C::RNext => out.push(cmd::R_NEXT),
            C::Rwidth30 => out.push(cmd::RWIDTH30),
            C::Ubits(off, len) => out.extend([cmd::UBITS, off, len]),
            C::Uscaled(off, len, shift) => out.extend([cmd::USCALED, off, len, shift]),
            C::UAlt2(off, list) => out.extend([cmd::UALT2, off, list]),
            C::UAlt4(off, list) => out.extend([cmd::UALT4, off, list]),
            C::Urange(off, min, max) => out.extend([cmd::URANGE, off, min, max]),
            C::Usub(off, len, add) => out.extend([cmd::USUB, off, len, add]),
            C::Unegmod(off, len) => out.extend([cmd::UNEGMOD, off, len]),
            C::Usumdec(off, len) => out.extend([cmd::USUMDEC, off, len]),
            C::Ufields11(count) => out.extend([cmd::UFIELDS11, count]),
            C::Ufields30(count) => out.extend([cmd::UFIELDS30, count]),
            C::Ufields21 => out.push(cmd::UFIELDS21),
            C::Sbits => out.push(cmd::SBITS),
            C::Sscaled(shift) => out.extend([cmd::SSCALED, shift]),
            C::ChkUbits(len) => out.extend([cmd::CHK_UBITS, len]),
            C::ChkUsum(shift) => out.extend([cmd::CHK_USUM, shift]),
            C::ChkSscaled => out.push(cmd::CHK_SSCALED),
            C::ChkUrange1(max) => out.extend([cmd::CHK_URANGE1, max]),
            C::Uslice(off, len, start) => out.extend([cmd::USLICE, off, len, start]),
            C::Sslice(off, len, start) => out.extend([cmd::SSLICE, off, len, start]),
            C::Special(off, kind) => out.extend([cmd::SPECIAL, off, kind]),
            C::Rotates => out.push(cmd::ROTATES),
            C::ExtendsW => out.push(cmd::EXTENDS_W),
            C::ExtendsX => out.push(cmd::EXTENDS_X),
            C::CondAt(off) => out.extend([cmd::COND, off]),
            C::CondInv(off) => out.extend([cmd::COND_INV, off]),
            C::LitList(off, set) => out.extend([cmd::LIT_LIST, off, set]),
            C::Rel(kind) => out.extend([cmd::OFFSET, kind]),
            C::Adv => out.push(cmd::ADV),
            C::Back => out.push(cmd::BACK),
        }
    }
}

#[derive(Default)]
struct TableBuilder {
    patterns: Vec<u8>,
    commands: Vec<u8>,
    offsets: Vec<u16>,
}

impl TableBuilder {
    fn new() -> Self {
        TableBuilder {
            patterns: Vec::new(),
            commands: Vec::new(),
            offsets: vec![0; Mnemonic::COUNT + 1],
        }
    }

    /// Appends one mnemonic's record: every encoding's matcher program into
    /// the pattern stream and encoder program into the command stream, in
    /// declaration order. More-specific encodings must precede more-general
    /// ones; the matcher takes the first hit.
    fn insn(&mut self, mnemonic: Mnemonic, encodings: &[(&[M], u32, &[C])]) {
        self.offsets[mnemonic.id() as usize] = self.patterns.len() as u16;
        self.patterns.push(encodings.len() as u8);
        for (matchers, base, commands) in encodings {
            let cmd_offset = (self.commands.len() as u16).to_be_bytes();
            self.commands.extend_from_slice(&base.to_be_bytes());
            self.commands.push(commands.len() as u8);
            for c in *commands {
                c.write(&mut self.commands);
            }
            self.patterns.push(matchers.len() as u8);
            for m in *matchers {
                m.write(&mut self.patterns);
            }
            self.patterns.extend_from_slice(&cmd_offset);
        }
    }

    fn finish(self) -> Tables {
        debug_assert!(self.patterns.len() <= u16::MAX as usize);
        debug_assert!(self.commands.len() <= u16::MAX as usize);
        Tables {
            patterns: self.patterns,
            commands: self.commands,
            offsets: self.offsets,
        }
    }
}

#[rustfmt::skip]
fn build() -> Tables {
    use Size::{Byte, Dword, Qword, Word};
    use M::*;

    let mut t = TableBuilder::new();

    t.insn(Mnemonic::ABS, &[
        (&[D, D], 0x5EE0_B800, &[C::R0, C::R5]),
        (&[V(Byte), V(Byte)], 0x0E20_B800, &[C::Rwidth30, C::R0, C::R5]),
        (&[V(Word), V(Word)], 0x0E60_B800, &[C::Rwidth30, C::R0, C::R5]),
        (&[V(Dword), V(Dword)], 0x0EA0_B800, &[C::Rwidth30, C::R0, C::R5]),
        (&[VStatic(Qword, 2), VStatic(Qword, 2)], 0x4EE0_B800, &[C::R0, C::R5]),
    ]);

    t.insn(Mnemonic::ADC, &[
        (&[W, W, W], 0x1A00_0000, &[C::R0, C::R5, C::R16]),
        (&[X, X, X], 0x9A00_0000, &[C::R0, C::R5, C::R16]),
    ]);

    t.insn(Mnemonic::ADCS, &[
        (&[W, W, W], 0x3A00_0000, &[C::R0, C::R5, C::R16]),
        (&[X, X, X], 0xBA00_0000, &[C::R0, C::R5, C::R16]),
    ]);

    t.insn(Mnemonic::ADD, &[
        // Immediate, with optional `LSL #0|#12`.
        (&[Wsp, Wsp, Imm, End, LitMod(ModId::Lsl)], 0x1100_0000,
         &[C::R0, C::R5, C::Ubits(10, 12), C::UAlt2(22, 6)]),
        (&[Xsp, Xsp, Imm, End, LitMod(ModId::Lsl)], 0x9100_0000,
         &[C::R0, C::R5, C::Ubits(10, 12), C::UAlt2(22, 6)]),
        // Shifted register.
        (&[W, W, W], 0x0B00_0000, &[C::R0, C::R5, C::R16]),
        (&[X, X, X], 0x8B00_0000, &[C::R0, C::R5, C::R16]),
        (&[W, W, W, ModG(ModGroup::Shifts)], 0x0B00_0000,
         &[C::R0, C::R5, C::R16, C::Rotates, C::Ubits(10, 5)]),
        (&[X, X, X, ModG(ModGroup::Shifts)], 0x8B00_0000,
         &[C::R0, C::R5, C::R16, C::Rotates, C::Ubits(10, 6)]),
        // Extended register.
        (&[Wsp, Wsp, W, ModG(ModGroup::ExtendsW)], 0x0B20_0000,
         &[C::R0, C::R5, C::R16, C::ExtendsW, C::Ubits(10, 3)]),
        (&[Xsp, Xsp, W, ModG(ModGroup::ExtendsW)], 0x8B20_0000,
         &[C::R0, C::R5, C::R16, C::ExtendsW, C::Ubits(10, 3)]),
        (&[Xsp, Xsp, X, ModG(ModGroup::ExtendsX)], 0x8B20_0000,
         &[C::R0, C::R5, C::R16, C::ExtendsX, C::Ubits(10, 3)]),
        // SIMD.
        (&[D, D, D], 0x5EE0_8400, &[C::R0, C::R5, C::R16]),
        (&[V(Byte), V(Byte), V(Byte)], 0x0E20_8400, &[C::Rwidth30, C::R0, C::R5, C::R16]),
        (&[V(Word), V(Word), V(Word)], 0x0E60_8400, &[C::Rwidth30, C::R0, C::R5, C::R16]),
        (&[V(Dword), V(Dword), V(Dword)], 0x0EA0_8400, &[C::Rwidth30, C::R0, C::R5, C::R16]),
        (&[VStatic(Qword, 2), VStatic(Qword, 2), VStatic(Qword, 2)], 0x4EE0_8400,
         &[C::R0, C::R5, C::R16]),
    ]);

    t.insn(Mnemonic::ADDV, &[
        (&[B, V(Byte)], 0x0E31_B800, &[C::Rwidth30, C::R0, C::R5]),
        (&[H, V(Word)], 0x0E71_B800, &[C::Rwidth30, C::R0, C::R5]),
        (&[S, V(Dword)], 0x0EB1_B800, &[C::Rwidth30, C::R0, C::R5]),
    ]);

    t.insn(Mnemonic::ADR, &[
        (&[X, Offset], 0x1000_0000, &[C::R0, C::Rel(rel::ADR)]),
    ]);

    t.insn(Mnemonic::ADRP, &[
        (&[X, Offset], 0x9000_0000, &[C::R0, C::Rel(rel::ADRP)]),
    ]);

    t.insn(Mnemonic::B, &[
        (&[Cond, Offset], 0x5400_0000, &[C::CondAt(0), C::Rel(rel::B_COND)]),
        (&[Offset], 0x1400_0000, &[C::Rel(rel::B)]),
    ]);

    t.insn(Mnemonic::BFC, &[
        (&[W, Imm, Imm], 0x3300_03E0,
         &[C::R0, C::Unegmod(16, 5), C::ChkUsum(5), C::Urange(10, 1, 32)]),
        (&[X, Imm, Imm], 0xB340_03E0,
         &[C::R0, C::Unegmod(16, 6), C::ChkUsum(6), C::Urange(10, 1, 64)]),
    ]);

    t.insn(Mnemonic::BL, &[
        (&[Offset], 0x9400_0000, &[C::Rel(rel::B)]),
    ]);

    t.insn(Mnemonic::BLR, &[
        (&[X], 0xD63F_0000, &[C::R5]),
    ]);

    t.insn(Mnemonic::CAS, &[
        (&[W, W, RefBase], 0x88A0_7C00, &[C::R16, C::R0, C::R5]),
        (&[X, X, RefBase], 0xC8A0_7C00, &[C::R16, C::R0, C::R5]),
    ]);

    t.insn(Mnemonic::CASP, &[
        (&[W, W, W, W, RefBase], 0x0820_7C00,
         &[C::REven(16), C::RNext, C::REven(0), C::RNext, C::R5]),
        (&[X, X, X, X, RefBase], 0x4820_7C00,
         &[C::REven(16), C::RNext, C::REven(0), C::RNext, C::R5]),
    ]);

    t.insn(Mnemonic::CBNZ, &[
        (&[W, Offset], 0x3500_0000, &[C::R0, C::Rel(rel::B_COND)]),
        (&[X, Offset], 0xB500_0000, &[C::R0, C::Rel(rel::B_COND)]),
    ]);

    t.insn(Mnemonic::CBZ, &[
        (&[W, Offset], 0x3400_0000, &[C::R0, C::Rel(rel::B_COND)]),
        (&[X, Offset], 0xB400_0000, &[C::R0, C::Rel(rel::B_COND)]),
    ]);

    t.insn(Mnemonic::CCMN, &[
        (&[W, Imm, Imm, Cond], 0x3A40_0800,
         &[C::R5, C::Ubits(16, 5), C::Ubits(0, 4), C::CondAt(12)]),
        (&[X, Imm, Imm, Cond], 0xBA40_0800,
         &[C::R5, C::Ubits(16, 5), C::Ubits(0, 4), C::CondAt(12)]),
    ]);

    t.insn(Mnemonic::CFINV, &[
        (&[], 0xD500_401F, &[]),
    ]);

    t.insn(Mnemonic::CNEG, &[
        (&[W, W, Cond], 0x5A80_0400, &[C::R0, C::R5, C::Back, C::R16, C::CondInv(12)]),
        (&[X, X, Cond], 0xDA80_0400, &[C::R0, C::R5, C::Back, C::R16, C::CondInv(12)]),
    ]);

    t.insn(Mnemonic::DC, &[
        (&[Sym, X], 0xD508_0000, &[C::LitList(5, symset::DCOPS), C::R0]),
    ]);

    t.insn(Mnemonic::DCPS1, &[
        (&[Imm], 0xD4A0_0001, &[C::Ubits(5, 16)]),
    ]);

    t.insn(Mnemonic::DMB, &[
        (&[Sym], 0xD503_30BF, &[C::LitList(8, symset::BARRIEROPS)]),
    ]);

    t.insn(Mnemonic::DUP, &[
        (&[B, VElem(Byte)], 0x5E01_0400, &[C::R0, C::R5, C::Ubits(17, 4)]),
        (&[H, VElem(Word)], 0x5E02_0400, &[C::R0, C::R5, C::Ubits(18, 3)]),
    ]);

    t.insn(Mnemonic::FCMEQ, &[
        (&[H, H, LitFloat(0)], 0x5EF8_D800, &[C::R0, C::R5]),
        (&[V(Word), V(Word), LitFloat(0)], 0x0EF8_D800, &[C::Rwidth30, C::R0, C::R5]),
        (&[VStatic(Qword, 2), VStatic(Qword, 2), VStatic(Qword, 2)], 0x4E60_E400,
         &[C::R0, C::R5, C::R16]),
    ]);

    t.insn(Mnemonic::FCMLA, &[
        (&[V(Dword), V(Dword), V(Dword), Imm], 0x2E80_C400,
         &[C::Rwidth30, C::R0, C::R5, C::R16, C::UAlt4(11, 2)]),
    ]);

    t.insn(Mnemonic::FMLA, &[
        (&[V(Word), V(Word), VElem(Word)], 0x0F00_1000,
         &[C::Rwidth30, C::R0, C::R5, C::RLo16, C::Ufields11(3)]),
    ]);

    t.insn(Mnemonic::FMOV, &[
        (&[H, Float], 0x1EE0_1000, &[C::R0, C::Special(13, special::FLOAT)]),
        (&[S, Float], 0x1E20_1000, &[C::R0, C::Special(13, special::FLOAT)]),
        (&[D, Float], 0x1E60_1000, &[C::R0, C::Special(13, special::FLOAT)]),
        (&[V(Word), Float], 0x0F00_FC00,
         &[C::Rwidth30, C::R0, C::Special(5, special::FLOAT_SPLIT)]),
        (&[V(Dword), Float], 0x0F00_F400,
         &[C::Rwidth30, C::R0, C::Special(5, special::FLOAT_SPLIT)]),
        (&[VStatic(Qword, 2), Float], 0x6F00_F400,
         &[C::R0, C::Special(5, special::FLOAT_SPLIT)]),
        (&[VElemStatic(Qword, 1), X], 0x9EAF_0000, &[C::R0, C::R5]),
        (&[X, VElemStatic(Qword, 1)], 0x9EAE_0000, &[C::R0, C::R5]),
    ]);

    t.insn(Mnemonic::LD1, &[
        // Multi-structure, one to four registers.
        (&[List(1, Byte), RefBase], 0x0C40_7000, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(1, Word), RefBase], 0x0C40_7400, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(1, Dword), RefBase], 0x0C40_7800, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(1, Qword), RefBase], 0x0C40_7C00, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(2, Byte), RefBase], 0x0C40_A000, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(2, Dword), RefBase], 0x0C40_A800, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(4, Qword), RefBase], 0x0C40_2C00, &[C::Rwidth30, C::R0, C::R5]),
        // Post-indexed by the transfer size.
        (&[ListStatic(1, Byte, 8), RefBase, LitInt(8)], 0x0CDF_7000, &[C::R0, C::R5]),
        (&[ListStatic(1, Byte, 16), RefBase, LitInt(16)], 0x4CDF_7000, &[C::R0, C::R5]),
        (&[ListStatic(3, Qword, 2), RefBase, LitInt(48)], 0x4CDF_6C00, &[C::R0, C::R5]),
        // Post-indexed by register.
        (&[List(1, Word), RefBase, X], 0x0C80_7400, &[C::Rwidth30, C::R0, C::R5, C::R16]),
        (&[List(4, Byte), RefBase, X], 0x0C80_2000, &[C::Rwidth30, C::R0, C::R5, C::R16]),
        // Single structure.
        (&[ListElem(1, Byte), RefBase], 0x0D40_0000, &[C::R0, C::Ufields30(4), C::R5]),
    ]);

    t.insn(Mnemonic::LDAPUR, &[
        (&[X, RefBase], 0xD940_0000, &[C::R0, C::R5]),
        (&[X, RefOffset], 0xD940_0000, &[C::R0, C::R5, C::Sbits]),
    ]);

    t.insn(Mnemonic::LDAPURB, &[
        (&[W, RefOffset], 0x1940_0000, &[C::R0, C::R5, C::Sbits]),
    ]);

    t.insn(Mnemonic::LDP, &[
        (&[W, W, RefBase], 0x2940_0000, &[C::R0, C::R10, C::R5]),
        (&[W, W, RefOffset], 0x2940_0000, &[C::R0, C::R10, C::R5, C::Sscaled(2)]),
        (&[W, W, RefBase, Imm], 0x28C0_0000, &[C::R0, C::R10, C::R5, C::Sscaled(2)]),
        (&[W, W, RefPre], 0x29C0_0000, &[C::R0, C::R10, C::R5, C::Sscaled(2)]),
        (&[X, X, RefBase], 0xA940_0000, &[C::R0, C::R10, C::R5]),
        (&[X, X, RefOffset], 0xA940_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[X, X, RefBase, Imm], 0xA8C0_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[X, X, RefPre], 0xA9C0_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[D, D, RefBase], 0x6D40_0000, &[C::R0, C::R10, C::R5]),
        (&[D, D, RefOffset], 0x6D40_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[D, D, RefBase, Imm], 0x6CC0_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[D, D, RefPre], 0x6DC0_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[Q, Q, RefBase], 0xAD40_0000, &[C::R0, C::R10, C::R5]),
        (&[Q, Q, RefOffset], 0xAD40_0000, &[C::R0, C::R10, C::R5, C::Sscaled(4)]),
        (&[Q, Q, RefBase, Imm], 0xACC0_0000, &[C::R0, C::R10, C::R5, C::Sscaled(4)]),
        (&[Q, Q, RefPre], 0xADC0_0000, &[C::R0, C::R10, C::R5, C::Sscaled(4)]),
    ]);

    t.insn(Mnemonic::LDR, &[
        // Unsigned scaled immediate.
        (&[W, RefBase], 0xB940_0000, &[C::R0, C::R5]),
        (&[W, RefOffset], 0xB940_0000, &[C::R0, C::R5, C::Uscaled(10, 12, 2)]),
        (&[X, RefBase], 0xF940_0000, &[C::R0, C::R5]),
        (&[X, RefOffset], 0xF940_0000, &[C::R0, C::R5, C::Uscaled(10, 12, 3)]),
        // Register offset.
        (&[W, RefIndex], 0xB860_0800,
         &[C::R0, C::R5, C::R16, C::ExtendsX, C::UAlt2(12, 2)]),
        (&[X, RefIndex], 0xF860_0800,
         &[C::R0, C::R5, C::R16, C::ExtendsX, C::UAlt2(12, 3)]),
        (&[B, RefIndex], 0x3C60_0800,
         &[C::R0, C::R5, C::R16, C::ExtendsX, C::UAlt2(12, 0)]),
        (&[H, RefIndex], 0x7C60_0800,
         &[C::R0, C::R5, C::R16, C::ExtendsX, C::UAlt2(12, 1)]),
        // Literal.
        (&[W, Offset], 0x1800_0000, &[C::R0, C::Rel(rel::B_COND)]),
        (&[X, Offset], 0x5800_0000, &[C::R0, C::Rel(rel::B_COND)]),
    ]);

    t.insn(Mnemonic::MADD, &[
        (&[W, W, W, W], 0x1B00_0000, &[C::R0, C::R5, C::R16, C::R10]),
        (&[X, X, X, X], 0x9B00_0000, &[C::R0, C::R5, C::R16, C::R10]),
    ]);

    t.insn(Mnemonic::MOV, &[
        // Inverted wide move (MOVN alias).
        (&[LitSym(Symbol::INVERTED), W, Imm], 0x1280_0000,
         &[C::R0, C::Special(5, special::WIDE_INV32)]),
        (&[LitSym(Symbol::INVERTED), X, Imm], 0x9280_0000,
         &[C::R0, C::Special(5, special::WIDE_INV64)]),
        // Bitmask immediate (ORR alias).
        (&[LitSym(Symbol::LOGICAL), W, Imm], 0x3200_03E0,
         &[C::R0, C::Special(10, special::LOGICAL32)]),
        (&[LitSym(Symbol::LOGICAL), X, Imm], 0xB200_03E0,
         &[C::R0, C::Special(10, special::LOGICAL64)]),
        // General register from vector element (UMOV alias).
        (&[W, VStaticElem(Dword, 4)], 0x0E04_3C00, &[C::R0, C::R5, C::Ubits(19, 2)]),
        // Wide move (MOVZ alias).
        (&[W, Imm], 0x5280_0000, &[C::R0, C::Special(5, special::WIDE32)]),
        (&[X, Imm], 0xD280_0000, &[C::R0, C::Special(5, special::WIDE64)]),
    ]);

    t.insn(Mnemonic::MOVI, &[
        (&[V(Byte), Imm], 0x0F00_E400,
         &[C::Rwidth30, C::R0, C::Uslice(16, 3, 5), C::Uslice(5, 5, 0), C::ChkUbits(8),
           C::Adv]),
        (&[V(Byte), Imm, LitMod(ModId::Lsl)], 0x0F00_E400,
         &[C::Rwidth30, C::R0, C::Uslice(16, 3, 5), C::Uslice(5, 5, 0), C::ChkUbits(8),
           C::Adv, C::Ubits(0, 0)]),
        (&[V(Dword), Imm, End, LitMod(ModId::Lsl)], 0x0F00_0400,
         &[C::Rwidth30, C::R0, C::Uslice(16, 3, 5), C::Uslice(5, 5, 0), C::ChkUbits(8),
           C::Adv, C::UAlt4(13, 0)]),
        (&[D, Imm], 0x2F00_E400, &[C::R0, C::Special(5, special::STRETCHED)]),
        (&[VStatic(Qword, 2), Imm], 0x6F00_E400, &[C::R0, C::Special(5, special::STRETCHED)]),
    ]);

    t.insn(Mnemonic::NOP, &[
        (&[], 0xD503_201F, &[]),
    ]);

    t.insn(Mnemonic::PRFM, &[
        (&[Imm, Offset], 0xD800_0000, &[C::Ubits(0, 5), C::Rel(rel::B_COND)]),
    ]);

    t.insn(Mnemonic::PSB, &[
        (&[LitSym(Symbol::CSYNC)], 0xD503_223F, &[]),
    ]);

    t.insn(Mnemonic::RET, &[
        (&[], 0xD65F_03C0, &[]),
        (&[X], 0xD65F_0000, &[C::R5]),
    ]);

    t.insn(Mnemonic::SDOT, &[
        (&[V(Dword), V(Byte), VElem(Byte)], 0x0F80_E000,
         &[C::Rwidth30, C::R0, C::R5, C::R16, C::Ufields11(2)]),
        (&[V(Dword), V(Byte), V(Byte)], 0x0E80_9400,
         &[C::Rwidth30, C::R0, C::R5, C::R16]),
    ]);

    t.insn(Mnemonic::SSHR, &[
        (&[V(Byte), V(Byte), Imm], 0x0F08_0400,
         &[C::Rwidth30, C::R0, C::R5, C::Usub(16, 3, 8)]),
    ]);

    t.insn(Mnemonic::ST1, &[
        (&[List(1, Byte), RefBase], 0x0C00_7000, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(1, Dword), RefBase], 0x0C00_7800, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(2, Qword), RefBase], 0x0C00_AC00, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(3, Word), RefBase], 0x0C00_6400, &[C::Rwidth30, C::R0, C::R5]),
        (&[List(4, Word), RefBase], 0x0C00_2400, &[C::Rwidth30, C::R0, C::R5]),
        (&[ListStatic(1, Byte, 16), RefBase, LitInt(16)], 0x4C9F_7000, &[C::R0, C::R5]),
        (&[ListStatic(1, Qword, 2), RefBase, LitInt(16)], 0x4C9F_7C00, &[C::R0, C::R5]),
        (&[List(2, Byte), RefBase, X], 0x0C80_A000, &[C::Rwidth30, C::R0, C::R5, C::R16]),
        (&[ListElem(1, Byte), RefBase], 0x0D00_0000, &[C::R0, C::Ufields30(4), C::R5]),
        (&[ListElem(1, Byte), RefBase, X], 0x0D80_0000,
         &[C::R0, C::Ufields30(4), C::R5, C::R16]),
    ]);

    t.insn(Mnemonic::STP, &[
        (&[W, W, RefBase], 0x2900_0000, &[C::R0, C::R10, C::R5]),
        (&[W, W, RefOffset], 0x2900_0000, &[C::R0, C::R10, C::R5, C::Sscaled(2)]),
        (&[W, W, RefBase, Imm], 0x2880_0000, &[C::R0, C::R10, C::R5, C::Sscaled(2)]),
        (&[W, W, RefPre], 0x2980_0000, &[C::R0, C::R10, C::R5, C::Sscaled(2)]),
        (&[X, X, RefBase], 0xA900_0000, &[C::R0, C::R10, C::R5]),
        (&[X, X, RefOffset], 0xA900_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[X, X, RefBase, Imm], 0xA880_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[X, X, RefPre], 0xA980_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[S, S, RefBase], 0x2D00_0000, &[C::R0, C::R10, C::R5]),
        (&[S, S, RefOffset], 0x2D00_0000, &[C::R0, C::R10, C::R5, C::Sscaled(2)]),
        (&[S, S, RefBase, Imm], 0x2C80_0000, &[C::R0, C::R10, C::R5, C::Sscaled(2)]),
        (&[S, S, RefPre], 0x2D80_0000, &[C::R0, C::R10, C::R5, C::Sscaled(2)]),
        (&[D, D, RefBase], 0x6D00_0000, &[C::R0, C::R10, C::R5]),
        (&[D, D, RefOffset], 0x6D00_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[D, D, RefBase, Imm], 0x6C80_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[D, D, RefPre], 0x6D80_0000, &[C::R0, C::R10, C::R5, C::Sscaled(3)]),
        (&[Q, Q, RefBase], 0xAD00_0000, &[C::R0, C::R10, C::R5]),
        (&[Q, Q, RefOffset], 0xAD00_0000, &[C::R0, C::R10, C::R5, C::Sscaled(4)]),
        (&[Q, Q, RefBase, Imm], 0xAC80_0000, &[C::R0, C::R10, C::R5, C::Sscaled(4)]),
        (&[Q, Q, RefPre], 0xAD80_0000, &[C::R0, C::R10, C::R5, C::Sscaled(4)]),
    ]);

    t.insn(Mnemonic::STR, &[
        (&[W, RefBase], 0xB900_0000, &[C::R0, C::R5]),
        (&[W, RefOffset], 0xB900_0000, &[C::R0, C::R5, C::Uscaled(10, 12, 2)]),
        (&[W, RefIndex], 0xB820_0800,
         &[C::R0, C::R5, C::R16, C::ExtendsX, C::UAlt2(12, 2)]),
        (&[S, RefIndex], 0xBC20_0800,
         &[C::R0, C::R5, C::R16, C::ExtendsX, C::UAlt2(12, 2)]),
        (&[B, RefPre], 0x3C00_0C00, &[C::R0, C::R5, C::Sbits]),
        (&[Q, RefBase, Imm], 0x3C80_0400, &[C::R0, C::R5, C::Sbits]),
    ]);

    t.insn(Mnemonic::SYS, &[
        (&[Imm, Sym, Sym, Imm, End, X], 0xD508_0000,
         &[C::Ubits(16, 3), C::LitList(12, symset::CONTROLREGS),
           C::LitList(8, symset::CONTROLREGS), C::Ubits(5, 3), C::R0]),
    ]);

    t.insn(Mnemonic::SYSL, &[
        (&[X, Imm, Sym, Sym, Imm], 0xD528_0000,
         &[C::R0, C::Ubits(16, 3), C::LitList(12, symset::CONTROLREGS),
           C::LitList(8, symset::CONTROLREGS), C::Ubits(5, 3)]),
    ]);

    t.insn(Mnemonic::TBNZ, &[
        (&[W, Imm, Offset], 0x3700_0000,
         &[C::R0, C::Uslice(19, 5, 0), C::ChkUbits(5), C::Adv, C::Rel(rel::TBZ)]),
        (&[X, Imm, Offset], 0x3700_0000,
         &[C::R0, C::Uslice(31, 1, 5), C::Uslice(19, 5, 0), C::ChkUbits(6), C::Adv,
           C::Rel(rel::TBZ)]),
    ]);

    t.insn(Mnemonic::TBZ, &[
        (&[W, Imm, Offset], 0x3600_0000,
         &[C::R0, C::Uslice(19, 5, 0), C::ChkUbits(5), C::Adv, C::Rel(rel::TBZ)]),
        (&[X, Imm, Offset], 0x3600_0000,
         &[C::R0, C::Uslice(31, 1, 5), C::Uslice(19, 5, 0), C::ChkUbits(6), C::Adv,
           C::Rel(rel::TBZ)]),
    ]);

    t.insn(Mnemonic::UBFX, &[
        (&[W, W, Imm, Imm], 0x5300_0000,
         &[C::R0, C::R5, C::Ubits(16, 5), C::ChkUsum(5), C::Usumdec(10, 6)]),
        (&[X, X, Imm, Imm], 0xD340_0000,
         &[C::R0, C::R5, C::Ubits(16, 6), C::ChkUsum(6), C::Usumdec(10, 6)]),
    ]);

    t.finish()
}
