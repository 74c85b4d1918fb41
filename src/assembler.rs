//! The assembler: mnemonic dispatch, encoding selection, labels, and
//! relocation resolution.

use crate::args::{Arg, Label};
use crate::encoder::{enc_offset, CMD_ARG_COUNTS};
use crate::error::Error;
use crate::flatten::Flat;
use crate::matcher::{EncOp, MATCHER_ARG_COUNTS};
use crate::mnemonic::Mnemonic;
use crate::tables::TABLES;

/// A label reference deferred for patching once all label addresses are
/// assigned. Relocations are used internally, and exposed for debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reloc {
    /// PC of the instruction carrying the label offset operand.
    pub inst_pc: u32,
    /// Relocation kind.
    pub kind: u8,
    /// Referenced label, with optional extra offset.
    pub label: Label,
}

/// Encodes executable A64 instructions into a code buffer.
///
/// Instructions that take a [`Label`] operand may be emitted before the
/// label's address is known; such references are queued and patched by
/// [`Assembler::apply_relocations`] once every label PC is final.
///
/// Errors are sticky: after a failed operation every subsequent
/// [`Assembler::emit`] or [`Assembler::apply_relocations`] call returns the
/// same error without side effects, until [`Assembler::init`] is called.
#[derive(Debug, Default)]
pub struct Assembler {
    pub(crate) code: Vec<u8>,
    pub(crate) pc: u32,
    pub(crate) label_pc: Vec<u32>,
    pub(crate) relocs: Vec<Reloc>,
    pub(crate) pending_relocs: Vec<Reloc>,
    pub(crate) args: Vec<Arg>,
    pub(crate) flat: Vec<Flat>,
    pub(crate) pattern: Vec<EncOp>,
    pub(crate) cmds: Vec<EncOp>,
    pub(crate) simd_size: u8,
    pub(crate) opcode: u32,
    pub(crate) err: Option<Error>,
    current: Option<Mnemonic>,
    match_idx: i8,
}

impl Assembler {
    /// Creates an assembler writing into `code`.
    pub fn new(code: Vec<u8>) -> Self {
        let mut asm = Assembler::default();
        asm.init(code);
        asm
    }

    /// Re-initializes the assembler with a new code buffer, resetting the
    /// PC, labels, relocations, and any sticky error.
    pub fn init(&mut self, code: Vec<u8>) {
        self.code = code;
        self.pc = 0;
        self.label_pc.clear();
        self.relocs.clear();
        self.pending_relocs.clear();
        self.args.clear();
        self.flat.clear();
        self.pattern.clear();
        self.cmds.clear();
        self.simd_size = 0;
        self.opcode = 0;
        self.err = None;
        self.current = None;
        self.match_idx = -1;
    }

    /// The code buffer.
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Consumes the assembler and returns the code buffer.
    pub fn into_code(self) -> Vec<u8> {
        self.code
    }

    /// Current code offset. Instruction words are written at the PC.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Moves the PC. Subsequent instructions are written at the new offset.
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    /// The sticky error, if any operation has failed since the last init.
    pub fn err(&self) -> Option<Error> {
        self.err
    }

    /// Registers a new label at the current PC. The label may be passed as
    /// an offset operand, and its PC may be reassigned with
    /// [`Assembler::set_label`]. Emitted label references are resolved by
    /// [`Assembler::apply_relocations`].
    pub fn new_label(&mut self) -> Label {
        self.label_pc.push(self.pc);
        Label {
            id: (self.label_pc.len() - 1) as u32,
            offset: 0,
        }
    }

    /// Assigns the current PC to a label.
    ///
    /// # Panics
    ///
    /// Panics if the label was not created by this assembler.
    pub fn set_label(&mut self, label: Label) {
        self.label_pc[label.id as usize] = self.pc;
    }

    /// Queued relocations, in emission order.
    pub fn relocs(&self) -> &[Reloc] {
        &self.relocs
    }

    /// The matcher list of the most recent match attempt, useful for
    /// debugging.
    pub fn pattern(&self) -> &[EncOp] {
        &self.pattern
    }

    /// The command list of the most recent matched encoding, useful for
    /// debugging.
    pub fn commands(&self) -> &[EncOp] {
        &self.cmds
    }

    /// Base opcode (before operand field insertion) of the most recent
    /// matched encoding.
    pub fn opcode(&self) -> u32 {
        self.opcode
    }

    /// Index of the most recent matched encoding within its mnemonic's
    /// record.
    pub fn match_index(&self) -> Option<u8> {
        u8::try_from(self.match_idx).ok()
    }

    /// SIMD width in bytes latched during the most recent match, zero when
    /// no size-flexible vector operand was involved.
    pub fn simd_width(&self) -> u8 {
        self.simd_size
    }

    /// Encodes one instruction and writes it to the code buffer at the PC.
    ///
    /// The mnemonic's encodings are tried in table order; the first whose
    /// matcher program accepts the operand tuple is encoded. A matched
    /// encoding that rejects an operand value fails the call: a match
    /// followed by an encoding failure signals a constraint violation, not
    /// a mismatch, so later encodings are not tried.
    ///
    /// On success exactly 4 bytes are written and the PC advances by 4; on
    /// failure the PC is unchanged and the error becomes sticky.
    pub fn emit(&mut self, mnemonic: Mnemonic, args: &[Arg]) -> Result<(), Error> {
        if let Some(err) = self.err {
            return Err(err);
        }
        match self.try_emit(mnemonic, args) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::debug!(%mnemonic, pc = self.pc, %err, "emit failed");
                self.err = Some(err);
                Err(err)
            }
        }
    }

    /// [`Assembler::emit`] with a raw mnemonic id, rejecting ids outside
    /// the generated range.
    pub fn emit_raw(&mut self, id: u16, args: &[Arg]) -> Result<(), Error> {
        if let Some(err) = self.err {
            return Err(err);
        }
        let mnemonic = match Mnemonic::try_from(id) {
            Ok(mnemonic) => mnemonic,
            Err(_) => {
                self.err = Some(Error::InvalidMnemonic);
                return Err(Error::InvalidMnemonic);
            }
        };
        self.emit(mnemonic, args)
    }

    fn try_emit(&mut self, mnemonic: Mnemonic, args: &[Arg]) -> Result<(), Error> {
        self.current = Some(mnemonic);
        self.args.clear();
        self.args.extend_from_slice(args);
        self.flat.clear();
        self.cmds.clear();
        self.simd_size = 0;
        self.opcode = 0;
        self.match_idx = -1;

        let tables = &*TABLES;
        let mut at = tables.offsets[mnemonic.id() as usize] as usize;
        let encodings = tables.patterns[at];
        at += 1;

        for idx in 0..encodings {
            self.pattern.clear();
            let matchers = tables.patterns[at];
            at += 1;
            for _ in 0..matchers {
                let op = tables.patterns[at];
                at += 1;
                let nargs = MATCHER_ARG_COUNTS[op as usize] as usize;
                let mut x = [0u8; 3];
                x[..nargs].copy_from_slice(&tables.patterns[at..at + nargs]);
                at += nargs;
                self.pattern.push(EncOp { op, x });
            }
            let cmd_off =
                u16::from_be_bytes([tables.patterns[at], tables.patterns[at + 1]]) as usize;
            at += 2;

            if !self.match_pattern() {
                continue;
            }
            self.match_idx = idx as i8;

            self.opcode = u32::from_be_bytes([
                tables.commands[cmd_off],
                tables.commands[cmd_off + 1],
                tables.commands[cmd_off + 2],
                tables.commands[cmd_off + 3],
            ]);
            let mut cat = cmd_off + 4;
            let commands = tables.commands[cat];
            cat += 1;
            for _ in 0..commands {
                let op = tables.commands[cat];
                cat += 1;
                let nargs = CMD_ARG_COUNTS[op as usize] as usize;
                let mut x = [0u8; 3];
                x[..nargs].copy_from_slice(&tables.commands[cat..cat + nargs]);
                cat += nargs;
                self.cmds.push(EncOp { op, x });
            }

            tracing::trace!(%mnemonic, pc = self.pc, encoding = idx, "emit");
            return self.encode();
        }

        Err(Error::NoMatch)
    }

    /// Patches every queued label reference with the currently assigned
    /// label PCs.
    ///
    /// The queue is cleared on success, so a second call with unchanged
    /// labels is a no-op. An out-of-range displacement fails the call and
    /// becomes the sticky error.
    pub fn apply_relocations(&mut self) -> Result<(), Error> {
        if let Some(err) = self.err {
            return Err(err);
        }
        for i in 0..self.relocs.len() {
            let rel = self.relocs[i];
            let at = rel.inst_pc as usize;
            let target =
                self.label_pc[rel.label.id as usize] as i64 + rel.label.offset as i64;
            let delta = target - rel.inst_pc as i64;
            let enc = match enc_offset(rel.kind, delta) {
                Some(enc) => enc,
                None => {
                    self.err = Some(Error::InvalidEncoding);
                    return Err(Error::InvalidEncoding);
                }
            };
            let word = u32::from_le_bytes([
                self.code[at],
                self.code[at + 1],
                self.code[at + 2],
                self.code[at + 3],
            ]) | enc;
            self.code[at..at + 4].copy_from_slice(&word.to_le_bytes());
        }
        tracing::trace!(count = self.relocs.len(), "relocations applied");
        self.relocs.clear();
        Ok(())
    }
}
