//! AArch64 (A64) machine-code assembler primitives.
//!
//! Given an instruction [`Mnemonic`] and a tuple of typed operand values,
//! the [`Assembler`] selects one legal encoding among the variants defined
//! by the bundled tables, validates every operand against that encoding's
//! constraints, and writes a 32-bit little-endian instruction word at the
//! current PC. Control-flow operands naming a symbolic target record a
//! deferred patch that is resolved by [`Assembler::apply_relocations`]
//! once all target addresses are known.
//!
//! The engine is table-driven: a pattern stream of matcher programs picks
//! the encoding, and a command stream of field-deposit programs composes
//! the opcode. Non-SVE/SME A64 is the covered surface.
//!
//! ```
//! use a64_asm::{x, Assembler, Mnemonic};
//!
//! let mut asm = Assembler::new(vec![0; 64]);
//! asm.emit(Mnemonic::ADD, &[x(1).into(), x(2).into(), x(3).into()])
//!     .unwrap();
//! let lbl = asm.new_label();
//! asm.emit(Mnemonic::B, &[lbl.into()]).unwrap();
//! asm.apply_relocations().unwrap();
//! assert_eq!(&asm.code()[..4], &0x8B03_0041u32.to_le_bytes());
//! ```

#![warn(missing_docs)]

mod args;
mod assembler;
mod encoder;
mod error;
mod flatten;
mod matcher;
mod mnemonic;
mod modifiers;
mod registers;
mod symbols;
mod tables;


pub use args::{Arg, Label, Ref, RefIndex, RefOffset, RefPre};
pub use assembler::{Assembler, Reloc};
pub use error::{Error, InvalidMnemonicId};
pub use matcher::EncOp;
pub use mnemonic::Mnemonic;
pub use modifiers::{Mod, ModGroup, ModId};
pub use registers::{
    scalar_b, scalar_d, scalar_h, scalar_q, scalar_s, vec16b, vec1d, vec1o, vec2d, vec2h,
    vec2s, vec4b, vec4h, vec4s, vec8b, vec8h, w, x, Reg, RegFamily, RegList, RegType, Size,
    WSP, WZR, XSP, XZR,
};
pub use symbols::{Symbol, ATOPS, BARRIEROPS, DCOPS, ICOPS, MSRIMMOPS, TLBIOPS};
