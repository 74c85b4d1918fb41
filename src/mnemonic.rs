//! Instruction mnemonics covered by the bundled encoding tables.

use core::fmt;

use crate::error::InvalidMnemonicId;

/// An instruction mnemonic.
///
/// Each mnemonic indexes a variable-length record of encodings in the
/// bundled pattern stream; encodings are tried in record order and the
/// first match wins.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumCount,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
#[repr(u16)]
pub enum Mnemonic {
    ABS = 1,
    ADC,
    ADCS,
    ADD,
    ADDV,
    ADR,
    ADRP,
    B,
    BFC,
    BL,
    BLR,
    CAS,
    CASP,
    CBNZ,
    CBZ,
    CCMN,
    CFINV,
    CNEG,
    DC,
    DCPS1,
    DMB,
    DUP,
    FCMEQ,
    FCMLA,
    FMLA,
    FMOV,
    LD1,
    LDAPUR,
    LDAPURB,
    LDP,
    LDR,
    MADD,
    MOV,
    MOVI,
    NOP,
    PRFM,
    PSB,
    RET,
    SDOT,
    SSHR,
    ST1,
    STP,
    STR,
    SYS,
    SYSL,
    TBNZ,
    TBZ,
    UBFX,
}

impl Mnemonic {
    /// The raw table id of the mnemonic.
    pub const fn id(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl TryFrom<u16> for Mnemonic {
    type Error = InvalidMnemonicId;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        Mnemonic::from_repr(id).ok_or(InvalidMnemonicId)
    }
}
