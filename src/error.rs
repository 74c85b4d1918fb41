use core::fmt;

/// Failure modes of the encoding engine.
///
/// Errors are sticky: once an [`Assembler`](crate::Assembler) operation
/// fails, subsequent operations return the same error until the assembler is
/// re-initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Error {
    /// The mnemonic id is zero or exceeds the highest generated id.
    #[error("invalid instruction mnemonic")]
    InvalidMnemonic,
    /// No encoding's matcher program accepted the operand tuple.
    #[error("no matching encoding")]
    NoMatch,
    /// A matched encoding rejected an operand, or a relocation went out of
    /// range.
    #[error("invalid instruction encoding")]
    InvalidEncoding,
}

/// Raised when converting a raw id into a [`Mnemonic`](crate::Mnemonic)
/// fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidMnemonicId;

impl fmt::Display for InvalidMnemonicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id does not map to any mnemonic")
    }
}

impl std::error::Error for InvalidMnemonicId {}

impl From<InvalidMnemonicId> for Error {
    fn from(_: InvalidMnemonicId) -> Self {
        Error::InvalidMnemonic
    }
}
