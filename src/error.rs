use thiserror::Error;

/// Per-instruction assembly failures. Each one is reported against its own
/// source line and never stops the rest of the file from being encoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AsmError {
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),

    #[error("malformed register `{0}` (expected R0..R15)")]
    MalformedRegister(String),

    #[error("malformed immediate `{0}` (expected decimal or $hex)")]
    MalformedImmediate(String),

    #[error("immediate {value} does not fit a signed {width}-bit field")]
    ImmediateOutOfRange { value: i64, width: u32 },

    #[error("`{mnemonic}` takes {expected} operand(s), found {found}")]
    OperandCountMismatch {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
}
