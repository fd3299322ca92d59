//! asm32 – assembler core for a 32-bit fixed-width custom ISA.
//!
//! Pipeline: source line → `parser` (mnemonic + raw operands) →
//! `encoder` (format table + bit fields) → packed 32-bit word →
//! `report` (listing for humans).

pub mod encoder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod report;

pub use encoder::{encode, Condition, EncodedInstruction, Field, Layout};
pub use error::AsmError;
pub use parser::{parse_line, SourceInstruction};
pub use report::{assemble, Listing};
