use bitvec::prelude::*;

use crate::error::AsmError;
use crate::parser::{self, Register, SourceInstruction};

pub const WORD_BITS: u32 = 32;
const OPCODE_BITS: u32 = 5;
const REG_BITS: u32 = 4;
const IMM_BITS: u32 = 19;

/// Branch condition sub-code. The four branch mnemonics share one opcode
/// and differ only in this 2-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Zero = 0,
    NotZero = 1,
    Plus = 2,
    Minus = 3,
}

/// Field roles an instruction word is built from. The opcode field is
/// implicit; it is always emitted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// op5 | Ra4 | Rb4 (address base) | imm19
    LoadStore,
    /// op5 | Ra4 | Rb4 | Rc4 | zero15
    AluReg3,
    /// op5 | Ra4 | Rb4 | imm19
    AluRegImm,
    /// op5 | Ra4 | Rb4 | zero19
    AluReg2,
    /// op5 | Ra4 | cond2 | zero2 | imm19
    Branch(Condition),
    /// op5 | Ra4 | zero23
    OneReg,
    /// op5 | zero27
    NoOperand,
}

#[derive(Debug, Clone, Copy)]
pub struct Format {
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub layout: Layout,
}

/// The instruction set. Read-only, shared for the whole process.
pub static TABLE: &[Format] = &[
    Format { mnemonic: "nop",  opcode: 0,  layout: Layout::NoOperand },
    Format { mnemonic: "ldi",  opcode: 1,  layout: Layout::LoadStore },
    Format { mnemonic: "ld",   opcode: 2,  layout: Layout::LoadStore },
    Format { mnemonic: "st",   opcode: 3,  layout: Layout::LoadStore },
    Format { mnemonic: "la",   opcode: 4,  layout: Layout::LoadStore },
    Format { mnemonic: "brzr", opcode: 8,  layout: Layout::Branch(Condition::Zero) },
    Format { mnemonic: "brnz", opcode: 8,  layout: Layout::Branch(Condition::NotZero) },
    Format { mnemonic: "brpl", opcode: 8,  layout: Layout::Branch(Condition::Plus) },
    Format { mnemonic: "brmi", opcode: 8,  layout: Layout::Branch(Condition::Minus) },
    Format { mnemonic: "add",  opcode: 12, layout: Layout::AluReg3 },
    Format { mnemonic: "addi", opcode: 13, layout: Layout::AluRegImm },
    Format { mnemonic: "sub",  opcode: 14, layout: Layout::AluReg3 },
    Format { mnemonic: "neg",  opcode: 15, layout: Layout::AluReg2 },
    Format { mnemonic: "and",  opcode: 20, layout: Layout::AluReg3 },
    Format { mnemonic: "andi", opcode: 21, layout: Layout::AluRegImm },
    Format { mnemonic: "or",   opcode: 22, layout: Layout::AluReg3 },
    Format { mnemonic: "ori",  opcode: 23, layout: Layout::AluRegImm },
    Format { mnemonic: "not",  opcode: 24, layout: Layout::AluReg2 },
    Format { mnemonic: "jr",   opcode: 26, layout: Layout::OneReg },
    Format { mnemonic: "stop", opcode: 31, layout: Layout::NoOperand },
];

pub fn lookup(mnemonic: &str) -> Option<&'static Format> {
    TABLE.iter().find(|f| f.mnemonic == mnemonic)
}

/// One bit-group of the word, most-significant-first ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub width: u32,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInstruction {
    pub word: u32,
    pub fields: Vec<Field>,
}

fn reg(r: Register) -> Field {
    Field { width: REG_BITS, value: r.0 as i64 }
}

fn zero(width: u32) -> Field {
    Field { width, value: 0 }
}

fn imm(value: i64, width: u32) -> Result<Field, AsmError> {
    let half = 1i64 << (width - 1);
    if value < -half || value >= half {
        return Err(AsmError::ImmediateOutOfRange { value, width });
    }
    Ok(Field { width, value })
}

fn expected_operands(layout: Layout) -> usize {
    match layout {
        Layout::NoOperand => 0,
        Layout::OneReg => 1,
        Layout::LoadStore | Layout::AluReg2 | Layout::Branch(_) => 2,
        Layout::AluReg3 | Layout::AluRegImm => 3,
    }
}

/// Encode one parsed instruction into a 32-bit word.
///
/// Operand fields mirror source operand order, destination first.
pub fn encode(inst: &SourceInstruction) -> Result<EncodedInstruction, AsmError> {
    let format = lookup(&inst.mnemonic)
        .ok_or_else(|| AsmError::UnknownMnemonic(inst.mnemonic.clone()))?;

    let expected = expected_operands(format.layout);
    if inst.operands.len() != expected {
        return Err(AsmError::OperandCountMismatch {
            mnemonic: inst.mnemonic.clone(),
            expected,
            found: inst.operands.len(),
        });
    }
    let ops = &inst.operands;

    let mut fields = vec![Field {
        width: OPCODE_BITS,
        value: format.opcode as i64,
    }];
    match format.layout {
        Layout::LoadStore => {
            let addr = parser::address_operand(&ops[1])?;
            fields.push(reg(parser::register_field(&ops[0])?));
            fields.push(reg(addr.base));
            fields.push(imm(addr.offset, IMM_BITS)?);
        }
        Layout::AluReg3 => {
            for op in ops {
                fields.push(reg(parser::register_field(op)?));
            }
            fields.push(zero(15));
        }
        Layout::AluRegImm => {
            fields.push(reg(parser::register_field(&ops[0])?));
            fields.push(reg(parser::register_field(&ops[1])?));
            fields.push(imm(parser::immediate(&ops[2])?, IMM_BITS)?);
        }
        Layout::AluReg2 => {
            fields.push(reg(parser::register_field(&ops[0])?));
            fields.push(reg(parser::register_field(&ops[1])?));
            fields.push(zero(IMM_BITS));
        }
        Layout::Branch(cond) => {
            fields.push(reg(parser::register_field(&ops[0])?));
            fields.push(Field { width: 2, value: cond as i64 });
            fields.push(zero(2));
            fields.push(imm(parser::immediate(&ops[1])?, IMM_BITS)?);
        }
        Layout::OneReg => {
            fields.push(reg(parser::register_field(&ops[0])?));
            fields.push(zero(23));
        }
        Layout::NoOperand => fields.push(zero(27)),
    }

    let word = pack(&fields);
    Ok(EncodedInstruction { word, fields })
}

/// Concatenate fields most-significant-first into one 32-bit word. A
/// negative value takes its two's-complement pattern within its field.
///
/// Field widths must cover the word exactly; anything else is a defect
/// in the format table, so it is asserted rather than surfaced as a
/// user error.
pub fn pack(fields: &[Field]) -> u32 {
    let total: u32 = fields.iter().map(|f| f.width).sum();
    assert_eq!(total, WORD_BITS, "instruction fields must cover exactly 32 bits");

    let mut word = bitarr![u32, Msb0; 0; 32];
    let mut at = 0usize;
    for f in fields {
        let bits = f.value.rem_euclid(1i64 << f.width) as u32;
        word[at..at + f.width as usize].store_be::<u32>(bits);
        at += f.width as usize;
    }
    word[..WORD_BITS as usize].load_be::<u32>()
}
