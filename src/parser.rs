use crate::error::AsmError;
use crate::lexer::{self, Token};

/// Register file size; indices occupy a 4-bit field.
pub const NUM_REGISTERS: u32 = 16;

/// One instruction as written: lowercased mnemonic plus raw operand
/// tokens, not yet type-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInstruction {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

/// A validated register index in `[0, 15]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register(pub u32);

/// An `offset(Rn)` operand. A bare offset gets base R0, the no-base
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressOperand {
    pub base: Register,
    pub offset: i64,
}

/// Split one raw source line into mnemonic and operand tokens.
///
/// Comments (`;...`) and a leading `label:` are stripped; operands are
/// comma-separated and trimmed. Blank, comment-only, and label-only
/// lines yield `None`.
pub fn parse_line(line: &str) -> Option<SourceInstruction> {
    let line = line.split(';').next().unwrap_or("");
    let line = match line.split_once(':') {
        Some((_label, rest)) => rest,
        None => line,
    };
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (mnemonic, rest) = match line.split_once(char::is_whitespace) {
        Some((m, rest)) => (m, rest.trim()),
        None => (line, ""),
    };
    let operands = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(|op| op.trim().to_string()).collect()
    };

    Some(SourceInstruction {
        mnemonic: mnemonic.to_ascii_lowercase(),
        operands,
    })
}

/// Resolve an `R<n>` token into a 4-bit register field.
pub fn register_field(token: &str) -> Result<Register, AsmError> {
    match lexer::tokenize(token).as_deref() {
        Some([Token::Reg(n)]) if *n < NUM_REGISTERS => Ok(Register(*n)),
        _ => Err(AsmError::MalformedRegister(token.to_string())),
    }
}

/// Resolve a numeric token: `$hex` magnitude or signed decimal.
pub fn immediate(token: &str) -> Result<i64, AsmError> {
    match lexer::tokenize(token).as_deref() {
        Some([Token::Dec(v) | Token::Hex(v)]) => Ok(*v),
        _ => Err(AsmError::MalformedImmediate(token.to_string())),
    }
}

/// Resolve `offset(Rn)` or a bare `offset` into base + offset.
pub fn address_operand(token: &str) -> Result<AddressOperand, AsmError> {
    match token.split_once('(') {
        None => Ok(AddressOperand {
            base: Register(0),
            offset: immediate(token)?,
        }),
        Some((offset, rest)) => {
            let reg = rest
                .strip_suffix(')')
                .ok_or_else(|| AsmError::MalformedRegister(rest.to_string()))?;
            Ok(AddressOperand {
                base: register_field(reg.trim())?,
                offset: immediate(offset.trim())?,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_label_and_comment() {
        let inst = parse_line("loop: add R1, R2, R3 ; accumulate").unwrap();
        assert_eq!(inst.mnemonic, "add");
        assert_eq!(inst.operands, vec!["R1", "R2", "R3"]);
    }

    #[test]
    fn blank_and_comment_only_lines_are_skipped() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t"), None);
        assert_eq!(parse_line("; just a comment"), None);
        assert_eq!(parse_line("here:"), None);
        assert_eq!(parse_line("here: ; nothing"), None);
    }

    #[test]
    fn mnemonic_without_operands() {
        let inst = parse_line("  stop  ").unwrap();
        assert_eq!(inst.mnemonic, "stop");
        assert!(inst.operands.is_empty());
    }

    #[test]
    fn mnemonics_are_lowercased() {
        assert_eq!(parse_line("NOP").unwrap().mnemonic, "nop");
    }

    #[test]
    fn register_round_trip() {
        for r in 0..NUM_REGISTERS {
            assert_eq!(register_field(&format!("R{r}")), Ok(Register(r)));
        }
        assert_eq!(register_field("r5"), Ok(Register(5)));
    }

    #[test]
    fn register_rejects_out_of_range_and_garbage() {
        for bad in ["R16", "R99", "Rx", "R", "5", "R-1"] {
            assert_eq!(
                register_field(bad),
                Err(AsmError::MalformedRegister(bad.to_string()))
            );
        }
    }

    #[test]
    fn immediates_decimal_and_hex() {
        assert_eq!(immediate("$FF"), Ok(255));
        assert_eq!(immediate("$87"), Ok(0x87));
        assert_eq!(immediate("-2"), Ok(-2));
        assert_eq!(immediate("42"), Ok(42));
    }

    #[test]
    fn malformed_immediates() {
        for bad in ["$ZZ", "$", "4x", "--2", "-$2", ""] {
            assert_eq!(
                immediate(bad),
                Err(AsmError::MalformedImmediate(bad.to_string()))
            );
        }
    }

    #[test]
    fn address_with_base_register() {
        assert_eq!(
            address_operand("4(R2)"),
            Ok(AddressOperand {
                base: Register(2),
                offset: 4
            })
        );
        assert_eq!(
            address_operand("-8(R15)"),
            Ok(AddressOperand {
                base: Register(15),
                offset: -8
            })
        );
    }

    #[test]
    fn bare_offset_defaults_to_no_base() {
        assert_eq!(
            address_operand("$75"),
            Ok(AddressOperand {
                base: Register(0),
                offset: 0x75
            })
        );
    }

    #[test]
    fn malformed_address_operands() {
        assert_eq!(
            address_operand("4(R16)"),
            Err(AsmError::MalformedRegister("R16".to_string()))
        );
        assert_eq!(
            address_operand("(R2)"),
            Err(AsmError::MalformedImmediate("".to_string()))
        );
        assert_eq!(
            address_operand("4(R2"),
            Err(AsmError::MalformedRegister("R2".to_string()))
        );
    }
}
