use logos::Logos;

/// Tokens inside a single operand string. Mnemonics never reach this lexer;
/// the line parser splits them off before operands are resolved.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    // ── Registers ─────────────────────────────
    #[regex(r"[Rr][0-9]+", |lex| lex.slice()[1..].parse::<u32>().ok())]
    Reg(u32),

    // ── Numbers ──────────────────────────────
    // Hex literals are unsigned magnitudes; only decimal takes a sign.
    #[regex(r"\$[0-9A-Fa-f]+", |lex| i64::from_str_radix(&lex.slice()[1..], 16).ok())]
    Hex(i64),
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Dec(i64),

    // Symbols ( )
    #[token("(")] LParen,
    #[token(")")] RParen,
}

/// Lex one operand string; `None` if any character fails to tokenize.
pub fn tokenize(operand: &str) -> Option<Vec<Token>> {
    Token::lexer(operand).collect::<Result<Vec<_>, _>>().ok()
}
