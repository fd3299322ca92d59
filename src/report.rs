use std::fmt::Write as _;

use crate::encoder::{self, EncodedInstruction};
use crate::error::AsmError;
use crate::parser;

/// One source line with its encoding outcome. `outcome` is `None` for
/// lines that carry no instruction (blank, comment-only, label-only).
#[derive(Debug)]
pub struct Entry {
    pub line_no: usize,
    pub text: String,
    pub outcome: Option<Result<EncodedInstruction, AsmError>>,
}

/// The whole file, encoded line by line in best-effort batch mode: a
/// failed line is recorded and its siblings keep going.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<Entry>,
}

/// Run the full pipeline over a source text.
pub fn assemble(source: &str) -> Listing {
    let entries = source
        .lines()
        .enumerate()
        .map(|(i, raw)| Entry {
            line_no: i + 1,
            text: raw.trim_end().to_string(),
            outcome: parser::parse_line(raw).map(|inst| encoder::encode(&inst)),
        })
        .collect();
    Listing { entries }
}

impl Listing {
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.outcome, Some(Err(_))))
    }

    /// Successfully encoded words, in source order.
    pub fn words(&self) -> Vec<u32> {
        self.entries
            .iter()
            .filter_map(|e| match &e.outcome {
                Some(Ok(enc)) => Some(enc.word),
                _ => None,
            })
            .collect()
    }

    /// Failed lines as (line number, source text, error).
    pub fn errors(&self) -> Vec<(usize, &str, &AsmError)> {
        self.entries
            .iter()
            .filter_map(|e| match &e.outcome {
                Some(Err(err)) => Some((e.line_no, e.text.as_str(), err)),
                _ => None,
            })
            .collect()
    }

    /// Human-readable listing: line number, source text, then the word
    /// as field-grouped binary and as hex.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            match &e.outcome {
                Some(Ok(enc)) => {
                    let _ = writeln!(
                        out,
                        "{:>4}  {:<32} {}  {:08X}",
                        e.line_no,
                        e.text,
                        binary_grouped(enc),
                        enc.word
                    );
                }
                Some(Err(err)) => {
                    let _ = writeln!(out, "{:>4}  {:<32} error: {err}", e.line_no, e.text);
                }
                None => {
                    let _ = writeln!(out, "{:>4}  {}", e.line_no, e.text);
                }
            }
        }
        out
    }
}

/// Render a word as binary, one group per layout field.
fn binary_grouped(enc: &EncodedInstruction) -> String {
    let mut out = String::new();
    let mut shift = encoder::WORD_BITS;
    for f in &enc.fields {
        shift -= f.width;
        let mask = ((1u64 << f.width) - 1) as u32;
        let bits = (enc.word >> shift) & mask;
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{bits:0width$b}", width = f.width as usize);
    }
    out
}
