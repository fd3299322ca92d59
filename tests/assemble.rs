use asm32::{AsmError, assemble};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "\
; scale and store a value
start:  ldi  R3, $87        ; 0x87 into R3
        ldi  R1, 4(R2)
        add  R4, R3, R1
        st   R4, 8(R2)

        brmi R3, 3
        neg  R7, R7
        bogus R1
        nop
        stop
";

#[test]
fn errors_do_not_stop_sibling_lines() {
    let listing = assemble(PROGRAM);
    assert!(listing.has_errors());

    let errors = listing.errors();
    assert_eq!(errors.len(), 1);
    let (line_no, text, err) = errors[0];
    assert_eq!(line_no, 9);
    assert!(text.contains("bogus"));
    assert_eq!(*err, AsmError::UnknownMnemonic("bogus".to_string()));

    // every other instruction line still encodes
    assert_eq!(listing.words().len(), 8);
}

#[test]
fn words_match_the_format_table() {
    let listing = assemble(PROGRAM);
    let words = listing.words();

    assert_eq!(words[0], (1 << 27) | (3 << 23) | 0x87); // ldi R3, $87
    assert_eq!(words[1], (1 << 27) | (1 << 23) | (2 << 19) | 4); // ldi R1, 4(R2)
    assert_eq!(words[2], (12 << 27) | (4 << 23) | (3 << 19) | (1 << 15)); // add
    assert_eq!(words[3], (3 << 27) | (4 << 23) | (2 << 19) | 8); // st R4, 8(R2)
    assert_eq!(words[4], (8 << 27) | (3 << 23) | (3 << 21) | 3); // brmi R3, 3
    assert_eq!(words[5], (15 << 27) | (7 << 23) | (7 << 19)); // neg R7, R7
    assert_eq!(words[6], 0); // nop
    assert_eq!(words[7], 31 << 27); // stop
}

#[test]
fn assembling_twice_is_identical() {
    assert_eq!(assemble(PROGRAM).words(), assemble(PROGRAM).words());
}

#[test]
fn listing_keeps_blank_and_comment_lines() {
    let listing = assemble("; header\n\nnop\n");
    assert_eq!(listing.entries.len(), 3);
    assert!(listing.entries[0].outcome.is_none());
    assert!(listing.entries[1].outcome.is_none());
    assert!(listing.entries[2].outcome.is_some());
    assert!(!listing.has_errors());
}
