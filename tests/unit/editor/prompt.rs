use std::io::Cursor;

use super::*;

#[test]
fn auto_prompt_answers_from_its_flag() {
    assert!(AutoPrompt { assume_yes: true }.confirm(RESET_CONFIRM));
    assert!(!AutoPrompt::default().confirm(RESET_CONFIRM));
}

#[test]
fn terminal_prompt_reads_yes_and_no() {
    let mut out = Vec::new();
    let mut p = TerminalPrompt::new(Cursor::new("y\nno\n YES \n"), &mut out);
    assert!(p.confirm("first?"));
    assert!(!p.confirm("second?"));
    assert!(p.confirm("third?"));
    // End of input counts as "no".
    assert!(!p.confirm("fourth?"));
    drop(p);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("first? [y/N] "));
    assert!(text.contains("fourth? [y/N] "));
}

#[test]
fn terminal_prompt_prints_alerts() {
    let mut out = Vec::new();
    TerminalPrompt::new(Cursor::new(""), &mut out).alert(NO_IMAGE_ALERT);
    assert_eq!(String::from_utf8(out).unwrap(), "Please select an image.\n");
}
