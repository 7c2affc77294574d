#![allow(dead_code)]

use php_aif::{Options, StateMachine, Token, fix_str, tokenize};

/// Wrap a code snippet in an open tag.
pub fn php(body: &str) -> String {
    format!("<?php\n{body}\n")
}

pub fn fix_with(input: &str, options: Options) -> String {
    fix_str(input, options).unwrap_or_else(|e| panic!("fix failed: {e}\n--- input ---\n{input}"))
}

pub fn fix(input: &str) -> String {
    fix_with(input, Options::new())
}

pub fn assert_fixed(body: &str, expected: &str) {
    let input = php(body);
    let output = fix(&input);
    let expected = php(expected);
    assert_eq!(
        output, expected,
        "rewrite mismatch:\n--- input ---\n{input}\n--- expected ---\n{expected}\n--- got ---\n{output}"
    );
}

pub fn assert_untouched(body: &str) {
    assert_fixed(body, body);
}

pub fn join(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Tokenize `input`, run a pass, and hand back the machine.
pub fn machine(input: &str, options: Options) -> StateMachine {
    let mut machine = StateMachine::new(options);
    machine.tokenize(input).expect("tokenize failed");
    machine.parse();
    machine
}

/// Assert the lexer loses nothing.
pub fn assert_lossless(input: &str) {
    let tokens = tokenize(input).expect("tokenize failed");
    assert_eq!(join(&tokens), input);
}
