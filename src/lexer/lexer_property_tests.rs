//! Property-based tests for the lexer.
//!
//! 1. **Lexer never panics** - arbitrary input yields tokens or a lexical error
//! 2. **EOF is always last** - a successful tokenization ends with exactly one EOF
//! 3. **Lexer is deterministic** - same input, same result
//! 4. **Positions are monotonic** - tokens come out in source order
//! 5. **Valid fragments lex cleanly**

use proptest::prelude::*;

use super::lexer::tokenize;

const VALID_FRAGMENTS: &[&str] = &[
    "val x = 42;",
    "var y: Int? = null;",
    "fun main() { println(\"hi $name\"); }",
    "a ?: b",
    "x!!.length",
    "x?.length",
    "0b1010 0xFF 1_000L 3.14f",
    "'c' '\\t'",
    "`when` !in !is as?",
    "/* outer /* inner */ */ done",
    "\"${a + b}\"",
];

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_FRAGMENTS).prop_map(std::string::ToString::to_string)
}

proptest! {
    #[test]
    fn lexer_never_panics(input in "\\PC{0,300}") {
        let _ = tokenize(&input);
    }

    #[test]
    fn eof_always_last(input in "[a-z0-9 +*/=.(){};:\"$'!?<>-]{0,120}") {
        if let Ok(tokens) = tokenize(&input) {
            prop_assert!(!tokens.is_empty());
            prop_assert!(tokens.last().is_some_and(|token| token.is_eof()));
            prop_assert_eq!(tokens.iter().filter(|token| token.is_eof()).count(), 1);
        }
    }

    #[test]
    fn lexer_deterministic(input in "\\PC{0,200}") {
        prop_assert_eq!(tokenize(&input), tokenize(&input));
    }

    #[test]
    fn positions_are_monotonic(input in "[a-z0-9 \n+*=.(){};]{0,200}") {
        if let Ok(tokens) = tokenize(&input) {
            for window in tokens.windows(2) {
                let (prev, next) = (&window[0], &window[1]);
                prop_assert!(
                    (next.line, next.column) >= (prev.line, prev.column),
                    "{} came before {} in {:?}",
                    prev,
                    next,
                    input,
                );
            }
        }
    }

    #[test]
    fn valid_fragments_lex_cleanly(fragment in valid_fragment()) {
        prop_assert!(tokenize(&fragment).is_ok(), "failed to lex {:?}", fragment);
    }
}
