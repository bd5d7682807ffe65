use std::collections::VecDeque;

use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{
    classify_word, LiteralValue, Token, TokenKind, COMPOSITE_KEYWORDS, MAX_OPERATOR_LEN,
    OPERATOR_LOOKUP, SYMBOL_LOOKUP,
};

/// Character-level tokenizer.
///
/// The cursor only moves forward. Multi-character decisions are made by
/// looking ahead from the current position before anything is consumed.
/// A string literal expands into several tokens; those are queued in
/// `pending` and handed out one per [`Lexer::next_token`] call.
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    pending: VecDeque<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            input: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            pending: VecDeque::new(),
        }
    }

    pub fn at(&self) -> Option<char> {
        self.peek(0)
    }

    pub fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.at()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(offset, expected)| self.peek(offset) == Some(expected))
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.at().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.pos].iter().collect()
    }

    /// Returns the next token. Once the input is exhausted every call yields
    /// an `EOF` token at the final position.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        let token = match self.pending.pop_front() {
            Some(token) => token,
            None => self.scan_token()?,
        };

        trace!(
            kind = %token.kind,
            value = %token.value,
            line = token.line,
            column = token.column,
            "token"
        );

        Ok(token)
    }

    /// Drains the lexer into a vector that always ends with `EOF`.
    pub fn tokenize_all(&mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = vec![];

        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);

            if done {
                return Ok(tokens);
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token, Error> {
        if self.pos == 0 && self.starts_with("#!") {
            self.skip_line();
        }

        self.skip_trivia()?;

        let position = self.position();
        let Some(ch) = self.at() else {
            return Ok(MK_TOKEN!(TokenKind::EOF, String::new(), position));
        };

        if let Some(token) = self.scan_composite_keyword() {
            return Ok(token);
        }

        if is_identifier_start(ch) {
            return Ok(self.scan_word());
        }

        if ch.is_ascii_digit() {
            return self.scan_number();
        }

        match ch {
            '"' => {
                let mut tokens = self.scan_string()?.into_iter();
                // scan_string always yields at least STRING_START
                let first = tokens.next();
                self.pending.extend(tokens);
                if let Some(first) = first {
                    return Ok(first);
                }
            }
            '\'' => return self.scan_char(),
            '`' => return self.scan_quoted_identifier(),
            _ => {}
        }

        if let Some(token) = self.scan_operator() {
            return Ok(token);
        }

        if let Some(kind) = SYMBOL_LOOKUP.get(&ch) {
            self.advance();
            return Ok(MK_TOKEN!(*kind, ch.to_string(), position));
        }

        Err(Error::new(
            ErrorImpl::UnrecognisedCharacter { character: ch },
            position,
        ))
    }

    fn skip_line(&mut self) {
        self.consume_while(|c| c != '\n');
        self.advance();
    }

    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            self.consume_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));

            if self.starts_with("//") {
                self.consume_while(|c| c != '\n');
            } else if self.starts_with("/*") {
                self.skip_block_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), Error> {
        let start = self.position();
        let mut depth = 1;
        self.advance_n(2);

        while depth > 0 {
            if self.at_eof() {
                return Err(Error::new(ErrorImpl::UnterminatedBlockComment, start));
            }

            if self.starts_with("/*") {
                depth += 1;
                self.advance_n(2);
            } else if self.starts_with("*/") {
                depth -= 1;
                self.advance_n(2);
            } else {
                self.advance();
            }
        }

        Ok(())
    }

    fn scan_word(&mut self) -> Token {
        let position = self.position();
        let start = self.pos;
        self.consume_while(is_identifier_char);

        let word = self.slice(start);
        MK_TOKEN!(classify_word(&word), word, position)
    }

    fn scan_composite_keyword(&mut self) -> Option<Token> {
        let position = self.position();

        for (text, kind) in COMPOSITE_KEYWORDS {
            if !self.starts_with(text) {
                continue;
            }

            let len = text.chars().count();
            // `!inside` is a negated identifier, not `!in` + `side`
            if kind != TokenKind::AsSafe && self.peek(len).is_some_and(is_identifier_char) {
                continue;
            }

            self.advance_n(len);
            return Some(MK_TOKEN!(kind, text.to_string(), position));
        }

        None
    }

    fn scan_operator(&mut self) -> Option<Token> {
        let position = self.position();

        for len in (1..=MAX_OPERATOR_LEN).rev() {
            if self.pos + len > self.input.len() {
                continue;
            }

            let candidate: String = self.input[self.pos..self.pos + len].iter().collect();
            if let Some(kind) = OPERATOR_LOOKUP.get(candidate.as_str()) {
                self.advance_n(len);
                return Some(MK_TOKEN!(*kind, candidate, position));
            }
        }

        None
    }

    fn scan_number(&mut self) -> Result<Token, Error> {
        let position = self.position();
        let start = self.pos;
        let mut kind = TokenKind::IntLiteral;
        let mut radix = 10;

        match (self.at(), self.peek(1)) {
            (Some('0'), Some('b' | 'B')) => {
                self.advance_n(2);
                self.scan_radix_digits(|c| c == '0' || c == '1', "binary", position)?;
                radix = 2;
            }
            (Some('0'), Some('x' | 'X')) => {
                self.advance_n(2);
                self.scan_radix_digits(|c| c.is_ascii_hexdigit(), "hexadecimal", position)?;
                radix = 16;
            }
            _ => {
                self.consume_while(is_decimal_char);

                if self.at() == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                    self.consume_while(is_decimal_char);
                    kind = TokenKind::FloatLiteral;
                }

                if matches!(self.at(), Some('e' | 'E')) {
                    let digit_offset = match self.peek(1) {
                        Some('+' | '-') => 2,
                        _ => 1,
                    };

                    if self.peek(digit_offset).is_some_and(|c| c.is_ascii_digit()) {
                        self.advance_n(digit_offset);
                        self.consume_while(is_decimal_char);
                        kind = TokenKind::FloatLiteral;
                    }
                }
            }
        }

        self.consume_while(|c| matches!(c, 'u' | 'U' | 'l' | 'L'));

        if matches!(self.at(), Some('f' | 'F')) {
            self.advance();
            kind = TokenKind::FloatLiteral;
        }

        let text = self.slice(start);
        let literal = decode_number(&text, kind, radix);
        Ok(MK_TOKEN!(kind, text, position, literal))
    }

    fn scan_radix_digits(
        &mut self,
        is_digit: impl Fn(char) -> bool,
        radix: &'static str,
        position: Position,
    ) -> Result<(), Error> {
        let mut found_digit = false;

        while let Some(ch) = self.at() {
            if is_digit(ch) {
                found_digit = true;
            } else if ch != '_' {
                break;
            }
            self.advance();
        }

        if found_digit {
            Ok(())
        } else {
            Err(Error::new(ErrorImpl::MissingDigits { radix }, position))
        }
    }

    fn scan_char(&mut self) -> Result<Token, Error> {
        let position = self.position();
        let start = self.pos;
        let invalid = |reason: &str| {
            Error::new(
                ErrorImpl::InvalidCharLiteral {
                    reason: reason.to_string(),
                },
                position,
            )
        };

        self.advance();

        let value = match self.at() {
            None | Some('\n') => return Err(invalid("missing closing quote")),
            Some('\'') => return Err(invalid("empty char literal")),
            Some('\\') => {
                self.advance();
                match self.advance() {
                    Some(escaped) => decode_escape(escaped),
                    None => return Err(invalid("unterminated escape sequence")),
                }
            }
            Some(ch) => {
                self.advance();
                ch
            }
        };

        if self.at() != Some('\'') {
            return Err(invalid("expected closing quote after one character"));
        }
        self.advance();

        Ok(MK_TOKEN!(
            TokenKind::CharLiteral,
            self.slice(start),
            position,
            Some(LiteralValue::Char(value))
        ))
    }

    fn scan_quoted_identifier(&mut self) -> Result<Token, Error> {
        let position = self.position();
        self.advance();

        let start = self.pos;
        self.consume_while(|c| c != '`');

        if self.at() != Some('`') {
            return Err(Error::new(ErrorImpl::UnterminatedQuotedIdentifier, position));
        }

        let name = self.slice(start);
        self.advance();

        Ok(MK_TOKEN!(TokenKind::QuotedIdentifier, name, position))
    }

    /// Scans `"..."` into STRING_START, text/interpolation pieces, STRING_END.
    fn scan_string(&mut self) -> Result<Vec<Token>, Error> {
        let start = self.position();
        let mut tokens = vec![MK_TOKEN!(TokenKind::StringStart, String::from("\""), start)];
        self.advance();

        let mut buffer = String::new();
        let mut buffer_position = self.position();

        loop {
            let Some(ch) = self.at() else {
                return Err(Error::new(ErrorImpl::UnterminatedString, start));
            };

            match ch {
                '"' => {
                    flush_text(&mut tokens, &mut buffer, buffer_position);
                    tokens.push(MK_TOKEN!(
                        TokenKind::StringEnd,
                        String::from("\""),
                        self.position()
                    ));
                    self.advance();
                    return Ok(tokens);
                }
                '$' => {
                    flush_text(&mut tokens, &mut buffer, buffer_position);
                    self.scan_interpolation(&mut tokens)?;
                }
                '\\' => {
                    if buffer.is_empty() {
                        buffer_position = self.position();
                    }
                    buffer.push(ch);
                    self.advance();
                    match self.advance() {
                        Some(escaped) => buffer.push(escaped),
                        None => return Err(Error::new(ErrorImpl::UnterminatedString, start)),
                    }
                }
                _ => {
                    if buffer.is_empty() {
                        buffer_position = self.position();
                    }
                    buffer.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn scan_interpolation(&mut self, tokens: &mut Vec<Token>) -> Result<(), Error> {
        let dollar = self.position();
        self.advance();

        if self.at() == Some('{') {
            tokens.push(MK_TOKEN!(
                TokenKind::StringInterpStart,
                String::from("${"),
                dollar
            ));
            self.advance();

            let expr_position = self.position();
            let start = self.pos;
            self.consume_while(|c| c != '}');

            if self.at() != Some('}') {
                return Err(Error::new(ErrorImpl::UnterminatedInterpolation, dollar));
            }

            tokens.push(MK_TOKEN!(
                TokenKind::StringInterpExpr,
                self.slice(start),
                expr_position
            ));
            tokens.push(MK_TOKEN!(
                TokenKind::StringInterpEnd,
                String::from("}"),
                self.position()
            ));
            self.advance();
            return Ok(());
        }

        let start = self.pos;
        self.consume_while(is_identifier_char);

        if self.pos == start {
            let found = match self.at() {
                Some(ch) => format!("{:?}", ch),
                None => String::from("end of input"),
            };
            return Err(Error::new(
                ErrorImpl::InvalidInterpolation { found },
                self.position(),
            ));
        }

        tokens.push(MK_TOKEN!(
            TokenKind::StringInterpId,
            self.slice(start),
            dollar
        ));
        Ok(())
    }
}

/// Tokenizes a whole source text, ending with an `EOF` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(source).tokenize_all()
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_decimal_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '_'
}

fn flush_text(tokens: &mut Vec<Token>, buffer: &mut String, position: Position) {
    if buffer.is_empty() {
        return;
    }

    let text = std::mem::take(buffer);
    let literal = Some(LiteralValue::Text(unescape(&text)));
    tokens.push(MK_TOKEN!(TokenKind::StringText, text, position, literal));
}

fn decode_escape(escaped: char) -> char {
    match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        '0' => '\0',
        other => other,
    }
}

fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(decode_escape(escaped));
                continue;
            }
        }
        result.push(ch);
    }

    result
}

fn decode_number(text: &str, kind: TokenKind, radix: u32) -> Option<LiteralValue> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();

    if kind == TokenKind::FloatLiteral {
        if radix != 10 {
            return None;
        }
        return digits
            .trim_end_matches(|c: char| matches!(c, 'f' | 'F' | 'u' | 'U' | 'l' | 'L'))
            .parse::<f64>()
            .ok()
            .map(LiteralValue::Float);
    }

    let body = if radix == 10 {
        digits.as_str()
    } else {
        digits.get(2..)?
    };

    u64::from_str_radix(body.trim_end_matches(|c: char| matches!(c, 'u' | 'U' | 'l' | 'L')), radix)
        .ok()
        .map(LiteralValue::Integer)
}
