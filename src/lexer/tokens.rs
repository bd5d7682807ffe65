use lazy_static::lazy_static;
use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

lazy_static! {
    pub static ref HARD_KEYWORD_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("as", TokenKind::As);
        map.insert("break", TokenKind::Break);
        map.insert("class", TokenKind::Class);
        map.insert("continue", TokenKind::Continue);
        map.insert("do", TokenKind::Do);
        map.insert("else", TokenKind::Else);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("fun", TokenKind::Fun);
        map.insert("if", TokenKind::If);
        map.insert("in", TokenKind::In);
        map.insert("interface", TokenKind::Interface);
        map.insert("is", TokenKind::Is);
        map.insert("null", TokenKind::Null);
        map.insert("object", TokenKind::Object);
        map.insert("package", TokenKind::Package);
        map.insert("return", TokenKind::Return);
        map.insert("super", TokenKind::Super);
        map.insert("this", TokenKind::This);
        map.insert("throw", TokenKind::Throw);
        map.insert("true", TokenKind::True);
        map.insert("try", TokenKind::Try);
        map.insert("typealias", TokenKind::Typealias);
        map.insert("typeof", TokenKind::Typeof);
        map.insert("val", TokenKind::Val);
        map.insert("var", TokenKind::Var);
        map.insert("when", TokenKind::When);
        map.insert("while", TokenKind::While);
        map
    };

    pub static ref MODIFIER_KEYWORDS: HashSet<&'static str> = [
        "abstract", "actual", "annotation", "companion", "const", "crossinline",
        "data", "enum", "expect", "external", "final", "infix", "inline", "inner",
        "internal", "lateinit", "noinline", "open", "operator", "out", "override",
        "private", "protected", "public", "reified", "sealed", "suspend", "tailrec",
        "vararg",
    ]
    .into_iter()
    .collect();

    pub static ref SOFT_KEYWORDS: HashSet<&'static str> = [
        "by", "catch", "constructor", "delegate", "dynamic", "field", "file",
        "finally", "get", "import", "init", "param", "property", "receiver", "set",
        "setparam", "value", "where",
    ]
    .into_iter()
    .collect();

    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("=", TokenKind::Assignment);
        map.insert("+", TokenKind::Plus);
        map.insert("-", TokenKind::Dash);
        map.insert("*", TokenKind::Star);
        map.insert("/", TokenKind::Slash);
        map.insert("%", TokenKind::Percent);
        map.insert("===", TokenKind::EqualsStrict);
        map.insert("!==", TokenKind::NotEqualsStrict);
        map.insert("==", TokenKind::Equals);
        map.insert("!=", TokenKind::NotEquals);
        map.insert("<=", TokenKind::LessEquals);
        map.insert(">=", TokenKind::GreaterEquals);
        map.insert("<", TokenKind::Less);
        map.insert(">", TokenKind::Greater);
        map.insert("&&", TokenKind::And);
        map.insert("||", TokenKind::Or);
        map.insert("!", TokenKind::Not);
        map.insert("++", TokenKind::PlusPlus);
        map.insert("--", TokenKind::MinusMinus);
        map.insert("+=", TokenKind::PlusEquals);
        map.insert("-=", TokenKind::MinusEquals);
        map.insert("*=", TokenKind::StarEquals);
        map.insert("/=", TokenKind::SlashEquals);
        map.insert("->", TokenKind::Arrow);
        map.insert("..<", TokenKind::RangeUntil);
        map.insert("..", TokenKind::Range);
        map.insert("?.", TokenKind::SafeCall);
        map.insert("?:", TokenKind::Elvis);
        map.insert("!!", TokenKind::NotNull);
        map.insert("::", TokenKind::DoubleColon);
        map
    };

    pub static ref SYMBOL_LOOKUP: HashMap<char, TokenKind> = {
        let mut map = HashMap::new();
        map.insert('(', TokenKind::OpenParen);
        map.insert(')', TokenKind::CloseParen);
        map.insert('{', TokenKind::OpenCurly);
        map.insert('}', TokenKind::CloseCurly);
        map.insert('[', TokenKind::OpenBracket);
        map.insert(']', TokenKind::CloseBracket);
        map.insert(',', TokenKind::Comma);
        map.insert(';', TokenKind::Semicolon);
        map.insert(':', TokenKind::Colon);
        map.insert('.', TokenKind::Dot);
        map.insert('@', TokenKind::At);
        map.insert('?', TokenKind::Question);
        map
    };
}

/// Keyword-like sequences that must never be split into an operator and a word.
pub const COMPOSITE_KEYWORDS: [(&str, TokenKind); 3] = [
    ("as?", TokenKind::AsSafe),
    ("!in", TokenKind::NotIn),
    ("!is", TokenKind::NotIs),
];

/// Longest operator in [`OPERATOR_LOOKUP`], in characters.
pub const MAX_OPERATOR_LEN: usize = 3;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    QuotedIdentifier,

    // Keyword classes
    Modifier,
    SoftKeyword,

    // Literals
    IntLiteral,
    FloatLiteral,
    CharLiteral,

    // String interpolation
    StringStart,
    StringText,
    StringInterpId,
    StringInterpStart,
    StringInterpExpr,
    StringInterpEnd,
    StringEnd,

    // Symbols
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    At,
    Question,

    Assignment,      // =
    EqualsStrict,    // ===
    NotEqualsStrict, // !==
    Equals,          // ==
    NotEquals,       // !=
    Not,             // !

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Arrow,       // ->
    Range,       // ..
    RangeUntil,  // ..<
    SafeCall,    // ?.
    Elvis,       // ?:
    NotNull,     // !!
    DoubleColon, // ::

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,

    Plus,
    Dash,
    Star,
    Slash,
    Percent,

    // Hard keywords
    As,
    AsSafe,
    Break,
    Class,
    Continue,
    Do,
    Else,
    False,
    For,
    Fun,
    If,
    In,
    NotIn,
    Interface,
    Is,
    NotIs,
    Null,
    Object,
    Package,
    Return,
    Super,
    This,
    Throw,
    True,
    Try,
    Typealias,
    Typeof,
    Val,
    Var,
    When,
    While,
}

impl TokenKind {
    /// Stable upper-case name used when printing token streams.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::QuotedIdentifier => "QUOTED_IDENTIFIER",
            TokenKind::Modifier => "MOD_KEYWORD",
            TokenKind::SoftKeyword => "SOFT_KEYWORD",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::FloatLiteral => "FLOAT_LITERAL",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::StringStart => "STRING_START",
            TokenKind::StringText => "STRING_TEXT",
            TokenKind::StringInterpId => "STRING_INTERP_ID",
            TokenKind::StringInterpStart => "STRING_INTERP_START",
            TokenKind::StringInterpExpr => "STRING_INTERP_EXPR",
            TokenKind::StringInterpEnd => "STRING_INTERP_END",
            TokenKind::StringEnd => "STRING_END",
            TokenKind::OpenParen => "LPAREN",
            TokenKind::CloseParen => "RPAREN",
            TokenKind::OpenCurly => "LBRACE",
            TokenKind::CloseCurly => "RBRACE",
            TokenKind::OpenBracket => "LBRACKET",
            TokenKind::CloseBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Dot => "DOT",
            TokenKind::At => "AT",
            TokenKind::Question => "QUESTION",
            TokenKind::Assignment => "OP_ASSIGN",
            TokenKind::EqualsStrict => "OP_EQ_STRICT",
            TokenKind::NotEqualsStrict => "OP_NEQ_STRICT",
            TokenKind::Equals => "OP_EQ",
            TokenKind::NotEquals => "OP_NEQ",
            TokenKind::Not => "OP_NOT",
            TokenKind::Less => "OP_LT",
            TokenKind::LessEquals => "OP_LE",
            TokenKind::Greater => "OP_GT",
            TokenKind::GreaterEquals => "OP_GE",
            TokenKind::Or => "OP_OR",
            TokenKind::And => "OP_AND",
            TokenKind::Arrow => "OP_ARROW",
            TokenKind::Range => "OP_RANGE",
            TokenKind::RangeUntil => "OP_RANGE_UNTIL",
            TokenKind::SafeCall => "OP_SAFE_CALL",
            TokenKind::Elvis => "OP_ELVIS",
            TokenKind::NotNull => "OP_NOT_NULL",
            TokenKind::DoubleColon => "OP_REF",
            TokenKind::PlusPlus => "OP_INC",
            TokenKind::MinusMinus => "OP_DEC",
            TokenKind::PlusEquals => "OP_PLUS_ASSIGN",
            TokenKind::MinusEquals => "OP_MINUS_ASSIGN",
            TokenKind::StarEquals => "OP_MUL_ASSIGN",
            TokenKind::SlashEquals => "OP_DIV_ASSIGN",
            TokenKind::Plus => "OP_PLUS",
            TokenKind::Dash => "OP_MINUS",
            TokenKind::Star => "OP_MUL",
            TokenKind::Slash => "OP_DIV",
            TokenKind::Percent => "OP_MOD",
            TokenKind::As => "KW_AS",
            TokenKind::AsSafe => "KW_AS_SAFE",
            TokenKind::Break => "KW_BREAK",
            TokenKind::Class => "KW_CLASS",
            TokenKind::Continue => "KW_CONTINUE",
            TokenKind::Do => "KW_DO",
            TokenKind::Else => "KW_ELSE",
            TokenKind::False => "KW_FALSE",
            TokenKind::For => "KW_FOR",
            TokenKind::Fun => "KW_FUN",
            TokenKind::If => "KW_IF",
            TokenKind::In => "KW_IN",
            TokenKind::NotIn => "KW_NOT_IN",
            TokenKind::Interface => "KW_INTERFACE",
            TokenKind::Is => "KW_IS",
            TokenKind::NotIs => "KW_NOT_IS",
            TokenKind::Null => "KW_NULL",
            TokenKind::Object => "KW_OBJECT",
            TokenKind::Package => "KW_PACKAGE",
            TokenKind::Return => "KW_RETURN",
            TokenKind::Super => "KW_SUPER",
            TokenKind::This => "KW_THIS",
            TokenKind::Throw => "KW_THROW",
            TokenKind::True => "KW_TRUE",
            TokenKind::Try => "KW_TRY",
            TokenKind::Typealias => "KW_TYPEALIAS",
            TokenKind::Typeof => "KW_TYPEOF",
            TokenKind::Val => "KW_VAL",
            TokenKind::Var => "KW_VAR",
            TokenKind::When => "KW_WHEN",
            TokenKind::While => "KW_WHILE",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classifies a scanned word: hard keyword, modifier, soft keyword, else identifier.
pub fn classify_word(word: &str) -> TokenKind {
    if let Some(kind) = HARD_KEYWORD_LOOKUP.get(word) {
        *kind
    } else if MODIFIER_KEYWORDS.contains(word) {
        TokenKind::Modifier
    } else if SOFT_KEYWORDS.contains(word) {
        TokenKind::SoftKeyword
    } else {
        TokenKind::Identifier
    }
}

/// Decoded value of a literal token. The raw text stays in [`Token::value`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(u64),
    Float(f64),
    Char(char),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub column: usize,
    pub literal: Option<LiteralValue>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token({}, '{}', line = {}, column = {})",
            self.kind, self.value, self.line, self.column
        )
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn position(&self) -> crate::Position {
        crate::Position::new(self.line, self.column)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }
}
