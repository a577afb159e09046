use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    /// Keywords are matched case-insensitively, so the table is keyed by the
    /// lowercase spelling. `true` and `false` are handled separately since
    /// their first letter must be lowercase.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("class", TokenKind::Class);
        map.insert("inherits", TokenKind::Inherits);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("fi", TokenKind::Fi);
        map.insert("while", TokenKind::While);
        map.insert("loop", TokenKind::Loop);
        map.insert("pool", TokenKind::Pool);
        map.insert("let", TokenKind::Let);
        map.insert("in", TokenKind::In);
        map.insert("case", TokenKind::Case);
        map.insert("of", TokenKind::Of);
        map.insert("esac", TokenKind::Esac);
        map.insert("new", TokenKind::New);
        map.insert("isvoid", TokenKind::IsVoid);
        map.insert("not", TokenKind::Not);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    /// A lexical failure; the token value holds the message.
    Error,

    Integer,
    String,
    Bool,
    Type,
    Identifier,

    Semicolon,
    Colon,
    Comma,
    Dot,
    At,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assign,   // <-
    DArrow,   // =>
    Plus,
    Dash,
    Star,
    Slash,
    Tilde,
    Less,
    LessEquals,
    Equals,

    // Reserved
    Class,
    Inherits,
    If,
    Then,
    Else,
    Fi,
    While,
    Loop,
    Pool,
    Let,
    In,
    Case,
    Of,
    Esac,
    New,
    IsVoid,
    Not,
}

impl TokenKind {
    /// How the kind is named when listed as an expected alternative.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "<EOF>",
            TokenKind::Error => "ERROR",
            TokenKind::Integer => "INT",
            TokenKind::String => "STRING",
            TokenKind::Bool => "BOOL",
            TokenKind::Type => "TYPE",
            TokenKind::Identifier => "ID",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::At => "'@'",
            TokenKind::OpenCurly => "'{'",
            TokenKind::CloseCurly => "'}'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Assign => "'<-'",
            TokenKind::DArrow => "'=>'",
            TokenKind::Plus => "'+'",
            TokenKind::Dash => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Tilde => "'~'",
            TokenKind::Less => "'<'",
            TokenKind::LessEquals => "'<='",
            TokenKind::Equals => "'='",
            TokenKind::Class => "'class'",
            TokenKind::Inherits => "'inherits'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::Fi => "'fi'",
            TokenKind::While => "'while'",
            TokenKind::Loop => "'loop'",
            TokenKind::Pool => "'pool'",
            TokenKind::Let => "'let'",
            TokenKind::In => "'in'",
            TokenKind::Case => "'case'",
            TokenKind::Of => "'of'",
            TokenKind::Esac => "'esac'",
            TokenKind::New => "'new'",
            TokenKind::IsVoid => "'isvoid'",
            TokenKind::Not => "'not'",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.value, self.kind)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// The token as it appears in a syntax error message.
    pub fn quoted(&self) -> String {
        match self.kind {
            TokenKind::EOF => String::from("<EOF>"),
            _ => format!("'{}'", self.value),
        }
    }
}
