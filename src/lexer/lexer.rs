use std::collections::VecDeque;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::{
    source::TokenSource,
    tokens::{Token, TokenKind, RESERVED_LOOKUP},
};

/// Longest string literal accepted, in characters.
pub const MAX_STRING_LENGTH: usize = 1024;

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: longer operators must come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern {
            regex: Regex::new("^[a-zA-Z][a-zA-Z0-9_]*").unwrap(),
            handler: symbol_handler,
        },
        RegexPattern {
            regex: Regex::new("^[0-9]+").unwrap(),
            handler: number_handler,
        },
        RegexPattern {
            regex: Regex::new("^\\s+").unwrap(),
            handler: skip_handler,
        },
        RegexPattern {
            regex: Regex::new("^--[^\\n]*").unwrap(),
            handler: skip_handler,
        },
        RegexPattern {
            regex: Regex::new("^\\(\\*").unwrap(),
            handler: block_comment_handler,
        },
        RegexPattern {
            regex: Regex::new("^\\*\\)").unwrap(),
            handler: unmatched_comment_handler,
        },
        RegexPattern {
            regex: Regex::new("^\"").unwrap(),
            handler: string_handler,
        },
        RegexPattern {
            regex: Regex::new("^<-").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, "<-"),
        },
        RegexPattern {
            regex: Regex::new("^<=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<="),
        },
        RegexPattern {
            regex: Regex::new("^=>").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::DArrow, "=>"),
        },
        RegexPattern {
            regex: Regex::new("^<").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<"),
        },
        RegexPattern {
            regex: Regex::new("^=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "="),
        },
        RegexPattern {
            regex: Regex::new("^\\{").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{"),
        },
        RegexPattern {
            regex: Regex::new("^\\}").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}"),
        },
        RegexPattern {
            regex: Regex::new("^\\(").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "("),
        },
        RegexPattern {
            regex: Regex::new("^\\)").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")"),
        },
        RegexPattern {
            regex: Regex::new("^;").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";"),
        },
        RegexPattern {
            regex: Regex::new("^:").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":"),
        },
        RegexPattern {
            regex: Regex::new("^,").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ","),
        },
        RegexPattern {
            regex: Regex::new("^\\.").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, "."),
        },
        RegexPattern {
            regex: Regex::new("^@").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::At, "@"),
        },
        RegexPattern {
            regex: Regex::new("^\\+").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
        },
        RegexPattern {
            regex: Regex::new("^-").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-"),
        },
        RegexPattern {
            regex: Regex::new("^\\*").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*"),
        },
        RegexPattern {
            regex: Regex::new("^/").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/"),
        },
        RegexPattern {
            regex: Regex::new("^~").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~"),
        },
    ];
}

/// Scans Cool source text on demand.
///
/// Lexical failures do not stop the scan: they are emitted as
/// [`TokenKind::Error`] tokens carrying the message, and scanning resumes
/// after the offending input.
pub struct Lexer {
    pending: VecDeque<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: String) -> Lexer {
        Lexer {
            pending: VecDeque::new(),
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn push(&mut self, token: Token) {
        self.pending.push_back(token);
    }

    pub fn push_error(&mut self, message: &str, position: Position) {
        self.push(MK_TOKEN!(TokenKind::Error, String::from(message), position));
    }

    /// Advances over `n` bytes, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        while self.pos < end {
            if self.bump().is_none() {
                break;
            }
        }
    }

    /// Consumes a single character.
    fn bump(&mut self) -> Option<char> {
        let ch = self.at()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Runs pattern handlers until at least one token is pending or the
    /// input is exhausted.
    fn scan(&mut self) {
        while self.pending.is_empty() && !self.at_eof() {
            let matched = PATTERNS
                .iter()
                .find(|pattern| pattern.regex.is_match(self.remainder()));

            match matched {
                Some(pattern) => (pattern.handler)(self, &pattern.regex),
                None => {
                    let position = self.position();
                    let ch = self.bump().unwrap_or_default();
                    self.push_error(&format!("Invalid character: {}", ch), position);
                }
            }
        }
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        self.scan();

        if let Some(token) = self.pending.pop_front() {
            return token;
        }

        MK_TOKEN!(TokenKind::EOF, String::from("<EOF>"), self.position())
    }
}

fn matched_len(lexer: &Lexer, regex: &Regex) -> usize {
    regex.find(lexer.remainder()).map_or(0, |m| m.end())
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = matched_len(lexer, regex);
    lexer.advance_n(len);
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let position = lexer.position();
    let len = matched_len(lexer, regex);
    let value = String::from(&lexer.remainder()[..len]);

    lexer.push(MK_TOKEN!(TokenKind::Integer, value, position));
    lexer.advance_n(len);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let position = lexer.position();
    let len = matched_len(lexer, regex);
    let value = String::from(&lexer.remainder()[..len]);
    let lowered = value.to_lowercase();

    let kind = if let Some(kind) = RESERVED_LOOKUP.get(lowered.as_str()) {
        *kind
    } else if (lowered == "true" || lowered == "false")
        && value.starts_with(|c: char| c.is_ascii_lowercase())
    {
        TokenKind::Bool
    } else if value.starts_with(|c: char| c.is_ascii_uppercase()) {
        TokenKind::Type
    } else {
        TokenKind::Identifier
    };

    lexer.push(MK_TOKEN!(kind, value, position));
    lexer.advance_n(len);
}

fn block_comment_handler(lexer: &mut Lexer, _regex: &Regex) {
    lexer.advance_n(2);
    let mut depth = 1;

    while depth > 0 {
        if lexer.remainder().starts_with("(*") {
            lexer.advance_n(2);
            depth += 1;
        } else if lexer.remainder().starts_with("*)") {
            lexer.advance_n(2);
            depth -= 1;
        } else if lexer.bump().is_none() {
            let position = lexer.position();
            lexer.push_error("EOF in comment", position);
            return;
        }
    }
}

fn unmatched_comment_handler(lexer: &mut Lexer, _regex: &Regex) {
    let position = lexer.position();
    lexer.push_error("Unmatched *)", position);
    lexer.advance_n(2);
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) {
    let position = lexer.position();
    lexer.advance_n(1);

    let mut result = String::new();
    let mut has_null = false;

    loop {
        let Some(ch) = lexer.bump() else {
            lexer.push_error("EOF in string constant", position);
            return;
        };

        match ch {
            '"' => break,
            '\n' => {
                lexer.push_error("Unterminated string constant", position);
                return;
            }
            '\0' => has_null = true,
            '\\' => {
                let Some(escaped) = lexer.bump() else {
                    lexer.push_error("EOF in string constant", position);
                    return;
                };

                match escaped {
                    'n' => result.push('\n'),
                    't' => result.push('\t'),
                    'b' => result.push('\u{8}'),
                    'f' => result.push('\u{c}'),
                    '\0' => has_null = true,
                    other => result.push(other),
                }
            }
            other => result.push(other),
        }
    }

    if has_null {
        lexer.push_error("String contains null character", position);
    } else if result.chars().count() > MAX_STRING_LENGTH {
        lexer.push_error("String constant too long", position);
    } else {
        lexer.push(MK_TOKEN!(TokenKind::String, result, position));
    }
}

/// Scans the whole source eagerly, up to and including the EOF token.
pub fn tokenize(source: String) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
