use std::{str::FromStr, sync::LazyLock};

use log::{debug, trace};
use regex::Regex;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ParseError;
use crate::group::{AtomGroup, Formula};

#[derive(EnumIter, Debug, Display, EnumString, PartialEq, Clone, Copy)]
pub enum TokenType {
    Element,
    Number,
    LParen,
    RParen,
    Whitespace,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenType,
    value: String,
    pos: usize,
}

impl Token {
    fn new(kind: TokenType, value: &str, pos: usize) -> Self {
        Token {
            kind,
            value: value.to_string(),
            pos,
        }
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn end(&self) -> usize {
        self.pos + self.value.len()
    }
}

impl TokenType {
    const fn regex(&self) -> &'static str {
        match self {
            TokenType::Element => r"[A-Z][a-z]?",
            TokenType::Number => r"\d+",
            TokenType::LParen => r"\(",
            TokenType::RParen => r"\)",
            TokenType::Whitespace => r"\s+",
            TokenType::Mismatch => r".",
        }
    }
}

// ----- Tokenization -----

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let regex_str = TokenType::iter()
        .map(|t| format!("(?P<{}>{})", t, t.regex()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&regex_str).unwrap()
});

// An optional single digit followed by a sign; the last match is the charge.
static CHARGE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d?[+-]").unwrap());

static ELEMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TokenType::Element.regex()).unwrap());

pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();

    for caps in TOKEN_REGEX.captures_iter(text) {
        let (kind, mat) = TokenType::iter()
            .find_map(|token_type| {
                let name = token_type.to_string();
                caps.name(&name)
                    .and_then(|mat| TokenType::from_str(&name).ok().map(|kind| (kind, mat)))
            })
            .ok_or(ParseError::EmptyInput)?;

        match kind {
            TokenType::Whitespace => {}
            TokenType::Mismatch => {
                let ch = mat.as_str().chars().next().unwrap_or_default();
                return Err(ParseError::UnexpectedChar {
                    pos: mat.start(),
                    ch,
                });
            }
            _ => tokens.push(Token::new(kind, mat.as_str(), mat.start())),
        }
    }
    trace!("tokenized {:?} into {} tokens", text, tokens.len());
    Ok(tokens)
}

/// Element-symbol-shaped substrings of `text`, in order.
pub fn element_symbols(text: &str) -> impl Iterator<Item = &str> {
    ELEMENT_REGEX.find_iter(text).map(|m| m.as_str())
}

/// Reads a charge annotation: `+`, `-`, or one digit followed by a sign.
pub fn parse_charge(value: &str) -> Result<i32, ParseError> {
    match value {
        "+" => Ok(1),
        "-" => Ok(-1),
        _ if value.ends_with('+') || value.ends_with('-') => {
            let (num_str, sign) = value.split_at(value.len() - 1);
            let magnitude = num_str
                .parse::<i32>()
                .map_err(|_| ParseError::InvalidCharge(value.to_string()))?;
            Ok(if sign == "+" { magnitude } else { -magnitude })
        }
        _ => Err(ParseError::InvalidCharge(value.to_string())),
    }
}

/// Splits the overall charge off `text`.
///
/// The charge span is blanked out rather than removed, so byte positions in
/// later parse errors still point into the original text.
pub fn split_charge(text: &str) -> Result<(String, i32), ParseError> {
    match CHARGE_REGEX.find_iter(text).last() {
        Some(m) => {
            let charge = parse_charge(m.as_str())?;
            let rest = format!(
                "{}{}{}",
                &text[..m.start()],
                " ".repeat(m.len()),
                &text[m.end()..]
            );
            Ok((rest, charge))
        }
        None => Ok((text.to_string(), 0)),
    }
}

// ----- Parsing -----

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Parser {
            source,
            tokens,
            position: 0,
        }
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// formula -> sequence, with nothing left over
    fn parse_formula(&mut self) -> Result<Vec<AtomGroup>, ParseError> {
        let groups = self.parse_sequence()?;

        if let Some(token) = self.current_token() {
            return Err(match token.kind {
                TokenType::RParen => ParseError::UnmatchedParen { pos: token.pos },
                _ => ParseError::UnexpectedChar {
                    pos: token.pos,
                    ch: token.value.chars().next().unwrap_or_default(),
                },
            });
        }
        if groups.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        Ok(groups)
    }

    /// sequence -> (element_unit | group_unit)*
    fn parse_sequence(&mut self) -> Result<Vec<AtomGroup>, ParseError> {
        let mut groups = Vec::new();

        while let Some(token) = self.current_token() {
            match token.kind {
                TokenType::Element => groups.push(self.parse_element_unit()?),
                TokenType::LParen => groups.push(self.parse_group_unit()?),
                TokenType::Number => {
                    return Err(ParseError::DanglingCount {
                        pos: token.pos,
                        text: token.value.clone(),
                    });
                }
                _ => break,
            }
        }

        Ok(groups)
    }

    /// element_unit -> ELEMENT \[NUMBER\]
    fn parse_element_unit(&mut self) -> Result<AtomGroup, ParseError> {
        let symbol = match self.current_token() {
            Some(token) if token.kind == TokenType::Element => token.value.clone(),
            _ => return Err(ParseError::EmptyInput),
        };
        self.advance(); // Consume ELEMENT

        let count = self.parse_count()?;
        Ok(AtomGroup::leaf(symbol, count))
    }

    /// group_unit -> LPAREN sequence RPAREN \[NUMBER\]
    fn parse_group_unit(&mut self) -> Result<AtomGroup, ParseError> {
        let open = self
            .current_token()
            .cloned()
            .ok_or(ParseError::EmptyInput)?;
        self.advance(); // Consume LPAREN

        let children = self.parse_sequence()?;

        let close = match self.current_token() {
            Some(token) if token.kind == TokenType::RParen => token.pos,
            _ => return Err(ParseError::UnclosedParen { pos: open.pos }),
        };
        if children.is_empty() {
            return Err(ParseError::EmptyGroup { pos: open.pos });
        }
        self.advance(); // Consume RPAREN

        let label: String = self.source[open.end()..close]
            .split_whitespace()
            .collect();
        let count = self.parse_count()?;
        Ok(AtomGroup::composite(label, children, count))
    }

    /// \[NUMBER\] directly after the group, defaulting to 1
    fn parse_count(&mut self) -> Result<u32, ParseError> {
        let Some(token) = self
            .current_token()
            .filter(|token| token.kind == TokenType::Number)
        else {
            return Ok(1);
        };

        let group_end = self
            .position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(Token::end);
        if group_end != Some(token.pos) {
            return Err(ParseError::DanglingCount {
                pos: token.pos,
                text: token.value.clone(),
            });
        }

        let invalid = || ParseError::InvalidCount {
            pos: token.pos,
            text: token.value.clone(),
        };
        let count: u32 = token.value.parse().map_err(|_| invalid())?;
        if count == 0 {
            return Err(invalid());
        }
        self.advance(); // Consume NUMBER
        Ok(count)
    }
}

/// Parses text that carries no charge annotation into a group sequence.
pub fn parse_groups(text: &str) -> Result<Vec<AtomGroup>, ParseError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser::new(text, tokens);
    parser.parse_formula()
}

/// Parses formula text, including its trailing charge, into a [`Formula`].
///
/// # Examples
/// ```
/// let formula = oxi_numbers::parser::parse("SO4 2-").unwrap();
/// assert_eq!(formula.charge, -2);
/// assert_eq!(formula.groups.len(), 2);
/// assert_eq!(formula.groups[1].symbol(), "O");
/// assert_eq!(formula.groups[1].count(), 4);
/// ```
pub fn parse(text: &str) -> Result<Formula, ParseError> {
    let (rest, charge) = split_charge(text)?;
    let groups = parse_groups(&rest)?;
    debug!(
        "parsed {:?}: {} top-level groups, charge {}",
        text,
        groups.len(),
        charge
    );
    Ok(Formula::new(groups, charge))
}
