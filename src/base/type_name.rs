//! Type references.
//!
//! A [`TypeName`] is the structural form of a type as the declaration
//! front-end reports it: a qualified name, optional type arguments and array
//! dimensions. Names are parsed with a small logos lexer so that
//! `java.util.Map<String, List<? extends Number>>[]` round-trips through
//! [`TypeName::parse`] and [`Display`](std::fmt::Display).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use logos::Logos;
use thiserror::Error;

use super::annotation::{names_match, simple_name_of};
use super::constants::{NULL_LITERAL, PRIMITIVE_TYPES, VOID_TYPE};

/// A parsed type reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    name: Arc<str>,
    args: Vec<TypeArg>,
    array_dims: u8,
}

/// A single type argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeArg {
    Type(TypeName),
    /// `?`
    Wildcard,
    /// `? extends T`
    Extends(TypeName),
    /// `? super T`
    Super(TypeName),
}

impl TypeName {
    /// A raw (non-generic, non-array) type.
    ///
    /// The name is taken as is; use [`TypeName::parse`] for anything that
    /// may carry arguments or dimensions.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            array_dims: 0,
        }
    }

    pub fn parse(input: &str) -> Result<Self, TypeParseError> {
        Parser::new(input)?.parse_complete()
    }

    pub fn with_args(mut self, args: Vec<TypeArg>) -> Self {
        self.args = args;
        self
    }

    /// One more array dimension.
    pub fn array_of(mut self) -> Self {
        self.array_dims = self.array_dims.saturating_add(1);
        self
    }

    /// Qualified name without arguments or dimensions.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    /// Dotted prefix of the qualified name, empty for the default package.
    pub fn package(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[..idx],
            None => "",
        }
    }

    pub fn args(&self) -> &[TypeArg] {
        &self.args
    }

    pub fn array_dims(&self) -> u8 {
        self.array_dims
    }

    pub fn is_array(&self) -> bool {
        self.array_dims > 0
    }

    /// The element type of an array, one dimension removed.
    pub fn component_type(&self) -> Option<TypeName> {
        self.is_array().then(|| Self {
            name: self.name.clone(),
            args: self.args.clone(),
            array_dims: self.array_dims - 1,
        })
    }

    /// The type with its arguments removed (dimensions are kept).
    pub fn erasure(&self) -> TypeName {
        Self {
            name: self.name.clone(),
            args: Vec::new(),
            array_dims: self.array_dims,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.array_dims == 0 && self.args.is_empty() && PRIMITIVE_TYPES.contains(&&*self.name)
    }

    pub fn is_void(&self) -> bool {
        self.array_dims == 0 && &*self.name == VOID_TYPE
    }

    /// Whether the erased name matches `wanted` (qualified, or simple when
    /// `wanted` has no package).
    pub fn is_named(&self, wanted: &str) -> bool {
        self.array_dims == 0 && names_match(&self.name, wanted)
    }

    /// Literal a field of this type holds before anything is assigned.
    pub fn zero_value(&self) -> &'static str {
        if !self.is_primitive() {
            return NULL_LITERAL;
        }
        match &*self.name {
            "boolean" => "false",
            "float" | "double" => "0.0",
            _ => "0",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.array_dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArg::Type(ty) => write!(f, "{ty}"),
            TypeArg::Wildcard => f.write_str("?"),
            TypeArg::Extends(ty) => write!(f, "? extends {ty}"),
            TypeArg::Super(ty) => write!(f, "? super {ty}"),
        }
    }
}

impl FromStr for TypeName {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// LEXER
// ============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum TypeToken {
    #[token("extends")]
    Extends,

    #[token("super")]
    Super,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[token(".")]
    Dot,

    #[token("...")]
    Ellipsis,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token(",")]
    Comma,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("?")]
    Question,
}

/// Errors from [`TypeName::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("empty type name")]
    Empty,

    #[error("unexpected character at offset {offset} in `{input}`")]
    UnexpectedCharacter { input: String, offset: usize },

    #[error("expected {expected} at offset {offset} in `{input}`")]
    Expected {
        expected: &'static str,
        input: String,
        offset: usize,
    },

    #[error("unexpected trailing input at offset {offset} in `{input}`")]
    Trailing { input: String, offset: usize },
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<(TypeToken, &'a str, usize)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, TypeParseError> {
        let mut lexer = TypeToken::lexer(input);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next() {
            let offset = lexer.span().start;
            match token {
                Ok(kind) => tokens.push((kind, lexer.slice(), offset)),
                Err(()) => {
                    return Err(TypeParseError::UnexpectedCharacter {
                        input: input.to_string(),
                        offset,
                    });
                }
            }
        }
        if tokens.is_empty() {
            return Err(TypeParseError::Empty);
        }
        Ok(Self {
            input,
            tokens,
            pos: 0,
        })
    }

    fn parse_complete(mut self) -> Result<TypeName, TypeParseError> {
        let ty = self.parse_type()?;
        if self.pos < self.tokens.len() {
            return Err(TypeParseError::Trailing {
                input: self.input.to_string(),
                offset: self.offset(),
            });
        }
        Ok(ty)
    }

    fn parse_type(&mut self) -> Result<TypeName, TypeParseError> {
        let name = self.parse_qualified()?;
        let args = if self.eat(TypeToken::Lt) {
            self.parse_args()?
        } else {
            Vec::new()
        };

        let mut ty = TypeName::new(name).with_args(args);
        loop {
            if self.eat(TypeToken::LBracket) {
                self.expect(TypeToken::RBracket, "`]`")?;
                ty = ty.array_of();
            } else if self.eat(TypeToken::Ellipsis) {
                // Varargs are arrays; the flag lives on the method.
                ty = ty.array_of();
                break;
            } else {
                break;
            }
        }
        Ok(ty)
    }

    fn parse_qualified(&mut self) -> Result<String, TypeParseError> {
        let mut name = self.expect(TypeToken::Ident, "a type name")?.to_string();
        while self.peek() == Some(TypeToken::Dot) && self.peek_at(1) == Some(TypeToken::Ident) {
            self.pos += 1;
            name.push('.');
            name.push_str(self.expect(TypeToken::Ident, "a name segment")?);
        }
        Ok(name)
    }

    fn parse_args(&mut self) -> Result<Vec<TypeArg>, TypeParseError> {
        let mut args = Vec::new();
        loop {
            args.push(self.parse_arg()?);
            if self.eat(TypeToken::Comma) {
                continue;
            }
            self.expect(TypeToken::Gt, "`,` or `>`")?;
            return Ok(args);
        }
    }

    fn parse_arg(&mut self) -> Result<TypeArg, TypeParseError> {
        if !self.eat(TypeToken::Question) {
            return Ok(TypeArg::Type(self.parse_type()?));
        }
        if self.eat(TypeToken::Extends) {
            Ok(TypeArg::Extends(self.parse_type()?))
        } else if self.eat(TypeToken::Super) {
            Ok(TypeArg::Super(self.parse_type()?))
        } else {
            Ok(TypeArg::Wildcard)
        }
    }

    fn peek(&self) -> Option<TypeToken> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<TypeToken> {
        self.tokens.get(self.pos + n).map(|(kind, _, _)| *kind)
    }

    fn eat(&mut self, kind: TypeToken) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TypeToken, expected: &'static str) -> Result<&'a str, TypeParseError> {
        match self.tokens.get(self.pos) {
            Some(&(found, text, _)) if found == kind => {
                self.pos += 1;
                Ok(text)
            }
            _ => Err(TypeParseError::Expected {
                expected,
                input: self.input.to_string(),
                offset: self.offset(),
            }),
        }
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, _, offset)| *offset)
            .unwrap_or(self.input.len())
    }
}
