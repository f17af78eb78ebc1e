//! Reads the prefix syntax of expression trees.
//!
//! ```text
//! expr := integer | true | false | "string" | vN | token
//!       | ( token expr* )
//!       | [ expr* ]
//! ```
//!
//! An operation token in argument position is read as a function value. The element type of a
//! list literal is the type of its first element; an empty list literal takes the list type that
//! its position in an application requires.

pub mod error;
mod ty;

pub use ty::read_type;

use error::{
    ExpectedEof,
    ExpectedLiteral,
    GenericFunctionValue,
    InvalidInteger,
    UnexpectedEof,
    UnexpectedToken,
    UnknownOperation,
    UnknownVariable,
    UntypedEmptyList,
};
use levenshtein::levenshtein;
use std::ops::Range;
use tgp_core::{
    error::{ArgumentTypeMismatch, TypeMismatch},
    node::Node,
    ops::{self, Op},
    types::{Bindings, Type},
    value::Value,
};
use tgp_error::{Error, ErrorKind};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};

/// The tokens that can start an expression.
const EXPR_START: &[TokenKind] = &[
    TokenKind::Int,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Str,
    TokenKind::Variable,
    TokenKind::Name,
    TokenKind::OpenParen,
    TokenKind::OpenBracket,
];

/// An expression that has been read, with the region of source code it was read from.
struct Read {
    item: Item,
    span: Range<usize>,
}

enum Item {
    Node(Node),

    /// An empty list literal, whose type depends on where it is used.
    EmptyList,
}

/// Reads a tree from the given source code. Variable `vN` has type `variables[N]`.
pub fn read(source: &str, variables: &[Type]) -> Result<Node, Error> {
    Reader::new(source, variables).read()
}

/// A reader for a single expression.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The tokens that this reader is currently reading.
    tokens: Box<[Token<'a>]>,

    /// The index of the **next** token to be read.
    cursor: usize,

    /// The types of the variables that may appear in the source code.
    variables: &'a [Type],
}

impl<'a> Reader<'a> {
    /// Create a new reader for the given source.
    pub fn new(source: &'a str, variables: &'a [Type]) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            variables,
        }
    }

    /// Reads the whole source code as a single expression.
    pub fn read(&mut self) -> Result<Node, Error> {
        let read = self.expr()?;
        if let Some(token) = self.peek_token() {
            let span = token.span.start..self.eof_span().end;
            return Err(Error::new(vec![span], ExpectedEof));
        }
        resolve(read, None)
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next token that is not whitespace, without moving the cursor.
    fn peek_token(&self) -> Option<&Token<'a>> {
        self.tokens[self.cursor..].iter().find(|token| !token.is_whitespace())
    }

    /// Returns the next token to be read, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    fn next_token(&mut self) -> Result<Token<'a>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(UnexpectedEof))
    }

    /// Reads expressions until the given closing token, and consumes it. Returns the expressions
    /// and the end of the closing token.
    fn until(&mut self, close: TokenKind) -> Result<(Vec<Read>, usize), Error> {
        let mut reads = Vec::new();
        // running out of tokens is reported by `expr`
        while self.peek_token().map_or(true, |token| token.kind != close) {
            reads.push(self.expr()?);
        }
        let token = self.next_token()?;
        Ok((reads, token.span.end))
    }

    fn expr(&mut self) -> Result<Read, Error> {
        let token = self.next_token()?;
        let node = match token.kind {
            TokenKind::Int => token.lexeme
                .parse::<i64>()
                .map(Node::integer)
                .map_err(|_| Error::new(vec![token.span.clone()], InvalidInteger))?,
            TokenKind::True => Node::boolean(true),
            TokenKind::False => Node::boolean(false),
            TokenKind::Str => Node::constant(unescape(token.lexeme).as_str(), Type::String),
            TokenKind::Variable => self.variable(&token)?,
            TokenKind::Name => function_value(&token)?,
            TokenKind::OpenParen => return self.application(token.span.start),
            TokenKind::OpenBracket => return self.list(token.span.start),
            found => return Err(Error::new(vec![token.span], UnexpectedToken {
                expected: EXPR_START,
                found,
            })),
        };

        Ok(Read { item: Item::Node(node), span: token.span })
    }

    fn variable(&self, token: &Token) -> Result<Node, Error> {
        token.lexeme[1..]
            .parse::<usize>()
            .ok()
            .and_then(|id| Some(Node::variable(id, self.variables.get(id)?.clone())))
            .ok_or_else(|| Error::new(vec![token.span.clone()], UnknownVariable {
                name: token.lexeme.to_string(),
                count: self.variables.len(),
            }))
    }

    /// Reads an application, after its opening parenthesis.
    fn application(&mut self, start: usize) -> Result<Read, Error> {
        let token = self.next_token()?;
        if token.kind != TokenKind::Name {
            return Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Name],
                found: token.kind,
            }));
        }
        let op = operation(&token)?;

        let (reads, end) = self.until(TokenKind::CloseParen)?;
        let span = start..end;
        let arg_spans = reads.iter().map(|read| read.span.clone()).collect::<Vec<_>>();
        let args = resolve_args(op, reads)?;

        let node = Node::function(op, args).map_err(|err| {
            // point at the offending argument as well as the whole application
            let spans = match err.downcast_ref::<ArgumentTypeMismatch>() {
                Some(mismatch) => vec![span.clone(), arg_spans[mismatch.index].clone()],
                None => vec![span.clone()],
            };
            err.with_spans(spans)
        })?;
        Ok(Read { item: Item::Node(node), span })
    }

    /// Reads a list literal, after its opening bracket.
    fn list(&mut self, start: usize) -> Result<Read, Error> {
        let (reads, end) = self.until(TokenKind::CloseBracket)?;
        let span = start..end;

        let mut reads = reads.into_iter();
        let Some(first) = reads.next() else {
            return Ok(Read { item: Item::EmptyList, span });
        };

        let first_span = first.span.clone();
        let first = resolve(first, None)?;
        let element_ty = first.ty().clone();
        let mut values = vec![literal(first, first_span)?];

        for read in reads {
            let element_span = read.span.clone();
            let element = resolve(read, Some(&element_ty))?;
            if element.ty() != &element_ty {
                return Err(Error::new(vec![element_span], TypeMismatch {
                    expected: element_ty,
                    found: element.ty().clone(),
                }));
            }
            values.push(literal(element, element_span)?);
        }

        let node = Node::constant(Value::list(values), Type::list(element_ty));
        Ok(Read { item: Item::Node(node), span })
    }
}

/// Resolves the operation with the given token.
fn operation(token: &Token) -> Result<Op, Error> {
    ops::get(token.lexeme).ok_or_else(|| {
        let mut suggestions = ops::all()
            .into_keys()
            .filter(|name| levenshtein(name, token.lexeme) < 2)
            .map(str::to_string)
            .collect::<Vec<_>>();
        suggestions.sort();

        Error::new(vec![token.span.clone()], UnknownOperation {
            name: token.lexeme.to_string(),
            suggestions,
        })
    })
}

/// Returns the contents of a string literal, removing its quotes and escapes.
fn unescape(lexeme: &str) -> String {
    let mut contents = String::new();
    let mut chars = lexeme[1..lexeme.len() - 1].chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => contents.extend(chars.next()),
            c => contents.push(c),
        }
    }
    contents
}

/// Reads an operation token in argument position as a function value.
fn function_value(token: &Token) -> Result<Node, Error> {
    let op = operation(token)?;
    if op.signature().is_generic() {
        return Err(Error::new(vec![token.span.clone()], GenericFunctionValue { token: op.token() }));
    }
    Ok(Node::operation(op))
}

/// Extracts the value of a list element.
fn literal(node: Node, span: Range<usize>) -> Result<Value, Error> {
    node.as_constant()
        .cloned()
        .ok_or_else(|| Error::new(vec![span], ExpectedLiteral))
}

/// Resolves the arguments of an application, typing empty list literals from the operation's
/// signature and the other arguments.
fn resolve_args(op: Op, reads: Vec<Read>) -> Result<Vec<Node>, Error> {
    let signature = op.signature();
    let mut bindings = Bindings::new();
    for (pattern, read) in signature.args.iter().zip(&reads) {
        if let Item::Node(node) = &read.item {
            // mismatches are reported when the application is built
            pattern.unify(node.ty(), &mut bindings);
        }
    }

    reads.into_iter()
        .enumerate()
        .map(|(i, read)| {
            let expected = signature.args.get(i).map(|pattern| pattern.substitute(&bindings));
            resolve(read, expected.as_ref())
        })
        .collect()
}

/// Converts a read expression into a node, giving an empty list literal the expected type.
fn resolve(read: Read, expected: Option<&Type>) -> Result<Node, Error> {
    match (read.item, expected) {
        (Item::Node(node), _) => Ok(node),
        (Item::EmptyList, Some(ty)) if matches!(ty, Type::List(_)) && !ty.is_generic() => {
            Ok(Node::constant(Value::list(std::iter::empty()), ty.clone()))
        },
        (Item::EmptyList, _) => Err(Error::new(vec![read.span], UntypedEmptyList)),
    }
}
