//! Markup token stream
//!
//! This module turns a fetched page body into a forward-only sequence of
//! markup tokens that the scanners in [`crate::scan`] consume.
//!
//! # Components
//!
//! - `Token`: one lexical unit (open tag, close tag, text, end of stream)
//! - `Tag` / `Attribute`: an open tag with its attributes in document order
//! - `TokenStream`: the owned cursor handed from scanner to scanner

mod tokenizer;

pub use tokenizer::tokenize;

use std::collections::VecDeque;

/// A single attribute on an open tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An open tag with its attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased tag name
    pub name: String,

    /// Attributes, in the order they appear in the markup
    pub attrs: Vec<Attribute>,

    /// Whether the tag was written as `<tag ... />`
    pub self_closing: bool,
}

impl Tag {
    pub fn new(name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attrs,
            self_closing: false,
        }
    }

    /// Returns the first attribute, if the tag has any
    pub fn first_attr(&self) -> Option<&Attribute> {
        self.attrs.first()
    }

    /// Returns the value of the first attribute keyed `key`
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// One unit of the markup stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name attr="value">`
    Open(Tag),

    /// `</name>`
    Close(String),

    /// A run of character data between tags
    Text(String),

    /// End of the document (also returned for every read past the end)
    End,
}

impl Token {
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Returns true if this is the close tag `</name>`
    pub fn is_close(&self, name: &str) -> bool {
        matches!(self, Self::Close(tag) if tag == name)
    }

    /// Returns the tag if this is an open tag named `name`
    pub fn as_open(&self, name: &str) -> Option<&Tag> {
        match self {
            Self::Open(tag) if tag.is(name) => Some(tag),
            _ => None,
        }
    }

    /// Returns the text payload of a text token
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Forward-only cursor over the tokens of one document
///
/// The stream is not `Clone`: handing it to another scanner moves it, so
/// exactly one owner advances it at a time. Once the underlying tokens are
/// exhausted every further read yields [`Token::End`].
#[derive(Debug, Default)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
    consumed: usize,
}

impl TokenStream {
    /// Builds a stream from already-produced tokens
    ///
    /// Any `End` tokens in the input are dropped; the stream supplies its
    /// own terminal `End` once the input is exhausted.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().filter(|t| !t.is_end()).collect(),
            consumed: 0,
        }
    }

    /// Tokenizes an HTML document
    pub fn from_html(html: &str) -> Self {
        Self::from_tokens(tokenize(html))
    }

    /// Consumes and returns the next token
    pub fn next_token(&mut self) -> Token {
        match self.tokens.pop_front() {
            Some(token) => {
                self.consumed += 1;
                token
            }
            None => Token::End,
        }
    }

    /// Number of tokens consumed so far (the terminal `End` is not counted)
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// Number of tokens left before the terminal `End`
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::End => None,
            token => Some(token),
        }
    }
}
