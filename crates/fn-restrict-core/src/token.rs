//! Lexical token model shared by tokenizers and sniffs.
//!
//! A [`TokenStream`] is the flat, source-ordered sequence of tokens for one
//! file. Sniffs only ever read it; producing it is the job of a
//! [`Tokenizer`] implementation.

use serde::{Deserialize, Serialize};

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Bare identifier (`foo`, `Bar`, `create_function`).
    Identifier,
    /// The `eval` language construct.
    Eval,
    /// The `function` keyword.
    Function,
    /// `::`
    DoubleColon,
    /// `->`
    ObjectOperator,
    /// `?->`
    NullsafeObjectOperator,
    /// `\`
    NsSeparator,
    /// The `namespace` keyword.
    Namespace,
    /// Whitespace run, including newlines.
    Whitespace,
    /// Line or block comment.
    Comment,
    /// `/** ... */` documentation comment.
    DocComment,
    /// `$name`
    Variable,
    /// Single-quoted string or nowdoc.
    ConstantString,
    /// Double-quoted string or heredoc.
    DoubleQuotedString,
    /// `(`
    OpenParenthesis,
    /// `)`
    CloseParenthesis,
    /// Text outside of PHP tags.
    InlineHtml,
    /// `<?php` or `<?=`
    OpenTag,
    /// `?>`
    CloseTag,
    /// Any other token.
    Other,
}

impl TokenKind {
    /// Returns true for tokens that carry no code: whitespace and comments.
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment | Self::DocComment)
    }
}

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Raw source text of the token.
    pub content: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        content: impl Into<String>,
        line: usize,
        column: usize,
        offset: usize,
    ) -> Self {
        Self {
            kind,
            content: content.into(),
            line,
            column,
            offset,
        }
    }
}

/// Source-ordered tokens of one file with random access by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Wraps an already ordered token list.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Returns the token at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Number of tokens in the stream.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the stream holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates tokens in stream order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Finds the nearest significant token at or before `from`.
    ///
    /// Whitespace and comments are skipped. Returns `None` when the start of
    /// the stream is reached first, or when `from` is out of range.
    #[must_use]
    pub fn find_previous_significant(&self, from: usize) -> Option<usize> {
        if from >= self.tokens.len() {
            return None;
        }
        (0..=from).rev().find(|&i| !self.tokens[i].kind.is_empty())
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Errors produced while tokenizing a source file.
#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser produced no tree for the input.
    #[error("failed to tokenize {language} source")]
    Parse {
        /// Language identifier.
        language: &'static str,
    },
}

/// Extension point for turning source text into a [`TokenStream`].
///
/// Implement it to teach the analyzer a new language.
pub trait Tokenizer: Send + Sync {
    /// Language identifier (e.g., `"php"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this tokenizer handles (e.g., `&[".php", ".inc"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Splits `source` into source-ordered tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying lexer cannot process the input.
    fn tokenize(&self, source: &str) -> Result<TokenStream, TokenizeError>;
}
