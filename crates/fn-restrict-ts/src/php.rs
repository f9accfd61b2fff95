//! PHP tokenizer using Tree-sitter.

use fn_restrict_core::{Token, TokenKind, TokenStream, TokenizeError, Tokenizer};
use tree_sitter::{Language, Node, Parser, Point};

const LANGUAGE_ID: &str = "php";

/// Nodes emitted as a single token without descending into their children.
const OPAQUE_KINDS: &[&str] = &[
    "string",
    "encapsed_string",
    "heredoc",
    "nowdoc",
    "variable_name",
    "comment",
    "text",
];

/// Splits PHP source into a flat, source-ordered [`TokenStream`].
///
/// Leaves of the syntax tree become tokens; strings, variables, comments and
/// inline HTML stay whole. Gaps between leaves become whitespace tokens, so
/// the token contents concatenate back to the original source.
pub struct PhpTokenizer {
    language: Language,
}

impl PhpTokenizer {
    /// Creates a new PHP tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_php::LANGUAGE_PHP.into(),
        }
    }

    fn classify(node: &Node<'_>, text: &str) -> TokenKind {
        match node.kind() {
            "name" if text.eq_ignore_ascii_case("eval") && Self::is_call_target(node) => {
                TokenKind::Eval
            }
            "name" => TokenKind::Identifier,
            "function" => TokenKind::Function,
            "::" => TokenKind::DoubleColon,
            "->" => TokenKind::ObjectOperator,
            "?->" => TokenKind::NullsafeObjectOperator,
            "\\" => TokenKind::NsSeparator,
            "namespace" => TokenKind::Namespace,
            "comment" if text.starts_with("/**") => TokenKind::DocComment,
            "comment" => TokenKind::Comment,
            "variable_name" => TokenKind::Variable,
            "string" | "nowdoc" => TokenKind::ConstantString,
            "encapsed_string" | "heredoc" => TokenKind::DoubleQuotedString,
            "(" => TokenKind::OpenParenthesis,
            ")" => TokenKind::CloseParenthesis,
            "text" => TokenKind::InlineHtml,
            "php_tag" => TokenKind::OpenTag,
            "?>" => TokenKind::CloseTag,
            _ => TokenKind::Other,
        }
    }

    fn is_call_target(node: &Node<'_>) -> bool {
        node.parent()
            .is_some_and(|p| p.kind() == "function_call_expression")
    }
}

impl Default for PhpTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates tokens while tracking the end of the last one.
struct Emitter<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    last_end: usize,
    last_point: Point,
}

impl<'s> Emitter<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            last_end: 0,
            last_point: Point::new(0, 0),
        }
    }

    fn leaf(&mut self, node: &Node<'_>) {
        let (start, end) = (node.start_byte(), node.end_byte());
        if start == end || start < self.last_end {
            return;
        }
        self.gap(start);

        let text = self.source.get(start..end).unwrap_or_default();
        let kind = PhpTokenizer::classify(node, text);
        let Point { row, column } = node.start_position();
        let token = Token::new(kind, text, row + 1, column + 1, start);
        self.tokens.push(token);
        self.last_end = end;
        self.last_point = node.end_position();
    }

    /// Emits the untokenized text between the last token and `until`.
    fn gap(&mut self, until: usize) {
        if until <= self.last_end {
            return;
        }
        let text = self.source.get(self.last_end..until).unwrap_or_default();
        let kind = if text.trim().is_empty() {
            TokenKind::Whitespace
        } else {
            TokenKind::Other
        };
        self.tokens.push(Token::new(
            kind,
            text,
            self.last_point.row + 1,
            self.last_point.column + 1,
            self.last_end,
        ));
        self.last_end = until;
    }

    fn finish(mut self) -> TokenStream {
        self.gap(self.source.len());
        self.tokens.into()
    }
}

impl Tokenizer for PhpTokenizer {
    fn language_id(&self) -> &'static str {
        LANGUAGE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".php", ".inc"]
    }

    fn tokenize(&self, source: &str) -> Result<TokenStream, TokenizeError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| TokenizeError::Language {
                language: LANGUAGE_ID,
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or(TokenizeError::Parse {
                language: LANGUAGE_ID,
            })?;

        let mut emitter = Emitter::new(source);
        let mut cursor = tree.walk();

        'walk: loop {
            let node = cursor.node();
            let opaque = OPAQUE_KINDS.contains(&node.kind());
            if !opaque && cursor.goto_first_child() {
                continue;
            }
            emitter.leaf(&node);

            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        Ok(emitter.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(src: &str) -> TokenStream {
        PhpTokenizer::new().tokenize(src).unwrap()
    }

    fn significant(src: &str) -> Vec<(TokenKind, String)> {
        tokenize(src)
            .iter()
            .filter(|t| !t.kind.is_empty())
            .map(|t| (t.kind, t.content.clone()))
            .collect()
    }

    fn kinds(tokens: &TokenStream) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn kinds_of(src: &str, text: &str) -> Vec<TokenKind> {
        tokenize(src)
            .iter()
            .filter(|t| t.content == text)
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn contents_reassemble_source() {
        let src = "<p>hi</p>\n<?php\n// c\nfunction foo( $a ) {\n    return \"x{$a}\";\n}\n";
        let joined: String = tokenize(src).iter().map(|t| t.content.as_str()).collect();
        assert_eq!(joined, src);
    }

    #[test]
    fn eval_call_is_eval_token() {
        assert_eq!(kinds_of("<?php eval($x);", "eval"), vec![TokenKind::Eval]);
    }

    #[test]
    fn function_definition() {
        let tokens = significant("<?php function foo() {}");
        let pos = tokens
            .iter()
            .position(|(k, _)| *k == TokenKind::Function)
            .unwrap();
        assert_eq!(tokens[pos + 1], (TokenKind::Identifier, "foo".to_string()));
    }

    #[test]
    fn member_and_static_operators() {
        assert_eq!(
            kinds_of("<?php $obj->foo();", "->"),
            vec![TokenKind::ObjectOperator]
        );
        assert_eq!(
            kinds_of("<?php $obj?->foo();", "?->"),
            vec![TokenKind::NullsafeObjectOperator]
        );
        assert_eq!(
            kinds_of("<?php Foo::bar();", "::"),
            vec![TokenKind::DoubleColon]
        );
    }

    #[test]
    fn qualified_name_splits_on_separator() {
        let tokens = significant("<?php Foo\\bar();");
        let pos = tokens
            .iter()
            .position(|(_, t)| t == "Foo")
            .unwrap();
        assert_eq!(tokens[pos].0, TokenKind::Identifier);
        assert_eq!(tokens[pos + 1].0, TokenKind::NsSeparator);
        assert_eq!(tokens[pos + 2], (TokenKind::Identifier, "bar".to_string()));
    }

    #[test]
    fn strings_and_variables_are_opaque() {
        let seen = kinds(&tokenize("<?php $eval = 'eval'; $b = \"eval $eval\";"));
        assert!(!seen.contains(&TokenKind::Eval));
        assert!(!seen.contains(&TokenKind::Identifier));
        assert!(seen.contains(&TokenKind::ConstantString));
        assert!(seen.contains(&TokenKind::DoubleQuotedString));
        assert!(seen.contains(&TokenKind::Variable));
    }

    #[test]
    fn inline_html_is_opaque() {
        let src = "<p>eval()</p>\n<?php foo();";
        let seen = kinds(&tokenize(src));
        assert_eq!(seen.first(), Some(&TokenKind::InlineHtml));
        assert!(seen.contains(&TokenKind::OpenTag));
        assert_eq!(kinds_of(src, "foo"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn comments_classified() {
        let tokens = tokenize("<?php\n/** doc */\n// line\nfoo();");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::DocComment));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Comment));
    }

    #[test]
    fn positions_are_one_indexed() {
        let tokens = tokenize("<?php\n  foo();");
        let foo = tokens.iter().find(|t| t.content == "foo").unwrap();
        assert_eq!((foo.line, foo.column, foo.offset), (2, 3, 8));
    }

    #[test]
    fn empty_source() {
        assert!(tokenize("").is_empty());
    }
}
