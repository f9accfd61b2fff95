//! Bare function-call detection by bounded token lookback.

use crate::token::{TokenKind, TokenStream};

/// Returns true if the token at `ptr` is a bare function-call site.
///
/// `eval` is always a call. An identifier is a call unless the nearest
/// preceding significant token is `function`, `::`, `->` or `?->`, or the
/// two preceding significant tokens are `identifier \`. Any other token
/// kind is never a call.
#[must_use]
pub fn is_bare_call(tokens: &TokenStream, ptr: usize) -> bool {
    let Some(token) = tokens.get(ptr) else {
        return false;
    };

    match token.kind {
        TokenKind::Eval => return true,
        TokenKind::Identifier => {}
        _ => return false,
    }

    let Some(prev) = ptr
        .checked_sub(1)
        .and_then(|i| tokens.find_previous_significant(i))
    else {
        return true;
    };
    let prev_kind = tokens.get(prev).map(|t| t.kind);

    if matches!(
        prev_kind,
        Some(
            TokenKind::Function
                | TokenKind::DoubleColon
                | TokenKind::ObjectOperator
                | TokenKind::NullsafeObjectOperator
        )
    ) {
        return false;
    }

    if prev_kind == Some(TokenKind::NsSeparator) {
        let qualifier = prev
            .checked_sub(1)
            .and_then(|i| tokens.find_previous_significant(i))
            .and_then(|i| tokens.get(i))
            .map(|t| t.kind);
        if qualifier == Some(TokenKind::Identifier) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use crate::token::TokenKind::{
        Comment, DoubleColon, Eval, Function, Identifier, NsSeparator, NullsafeObjectOperator,
        ObjectOperator, OpenParenthesis, Variable, Whitespace,
    };

    /// Builds a stream from `(kind, text)` pairs and returns it with the
    /// index of the last token.
    fn stream(parts: &[(TokenKind, &str)]) -> (TokenStream, usize) {
        let mut offset = 0;
        let tokens: Vec<Token> = parts
            .iter()
            .map(|(kind, text)| {
                let token = Token::new(*kind, *text, 1, offset + 1, offset);
                offset += text.len();
                token
            })
            .collect();
        let last = tokens.len() - 1;
        (tokens.into(), last)
    }

    #[test]
    fn definition_is_not_call() {
        let (tokens, ptr) = stream(&[
            (Function, "function"),
            (Whitespace, " "),
            (Identifier, "foo"),
        ]);
        assert!(!is_bare_call(&tokens, ptr));
    }

    #[test]
    fn definition_with_comment_between() {
        let (tokens, ptr) = stream(&[
            (Function, "function"),
            (Whitespace, " "),
            (Comment, "/* c */"),
            (Whitespace, "\n"),
            (Identifier, "foo"),
        ]);
        assert!(!is_bare_call(&tokens, ptr));
    }

    #[test]
    fn method_call_is_not_call() {
        let (tokens, ptr) = stream(&[
            (Variable, "$obj"),
            (ObjectOperator, "->"),
            (Identifier, "foo"),
        ]);
        assert!(!is_bare_call(&tokens, ptr));
    }

    #[test]
    fn nullsafe_method_call_is_not_call() {
        let (tokens, ptr) = stream(&[
            (Variable, "$obj"),
            (NullsafeObjectOperator, "?->"),
            (Identifier, "foo"),
        ]);
        assert!(!is_bare_call(&tokens, ptr));
    }

    #[test]
    fn static_call_is_not_call() {
        let (tokens, ptr) = stream(&[
            (Identifier, "Foo"),
            (DoubleColon, "::"),
            (Identifier, "bar"),
        ]);
        assert!(!is_bare_call(&tokens, ptr));
    }

    #[test]
    fn namespaced_call_is_not_call() {
        let (tokens, ptr) = stream(&[
            (Identifier, "Foo"),
            (Whitespace, " "),
            (NsSeparator, "\\"),
            (Whitespace, " "),
            (Identifier, "bar"),
        ]);
        assert!(!is_bare_call(&tokens, ptr));
    }

    #[test]
    fn fully_qualified_global_call_is_call() {
        let (tokens, ptr) = stream(&[
            (OpenParenthesis, "("),
            (NsSeparator, "\\"),
            (Identifier, "eval_like"),
        ]);
        assert!(is_bare_call(&tokens, ptr));
    }

    #[test]
    fn leading_separator_at_start_is_call() {
        let (tokens, ptr) = stream(&[(NsSeparator, "\\"), (Identifier, "foo")]);
        assert!(is_bare_call(&tokens, ptr));
    }

    #[test]
    fn start_of_stream_is_call() {
        let (tokens, ptr) = stream(&[(Identifier, "foo")]);
        assert!(is_bare_call(&tokens, ptr));

        let (tokens, ptr) = stream(&[
            (Whitespace, "\n"),
            (Comment, "// x"),
            (Identifier, "foo"),
        ]);
        assert!(is_bare_call(&tokens, ptr));
    }

    #[test]
    fn plain_call_after_paren_is_call() {
        let (tokens, ptr) = stream(&[(OpenParenthesis, "("), (Identifier, "foo")]);
        assert!(is_bare_call(&tokens, ptr));
    }

    #[test]
    fn eval_is_always_call() {
        let (tokens, ptr) = stream(&[(Variable, "$o"), (ObjectOperator, "->"), (Eval, "eval")]);
        assert!(is_bare_call(&tokens, ptr));
    }

    #[test]
    fn non_candidate_is_never_call() {
        let (tokens, ptr) = stream(&[(Variable, "$foo")]);
        assert!(!is_bare_call(&tokens, ptr));
        assert!(!is_bare_call(&tokens, 42));
    }
}
