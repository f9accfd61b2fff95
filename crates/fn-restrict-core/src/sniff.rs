//! Sniff trait for token-driven lint rules.

use crate::context::FileContext;
use crate::token::{TokenKind, TokenStream};
use crate::types::ViolationSink;

/// A token-driven lint rule.
///
/// A sniff declares the token kinds it wants to see via [`Sniff::register`].
/// The analyzer walks every file's token stream in order and calls
/// [`Sniff::process`] once per token of a registered kind.
///
/// # Example
///
/// ```ignore
/// use fn_restrict_core::{FileContext, Sniff, TokenKind, TokenStream, ViolationSink};
///
/// pub struct NoGoto;
///
/// impl Sniff for NoGoto {
///     fn name(&self) -> &'static str { "no-goto" }
///
///     fn register(&self) -> Vec<TokenKind> {
///         vec![TokenKind::Identifier]
///     }
///
///     fn process(
///         &self,
///         ctx: &FileContext,
///         tokens: &TokenStream,
///         ptr: usize,
///         sink: &mut dyn ViolationSink,
///     ) {
///         // inspect tokens[ptr] and report
///     }
/// }
/// ```
pub trait Sniff: Send + Sync {
    /// Returns the kebab-case name of this sniff (e.g., "function-restrictions").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this sniff checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the token kinds this sniff wants to be called for.
    ///
    /// An empty list opts the sniff out of scanning entirely.
    fn register(&self) -> Vec<TokenKind>;

    /// Processes the token at `ptr`, reporting any violations to `sink`.
    fn process(
        &self,
        ctx: &FileContext,
        tokens: &TokenStream,
        ptr: usize,
        sink: &mut dyn ViolationSink,
    );
}

/// Type alias for boxed Sniff trait objects.
pub type SniffBox = Box<dyn Sniff>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity, Violation};
    use crate::token::Token;
    use std::path::Path;

    struct TestSniff;

    impl Sniff for TestSniff {
        fn name(&self) -> &'static str {
            "test-sniff"
        }
        fn description(&self) -> &'static str {
            "A test sniff"
        }
        fn register(&self) -> Vec<TokenKind> {
            vec![TokenKind::Identifier]
        }
        fn process(
            &self,
            ctx: &FileContext,
            tokens: &TokenStream,
            ptr: usize,
            sink: &mut dyn ViolationSink,
        ) {
            if let Some(token) = tokens.get(ptr) {
                sink.report(Violation::new(
                    self.name(),
                    "test",
                    Severity::Warning,
                    Location::from_token(ctx.relative_path.clone(), token, ptr),
                    "Test violation",
                    token.content.clone(),
                ));
            }
        }
    }

    #[test]
    fn test_sniff_trait() {
        let sniff = TestSniff;
        assert_eq!(sniff.name(), "test-sniff");
        assert_eq!(sniff.description(), "A test sniff");
        assert_eq!(sniff.register(), vec![TokenKind::Identifier]);

        let ctx = FileContext::new(Path::new("/p/a.php"), Path::new("/p"));
        let tokens = TokenStream::new(vec![Token::new(TokenKind::Identifier, "foo", 1, 1, 0)]);
        let mut found = Vec::new();
        sniff.process(&ctx, &tokens, 0, &mut found);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].matched, "foo");
    }
}
