use std::fmt;

/// Structural locator for an interactive element.
///
/// Locators are configuration-like constants: brittle positional contracts
/// with markup the bot does not control, looked up verbatim at call time.
/// There is no fallback or fuzzy matching; when the page changes shape, the
/// locator breaks and the owning cycle aborts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Locator {
    /// CSS selector path.
    Css(&'static str),
    /// XPath expression.
    XPath(&'static str),
}

impl Locator {
    /// The raw path expression, without the scheme tag.
    pub fn expression(&self) -> &'static str {
        match self {
            Locator::Css(expr) | Locator::XPath(expr) => expr,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(expr) => write!(f, "css={expr}"),
            Locator::XPath(expr) => write!(f, "xpath={expr}"),
        }
    }
}
