//! Storybook theme rendering.
//!
//! A fixed registry of named HTML templates. Every substitution point is
//! escaped: child name and interval through minijinja's HTML auto-escaping
//! (templates are registered under `.html` names), generated content through
//! the explicit [`nl2br`] filter, which escapes first and only then converts
//! newlines to `<br/>`. Unknown theme names fall back to `classic` — an
//! unrecognized theme is not a failure condition.

mod templates;

use minijinja::value::Value;
use minijinja::{context, Environment};

use storynest_core::constants::DEFAULT_THEME;

/// Themes available to callers, in registry order.
pub const THEME_NAMES: [&str; 3] = ["classic", "fairy", "adventure"];

/// Template rendering failure. Should not occur for the built-in templates;
/// surfaces minijinja diagnostics if it does.
#[derive(Debug, thiserror::Error)]
#[error("theme render failed: {0}")]
pub struct ThemeError(#[from] minijinja::Error);

/// HTML-escape the five significant characters.
///
/// The explicit escaping step all user-controlled content passes through
/// before any markup (like `<br/>`) is added around it.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Filter: escape, then turn newlines into `<br/>`.
///
/// The result is marked safe so auto-escaping does not double-escape the
/// line breaks; safety holds because the input was escaped first.
fn nl2br(value: String) -> Value {
    Value::from_safe_string(escape_html(&value).replace('\n', "<br/>"))
}

/// Fixed registry of storybook templates.
#[derive(Debug)]
pub struct ThemeRegistry {
    env: Environment<'static>,
}

impl ThemeRegistry {
    /// Build the registry with the built-in `classic`, `fairy`, and
    /// `adventure` templates.
    ///
    /// # Errors
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> Result<Self, ThemeError> {
        let mut env = Environment::new();
        env.add_filter("nl2br", nl2br);
        env.add_template("classic.html", templates::CLASSIC)?;
        env.add_template("fairy.html", templates::FAIRY)?;
        env.add_template("adventure.html", templates::ADVENTURE)?;
        Ok(Self { env })
    }

    /// Resolve a requested theme name to a registered template name.
    fn resolve(theme: &str) -> &'static str {
        match theme {
            "classic" => "classic.html",
            "fairy" => "fairy.html",
            "adventure" => "adventure.html",
            other => {
                tracing::debug!(theme = other, fallback = DEFAULT_THEME, "unknown theme");
                "classic.html"
            },
        }
    }

    /// Render a complete, self-contained HTML storybook document.
    ///
    /// # Errors
    /// Returns [`ThemeError`] if template evaluation fails.
    pub fn render(
        &self,
        theme: &str,
        child_name: &str,
        interval: &str,
        content: &str,
    ) -> Result<String, ThemeError> {
        let template = self.env.get_template(Self::resolve(theme))?;
        let html = template.render(context! {
            child_name => child_name,
            interval => interval,
            content => content,
        })?;
        Ok(html)
    }
}
