//! Rendering of buffered messages as browser console statements
//!
//! Every function here is pure: entries are escaped on a copy, so rendering
//! the same buffer twice yields the same text.

use crate::LogBuffer;
use std::borrow::Cow;

/// Host convention for embedding script text into a page
pub trait ScriptEmbed {
    /// Wrap `script` as an inline executable script block
    fn wrap(&self, script: &str) -> String;
}

/// Classic inline `<script>` tag with a CDATA guard
#[derive(Debug, Clone, Default)]
pub struct ScriptTag {
    /// Content-Security-Policy nonce added as a `nonce` attribute
    pub nonce: Option<String>,
}

impl ScriptTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nonce(nonce: impl Into<String>) -> Self {
        Self {
            nonce: Some(nonce.into()),
        }
    }
}

impl ScriptEmbed for ScriptTag {
    fn wrap(&self, script: &str) -> String {
        let nonce = match &self.nonce {
            Some(nonce) => format!(
                " nonce=\"{}\"",
                nonce.replace('&', "&amp;").replace('"', "&quot;")
            ),
            None => String::new(),
        };
        format!("<script type=\"text/javascript\"{nonce}>\n//<![CDATA[\n{script}\n//]]>\n</script>")
    }
}

/// Escape a message for a single-quoted JavaScript string literal
///
/// Every `\` and `'` gets a leading backslash. Line terminators become escape
/// sequences and `</` becomes `<\/`, so the literal stays on one line and
/// cannot close the surrounding script element. The runtime value is unchanged.
/// Borrows when nothing needs escaping.
pub fn escape_message(message: &str) -> Cow<'_, str> {
    if !message.contains(['\\', '\'', '\n', '\r', '\u{2028}', '\u{2029}'])
        && !message.contains("</")
    {
        return Cow::Borrowed(message);
    }

    let mut escaped = String::with_capacity(message.len() + 8);
    let mut previous = None;
    for c in message.chars() {
        match c {
            '\\' | '\'' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            '/' if previous == Some('<') => escaped.push_str("\\/"),
            _ => escaped.push(c),
        }
        previous = Some(c);
    }
    Cow::Owned(escaped)
}

/// One `console.<fn>('<message>');` line per entry, joined by newlines
///
/// Returns `None` when there is no buffer or it holds no entries.
pub fn render_statements(buffer: Option<&LogBuffer>) -> Option<String> {
    let buffer = buffer.filter(|b| !b.is_empty())?;

    let statements: Vec<String> = buffer
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "console.{}('{}');",
                entry.severity.console_function(),
                escape_message(&entry.message)
            )
        })
        .collect();

    Some(statements.join("\n"))
}

/// Statements wrapped by `embed`, or `None` when there is nothing to emit
pub fn render_script<E>(buffer: Option<&LogBuffer>, embed: &E) -> Option<String>
where
    E: ScriptEmbed + ?Sized,
{
    render_statements(buffer).map(|statements| embed.wrap(&statements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConsoleConfig, Severity};
    use std::sync::Arc;

    fn buffer() -> LogBuffer {
        LogBuffer::new(Arc::new(ConsoleConfig::default()), "development")
    }

    #[test]
    fn test_escape_message() {
        assert!(matches!(escape_message("plain"), Cow::Borrowed("plain")));
        assert_eq!(escape_message(r"it's a \test"), r"it\'s a \\test");
        assert_eq!(escape_message(r#"O'Brien said \"hi\""#), r#"O\'Brien said \\"hi\\""#);
        assert_eq!(escape_message(""), "");
    }

    #[test]
    fn test_escape_line_terminators() {
        assert_eq!(escape_message("line one\nline two"), r"line one\nline two");
        assert_eq!(escape_message("a\r\nb"), r"a\r\nb");
        assert_eq!(escape_message("a\u{2028}b\u{2029}c"), r"a\u2028b\u2029c");
        // an escaped newline in the message is not confused with a line break
        assert_eq!(escape_message(r"a\nb"), r"a\\nb");
    }

    #[test]
    fn test_escape_closing_tags() {
        assert_eq!(
            escape_message("user said </script><script>alert(1)</script>"),
            r"user said <\/script><script>alert(1)<\/script>"
        );
        assert_eq!(escape_message("a / b < c"), "a / b < c");
        assert!(matches!(escape_message("1 < 2 / 3"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_rendered_block_stays_intact() {
        let mut console = buffer();
        console.info("line one\nline two");
        console.warn("user said </script><script>alert(1)</script>");

        let script = render_script(Some(&console), &ScriptTag::new()).unwrap();
        let statements: Vec<&str> = script
            .lines()
            .filter(|line| line.starts_with("console."))
            .collect();

        assert_eq!(
            statements,
            vec![
                r"console.info('line one\nline two');",
                r"console.warn('user said <\/script><script>alert(1)<\/script>');",
            ]
        );
        assert_eq!(script.matches("</script>").count(), 1);
        assert!(script.ends_with("</script>"));
    }

    #[test]
    fn test_absent_or_empty_buffer() {
        assert_eq!(render_statements(None), None);
        assert_eq!(render_statements(Some(&buffer())), None);
        assert_eq!(render_script(Some(&buffer()), &ScriptTag::new()), None);
    }

    #[test]
    fn test_statements_in_order() {
        let mut console = buffer();
        console.debug("a");
        console.error("b");

        assert_eq!(
            render_statements(Some(&console)).unwrap(),
            "console.debug('a');\nconsole.error('b');"
        );
    }

    #[test]
    fn test_function_per_severity() {
        let mut console = buffer();
        console.debug("d");
        console.info("i");
        console.warn("w");
        console.fatal("f");
        console.add(None, Some("u".into()));

        let rendered = render_statements(Some(&console)).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "console.debug('d');",
                "console.info('i');",
                "console.warn('w');",
                "console.error('f');",
                "console.log('u');",
            ]
        );
    }

    #[test]
    fn test_escaped_statement() {
        let mut console = buffer();
        console.unknown(r"it's a \test");

        assert_eq!(
            render_statements(Some(&console)).unwrap(),
            r"console.log('it\'s a \\test');"
        );
    }

    #[test]
    fn test_render_does_not_mutate_entries() {
        let mut console = buffer();
        console.add(Some(Severity::Info), Some(r"a\'b".into()));

        let first = render_statements(Some(&console));
        let second = render_statements(Some(&console));
        assert_eq!(first, second);
        assert_eq!(console.entries()[0].message, r"a\'b");
    }

    #[test]
    fn test_script_tag() {
        let mut console = buffer();
        console.info("hi");

        assert_eq!(
            render_script(Some(&console), &ScriptTag::new()).unwrap(),
            "<script type=\"text/javascript\">\n//<![CDATA[\nconsole.info('hi');\n//]]>\n</script>"
        );

        let tagged = render_script(Some(&console), &ScriptTag::with_nonce("abc")).unwrap();
        assert!(tagged.starts_with("<script type=\"text/javascript\" nonce=\"abc\">"));

        let tagged = render_script(Some(&console), &ScriptTag::with_nonce("a&b\"c")).unwrap();
        assert!(tagged.starts_with("<script type=\"text/javascript\" nonce=\"a&amp;b&quot;c\">"));
    }

    #[test]
    fn test_custom_embed() {
        struct Raw;

        impl ScriptEmbed for Raw {
            fn wrap(&self, script: &str) -> String {
                format!("[{}]", script)
            }
        }

        let mut console = buffer();
        console.warn("w");
        let embed: &dyn ScriptEmbed = &Raw;
        assert_eq!(
            render_script(Some(&console), embed).as_deref(),
            Some("[console.warn('w');]")
        );
    }
}
