//! Login form extraction.
//!
//! Scans an HTML document token by token and captures the first `<form>`
//! block: its `action` attribute and the `name`/`value` of every named
//! `<input>` inside it. Uses the `html5ever` tokenizer directly (no tree
//! building), so whether the form was explicitly closed stays observable.

use std::cell::RefCell;
use std::collections::HashMap;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use log::trace;
use url::Url;

use crate::error_handling::FormError;

/// The submission target and fields of a login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// Raw `action` attribute; may be relative to the page URL. Never empty.
    pub action: String,
    /// Named inputs and their default values (empty when `value` is absent).
    pub fields: HashMap<String, String>,
}

impl LoginForm {
    /// Resolves the action against the final URL of the page that served the form.
    pub fn action_url(&self, page_url: &Url) -> Result<Url, url::ParseError> {
        page_url.join(&self.action)
    }
}

/// Extracts the first complete form from an HTML document.
///
/// Only the first form that is explicitly closed counts; anything after its
/// `</form>` (further forms, broken markup) is ignored.
///
/// # Errors
///
/// - `FormError::NotFound` if the document ends before any `</form>`
/// - `FormError::ActionMissing` if the first form has an empty or absent `action`
pub fn extract_form(html: &[u8]) -> Result<LoginForm, FormError> {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(&String::from_utf8_lossy(html)));

    let tokenizer = Tokenizer::new(FormSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    tokenizer.sink.finish()
}

#[derive(Default)]
struct FormSink {
    scan: RefCell<FormScan>,
}

#[derive(Default)]
struct FormScan {
    /// `None` until a form opens; `Some("")` for a form without `action`.
    action: Option<String>,
    fields: HashMap<String, String>,
    closed: bool,
    parse_errors: usize,
}

impl TokenSink for FormSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut scan = self.scan.borrow_mut();
        match token {
            Token::TagToken(tag) => {
                if !scan.closed {
                    scan.observe(&tag);
                }
                raw_text_kind(&tag)
                    .map(TokenSinkResult::RawData)
                    .unwrap_or(TokenSinkResult::Continue)
            }
            Token::ParseError(err) => {
                if !scan.closed {
                    scan.parse_errors += 1;
                    trace!("html parse error before form end: {err}");
                }
                TokenSinkResult::Continue
            }
            _ => TokenSinkResult::Continue,
        }
    }
}

impl FormSink {
    fn finish(&self) -> Result<LoginForm, FormError> {
        let scan = self.scan.take();
        if !scan.closed {
            if scan.parse_errors > 0 {
                trace!("{} parse errors, no closed form", scan.parse_errors);
            }
            return Err(FormError::NotFound);
        }

        match scan.action {
            Some(action) if !action.is_empty() => Ok(LoginForm {
                action,
                fields: scan.fields,
            }),
            _ => Err(FormError::ActionMissing),
        }
    }
}

impl FormScan {
    fn observe(&mut self, tag: &Tag) {
        match (tag.kind, &*tag.name) {
            (TagKind::StartTag, "form") => {
                if self.action.is_none() {
                    self.action = Some(attr(tag, "action").unwrap_or_default());
                }
            }
            (TagKind::StartTag, "input") if self.action.is_some() => {
                if let Some(name) = attr(tag, "name").filter(|n| !n.is_empty()) {
                    let value = attr(tag, "value").unwrap_or_default();
                    self.fields.insert(name, value);
                }
            }
            (TagKind::EndTag, "form") if self.action.is_some() => {
                self.closed = true;
            }
            _ => {}
        }
    }
}

fn attr(tag: &Tag, name: &str) -> Option<String> {
    tag.attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| a.value.to_string())
}

/// Script and style bodies are not markup; without a tree builder the
/// tokenizer has to be told so, or a `<` inside a script would start a tag.
fn raw_text_kind(tag: &Tag) -> Option<RawKind> {
    if tag.kind != TagKind::StartTag || tag.self_closing {
        return None;
    }
    match &*tag.name {
        "script" => Some(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "textarea" | "title" => Some(RawKind::Rcdata),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extracts_action_and_named_inputs() {
        let html = r#"
        <html>
            <body>
                <form action="/auth/realms/Agility/login" method="post">
                    <input type="hidden" name="session_code" value="abc123">
                    <input type="hidden" name="execution" value="xyz789">
                    <input type="hidden" name="client_id" value="myclient">
                    <input type="text" name="username">
                    <input type="password" name="password">
                    <input type="submit" value="Sign In">
                </form>
            </body>
        </html>"#;

        let form = extract_form(html.as_bytes()).expect("form should be found");
        assert_eq!(form.action, "/auth/realms/Agility/login");
        assert_eq!(
            form.fields,
            fields(&[
                ("session_code", "abc123"),
                ("execution", "xyz789"),
                ("client_id", "myclient"),
                ("username", ""),
                ("password", ""),
            ])
        );
    }

    #[test]
    fn test_no_form() {
        let html = "<html><body>No forms found.</body></html>";
        assert_eq!(extract_form(html.as_bytes()), Err(FormError::NotFound));
    }

    #[test]
    fn test_form_without_action() {
        let html = r#"
        <html><body>
            <form>
                <input type="hidden" name="x" value="1">
            </form>
        </body></html>"#;
        assert_eq!(extract_form(html.as_bytes()), Err(FormError::ActionMissing));
    }

    #[test]
    fn test_form_with_empty_action() {
        let html = r#"<form action=""><input name="x" value="1"></form>"#;
        assert_eq!(extract_form(html.as_bytes()), Err(FormError::ActionMissing));
    }

    #[test]
    fn test_first_form_wins() {
        let html = r#"
        <html><body>
            <form action="/first">
                <input type="hidden" name="a" value="1">
            </form>
            <form action="/second">
                <input type="hidden" name="b" value="2">
            </form>
        </body></html>"#;

        let form = extract_form(html.as_bytes()).unwrap();
        assert_eq!(form.action, "/first");
        assert_eq!(form.fields, fields(&[("a", "1")]));
    }

    #[test]
    fn test_empty_form() {
        let html = r#"<html><body><form action="/login"></form></body></html>"#;
        let form = extract_form(html.as_bytes()).unwrap();
        assert_eq!(form.action, "/login");
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let html = r#"
        <form action="/login">
            <input name="token" value="first">
            <input name="token" value="second">
        </form>"#;
        let form = extract_form(html.as_bytes()).unwrap();
        assert_eq!(form.fields, fields(&[("token", "second")]));
    }

    #[test]
    fn test_inputs_outside_form_are_ignored() {
        let html = r#"
        <input name="search" value="q">
        <form action="/login"><input name="user" value=""></form>
        <input name="footer" value="f">"#;
        let form = extract_form(html.as_bytes()).unwrap();
        assert_eq!(form.fields, fields(&[("user", "")]));
    }

    #[test]
    fn test_unnamed_inputs_are_ignored() {
        let html = r#"<form action="/a"><input value="x"><input name="" value="y"></form>"#;
        let form = extract_form(html.as_bytes()).unwrap();
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_unclosed_form_is_not_found() {
        let html = r#"
        <html><body>
            <form action="/ok">
                <input type="hidden" name="x" value="y">
            <!-- never closed -->
        </body></html>"#;
        assert_eq!(extract_form(html.as_bytes()), Err(FormError::NotFound));
    }

    #[test]
    fn test_malformed_markup_without_form() {
        let html = r#"
        <html><body>
            <div <span <p> missing closing tags
        </body></html>"#;
        assert_eq!(extract_form(html.as_bytes()), Err(FormError::NotFound));
    }

    #[test]
    fn test_broken_trailing_markup_after_closed_form() {
        let html = r#"<form action="/ok"><input name="x" value="y"></form><div <span "unterminated"#;
        let form = extract_form(html.as_bytes()).unwrap();
        assert_eq!(form.action, "/ok");
        assert_eq!(form.fields, fields(&[("x", "y")]));
    }

    #[test]
    fn test_tags_are_case_insensitive_and_entities_decoded() {
        let html = r#"<FORM ACTION="/login?a=1&amp;b=2"><INPUT NAME="n" VALUE="v"></FORM>"#;
        let form = extract_form(html.as_bytes()).unwrap();
        assert_eq!(form.action, "/login?a=1&b=2");
        assert_eq!(form.fields, fields(&[("n", "v")]));
    }

    #[test]
    fn test_script_content_is_not_markup() {
        let html = r#"
        <script>var s = "<form action='/fake'></form>";</script>
        <form action="/real"><input name="a" value="1"></form>"#;
        let form = extract_form(html.as_bytes()).unwrap();
        assert_eq!(form.action, "/real");
    }

    #[test]
    fn test_nested_form_open_keeps_first_action() {
        let html = r#"<form action="/outer"><form action="/inner"><input name="a" value="1"></form>"#;
        let form = extract_form(html.as_bytes()).unwrap();
        assert_eq!(form.action, "/outer");
    }

    #[test]
    fn test_action_url_resolves_relative() {
        let form = LoginForm {
            action: "login-actions/authenticate?code=1".to_string(),
            fields: HashMap::new(),
        };
        let page = Url::parse("https://idp.example.org/auth/realms/r/protocol/openid-connect/auth").unwrap();
        assert_eq!(
            form.action_url(&page).unwrap().as_str(),
            "https://idp.example.org/auth/realms/r/protocol/openid-connect/login-actions/authenticate?code=1"
        );
    }
}
