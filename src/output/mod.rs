//! # Output
//!
//! Turns a call outcome into the text written to stdout.

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CallFailure;
use crate::http::response::{CallSuccess, ResponseInfo};

pub const FAILURE_PREFIX: &str = "Call Failed ";

/// Escape the characters that are significant in HTML so the body can be
/// embedded in a page verbatim.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    body: Option<&'a str>,
    info: &'a ResponseInfo,
}

pub fn render(outcome: &Result<CallSuccess, CallFailure>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match outcome {
            Ok(success) => escape_html(&success.body),
            Err(failure) => format!("{FAILURE_PREFIX}{:#?}", failure.info),
        },
        OutputFormat::Json => {
            let report = match outcome {
                Ok(success) => JsonReport {
                    ok: true,
                    body: Some(&success.body),
                    info: &success.info,
                },
                Err(failure) => JsonReport {
                    ok: false,
                    body: None,
                    info: &failure.info,
                },
            };
            // A derived Serialize over strings, numbers and string maps cannot fail.
            serde_json::to_string_pretty(&report).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(body: &str) -> Result<CallSuccess, CallFailure> {
        Ok(CallSuccess {
            body: body.to_string(),
            info: ResponseInfo {
                http_code: 200,
                ..ResponseInfo::for_url("https://acme.wufoo.com/api/v3/forms.xml")
            },
        })
    }

    fn failure(code: u16) -> Result<CallSuccess, CallFailure> {
        Err(CallFailure::new(ResponseInfo {
            http_code: code,
            status_text: "Not Found".into(),
            total_time_ms: 12,
            ..ResponseInfo::for_url("https://acme.wufoo.com/api/v3/forms.xml")
        }))
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<FormsList/>"), "&lt;FormsList/&gt;");
        assert_eq!(
            escape_html(r#"<a href="x?a=1&b='2'">"#),
            "&lt;a href=&quot;x?a=1&amp;b=&#039;2&#039;&quot;&gt;"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape_html("Café forms 42"), "Café forms 42");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn text_success_is_escaped_body() {
        assert_eq!(render(&success("<FormsList/>"), OutputFormat::Text), "&lt;FormsList/&gt;");
    }

    #[test]
    fn text_failure_dumps_metadata() {
        let rendered = render(&failure(404), OutputFormat::Text);
        assert!(rendered.starts_with("Call Failed "));
        assert!(rendered.contains("http_code: 404"));
        assert!(rendered.contains("total_time_ms: 12"));
        assert!(rendered.contains("https://acme.wufoo.com/api/v3/forms.xml"));
    }

    #[test]
    fn json_success_keeps_raw_body() {
        let rendered = render(&success("<FormsList/>"), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["body"], "<FormsList/>");
        assert_eq!(value["info"]["http_code"], 200);
    }

    #[test]
    fn json_failure_has_null_body() {
        let rendered = render(&failure(404), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["ok"], false);
        assert!(value["body"].is_null());
        assert_eq!(value["info"]["http_code"], 404);
        assert_eq!(value["info"]["status_text"], "Not Found");
    }
}
