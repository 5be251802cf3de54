//! GitHub API failures condensed into a display-ready form.

use std::fmt;

/// An API failure reduced to what the UI can show: the HTTP status when
/// the API answered, and a single-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiFailure {
    /// True when the API answered 404 for the requested object.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "status {status}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl From<octocrab::Error> for ApiFailure {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self {
                status: Some(source.status_code.as_u16()),
                message: condense_github_message(&source.message, source.errors.as_deref()),
            },
            other => Self {
                status: None,
                message: collapse_source_chain(&other),
            },
        }
    }
}

/// Joins the API's headline with any per-field detail entries. GitHub
/// sometimes sends a blank or literal "GitHub" headline for server
/// errors, which reads like a bug when echoed back verbatim.
fn condense_github_message(headline: &str, details: Option<&[serde_json::Value]>) -> String {
    let headline = headline.trim();
    let mut message = if headline.is_empty() || headline.eq_ignore_ascii_case("github") {
        "GitHub API error".to_owned()
    } else {
        headline.to_owned()
    };

    let details: Vec<String> = details
        .into_iter()
        .flatten()
        .map(detail_text)
        .filter(|text| !text.is_empty())
        .collect();
    if !details.is_empty() {
        message.push_str(" | ");
        message.push_str(&details.join("; "));
    }

    message
}

fn detail_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| value.to_string(), str::to_owned),
        other => other.to_string(),
    }
}

fn collapse_source_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut collapsed: Vec<String> = Vec::new();
    for text in std::iter::successors(Some(error), |err| err.source()).map(|err| err.to_string()) {
        if !text.is_empty() && collapsed.last() != Some(&text) {
            collapsed.push(text);
        }
    }

    if collapsed.is_empty() {
        "unknown error".to_owned()
    } else {
        collapsed.join(": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_prefixes_the_status_when_present() {
        let failure = ApiFailure {
            status: Some(422),
            message: "Validation Failed".to_owned(),
        };
        assert_eq!(failure.to_string(), "status 422: Validation Failed");

        let failure = ApiFailure {
            status: None,
            message: "connection reset".to_owned(),
        };
        assert_eq!(failure.to_string(), "connection reset");
    }

    #[test]
    fn only_a_404_counts_as_not_found() {
        let mut failure = ApiFailure {
            status: Some(404),
            message: "Not Found".to_owned(),
        };
        assert!(failure.is_not_found());

        failure.status = Some(403);
        assert!(!failure.is_not_found());

        failure.status = None;
        assert!(!failure.is_not_found());
    }

    #[test]
    fn blank_and_placeholder_headlines_get_a_generic_message() {
        assert_eq!(condense_github_message("   ", None), "GitHub API error");
        assert_eq!(condense_github_message("GitHub", None), "GitHub API error");
    }

    #[test]
    fn detail_entries_are_joined_behind_the_headline() {
        let details = [json!({"message": "tag missing"}), json!("ref stale")];
        assert_eq!(
            condense_github_message("Validation Failed", Some(&details)),
            "Validation Failed | tag missing; ref stale"
        );
    }

    #[derive(Debug)]
    struct Layered {
        text: &'static str,
        inner: Option<Box<Layered>>,
    }

    impl fmt::Display for Layered {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.text)
        }
    }

    impl std::error::Error for Layered {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.inner
                .as_deref()
                .map(|inner| inner as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn source_chain_drops_consecutive_duplicates() {
        let chain = Layered {
            text: "request failed",
            inner: Some(Box::new(Layered {
                text: "request failed",
                inner: Some(Box::new(Layered {
                    text: "connection reset",
                    inner: None,
                })),
            })),
        };
        assert_eq!(
            collapse_source_chain(&chain),
            "request failed: connection reset"
        );
    }
}
