//! JSON document loading with secret placeholder substitution.
//!
//! `dataset.json` is a flat array of [`StaticFeed`] records.
//! `realtime.json` holds its [`Updater`] records under a top-level
//! `updaters` key and may embed `{{{NAME}}}` placeholders that are
//! replaced with the value of the identically-named environment
//! variable (empty string when unset) on the raw text, before JSON
//! parsing.

use std::path::Path;

use crate::error::FeedCheckError;

use super::model::{RealtimeDocument, StaticFeed, Updater};

pub async fn load_static_feeds(path: &Path) -> Result<Vec<StaticFeed>, FeedCheckError> {
    let content = read_document(path).await?;
    serde_json::from_str(&content).map_err(|e| FeedCheckError::DatasetParse {
        path: path.display().to_string(),
        source: e,
    })
}

pub async fn load_realtime_updaters(path: &Path) -> Result<Vec<Updater>, FeedCheckError> {
    let content = read_document(path).await?;
    let content = substitute_env_placeholders(&content);

    let document: RealtimeDocument =
        serde_json::from_str(&content).map_err(|e| FeedCheckError::DatasetParse {
            path: path.display().to_string(),
            source: e,
        })?;

    document
        .updaters
        .ok_or_else(|| FeedCheckError::MissingUpdaters {
            path: path.display().to_string(),
        })
}

async fn read_document(path: &Path) -> Result<String, FeedCheckError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(FeedCheckError::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = tokio::fs::read_to_string(path).await?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded document");
    Ok(content)
}

/// Replace every `{{{NAME}}}` token with the value of the environment
/// variable `NAME`, or the empty string when it is unset. Plain text
/// scan on purpose — no templating engine, no regex. Spans whose inner
/// text is not a valid variable name are left untouched.
pub fn substitute_env_placeholders(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("{{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        match after.find("}}}") {
            Some(end) if is_placeholder_name(&after[..end]) => {
                let name = &after[..end];
                let value = std::env::var(name).unwrap_or_default();
                tracing::debug!(placeholder = name, set = !value.is_empty(), "substituted");
                out.push_str(&value);
                rest = &after[end + 3..];
            }
            _ => {
                out.push_str("{{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_set_variable() {
        std::env::set_var("FEEDCHECK_TEST_KEY", "s3cret");
        let out = substitute_env_placeholders(r#"{"url": "http://x/vp?key={{{FEEDCHECK_TEST_KEY}}}"}"#);
        assert_eq!(out, r#"{"url": "http://x/vp?key=s3cret"}"#);
    }

    #[test]
    fn unset_variable_becomes_empty_string() {
        std::env::remove_var("FEEDCHECK_TEST_UNSET");
        let out = substitute_env_placeholders("a{{{FEEDCHECK_TEST_UNSET}}}b");
        assert_eq!(out, "ab");
    }

    #[test]
    fn substitutes_every_occurrence() {
        std::env::set_var("FEEDCHECK_TEST_REPEAT", "x");
        let out = substitute_env_placeholders("{{{FEEDCHECK_TEST_REPEAT}}}-{{{FEEDCHECK_TEST_REPEAT}}}");
        assert_eq!(out, "x-x");
    }

    #[test]
    fn non_identifier_span_is_left_untouched() {
        let input = r#"{"a": "{{{not a name}}}", "b": "{{{unterminated"#;
        assert_eq!(substitute_env_placeholders(input), input);
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = r#"{"updaters": []}"#;
        assert_eq!(substitute_env_placeholders(input), input);
    }
}
