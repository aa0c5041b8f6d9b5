//! Markdown posts: YAML front matter parsing and catalog ordering.
//!
//! A post file looks like:
//!
//! ```text
//! ---
//! title: Shipping Folio
//! date: 2024-05-01
//! excerpt: Notes from the first release.
//! version: "1.0"
//! tags: [rust, release]
//! status: published
//! ---
//! # Body in Markdown
//! ```
//!
//! Files without a front matter block are plain documents. They can still be
//! fetched by slug but never appear in the catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const FENCE: &str = "---";

/// Publication state of a post. Drafts stay out of the public catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Published,
    Draft,
}

/// Catalog metadata declared in a post's front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PostStatus,
}

impl PostMeta {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// A parsed document: optional metadata plus the Markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDocument {
    pub meta: Option<PostMeta>,
    pub body: String,
}

/// Split `input` into its front matter block and the remaining body.
///
/// The block must open on the very first line with `---` and close with a
/// line that is exactly `---`. Anything else means there is no front matter.
pub fn split_front_matter(input: &str) -> (Option<&str>, &str) {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let Some(rest) = input
        .strip_prefix(FENCE)
        .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
    else {
        return (None, input);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(&['\r', '\n'][..]) == FENCE {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }

    (None, input)
}

/// Parse a Markdown document, reading its front matter when present.
pub fn parse_document(input: &str) -> Result<PostDocument, CoreError> {
    let (front, body) = split_front_matter(input);
    let meta = front
        .map(|yaml| {
            serde_yaml::from_str::<PostMeta>(yaml)
                .map_err(|e| CoreError::Validation(format!("Invalid front matter: {e}")))
        })
        .transpose()?;

    Ok(PostDocument {
        meta,
        body: body.to_string(),
    })
}

/// Order catalog entries newest first; same-day posts fall back to slug order.
pub fn sort_catalog(entries: &mut [(String, PostMeta)]) {
    entries.sort_by(|(slug_a, a), (slug_b, b)| {
        b.date.cmp(&a.date).then_with(|| slug_a.cmp(slug_b))
    });
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const POST: &str = "---\ntitle: Hello\ndate: 2024-05-01\nexcerpt: First one\ntags: [rust, web]\n---\n# Hello\n\nBody text.\n";

    #[test]
    fn parses_front_matter_and_strips_it_from_the_body() {
        let doc = parse_document(POST).unwrap();
        let meta = doc.meta.unwrap();

        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(meta.tags, vec!["rust", "web"]);
        assert_eq!(meta.status, PostStatus::Published);
        assert_eq!(meta.version, None);
        assert_eq!(doc.body, "# Hello\n\nBody text.\n");
    }

    #[test]
    fn document_without_front_matter_is_returned_whole() {
        let doc = parse_document("# Just markdown\n---\nnot yaml\n").unwrap();
        assert!(doc.meta.is_none());
        assert_eq!(doc.body, "# Just markdown\n---\nnot yaml\n");
    }

    #[test]
    fn unterminated_block_is_not_front_matter() {
        let (front, body) = split_front_matter("---\ntitle: x\n");
        assert!(front.is_none());
        assert_eq!(body, "---\ntitle: x\n");
    }

    #[test]
    fn crlf_fences_are_accepted() {
        let doc =
            parse_document("---\r\ntitle: Win\r\ndate: 2023-01-02\r\nstatus: draft\r\n---\r\nbody\r\n")
                .unwrap();
        let meta = doc.meta.unwrap();
        assert_eq!(meta.title, "Win");
        assert!(!meta.is_published());
        assert_eq!(doc.body, "body\r\n");
    }

    #[test]
    fn invalid_front_matter_is_a_validation_error() {
        assert_matches!(
            parse_document("---\ntitle: Missing date\n---\nbody"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            parse_document("---\ntitle: T\ndate: 2024-01-01\nstatus: archived\n---\n"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn catalog_sorts_newest_first_then_by_slug() {
        let meta = |date: &str| PostMeta {
            title: "t".into(),
            date: date.parse().unwrap(),
            excerpt: String::new(),
            version: None,
            tags: Vec::new(),
            status: PostStatus::Published,
        };
        let mut entries = vec![
            ("old".to_string(), meta("2022-01-01")),
            ("b-new".to_string(), meta("2024-03-01")),
            ("a-new".to_string(), meta("2024-03-01")),
            ("mid".to_string(), meta("2023-06-15")),
        ];

        sort_catalog(&mut entries);

        let slugs: Vec<_> = entries.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(slugs, vec!["a-new", "b-new", "mid", "old"]);
    }
}
