//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::ContentError;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec).map(Some)
}

/// Metadata block at the top of a post.
///
/// Every field is optional at this level so that a missing key can be
/// reported by name; [`super::Post::parse`] enforces presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Option<Vec<String>>,
    pub description: Option<String>,
}

impl FrontMatter {
    /// Split raw post text into its front-matter and body.
    ///
    /// The text must open with a `---` line; the header runs to the next
    /// line that is exactly `---`. Leading blank lines of the body are dropped.
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let rest = content
            .strip_prefix("---")
            .ok_or(ContentError::MissingFrontMatter)?;

        // The opening delimiter has to stand on its own line
        let rest = match rest.split_once('\n') {
            Some((first, after)) if first.trim().is_empty() => after,
            Some(_) => return Err(ContentError::MissingFrontMatter),
            None if rest.trim().is_empty() => return Err(ContentError::UnterminatedFrontMatter),
            None => return Err(ContentError::MissingFrontMatter),
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let header = &rest[..offset];
                let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
                return Ok((Self::from_yaml(header)?, body));
            }
            offset += line.len();
        }

        Err(ContentError::UnterminatedFrontMatter)
    }

    fn from_yaml(header: &str) -> Result<Self, ContentError> {
        if header.trim().is_empty() {
            return Ok(FrontMatter::default());
        }
        Ok(serde_yaml::from_str::<FrontMatter>(header)?)
    }

    /// Parse the date field into a calendar date
    pub fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in various formats, keeping only the calendar date
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // RFC 3339 keeps the date as written, not shifted to another zone
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
author: Jane
tags:
  - rust
  - ai
description: A first post
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.author.as_deref(), Some("Jane"));
        assert_eq!(fm.tags, Some(vec!["rust".to_string(), "ai".to_string()]));
        assert_eq!(fm.description.as_deref(), Some("A first post"));
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_parse_flow_list_and_single_tag() {
        let (fm, _) = FrontMatter::parse("---\ntags: [a, b]\n---\n").unwrap();
        assert_eq!(fm.tags, Some(vec!["a".to_string(), "b".to_string()]));

        let (fm, _) = FrontMatter::parse("---\ntags: Notes\n---\n").unwrap();
        assert_eq!(fm.tags, Some(vec!["Notes".to_string()]));
    }

    #[test]
    fn test_missing_tags_is_none() {
        let (fm, _) = FrontMatter::parse("---\ntitle: x\n---\nbody").unwrap();
        assert_eq!(fm.tags, None);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\n\r\nBody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_missing_header() {
        let err = FrontMatter::parse("# Just markdown\n\nNo header.").unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontMatter));
    }

    #[test]
    fn test_unterminated_header() {
        let err = FrontMatter::parse("---\ntitle: Oops\n\nbody without end").unwrap_err();
        assert!(matches!(err, ContentError::UnterminatedFrontMatter));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = FrontMatter::parse("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, ContentError::InvalidFrontMatter(_)));
    }

    #[test]
    fn test_horizontal_rule_in_body_is_kept() {
        let content = "---\ntitle: Rules\n---\nabove\n\n---\n\nbelow\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Rules"));
        assert!(body.contains("above"));
        assert!(body.contains("below"));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date_string("2024-01-15"), Some(expected));
        assert_eq!(parse_date_string("2024/01/15"), Some(expected));
        assert_eq!(parse_date_string("2024-01-15 10:30:00"), Some(expected));
        assert_eq!(parse_date_string("2024-01-15T23:30:00+09:00"), Some(expected));
        assert_eq!(parse_date_string("yesterday"), None);
    }
}
