//! Front-matter parsing

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::error::Result;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
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

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a post in a collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub lastmod: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    /// Cover image; `images` is accepted as an alias and its first entry wins
    pub image: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub authors: Vec<String>,
    pub draft: bool,
    #[serde(rename = "canonicalUrl")]
    pub canonical_url: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        parse_front_matter(content)
    }

    /// Cover image, falling back to the first of `images`
    pub fn cover_image(&self) -> Option<String> {
        self.image
            .clone()
            .or_else(|| self.images.first().cloned())
            .filter(|s| !s.trim().is_empty())
    }

    /// Parse the date string in the given timezone
    pub fn parse_date(&self, tz: Tz) -> Option<DateTime<FixedOffset>> {
        self.date.as_deref().and_then(|s| parse_date_string(s, tz))
    }

    /// Parse the last-modified string in the given timezone
    pub fn parse_lastmod(&self, tz: Tz) -> Option<DateTime<FixedOffset>> {
        self.lastmod.as_deref().and_then(|s| parse_date_string(s, tz))
    }
}

/// A front-matter block found at the top of a document
enum Block<'a> {
    Yaml(&'a str),
    Json(&'a str),
}

/// Parse any front-matter shape (posts, authors) from the top of a document.
///
/// Documents without front-matter yield `T::default()` and the whole input.
pub fn parse_front_matter<T>(content: &str) -> Result<(T, &str)>
where
    T: DeserializeOwned + Default,
{
    let content = content.trim_start();

    match split_block(content) {
        Some((Block::Yaml(yaml), body)) => {
            if yaml.trim().is_empty() {
                return Ok((T::default(), body));
            }
            Ok((serde_yaml::from_str(yaml)?, body))
        }
        Some((Block::Json(json), body)) => Ok((serde_json::from_str(json)?, body)),
        None => Ok((T::default(), content)),
    }
}

fn split_block(content: &str) -> Option<(Block<'_>, &str)> {
    if let Some(rest) = content.strip_prefix("---") {
        let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;
        // Closing fence right away: an empty block
        if let Some(body) = rest.strip_prefix("---") {
            if body.is_empty() || body.starts_with(['\n', '\r']) {
                return Some((Block::Yaml(""), body.trim_start_matches(['\n', '\r'])));
            }
        }
        let end = rest.find("\n---")?;
        let yaml = &rest[..end];
        if !yaml.trim().is_empty() && !looks_like_yaml(yaml) {
            return None;
        }
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);
        return Some((Block::Yaml(yaml), body));
    }

    if let Some(rest) = content.strip_prefix(";;;") {
        let end = rest.find(";;;")?;
        let body = rest[end + 3..].trim_start_matches(['\n', '\r']);
        return Some((Block::Json(&rest[..end]), body));
    }

    None
}

/// A `---` fenced block only counts as front-matter if some line is a `key: value` pair.
/// Markdown that uses `---` as a thematic break must stay content.
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            return false;
        };
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp")
            && (value.is_empty() || value.starts_with(' '))
    })
}

/// Parse a date string in various formats; naive values are taken in `tz`
pub fn parse_date_string(s: &str, tz: Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    let naive = datetime_formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d", "%Y/%m/%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}
