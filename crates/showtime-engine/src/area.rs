//! Area alias resolution.
//!
//! Listings are stored under a fixed set of canonical area names, but people
//! ask for neighbourhoods ("日比谷", "表参道") that fall inside one of those
//! areas. [`AreaAliases`] is built once at startup and is read-only afterwards.

use std::collections::{HashMap, HashSet};

use crate::error::{CatalogError, Result};

/// Alias → canonical area table for central Tokyo.
const TOKYO_ALIASES: &[(&str, &str)] = &[
    ("日比谷", "有楽町"),
    ("丸の内", "有楽町"),
    ("銀座・有楽町", "有楽町"),
    ("東京駅", "日本橋"),
    ("秋葉原", "上野"),
    ("原宿", "渋谷"),
    ("表参道", "渋谷"),
    ("青山", "渋谷"),
    ("新大久保", "新宿"),
    ("歌舞伎町", "新宿"),
    ("代官山", "恵比寿"),
    ("中目黒", "恵比寿"),
    ("自由が丘", "二子玉川"),
    ("三軒茶屋", "下北沢"),
    ("巣鴨", "大塚"),
    ("浅草", "上野"),
    ("押上", "錦糸町"),
    ("スカイツリー", "錦糸町"),
    ("東京ドーム", "水道橋"),
    ("後楽園", "水道橋"),
];

/// Maps alias area names to the canonical names used in listing data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaAliases {
    aliases: HashMap<String, String>,
}

impl AreaAliases {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// The built-in central Tokyo table.
    pub fn builtin() -> Self {
        Self::new(
            TOKYO_ALIASES
                .iter()
                .map(|(alias, area)| (alias.to_string(), area.to_string()))
                .collect(),
        )
    }

    /// Parse a JSON object of `{ "alias": "area" }` pairs.
    ///
    /// # Errors
    /// Returns [`CatalogError::Aliases`] if the document is not such an object.
    pub fn from_json(json: &str) -> Result<Self> {
        let aliases: HashMap<String, String> =
            serde_json::from_str(json).map_err(CatalogError::Aliases)?;
        Ok(Self::new(aliases))
    }

    /// Add or override entries, returning the merged table.
    pub fn extend(mut self, other: AreaAliases) -> Self {
        self.aliases.extend(other.aliases);
        self
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Canonical name for `area`, or `area` itself when it is not an alias.
    pub fn resolve<'a>(&'a self, area: &'a str) -> &'a str {
        self.aliases.get(area).map(String::as_str).unwrap_or(area)
    }

    /// Resolve every name and drop duplicates, keeping first-seen order.
    ///
    /// ```
    /// use showtime_engine::AreaAliases;
    ///
    /// let aliases = AreaAliases::builtin();
    /// let areas = ["日比谷".to_string(), "有楽町".to_string(), "新宿".to_string()];
    /// assert_eq!(aliases.resolve_all(&areas), vec!["有楽町", "新宿"]);
    /// ```
    pub fn resolve_all(&self, areas: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        areas
            .iter()
            .map(|area| self.resolve(area))
            .filter(|area| seen.insert(*area))
            .map(str::to_string)
            .collect()
    }
}
