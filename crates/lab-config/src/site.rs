//! Site configuration record handed to the site generator.
//!
//! Serializes to the shape the generator consumes: `title`, `hero` (with
//! `homeLink`) and `sidebar`, where sidebar entries are either bare page
//! slugs or `{ label, items }` groups.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::expand::expand_env;
use crate::{ConfigError, ModeKey, require_non_empty};

/// Landing page headline, subtitle and link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    /// Headline.
    pub tagline: String,
    /// Text under the headline.
    pub subtitle: String,
    /// Link target of the call-to-action (e.g. `/intro/welcome/`).
    #[serde(rename = "homeLink", alias = "home_link")]
    pub home_link: String,
}

impl HeroContent {
    /// Page slug the home link points at (`/intro/welcome/` -> `intro/welcome`).
    #[must_use]
    pub fn home_slug(&self) -> &str {
        self.home_link.trim_matches('/')
    }
}

/// Sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarNode {
    /// Page reference by slug (e.g. `intro/welcome`).
    Leaf(String),
    /// Labelled group of nested entries.
    Group {
        /// Group heading.
        label: String,
        /// Entries in display order.
        items: Vec<SidebarNode>,
    },
}

impl SidebarNode {
    /// Create a page reference.
    pub fn leaf(slug: impl Into<String>) -> Self {
        Self::Leaf(slug.into())
    }

    /// Create a labelled group.
    pub fn group(label: impl Into<String>, items: Vec<SidebarNode>) -> Self {
        Self::Group {
            label: label.into(),
            items,
        }
    }

    /// Page slugs of this subtree, depth-first in declaration order.
    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs = Vec::new();
        self.collect_slugs(&mut slugs);
        slugs
    }

    fn collect_slugs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Leaf(slug) => out.push(slug),
            Self::Group { items, .. } => {
                for item in items {
                    item.collect_slugs(out);
                }
            }
        }
    }

    fn validate_groups(&self, field: &str) -> Result<(), ConfigError> {
        if let Self::Group { label, items } = self {
            require_non_empty(label, &format!("{field}.label"))?;
            if items.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{field}.items: group '{label}' has no entries"
                )));
            }
            for (i, item) in items.iter().enumerate() {
                item.validate_groups(&format!("{field}.items[{i}]"))?;
            }
        }
        Ok(())
    }
}

/// Fully resolved configuration for one mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title used for page metadata.
    pub title: String,
    /// Landing page content.
    pub hero: HeroContent,
    /// Navigation tree.
    #[serde(default)]
    pub sidebar: Vec<SidebarNode>,
}

impl SiteConfig {
    /// Page slugs of the whole sidebar, depth-first in declaration order.
    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs = Vec::new();
        for node in &self.sidebar {
            node.collect_slugs(&mut slugs);
        }
        slugs
    }

    /// Check whether the sidebar references `slug`.
    #[must_use]
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.slugs().contains(&slug)
    }

    /// Validate the record for `mode`.
    ///
    /// Rejects empty titles and labels, groups without entries, malformed or
    /// duplicated slugs, and a home link that does not point at a page in the sidebar.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the offending field.
    pub fn validate(&self, mode: &ModeKey) -> Result<(), ConfigError> {
        let field = |name: &str| format!("modes.{mode}.{name}");

        require_non_empty(&self.title, &field("title"))?;
        require_non_empty(&self.hero.home_link, &field("hero.home_link"))?;
        if !self.hero.home_link.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{} must start with '/', got '{}'",
                field("hero.home_link"),
                self.hero.home_link
            )));
        }

        for (i, node) in self.sidebar.iter().enumerate() {
            node.validate_groups(&field(&format!("sidebar[{i}]")))?;
        }

        let mut seen = HashSet::new();
        for slug in self.slugs() {
            require_non_empty(slug, &field("sidebar"))?;
            if slug.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{}: slug '{slug}' must not start with '/'",
                    field("sidebar")
                )));
            }
            if !seen.insert(slug) {
                return Err(ConfigError::Validation(format!(
                    "{}: duplicate slug '{slug}'",
                    field("sidebar")
                )));
            }
        }

        let home = self.hero.home_slug();
        if !seen.contains(home) {
            return Err(ConfigError::Validation(format!(
                "{} '{}' does not match any sidebar page",
                field("hero.home_link"),
                self.hero.home_link
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in string fields.
    pub(crate) fn expand_env_vars(&mut self, mode: &str) -> Result<(), ConfigError> {
        let field = |name: &str| format!("modes.{mode}.{name}");

        self.title = expand_env(&self.title, &field("title"))?;
        self.hero.tagline = expand_env(&self.hero.tagline, &field("hero.tagline"))?;
        self.hero.subtitle = expand_env(&self.hero.subtitle, &field("hero.subtitle"))?;
        self.hero.home_link = expand_env(&self.hero.home_link, &field("hero.home_link"))?;
        Ok(())
    }
}
