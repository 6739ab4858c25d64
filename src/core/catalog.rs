use std::{fmt, str::FromStr};

use serde::Serialize;

pub const THEMES: &[&str] = &["light", "dark", "midnight", "sunset"];
pub const DEFAULT_THEME: &str = "light";

pub fn is_known_theme(theme: &str) -> bool {
    THEMES.contains(&theme)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Distribution,
    Marketing,
    Legal,
    Production,
    Funding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Guide,
    Tool,
    Template,
    Service,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: ResourceCategory,
    pub tags: &'static [&'static str],
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'static str>,
}

const RESOURCES: &[ResourceEntry] = &[
    ResourceEntry {
        id: "distributor-comparison",
        title: "Choosing a digital distributor",
        description: "Fee structures, payout splits and pitching tools of the major distributors.",
        category: ResourceCategory::Distribution,
        tags: &["distribution", "fees", "streaming"],
        kind: ResourceKind::Guide,
        url: None,
    },
    ResourceEntry {
        id: "spotify-for-artists",
        title: "Spotify for Artists",
        description: "Pitch unreleased music to editorial playlists and track listener stats.",
        category: ResourceCategory::Distribution,
        tags: &["streaming", "playlists", "analytics"],
        kind: ResourceKind::Tool,
        url: Some("https://artists.spotify.com"),
    },
    ResourceEntry {
        id: "isrc-explained",
        title: "ISRC codes explained",
        description: "What ISRC codes are, who issues them and when you need your own.",
        category: ResourceCategory::Legal,
        tags: &["metadata", "royalties"],
        kind: ResourceKind::Guide,
        url: None,
    },
    ResourceEntry {
        id: "split-sheet",
        title: "Songwriter split sheet",
        description: "Agree on ownership percentages before the song is released.",
        category: ResourceCategory::Legal,
        tags: &["royalties", "contracts", "songwriting"],
        kind: ResourceKind::Template,
        url: None,
    },
    ResourceEntry {
        id: "pro-registration",
        title: "Registering with a PRO",
        description: "Collect performance royalties by registering works with a rights \
                      organization.",
        category: ResourceCategory::Legal,
        tags: &["royalties", "publishing"],
        kind: ResourceKind::Guide,
        url: None,
    },
    ResourceEntry {
        id: "presave-campaigns",
        title: "Running a pre-save campaign",
        description: "Turn release announcements into day-one streams.",
        category: ResourceCategory::Marketing,
        tags: &["presave", "streaming", "fans"],
        kind: ResourceKind::Guide,
        url: None,
    },
    ResourceEntry {
        id: "content-calendar",
        title: "Release content calendar",
        description: "Six-week posting schedule for teasers, snippets and release day.",
        category: ResourceCategory::Marketing,
        tags: &["social", "tiktok", "instagram"],
        kind: ResourceKind::Template,
        url: None,
    },
    ResourceEntry {
        id: "epk-template",
        title: "Electronic press kit",
        description: "Bio, photos, links and press quotes in one shareable page.",
        category: ResourceCategory::Marketing,
        tags: &["press", "pr"],
        kind: ResourceKind::Template,
        url: None,
    },
    ResourceEntry {
        id: "mastering-checklist",
        title: "Mastering delivery checklist",
        description: "Loudness targets, file formats and what to send your mastering engineer.",
        category: ResourceCategory::Production,
        tags: &["mastering", "audio"],
        kind: ResourceKind::Guide,
        url: None,
    },
    ResourceEntry {
        id: "cover-art-specs",
        title: "Cover art specifications",
        description: "Size, format and content rules enforced by streaming stores.",
        category: ResourceCategory::Production,
        tags: &["artwork", "design"],
        kind: ResourceKind::Guide,
        url: None,
    },
    ResourceEntry {
        id: "arts-grants",
        title: "Grants for independent musicians",
        description: "Public and private funding programs that cover recording and touring costs.",
        category: ResourceCategory::Funding,
        tags: &["grants", "budget"],
        kind: ResourceKind::Service,
        url: None,
    },
];

pub fn resources() -> &'static [ResourceEntry] {
    RESOURCES
}

pub fn find_resource(id: &str) -> Option<&'static ResourceEntry> {
    RESOURCES.iter().find(|entry| entry.id == id)
}

#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub category: Option<ResourceCategory>,
    pub tag: Option<String>,
    pub query: Option<String>,
}

impl ResourceFilter {
    pub fn matches(&self, entry: &ResourceEntry) -> bool {
        if self.category.is_some_and(|category| category != entry.category) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !entry.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            if !entry.title.to_lowercase().contains(&query)
                && !entry.description.to_lowercase().contains(&query)
            {
                return false;
            }
        }
        true
    }

    pub fn apply(&self) -> Vec<&'static ResourceEntry> {
        RESOURCES.iter().filter(|entry| self.matches(entry)).collect()
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceCategory::Distribution => "distribution",
            ResourceCategory::Marketing => "marketing",
            ResourceCategory::Legal => "legal",
            ResourceCategory::Production => "production",
            ResourceCategory::Funding => "funding",
        };
        f.write_str(name)
    }
}

impl FromStr for ResourceCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "distribution" => Ok(ResourceCategory::Distribution),
            "marketing" => Ok(ResourceCategory::Marketing),
            "legal" => Ok(ResourceCategory::Legal),
            "production" => Ok(ResourceCategory::Production),
            "funding" => Ok(ResourceCategory::Funding),
            _ => Err(format!("unknown resource category: {value}")),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Guide => "guide",
            ResourceKind::Tool => "tool",
            ResourceKind::Template => "template",
            ResourceKind::Service => "service",
        };
        f.write_str(name)
    }
}
