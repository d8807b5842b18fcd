//! Sponsorship records as delivered by a [`SponsorSource`](crate::source::SponsorSource)
//!
//! The JSON shape uses camelCase keys so that the manifest written by the
//! `json` output format can be fed back in as a source.

use serde::{Deserialize, Serialize};

/// Whether the sponsor is a person or an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SponsorKind {
    User,
    Organization,
}

/// Identity of a paying entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    #[serde(rename = "type")]
    pub kind: SponsorKind,
    pub login: String,
    pub name: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

impl Sponsor {
    /// Create a user sponsor without a link
    pub fn user(
        login: impl Into<String>,
        name: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        Self {
            kind: SponsorKind::User,
            login: login.into(),
            name: name.into(),
            avatar_url: avatar_url.into(),
            link_url: None,
        }
    }

    /// Set the external link the glyph points to
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrivacyLevel {
    Public,
    Private,
}

/// A sponsor's paid relationship with the account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsorship {
    pub sponsor: Sponsor,
    pub monthly_dollars: f64,
    pub privacy_level: PrivacyLevel,
    #[serde(default)]
    pub tier_name: String,
    /// RFC 3339 timestamp; compared lexically for ordering
    pub created_at: String,
    #[serde(default)]
    pub is_one_time: bool,
}

impl Sponsorship {
    /// A public, recurring sponsorship
    pub fn new(sponsor: Sponsor, monthly_dollars: f64, created_at: impl Into<String>) -> Self {
        Self {
            sponsor,
            monthly_dollars,
            privacy_level: PrivacyLevel::Public,
            tier_name: String::new(),
            created_at: created_at.into(),
            is_one_time: false,
        }
    }
}
