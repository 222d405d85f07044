//! Token scanners for person pages
//!
//! Every scanner walks a [`TokenStream`](crate::tokens::TokenStream)
//! forward and never rewinds it:
//!
//! - `locator`: finds a structural marker (infobox table, filmography
//!   heading, filmography reference link)
//! - `infobox`: reads the subject name and birth date out of the infobox
//! - `credits`: collects the work links out of a filmography table

mod credits;
mod infobox;
mod locator;

pub use credits::extract_credits;
pub use infobox::{extract_infobox, parse_birthdate, Infobox, BIRTHDATE_FORMAT};
pub use locator::{
    filmography_marker, find_reference_page, infobox_marker, locate, Located, FILMOGRAPHY_IDS,
    REFERENCE_TITLE_KEYWORD,
};

use crate::tokens::Tag;
use serde::Deserialize;

/// How scanners find an attribute they care about on a tag
///
/// Site markup puts `class` first on infobox tables and `href` first on
/// filmography anchors, and the scanners historically only looked at that
/// first position. `Positional` keeps that behavior; `ByKey` looks the
/// attribute up by name anywhere in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributePolicy {
    /// Only the first attribute is inspected, and it must carry the key
    #[default]
    Positional,

    /// The attribute is looked up by key
    ByKey,
}

impl AttributePolicy {
    /// Returns the value of `key` on `tag` according to this policy
    pub fn lookup<'a>(&self, tag: &'a Tag, key: &str) -> Option<&'a str> {
        match self {
            Self::Positional => tag
                .first_attr()
                .filter(|attr| attr.key == key)
                .map(|attr| attr.value.as_str()),
            Self::ByKey => tag.attr(key),
        }
    }

    /// Returns an anchor's link target according to this policy
    ///
    /// The positional policy takes the first attribute's value whatever its
    /// key is, because that slot is assumed to hold `href`.
    pub fn anchor_href<'a>(&self, anchor: &'a Tag) -> Option<&'a str> {
        match self {
            Self::Positional => anchor.first_attr().map(|attr| attr.value.as_str()),
            Self::ByKey => anchor.attr("href"),
        }
    }
}
