//! Section locator
//!
//! Skips tokens until an open tag satisfies a marker predicate. The matching
//! tag is consumed, so the returned stream sits on the first token inside the
//! located section. A token that does not match is gone for good.

use super::AttributePolicy;
use crate::tokens::{Tag, Token, TokenStream};

/// `id` values that mark the start of a filmography section
pub const FILMOGRAPHY_IDS: [&str; 3] = ["Film", "Films", "Filmography"];

/// Substring of an anchor `title` that marks a link to a filmography page
pub const REFERENCE_TITLE_KEYWORD: &str = "filmography";

/// Outcome of a [`locate`] scan
///
/// Both variants hand the stream back: positioned just after the marker when
/// found, exhausted otherwise.
#[derive(Debug)]
pub enum Located {
    Found(TokenStream),
    NotFound(TokenStream),
}

impl Located {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the positioned stream if the marker was found
    pub fn found(self) -> Option<TokenStream> {
        match self {
            Self::Found(stream) => Some(stream),
            Self::NotFound(_) => None,
        }
    }
}

/// Scans forward until `matcher` accepts an open tag
///
/// Only open tags are offered to the matcher. Returns
/// [`Located::NotFound`] once the stream reaches its end; that is an
/// ordinary outcome, not an error.
///
/// # Example
///
/// ```
/// use cinegraph::scan::{filmography_marker, locate};
/// use cinegraph::tokens::TokenStream;
///
/// let stream = TokenStream::from_html(r#"<h2><span id="Filmography">Filmography</span></h2>"#);
/// let mut stream = locate(stream, filmography_marker).found().unwrap();
/// assert_eq!(stream.next_token().text(), Some("Filmography"));
/// ```
pub fn locate<M>(mut stream: TokenStream, mut matcher: M) -> Located
where
    M: FnMut(&Tag) -> bool,
{
    loop {
        match stream.next_token() {
            Token::End => return Located::NotFound(stream),
            Token::Open(tag) => {
                if matcher(&tag) {
                    tracing::trace!("Located <{}> after {} tokens", tag.name, stream.position());
                    return Located::Found(stream);
                }
            }
            _ => {}
        }
    }
}

/// Marker for the infobox summary table: `<table class="...infobox...">`
pub fn infobox_marker(policy: AttributePolicy) -> impl Fn(&Tag) -> bool {
    move |tag| {
        tag.is("table")
            && policy
                .lookup(tag, "class")
                .is_some_and(|class| class.contains("infobox"))
    }
}

/// Marker for the filmography heading: `<span id="Film|Films|Filmography">`
pub fn filmography_marker(tag: &Tag) -> bool {
    tag.is("span")
        && tag
            .attrs
            .iter()
            .any(|attr| attr.key == "id" && FILMOGRAPHY_IDS.contains(&attr.value.as_str()))
}

/// Finds the link to a separate filmography page
///
/// Anchors are inspected attribute by attribute. Every `href` seen becomes
/// the candidate; the first `title` containing "filmography" ends the scan
/// and returns the current candidate. The candidate is not reset between
/// anchors, so a title that precedes its own anchor's `href` returns the
/// previous anchor's link (or an empty string if there was none).
pub fn find_reference_page(stream: TokenStream) -> Option<String> {
    let mut href = String::new();

    let located = locate(stream, |tag| {
        if !tag.is("a") {
            return false;
        }

        for attr in &tag.attrs {
            match attr.key.as_str() {
                "href" => href = attr.value.clone(),
                "title" if attr.value.contains(REFERENCE_TITLE_KEYWORD) => return true,
                _ => {}
            }
        }
        false
    });

    located.is_found().then_some(href)
}
