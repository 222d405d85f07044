//! Credits extraction
//!
//! Collects work links from a filmography table. Work titles on the site are
//! italicized links (`<i><a href="...">Title</a></i>`); links that are not
//! the very next token after an `<i>` are ignored.

use super::AttributePolicy;
use crate::tokens::{Token, TokenStream};
use crate::url::resolve_href;

/// Collects absolute work URLs until the first `</table>`
///
/// After every `<i>` exactly one more token is consumed; if it is an `<a>`,
/// its link (see [`AttributePolicy::anchor_href`]) is joined onto
/// `base_url`. Results keep document order and are not deduplicated.
///
/// # Example
///
/// ```
/// use cinegraph::scan::{extract_credits, AttributePolicy};
/// use cinegraph::tokens::TokenStream;
///
/// let stream = TokenStream::from_html(
///     r#"<tr><td><i><a href="/wiki/Film_A">Film A</a></i></td></tr></table>"#,
/// );
/// let works = extract_credits(stream, "https://en.wikipedia.org", AttributePolicy::Positional);
/// assert_eq!(works, vec!["https://en.wikipedia.org/wiki/Film_A".to_string()]);
/// ```
pub fn extract_credits(
    mut stream: TokenStream,
    base_url: &str,
    policy: AttributePolicy,
) -> Vec<String> {
    let mut works = Vec::new();

    loop {
        match stream.next_token() {
            Token::End => {
                tracing::debug!("Filmography table not closed before end of document");
                break;
            }
            Token::Close(name) if name == "table" => break,
            Token::Open(tag) if tag.is("i") => match stream.next_token() {
                Token::End => break,
                Token::Open(anchor) if anchor.is("a") => match policy.anchor_href(&anchor) {
                    Some(href) => {
                        let work = resolve_href(base_url, href);
                        tracing::trace!("Found work: {}", work);
                        works.push(work);
                    }
                    None => tracing::trace!("Skipping italic anchor without attributes"),
                },
                _ => {}
            },
            _ => {}
        }
    }

    works
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{filmography_marker, locate};

    const BASE: &str = "https://en.wikipedia.org";

    fn credits(html: &str, policy: AttributePolicy) -> Vec<String> {
        let stream = locate(TokenStream::from_html(html), filmography_marker)
            .found()
            .expect("filmography marker");
        extract_credits(stream, BASE, policy)
    }

    #[test]
    fn test_two_films_in_order() {
        let works = credits(
            r#"<h2><span id="Filmography">Filmography</span></h2>
               <table class="wikitable">
                 <tr><td>2001</td><td><i><a href="/wiki/Film_A">Film A</a></i></td></tr>
                 <tr><td>2003</td><td><i><a href="/wiki/Film_B">Film B</a></i></td></tr>
               </table>"#,
            AttributePolicy::Positional,
        );

        assert_eq!(
            works,
            vec![
                format!("{}/wiki/Film_A", BASE),
                format!("{}/wiki/Film_B", BASE),
            ]
        );
    }

    #[test]
    fn test_ignores_links_outside_italics_and_after_table() {
        let works = credits(
            r#"<span id="Films"></span>
               <table>
                 <tr><td><a href="/wiki/Director">Director</a></td>
                     <td><i><a href="/wiki/Film_A">Film A</a></i></td></tr>
               </table>
               <i><a href="/wiki/Not_Credited">Later</a></i>"#,
            AttributePolicy::Positional,
        );

        assert_eq!(works, vec![format!("{}/wiki/Film_A", BASE)]);
    }

    #[test]
    fn test_anchor_must_directly_follow_italic() {
        let works = credits(
            r#"<span id="Film"></span>
               <table><tr><td><i> <a href="/wiki/Spaced">Spaced</a></i></td></tr></table>"#,
            AttributePolicy::Positional,
        );

        assert!(works.is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let works = credits(
            r#"<span id="Film"></span><table>
               <i><a href="/wiki/Film_A">A</a></i><i><a href="/wiki/Film_A">A again</a></i>
               </table>"#,
            AttributePolicy::Positional,
        );

        assert_eq!(works.len(), 2);
        assert_eq!(works[0], works[1]);
    }

    #[test]
    fn test_href_position_depends_on_policy() {
        let html = r#"<span id="Film"></span><table>
                      <i><a title="Film A" href="/wiki/Film_A">A</a></i>
                      </table>"#;

        assert_eq!(
            credits(html, AttributePolicy::Positional),
            vec![format!("{}Film A", BASE)]
        );
        assert_eq!(
            credits(html, AttributePolicy::ByKey),
            vec![format!("{}/wiki/Film_A", BASE)]
        );
    }

    #[test]
    fn test_unclosed_table_ends_at_document_end() {
        let works = credits(
            r#"<span id="Film"></span><table><i><a href="/wiki/Film_A">A</a></i>"#,
            AttributePolicy::Positional,
        );

        assert_eq!(works, vec![format!("{}/wiki/Film_A", BASE)]);
    }
}
