//! Infobox extraction
//!
//! Reads the subject's name and birth date from the summary table. The
//! stream must already be positioned inside the table (see
//! [`super::infobox_marker`]).

use super::AttributePolicy;
use crate::tokens::{Token, TokenStream};
use chrono::NaiveDate;

/// Layout of the text inside a `bday` span (`YYYY-MM-DD`)
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

/// Facts read out of an infobox
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Infobox {
    /// Subject name; empty when no `fn` span was seen
    pub name: String,

    /// Birth date; `None` when missing or unparsable
    pub birthdate: Option<NaiveDate>,
}

/// Parses a birth date written as `YYYY-MM-DD`
///
/// Only the exact zero-padded layout is accepted; chrono alone would also
/// take short years, unpadded fields and surrounding whitespace.
pub fn parse_birthdate(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(text, BIRTHDATE_FORMAT).ok()
}

/// Extracts name and birth date up to the first `</table>`
///
/// A `<span>` whose class (under `policy`) is exactly `fn` takes the next
/// token's text as the name; `bday` parses the next token's text as the
/// birth date. The token after a marker span is consumed whatever it is.
/// Nested tables are not tracked: the first `</table>` ends the infobox.
/// Returns the stream positioned right after that close tag.
pub fn extract_infobox(mut stream: TokenStream, policy: AttributePolicy) -> (Infobox, TokenStream) {
    let mut infobox = Infobox::default();

    loop {
        match stream.next_token() {
            Token::End => {
                tracing::debug!("Infobox not closed before end of document");
                break;
            }
            Token::Close(name) if name == "table" => break,
            Token::Open(tag) if tag.is("span") => match policy.lookup(&tag, "class") {
                Some("fn") => {
                    if let Token::Text(name) = stream.next_token() {
                        tracing::debug!("Subject name: {}", name);
                        infobox.name = name;
                    }
                }
                Some("bday") => {
                    let token = stream.next_token();
                    infobox.birthdate = token.text().and_then(parse_birthdate);
                    tracing::debug!("Subject birthdate: {:?} (from {:?})", infobox.birthdate, token);
                }
                _ => {}
            },
            _ => {}
        }
    }

    (infobox, stream)
}
