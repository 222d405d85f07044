//! Adapter from the html5ever tokenizer to [`Token`]s
//!
//! html5ever pushes tokens into a sink; the sink here collects them into the
//! simplified token model, merging adjacent character runs into one text
//! token and dropping comments and doctypes. Without a tree builder nobody
//! switches the tokenizer into raw-text mode for `<script>`, `<style>` and
//! friends, so the sink does that itself.

use super::{Attribute, Tag, Token};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token as RawToken, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// Tokenizes a complete HTML document
///
/// The returned vector does not contain [`Token::End`]; wrap it in a
/// [`super::TokenStream`] to get the terminal marker.
///
/// # Example
///
/// ```
/// use cinegraph::tokens::{tokenize, Token};
///
/// let tokens = tokenize(r#"<span class="fn">Jane Doe</span>"#);
/// assert_eq!(tokens[1], Token::Text("Jane Doe".to_string()));
/// ```
pub fn tokenize(html: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(Collector::default(), TokenizerOpts::default());

    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));

    // The sink never returns a script handle, so feeding always runs to completion
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    let mut collector = std::mem::take(&mut tokenizer.sink);
    collector.flush_text();

    tracing::trace!("Tokenized {} bytes into {} tokens", html.len(), collector.tokens.len());
    collector.tokens
}

#[derive(Default)]
struct Collector {
    tokens: Vec<Token>,
    text: String,
}

impl Collector {
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.tokens.push(Token::Text(std::mem::take(&mut self.text)));
        }
    }
}

impl TokenSink for Collector {
    type Handle = ();

    fn process_token(&mut self, token: RawToken, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            RawToken::CharacterTokens(text) => self.text.push_str(&text),

            RawToken::TagToken(tag) => {
                self.flush_text();
                let name = tag.name.to_string();

                match tag.kind {
                    TagKind::StartTag => {
                        let switch = if tag.self_closing {
                            None
                        } else {
                            raw_text_switch(&name)
                        };

                        let attrs = tag
                            .attrs
                            .iter()
                            .map(|attr| Attribute::new(attr.name.local.to_string(), attr.value.to_string()))
                            .collect();

                        self.tokens.push(Token::Open(Tag {
                            name,
                            attrs,
                            self_closing: tag.self_closing,
                        }));

                        if let Some(switch) = switch {
                            return switch;
                        }
                    }
                    TagKind::EndTag => self.tokens.push(Token::Close(name)),
                }
            }

            RawToken::CommentToken(_) | RawToken::DoctypeToken(_) | RawToken::EOFToken => {
                self.flush_text()
            }

            RawToken::NullCharacterToken => {}

            RawToken::ParseError(message) => {
                tracing::trace!("HTML parse error (ignored): {}", message);
            }
        }

        TokenSinkResult::Continue
    }
}

/// Tokenizer state switch for elements whose content is not markup
fn raw_text_switch(name: &str) -> Option<TokenSinkResult<()>> {
    match name {
        "script" => Some(TokenSinkResult::RawData(RawKind::ScriptData)),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
            Some(TokenSinkResult::RawData(RawKind::Rawtext))
        }
        "title" | "textarea" => Some(TokenSinkResult::RawData(RawKind::Rcdata)),
        "plaintext" => Some(TokenSinkResult::Plaintext),
        _ => None,
    }
}
