//! Page analyzer
//!
//! Turns one fetched person page into a [`PersonRecord`]:
//!
//! 1. Locate the infobox and read name and birth date (optional)
//! 2. Rescan the page from the top for a link to a separate filmography page
//!    and, if there is one, fetch it and continue on that page instead
//! 3. Locate the filmography heading (mandatory)
//! 4. Collect the credited works from the table after it
//!
//! Without a filmography page the same page stream is reused for steps 3 and
//! 4, continuing from wherever the infobox pass stopped.

use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::scan::{
    extract_credits, extract_infobox, filmography_marker, find_reference_page, infobox_marker,
    locate, AttributePolicy, Infobox, Located,
};
use crate::state::AnalysisState;
use crate::tokens::TokenStream;
use crate::url::resolve_href;
use chrono::NaiveDate;
use thiserror::Error;

/// Everything learned about a person from their page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    /// URL of the person page
    pub url: String,

    /// Name from the infobox; empty if the page had none
    pub name: String,

    /// Birth date from the infobox
    pub birthdate: Option<NaiveDate>,

    /// Absolute URLs of credited works, in document order
    pub work_urls: Vec<String>,
}

/// Why a person page produced no record
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to fetch filmography page {url}: {source}")]
    ReferencePage {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("No filmography section found for {url}")]
    FilmographyNotFound { url: String },
}

/// What analyzing a work page produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOutcome {
    /// Work pages are not analyzed yet
    Unanalyzed,
}

/// Runs the per-page analysis state machine
#[derive(Debug, Clone)]
pub struct PageAnalyzer {
    base_url: String,
    policy: AttributePolicy,
}

impl PageAnalyzer {
    /// Creates an analyzer joining site links onto `base_url`
    pub fn new(base_url: impl Into<String>, policy: AttributePolicy) -> Self {
        Self {
            base_url: base_url.into(),
            policy,
        }
    }

    /// Analyzes a person page whose body has already been fetched
    ///
    /// `fetcher` is only used when the page links to a separate filmography
    /// page.
    ///
    /// # Returns
    ///
    /// * `Ok(PersonRecord)` - The filmography was found (the infobox may not have been)
    /// * `Err(AnalysisError)` - The filmography page could not be fetched or
    ///   no filmography section exists
    pub async fn analyze_person<F: PageFetcher>(
        &self,
        fetcher: &F,
        url: &str,
        body: &str,
    ) -> Result<PersonRecord, AnalysisError> {
        let mut state = AnalysisState::Start;

        let (infobox, page_stream) =
            match locate(TokenStream::from_html(body), infobox_marker(self.policy)) {
                Located::Found(stream) => extract_infobox(stream, self.policy),
                Located::NotFound(stream) => {
                    tracing::debug!("No infobox on {}", url);
                    (Infobox::default(), stream)
                }
            };
        state = advance(url, state, AnalysisState::InfoboxLocated);

        let active = match find_reference_page(TokenStream::from_html(body)) {
            Some(href) => {
                let reference_url = resolve_href(&self.base_url, &href);
                tracing::info!("Following filmography page {} for {}", reference_url, url);

                match fetcher.fetch(&reference_url).await {
                    Ok(reference_body) => TokenStream::from_html(&reference_body),
                    Err(source) => {
                        advance(url, state, AnalysisState::Failed);
                        return Err(AnalysisError::ReferencePage {
                            url: reference_url,
                            source,
                        });
                    }
                }
            }
            None => page_stream,
        };

        let credits = match locate(active, filmography_marker) {
            Located::Found(stream) => stream,
            Located::NotFound(_) => {
                advance(url, state, AnalysisState::Failed);
                return Err(AnalysisError::FilmographyNotFound {
                    url: url.to_string(),
                });
            }
        };
        state = advance(url, state, AnalysisState::FilmographyLocated);

        let work_urls = extract_credits(credits, &self.base_url, self.policy);
        advance(url, state, AnalysisState::Done);

        Ok(PersonRecord {
            url: url.to_string(),
            name: infobox.name,
            birthdate: infobox.birthdate,
            work_urls,
        })
    }

    /// Analyzes a work page
    ///
    /// There is no work analysis yet; the branch exists so every page kind
    /// has a defined path through the analyzer.
    pub fn analyze_work(&self, url: &str) -> WorkOutcome {
        tracing::debug!("Work page {} left unanalyzed", url);
        WorkOutcome::Unanalyzed
    }
}

fn advance(url: &str, from: AnalysisState, to: AnalysisState) -> AnalysisState {
    debug_assert!(from.can_transition_to(to), "{} -> {}", from, to);
    tracing::debug!("{}: {} -> {}", url, from, to);
    to
}
