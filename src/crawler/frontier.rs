//! Crawl frontier
//!
//! A plain FIFO of pending targets. The frontier does not deduplicate: the
//! same URL can be queued and processed more than once (the coordinator's
//! optional visited set is the place to filter repeats).

use serde::Deserialize;
use std::collections::VecDeque;
use std::fmt;

/// What kind of entity a page describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// A person with an infobox and a filmography
    Person,

    /// A film or other work a person is credited in
    Work,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Work => "work",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A page waiting to be crawled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Absolute page URL
    pub url: String,

    /// Kind of page, which selects the analysis branch
    pub kind: PageKind,
}

impl Target {
    pub fn new(url: impl Into<String>, kind: PageKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

/// First-in-first-out queue of pending targets
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Target>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding `targets` in order
    pub fn with_targets(targets: impl IntoIterator<Item = Target>) -> Self {
        Self {
            queue: targets.into_iter().collect(),
        }
    }

    /// Adds a target at the back of the queue
    pub fn enqueue(&mut self, target: Target) {
        tracing::trace!("Enqueued {} target {}", target.kind, target.url);
        self.queue.push_back(target);
    }

    /// Removes the oldest target
    ///
    /// Returns `None` when the frontier is empty, which is how a crawl
    /// learns it has run out of work.
    pub fn dequeue(&mut self) -> Option<Target> {
        self.queue.pop_front()
    }

    /// Returns the number of pending targets
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterates pending targets from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.queue.iter()
    }
}
