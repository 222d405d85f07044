use std::fmt;

/// States a person page passes through while it is analyzed
///
/// ```text
/// Start -> InfoboxLocated -> FilmographyLocated -> Done
///   (any non-terminal state) -> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisState {
    /// Nothing has been scanned yet
    Start,

    /// The infobox pass finished (an absent infobox still reaches this state)
    InfoboxLocated,

    /// The filmography heading was found on the active page
    FilmographyLocated,

    /// Credits were extracted and the record assembled
    Done,

    /// The target was abandoned
    Failed,
}

impl AnalysisState {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if moving from `self` to `next` follows the state machine
    pub fn can_transition_to(&self, next: AnalysisState) -> bool {
        match (self, next) {
            (Self::Start, Self::InfoboxLocated)
            | (Self::InfoboxLocated, Self::FilmographyLocated)
            | (Self::FilmographyLocated, Self::Done) => true,
            (current, Self::Failed) => !current.is_terminal(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::InfoboxLocated => "infobox_located",
            Self::FilmographyLocated => "filmography_located",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns all analysis states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Start,
            Self::InfoboxLocated,
            Self::FilmographyLocated,
            Self::Done,
            Self::Failed,
        ]
    }
}

impl fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
