//! Selection resolver: picks one candidate out of a search result.
//!
//! `Init -> Searching -> {Resolved, Cancelled, Failed}`. A single candidate is
//! taken without asking; several are handed to a [`Chooser`], whose reply is a
//! 1-based index, `0` to cancel, or anything else (invalid).
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{NO_RATING, RawCandidate, UNKNOWN};

/// Outcome of a search request that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Empty,
    /// Candidates in upstream order.
    Found(Vec<RawCandidate>),
}

/// External capability that shows candidates and returns the raw reply.
/// `None` means the reply channel closed, which is treated as a cancel.
pub trait Chooser {
    fn choose(&mut self, candidates: &[RawCandidate]) -> Option<String>;
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SelectionState {
    Init,
    Searching,
    Resolved,
    Cancelled,
    Failed,
}

#[derive(Debug)]
pub enum Resolution {
    Resolved(RawCandidate),
    Cancelled,
    Failed(Error),
}

/// Parsed chooser reply.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Selection {
    Cancel,
    Index(usize),
}

#[derive(Debug)]
pub struct SelectionResolver {
    state: SelectionState,
}

impl Default for SelectionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionResolver {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Init,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Marks the search as in flight. Only valid from `Init`.
    pub fn begin_search(&mut self) {
        if self.state == SelectionState::Init {
            self.state = SelectionState::Searching;
        }
    }

    /// Consumes the search result and moves to a terminal state.
    pub fn resolve<C: Chooser + ?Sized>(
        &mut self,
        search: Result<SearchOutcome>,
        chooser: &mut C,
    ) -> Resolution {
        self.begin_search();

        let resolution = match search {
            Err(e) => Resolution::Failed(e),
            Ok(SearchOutcome::Empty) => {
                Resolution::Failed(Error::NotFound("search returned no titles".to_string()))
            }
            Ok(SearchOutcome::Found(mut candidates)) => match candidates.len() {
                0 => Resolution::Failed(Error::NotFound(
                    "search returned no titles".to_string(),
                )),
                1 => {
                    let only = candidates.remove(0);
                    info!(
                        "Auto-selected the only match: {}",
                        only.name.as_deref().unwrap_or(UNKNOWN)
                    );
                    Resolution::Resolved(only)
                }
                count => {
                    let reply = chooser.choose(&candidates);
                    debug!("Chooser replied {:?} for {} candidates", reply, count);
                    match reply {
                        None => Resolution::Cancelled,
                        Some(input) => match parse_selection(&input, count) {
                            Ok(Selection::Cancel) => Resolution::Cancelled,
                            Ok(Selection::Index(i)) => {
                                Resolution::Resolved(candidates.swap_remove(i - 1))
                            }
                            Err(e) => Resolution::Failed(e),
                        },
                    }
                }
            },
        };

        self.state = match &resolution {
            Resolution::Resolved(_) => SelectionState::Resolved,
            Resolution::Cancelled => SelectionState::Cancelled,
            Resolution::Failed(_) => SelectionState::Failed,
        };
        resolution
    }
}

/// Parse a chooser reply against `count` candidates.
pub fn parse_selection(input: &str, count: usize) -> Result<Selection> {
    let trimmed = input.trim();
    let invalid = || Error::InvalidSelection {
        input: trimmed.to_string(),
    };
    let n: usize = trimmed.parse().map_err(|_| invalid())?;
    match n {
        0 => Ok(Selection::Cancel),
        n if n <= count => Ok(Selection::Index(n)),
        _ => Err(invalid()),
    }
}

/// One listing line: `{i}. {name} ({alt}) - {year} - ★ {rating}`.
pub fn format_candidate_line(index: usize, candidate: &RawCandidate) -> String {
    let name = candidate.name.as_deref().unwrap_or(UNKNOWN);
    let year = candidate
        .year
        .map_or_else(|| UNKNOWN.to_string(), |y| y.to_string());
    let rating = candidate
        .rating_kp()
        .map_or_else(|| NO_RATING.to_string(), |r| r.to_string());

    match candidate.alternative_name.as_deref() {
        Some(alt) if !alt.is_empty() && alt != name => {
            format!("{index}. {name} ({alt}) - {year} - ★ {rating}")
        }
        _ => format!("{index}. {name} - {year} - ★ {rating}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::types::Rating;
    use pretty_assertions::assert_eq;

    /// Replays a fixed reply and counts how often it was asked.
    struct ScriptedChooser {
        reply: Option<String>,
        calls: usize,
    }

    impl ScriptedChooser {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: 0,
            }
        }
    }

    impl Chooser for ScriptedChooser {
        fn choose(&mut self, _candidates: &[RawCandidate]) -> Option<String> {
            self.calls += 1;
            self.reply.clone()
        }
    }

    fn candidates(n: u64) -> Vec<RawCandidate> {
        (1..=n)
            .map(|i| RawCandidate {
                id: Some(i),
                name: Some(format!("Title {i}")),
                ..RawCandidate::default()
            })
            .collect()
    }

    #[test]
    fn single_candidate_resolves_without_chooser() {
        let mut resolver = SelectionResolver::new();
        let mut chooser = ScriptedChooser::replying("2");
        let res = resolver.resolve(Ok(SearchOutcome::Found(candidates(1))), &mut chooser);

        assert!(matches!(res, Resolution::Resolved(ref c) if c.id == Some(1)));
        assert_eq!(chooser.calls, 0);
        assert_eq!(resolver.state(), SelectionState::Resolved);
    }

    #[test]
    fn empty_search_fails_with_not_found() {
        let mut resolver = SelectionResolver::new();
        let mut chooser = ScriptedChooser::replying("1");
        let res = resolver.resolve(Ok(SearchOutcome::Empty), &mut chooser);

        match res {
            Resolution::Failed(e) => assert_eq!(e.kind(), FailureKind::NotFound),
            other => panic!("unexpected resolution: {other:?}"),
        }
        assert_eq!(resolver.state(), SelectionState::Failed);
        assert_eq!(chooser.calls, 0);
    }

    #[test]
    fn search_failure_passes_through() {
        let mut resolver = SelectionResolver::new();
        let mut chooser = ScriptedChooser::replying("1");
        let res = resolver.resolve(Err(Error::RateLimited), &mut chooser);
        assert!(matches!(res, Resolution::Failed(Error::RateLimited)));
        assert_eq!(resolver.state(), SelectionState::Failed);
    }

    #[test]
    fn zero_cancels() {
        let mut resolver = SelectionResolver::new();
        let mut chooser = ScriptedChooser::replying("0");
        let res = resolver.resolve(Ok(SearchOutcome::Found(candidates(3))), &mut chooser);
        assert!(matches!(res, Resolution::Cancelled));
        assert_eq!(resolver.state(), SelectionState::Cancelled);
        assert_eq!(chooser.calls, 1);
    }

    #[test]
    fn out_of_range_is_invalid_selection() {
        let mut resolver = SelectionResolver::new();
        let mut chooser = ScriptedChooser::replying("7");
        let res = resolver.resolve(Ok(SearchOutcome::Found(candidates(3))), &mut chooser);
        match res {
            Resolution::Failed(e) => assert_eq!(e.kind(), FailureKind::InvalidSelection),
            other => panic!("unexpected resolution: {other:?}"),
        }
        assert_eq!(resolver.state(), SelectionState::Failed);
    }

    #[test]
    fn valid_index_picks_that_candidate() {
        let mut resolver = SelectionResolver::new();
        let mut chooser = ScriptedChooser::replying(" 3\n");
        let res = resolver.resolve(Ok(SearchOutcome::Found(candidates(3))), &mut chooser);
        assert!(matches!(res, Resolution::Resolved(ref c) if c.id == Some(3)));
    }

    #[test]
    fn closed_chooser_cancels() {
        let mut resolver = SelectionResolver::new();
        let mut chooser = ScriptedChooser {
            reply: None,
            calls: 0,
        };
        let res = resolver.resolve(Ok(SearchOutcome::Found(candidates(2))), &mut chooser);
        assert!(matches!(res, Resolution::Cancelled));
    }

    #[test]
    fn parse_selection_rejects_garbage() {
        assert!(parse_selection("abc", 3).is_err());
        assert!(parse_selection("-1", 3).is_err());
        assert!(parse_selection("", 3).is_err());
        assert_eq!(parse_selection("0", 3).unwrap(), Selection::Cancel);
        assert_eq!(parse_selection("1", 3).unwrap(), Selection::Index(1));
    }

    #[test]
    fn state_starts_at_init_then_searching() {
        let mut resolver = SelectionResolver::new();
        assert_eq!(resolver.state(), SelectionState::Init);
        resolver.begin_search();
        assert_eq!(resolver.state(), SelectionState::Searching);
    }

    #[test]
    fn candidate_line_shows_alternate_name_only_when_different() {
        let mut c = RawCandidate {
            id: Some(1),
            name: Some("Начало".to_string()),
            alternative_name: Some("Inception".to_string()),
            year: Some(2010),
            rating: Some(Rating {
                kp: Some(8.7),
                imdb: None,
            }),
        };
        assert_eq!(
            format_candidate_line(1, &c),
            "1. Начало (Inception) - 2010 - ★ 8.7"
        );

        c.alternative_name = Some("Начало".to_string());
        assert_eq!(format_candidate_line(1, &c), "1. Начало - 2010 - ★ 8.7");

        c.year = None;
        c.rating = None;
        assert_eq!(
            format_candidate_line(2, &c),
            format!("2. Начало - {UNKNOWN} - ★ {NO_RATING}")
        );
    }
}
