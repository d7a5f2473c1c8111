//! Response matching.
//!
//! Resolves a user's response against the menu items. Matching runs in one
//! of three text modes (prefix, substring search, or fuzzy word matching),
//! optionally preceded by an index lookup, and falls back to an exact match
//! to break ties.

use log::debug;

use crate::config::MatchOptions;
use crate::items::ItemList;

/// The outcome of matching one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<'a> {
    /// The response was empty and there is no default
    Empty,
    /// The response was empty and the default item should be used
    UseDefault,
    /// No item matches the response
    NoMatch,
    /// Exactly one item matches the response
    Unique(&'a str),
    /// Several items match; listed in item order
    Ambiguous(Vec<&'a str>),
}

/// Resolves `response` against `items`.
///
/// In indexed mode a response made only of digits that names a valid
/// position selects that item outright. Any other response (including an
/// out-of-range number) goes through text matching.
///
/// # Examples
///
/// ```
/// use rust_picks_core::config::MatchOptions;
/// use rust_picks_core::items::ItemList;
/// use rust_picks_core::matching::{resolve, MatchResult};
///
/// let items = ItemList::normalize(["red", "blue", "green", "black"], false)?;
/// let options = MatchOptions::default();
///
/// assert_eq!(
///     resolve("b", &items, &options, false),
///     MatchResult::Ambiguous(vec!["blue", "black"])
/// );
/// assert_eq!(resolve("bla", &items, &options, false), MatchResult::Unique("black"));
/// # Ok::<(), rust_picks_core::error::Error>(())
/// ```
#[must_use]
pub fn resolve<'a>(
    response: &str,
    items: &'a ItemList,
    options: &MatchOptions,
    has_default: bool,
) -> MatchResult<'a> {
    if options.indexed {
        if let Some(item) = lookup_index(response, items) {
            debug!("Response `{response}` selected item `{item}` by index");
            return MatchResult::Unique(item);
        }
    }

    if response.is_empty() {
        return if has_default {
            MatchResult::UseDefault
        } else {
            MatchResult::Empty
        };
    }

    let candidates = find_candidates(response, items, options);
    debug!(
        "Response `{response}` has {} {} candidate(s)",
        candidates.len(),
        mode_name(options)
    );

    match candidates.len() {
        0 => MatchResult::NoMatch,
        1 => MatchResult::Unique(candidates[0]),
        _ => match disambiguate(response, &candidates, options) {
            Some(item) => MatchResult::Unique(item),
            None => MatchResult::Ambiguous(candidates),
        },
    }
}

/// Returns every item matching `response` under the active mode, in item order.
#[must_use]
pub fn find_candidates<'a>(
    response: &str,
    items: &'a ItemList,
    options: &MatchOptions,
) -> Vec<&'a str> {
    let response_key = options.comparison_key(response);
    let response_words: Vec<&str> = response_key.split_whitespace().collect();

    items
        .iter()
        .filter(|item| {
            let item_key = options.comparison_key(item);
            if options.fuzzy {
                let item_words: Vec<&str> = item_key.split_whitespace().collect();
                assign_words(&response_words, &item_words, None).is_some()
            } else if options.search {
                item_key.contains(response_key.as_str())
            } else {
                item_key.starts_with(response_key.as_str())
            }
        })
        .collect()
}

/// Finds an assignment of each needle to a distinct word containing it.
///
/// Returns, for each needle, the index of the word it was assigned to, or
/// `None` if no complete one-to-one assignment exists. The word at `excluded`
/// (if any) is never used. Needles with the fewest candidate words are placed
/// first; ties keep needle order.
#[must_use]
pub fn assign_words(
    needles: &[&str],
    words: &[&str],
    excluded: Option<usize>,
) -> Option<Vec<usize>> {
    let available = words.len() - usize::from(excluded.is_some_and(|e| e < words.len()));
    if needles.len() > available {
        return None;
    }

    let candidates: Vec<Vec<usize>> = needles
        .iter()
        .map(|needle| {
            words
                .iter()
                .enumerate()
                .filter(|(index, word)| Some(*index) != excluded && word.contains(needle))
                .map(|(index, _)| index)
                .collect()
        })
        .collect();

    let mut order: Vec<usize> = (0..needles.len()).collect();
    order.sort_by_key(|&needle| candidates[needle].len());

    let mut owners: Vec<Option<usize>> = vec![None; words.len()];
    for needle in order {
        let mut visited = vec![false; words.len()];
        if !try_assign(needle, &candidates, &mut owners, &mut visited) {
            return None;
        }
    }

    let mut assignment = vec![0; needles.len()];
    for (word, owner) in owners.iter().enumerate() {
        if let Some(needle) = owner {
            assignment[*needle] = word;
        }
    }
    Some(assignment)
}

/// Augmenting-path step: gives `needle` a word, moving earlier needles to
/// other words if that frees one up.
fn try_assign(
    needle: usize,
    candidates: &[Vec<usize>],
    owners: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &word in &candidates[needle] {
        if visited[word] {
            continue;
        }
        visited[word] = true;

        let reassigned = match owners[word] {
            None => true,
            Some(other) => try_assign(other, candidates, owners, visited),
        };
        if reassigned {
            owners[word] = Some(needle);
            return true;
        }
    }
    false
}

fn lookup_index<'a>(response: &str, items: &'a ItemList) -> Option<&'a str> {
    if response.is_empty() || !response.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Too large for usize is simply out of range
    response.parse::<usize>().ok().and_then(|index| items.get(index))
}

/// Picks the single candidate equal to the response, if there is exactly one.
fn disambiguate<'a>(
    response: &str,
    candidates: &[&'a str],
    options: &MatchOptions,
) -> Option<&'a str> {
    let response_key = options.comparison_key(response);
    let mut exact = candidates.iter().filter(|candidate| {
        let candidate_key = options.comparison_key(candidate);
        if options.fuzzy {
            same_words(&response_key, &candidate_key)
        } else {
            candidate_key == response_key
        }
    });

    match (exact.next(), exact.next()) {
        (Some(item), None) => Some(*item),
        _ => None,
    }
}

/// Whether both texts hold the same bag of words, ignoring order.
fn same_words(left: &str, right: &str) -> bool {
    let mut left_words: Vec<&str> = left.split_whitespace().collect();
    let mut right_words: Vec<&str> = right.split_whitespace().collect();
    left_words.sort_unstable();
    right_words.sort_unstable();
    left_words == right_words
}

fn mode_name(options: &MatchOptions) -> &'static str {
    if options.fuzzy {
        "fuzzy"
    } else if options.search {
        "search"
    } else {
        "prefix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(raw: &[&str]) -> ItemList {
        ItemList::normalize(raw, false).unwrap()
    }

    fn fuzzy() -> MatchOptions {
        MatchOptions {
            fuzzy: true,
            ..MatchOptions::default()
        }
    }

    #[test]
    fn test_prefix_match() {
        let list = items(&["red", "blue", "green", "black", "grey", "white"]);
        let options = MatchOptions::default();

        assert_eq!(
            resolve("b", &list, &options, false),
            MatchResult::Ambiguous(vec!["blue", "black"])
        );
        assert_eq!(
            resolve("bla", &list, &options, false),
            MatchResult::Unique("black")
        );
        assert_eq!(
            resolve("gre", &list, &options, false),
            MatchResult::Ambiguous(vec!["green", "grey"])
        );
        assert_eq!(resolve("x", &list, &options, false), MatchResult::NoMatch);
    }

    #[test]
    fn test_prefix_does_not_search_inside() {
        let list = items(&["pizza hut", "taco bell"]);
        assert_eq!(
            resolve("bell", &list, &MatchOptions::default(), false),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn test_exact_match_breaks_tie() {
        let list = items(&["foo", "foo bar"]);
        assert_eq!(
            resolve("foo", &list, &MatchOptions::default(), false),
            MatchResult::Unique("foo")
        );
    }

    #[test]
    fn test_empty_response() {
        let list = items(&["yes", "no"]);
        let options = MatchOptions::default();
        assert_eq!(resolve("", &list, &options, false), MatchResult::Empty);
        assert_eq!(resolve("", &list, &options, true), MatchResult::UseDefault);
    }

    #[test]
    fn test_indexed_lookup() {
        let list = items(&["yes", "no", "maybe"]);
        let options = MatchOptions {
            indexed: true,
            ..MatchOptions::default()
        };
        assert_eq!(
            resolve("1", &list, &options, false),
            MatchResult::Unique("no")
        );
        assert_eq!(
            resolve("0", &list, &options, true),
            MatchResult::Unique("yes")
        );
    }

    #[test]
    fn test_indexed_lookup_wins_over_text() {
        let list = items(&["1st", "2nd", "1"]);
        let options = MatchOptions {
            indexed: true,
            ..MatchOptions::default()
        };
        assert_eq!(
            resolve("1", &list, &options, false),
            MatchResult::Unique("2nd")
        );
    }

    #[test]
    fn test_out_of_range_index_falls_through_to_text() {
        let list = items(&["100", "200", "300"]);
        let options = MatchOptions {
            indexed: true,
            ..MatchOptions::default()
        };
        assert_eq!(
            resolve("3", &list, &options, false),
            MatchResult::Unique("300")
        );
        assert_eq!(
            resolve("20", &list, &options, false),
            MatchResult::Unique("200")
        );
        assert_eq!(
            resolve("99999999999999999999999", &list, &options, false),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn test_digits_ignored_when_not_indexed() {
        let list = items(&["yes", "no"]);
        assert_eq!(
            resolve("1", &list, &MatchOptions::default(), false),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn test_case_insensitive_preserves_item_case() {
        let list = items(&["FOO", "BAR", "BAZ"]);
        let options = MatchOptions {
            case_insensitive: true,
            ..MatchOptions::default()
        };
        assert_eq!(
            resolve("Foo", &list, &options, false),
            MatchResult::Unique("FOO")
        );
        assert_eq!(
            resolve("baZ", &list, &options, false),
            MatchResult::Unique("BAZ")
        );
        assert_eq!(
            resolve("ba", &list, &options, false),
            MatchResult::Ambiguous(vec!["BAR", "BAZ"])
        );
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let list = items(&["FOO", "BAR"]);
        assert_eq!(
            resolve("foo", &list, &MatchOptions::default(), false),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn test_search_mode() {
        let list = items(&["pizza hut", "taco bell", "dairy queen"]);
        let options = MatchOptions {
            search: true,
            ..MatchOptions::default()
        };
        assert_eq!(
            resolve("queen", &list, &options, false),
            MatchResult::Unique("dairy queen")
        );
        assert_eq!(
            resolve("e", &list, &options, false),
            MatchResult::Ambiguous(vec!["taco bell", "dairy queen"])
        );
        assert_eq!(
            resolve("Queen", &list, &options, false),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn test_fuzzy_word_assignment() {
        let list = items(&["a blue thing", "one green thing"]);
        let options = fuzzy();

        assert_eq!(
            resolve("thing", &list, &options, false),
            MatchResult::Ambiguous(vec!["a blue thing", "one green thing"])
        );
        assert_eq!(
            resolve("thing e", &list, &options, false),
            MatchResult::Ambiguous(vec!["a blue thing", "one green thing"])
        );
        assert_eq!(
            resolve("thing e e", &list, &options, false),
            MatchResult::Unique("one green thing")
        );
        assert_eq!(
            resolve("thing blue", &list, &options, false),
            MatchResult::Unique("a blue thing")
        );
    }

    #[test]
    fn test_fuzzy_insensitive() {
        let list = items(&["a BLUE thing", "one GREEN thing"]);
        let options = MatchOptions {
            fuzzy: true,
            case_insensitive: true,
            ..MatchOptions::default()
        };
        assert_eq!(
            resolve("THING", &list, &options, false),
            MatchResult::Ambiguous(vec!["a BLUE thing", "one GREEN thing"])
        );
        assert_eq!(
            resolve("thing e e", &list, &options, false),
            MatchResult::Unique("one GREEN thing")
        );
        assert_eq!(
            resolve("thing blue", &list, &options, false),
            MatchResult::Unique("a BLUE thing")
        );
    }

    #[test]
    fn test_fuzzy_repeated_word_needs_distinct_item_words() {
        let list = items(&["thing", "thing thing"]);
        assert_eq!(
            resolve("thing thing", &list, &fuzzy(), false),
            MatchResult::Unique("thing thing")
        );
    }

    #[test]
    fn test_fuzzy_exact_bag_of_words_breaks_tie() {
        let list = items(&["foo", "foo bar", "foo bar baz"]);
        let options = fuzzy();
        assert_eq!(
            resolve("oo", &list, &options, false),
            MatchResult::Ambiguous(vec!["foo", "foo bar", "foo bar baz"])
        );
        assert_eq!(
            resolve("bar foo", &list, &options, false),
            MatchResult::Unique("foo bar")
        );
        assert_eq!(
            resolve("baz", &list, &options, false),
            MatchResult::Unique("foo bar baz")
        );
    }

    #[test]
    fn test_assign_words_requires_augmenting_path() {
        // Greedy in needle order would give "e" to "green" and strand "gr".
        let words = ["green", "blue"];
        assert_eq!(assign_words(&["e", "gr"], &words, None), Some(vec![1, 0]));
    }

    #[test]
    fn test_assign_words_respects_exclusion() {
        let words = ["goodbye", "hector"];
        assert_eq!(assign_words(&["he"], &words, Some(0)), Some(vec![1]));
        assert_eq!(assign_words(&["he"], &words, Some(1)), None);
        assert_eq!(assign_words(&["he", "goodbye"], &words, Some(1)), None);
    }

    #[test]
    fn test_assign_words_too_many_needles() {
        assert_eq!(assign_words(&["a", "a", "a"], &["aa", "ab"], None), None);
    }

    #[test]
    fn test_every_item_resolves_to_itself() {
        let raw = ["alpha", "alphabet", "al", "beta", "bet", "b"];
        let list = items(&raw);
        for options in [
            MatchOptions::default(),
            MatchOptions {
                search: true,
                ..MatchOptions::default()
            },
            MatchOptions {
                case_insensitive: true,
                ..MatchOptions::default()
            },
        ] {
            for item in raw {
                assert_eq!(
                    resolve(item, &list, &options, false),
                    MatchResult::Unique(item),
                    "{item} under {options:?}"
                );
            }
        }
    }
}
