//! Search-box autosuggest over a fixed list of popular items.

use serde::Serialize;

/// Inputs this short or shorter get no suggestions.
const MIN_INPUT_CHARS: usize = 1;
const MAX_SUGGESTIONS: usize = 5;
/// Chips shown under an empty search box.
const POPULAR_CHIP_COUNT: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub items: Vec<String>,
    pub visible: bool,
}

/// Filters the popular-items list against in-progress input.
#[derive(Debug, Clone, Default)]
pub struct SuggestionFilter {
    popular: Vec<String>,
}

impl SuggestionFilter {
    #[must_use]
    pub fn new(popular: Vec<String>) -> Self {
        Self { popular }
    }

    /// Up to five popular items containing `input`, case-insensitively.
    ///
    /// Input of one character or less yields hidden, empty suggestions.
    #[must_use]
    pub fn suggest(&self, input: &str) -> Suggestions {
        if input.chars().count() <= MIN_INPUT_CHARS {
            return Suggestions::default();
        }

        let needle = input.to_lowercase();
        let items = self
            .popular
            .iter()
            .filter(|item| item.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect();

        Suggestions {
            items,
            visible: true,
        }
    }

    #[must_use]
    pub fn popular_chips(&self) -> &[String] {
        let end = self.popular.len().min(POPULAR_CHIP_COUNT);
        &self.popular[..end]
    }
}
