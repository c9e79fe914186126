// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Term matching behind the bloom prefilter.
//!
//! The selector is the authoritative check: everything the prefilter admits
//! (including its false positives) goes through `select`, which decides the
//! match and produces the term-level score that the engine multiplies by
//! path strength. A selector is built once per query from the query terms
//! and reused across every candidate.

use smallvec::SmallVec;

use proxima_core::Element;

/// Per-candidate scratch carrying the selector score.
#[derive(Debug, Default)]
pub struct SelectorContext {
    score: f64,
}

impl SelectorContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.score = 0.0;
    }
}

/// Match predicate for one query against one element.
pub trait Selector<E: Element> {
    /// Returns whether `element` matches; on a match, leaves the selector
    /// score in `ctx`.
    fn select(&self, element: &E, ctx: &mut SelectorContext) -> bool;
}

/// Builds a [`Selector`] from the query terms. Configured at engine
/// construction; implementations range from literal prefix matching to
/// compiled n-gram matchers.
pub trait SelectorFactory<E: Element>: Send + Sync {
    fn create_selector(&self, terms: &[&str]) -> Box<dyn Selector<E>>;
}

/// Case-insensitive prefix matcher.
///
/// Every query term must be a prefix of at least one element term. The
/// score is the mean prefix coverage (query chars over matched-term chars,
/// best match per query term) times the element's baseline score, so
/// longer typed prefixes and shorter matched terms rank higher.
pub struct PrefixSelector {
    terms: SmallVec<[String; 4]>,
}

impl PrefixSelector {
    pub fn new(terms: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    fn best_coverage(query: &str, elem_terms: &[String]) -> Option<f64> {
        let qlen = query.chars().count();
        if qlen == 0 {
            return None;
        }
        let mut best: Option<f64> = None;
        for term in elem_terms {
            let lowered = term.to_lowercase();
            if lowered.starts_with(query) {
                let cover = qlen as f64 / lowered.chars().count().max(1) as f64;
                best = Some(best.map_or(cover, |b: f64| b.max(cover)));
            }
        }
        best
    }
}

impl<E: Element> Selector<E> for PrefixSelector {
    fn select(&self, element: &E, ctx: &mut SelectorContext) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        let mut sum = 0.0;
        for query in &self.terms {
            match Self::best_coverage(query, element.terms()) {
                Some(cover) => sum += cover,
                None => return false,
            }
        }
        ctx.set_score(sum / self.terms.len() as f64 * element.score());
        true
    }
}

/// Factory for [`PrefixSelector`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PrefixSelectorFactory;

impl<E: Element> SelectorFactory<E> for PrefixSelectorFactory {
    fn create_selector(&self, terms: &[&str]) -> Box<dyn Selector<E>> {
        Box::new(PrefixSelector::new(terms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxima_core::TermElement;

    fn elem(terms: Vec<&str>) -> TermElement {
        TermElement::new(1, 0, terms)
    }

    #[test]
    fn test_prefix_match() {
        let selector = PrefixSelector::new(&["al"]);
        let mut ctx = SelectorContext::new();
        assert!(selector.select(&elem(vec!["alice", "smith"]), &mut ctx));
        // "al" covers 2 of 5 chars of "alice".
        assert!((ctx.score() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_all_terms_must_match() {
        let selector = PrefixSelector::new(&["al", "jo"]);
        let mut ctx = SelectorContext::new();
        assert!(!selector.select(&elem(vec!["alice", "smith"]), &mut ctx));
        assert!(selector.select(&elem(vec!["alice", "jones"]), &mut ctx));
    }

    #[test]
    fn test_case_insensitive() {
        let selector = PrefixSelector::new(&["AL"]);
        let mut ctx = SelectorContext::new();
        assert!(selector.select(&elem(vec!["Alice"]), &mut ctx));
    }

    #[test]
    fn test_best_match_wins() {
        // "bo" matches both "bob" (2/3) and "bonnie" (2/6); best wins.
        let selector = PrefixSelector::new(&["bo"]);
        let mut ctx = SelectorContext::new();
        assert!(selector.select(&elem(vec!["bonnie", "bob"]), &mut ctx));
        assert!((ctx.score() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_score_scales() {
        let selector = PrefixSelector::new(&["bob"]);
        let mut ctx = SelectorContext::new();
        let boosted = elem(vec!["bob"]).with_score(3.0);
        assert!(selector.select(&boosted, &mut ctx));
        assert!((ctx.score() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_prefix_rejected() {
        let selector = PrefixSelector::new(&["lice"]);
        let mut ctx = SelectorContext::new();
        assert!(!selector.select(&elem(vec!["alice"]), &mut ctx));
    }

    #[test]
    fn test_context_clear() {
        let mut ctx = SelectorContext::new();
        ctx.set_score(0.7);
        ctx.clear();
        assert_eq!(ctx.score(), 0.0);
    }
}
