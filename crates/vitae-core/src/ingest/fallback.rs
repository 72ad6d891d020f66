//! Ordered extraction strategies, tried until one produces text.

use crate::error::Result;

type StrategyFn<S> = fn(&S) -> Result<String>;

struct Step<S: ?Sized> {
    name: &'static str,
    run: StrategyFn<S>,
}

/// An ordered list of text extraction strategies over some input `S`.
///
/// Strategies run in insertion order; the first one whose output contains
/// anything besides whitespace wins. An error from a strategy stops the
/// chain and is returned to the caller, which decides whether it is fatal
/// (a whole document) or absorbable (a single page).
pub struct FallbackChain<S: ?Sized> {
    steps: Vec<Step<S>>,
}

impl<S: ?Sized> FallbackChain<S> {
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    #[must_use]
    pub fn then(mut self, name: &'static str, run: StrategyFn<S>) -> Self {
        self.steps.push(Step { name, run });
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|s| s.name)
    }

    /// Returns the winning strategy's name with its text, or `None` when
    /// every strategy came back empty.
    pub fn run(&self, input: &S) -> Result<Option<(&'static str, String)>> {
        for step in &self.steps {
            let text = (step.run)(input)?;
            if !text.trim().is_empty() {
                return Ok(Some((step.name, text)));
            }
            tracing::trace!(strategy = step.name, "strategy produced no text");
        }
        Ok(None)
    }
}

impl<S: ?Sized> Default for FallbackChain<S> {
    fn default() -> Self {
        Self::new()
    }
}
