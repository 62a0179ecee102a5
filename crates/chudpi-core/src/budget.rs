//! Thread budgets for fork-join recursion.
//!
//! A budget is a plain value handed down the recursion. Each call splits the
//! budget it received between its children; nothing shared is ever mutated.

use std::fmt;

/// Number of concurrent execution units available to a recursive call.
///
/// Budgets of 0 and 1 both mean "run sequentially from here down".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadBudget(usize);

impl ThreadBudget {
    /// A budget that never fans out.
    pub const SEQUENTIAL: Self = Self(1);

    /// Create a budget of `threads` execution units.
    #[must_use]
    pub const fn new(threads: usize) -> Self {
        Self(threads)
    }

    /// The raw number of execution units.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Split between the two halves of a range: `(t/2, t - t/2)`.
    ///
    /// The two parts always sum to the parent budget.
    #[must_use]
    pub const fn split_pair(self) -> (Self, Self) {
        let left = self.0 / 2;
        (Self(left), Self(self.0 - left))
    }

    /// Whether this budget covers a fan-out of `width` concurrent tasks.
    #[must_use]
    pub const fn allows(self, width: usize) -> bool {
        self.0 >= width
    }
}

impl Default for ThreadBudget {
    fn default() -> Self {
        Self::SEQUENTIAL
    }
}

impl From<usize> for ThreadBudget {
    fn from(threads: usize) -> Self {
        Self::new(threads)
    }
}

impl fmt::Display for ThreadBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
