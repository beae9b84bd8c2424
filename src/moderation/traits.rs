// Content filter trait — the swap-ready abstraction for moderation.
//
// Checks are synchronous and pure: a filter holds only immutable policy and
// never performs I/O, so it can run on the submit path right before a
// network call.

/// Outcome of running a filter over a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No flagged language found — the text may be submitted.
    Clean,
    /// At least one flagged term found — the submission must be aborted.
    Flagged,
}

impl Verdict {
    pub fn is_flagged(self) -> bool {
        matches!(self, Verdict::Flagged)
    }
}

impl From<bool> for Verdict {
    fn from(flagged: bool) -> Self {
        if flagged {
            Verdict::Flagged
        } else {
            Verdict::Clean
        }
    }
}

/// Trait for deciding whether user-submitted text contains disallowed language.
pub trait ContentFilter: Send + Sync {
    /// Run the filter over `text` and return its verdict.
    fn verdict(&self, text: &str) -> Verdict;

    /// Shorthand for `verdict(text).is_flagged()`.
    fn is_flagged(&self, text: &str) -> bool {
        self.verdict(text).is_flagged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectEverything;

    impl ContentFilter for RejectEverything {
        fn verdict(&self, _text: &str) -> Verdict {
            Verdict::Flagged
        }
    }

    #[test]
    fn test_is_flagged_follows_verdict() {
        assert!(RejectEverything.is_flagged("anything"));
        assert!(Verdict::Flagged.is_flagged());
        assert!(!Verdict::Clean.is_flagged());
    }

    #[test]
    fn test_verdict_from_bool() {
        assert_eq!(Verdict::from(true), Verdict::Flagged);
        assert_eq!(Verdict::from(false), Verdict::Clean);
    }
}
