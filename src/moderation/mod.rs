// Content moderation — client-side check for unkind language.
//
// The ContentFilter trait is the seam the app controller depends on.
// WordListFilter implements it with an ordered list of flagged terms matched
// as whole words. Only comments pass through it today; post bodies do not.

pub mod traits;
pub mod wordlist;

/// Warning shown when a comment is rejected by the filter.
pub const KINDNESS_WARNING: &str = "Please be kind — hurtful or abusive comments are not allowed";
