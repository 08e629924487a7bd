//! The input alphabet understood by the automata
//!
//! Printable ASCII from space (0x20) through `~` (0x7E), plus horizontal tab.
//! Anything else never appears on a transition, so it can only cause a
//! rejection.

use std::ops::RangeInclusive;

/// The printable range, space through `~`
pub const SUPPORTED: RangeInclusive<char> = ' '..='~';

/// Horizontal tab, the one supported non-printable symbol
pub const TAB: char = '\t';

/// The terminal value that stands for epsilon rather than a literal hyphen
pub const EPSILON_SENTINEL: char = '-';

/// Every supported symbol: space through `~`, then tab
pub fn symbols() -> impl Iterator<Item = char> {
    SUPPORTED.chain(std::iter::once(TAB))
}

/// Check whether a character belongs to the supported alphabet
pub fn is_supported(c: char) -> bool {
    c == TAB || SUPPORTED.contains(&c)
}
