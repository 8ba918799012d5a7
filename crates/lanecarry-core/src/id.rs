//! Arena epoch identifiers.

use std::fmt;

/// Validity period of arena allocations.
///
/// The arena advances its epoch every time the backing region is
/// recycled or torn down. A handle issued in epoch `n` may only be
/// resolved while the arena is still in epoch `n`; afterwards the
/// memory it pointed at has been zeroed and handed out again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Epoch(pub u32);

impl Epoch {
    /// The epoch of a freshly constructed arena.
    pub const INITIAL: Epoch = Epoch(0);

    /// The epoch that follows this one, or `None` on counter overflow.
    pub fn next(self) -> Option<Epoch> {
        self.0.checked_add(1).map(Epoch)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_advances_by_one() {
        assert_eq!(Epoch(3).next(), Some(Epoch(4)));
        assert_eq!(Epoch::INITIAL.next(), Some(Epoch(1)));
    }

    #[test]
    fn next_saturates_to_none() {
        assert_eq!(Epoch(u32::MAX).next(), None);
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(Epoch(17).to_string(), "17");
    }
}
