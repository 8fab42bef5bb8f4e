use std::mem;

use num_traits::{One, WrappingAdd};

/// Monotonic counter handing out unique tags, one per call.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Sequence<T>(T);

impl<T: One + WrappingAdd> Sequence<T> {
    pub fn new(value: T) -> Self {
        Sequence(value)
    }

    pub fn advance(&mut self) -> T {
        let next = self.0.wrapping_add(&T::one());
        mem::replace(&mut self.0, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_returns_consecutive_tags() {
        let mut seq = Sequence::new(1u64);
        assert_eq!(seq.advance(), 1);
        assert_eq!(seq.advance(), 2);
        assert_eq!(seq.advance(), 3);
    }
}
