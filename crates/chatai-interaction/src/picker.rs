//! Reply selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Capability to pick one of `len` options.
///
/// Implementations must return an index below `len`; `len` is never zero.
pub trait ReplyPicker: Send {
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform picker over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPicker<R = StdRng> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<StdRng> {
    /// Deterministic picker; the same seed yields the same reply sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> ReplyPicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Picks `choices[picker.pick(len)]`.
pub(crate) fn choose<'a>(picker: &mut dyn ReplyPicker, choices: &'a [String]) -> &'a str {
    // Reply books are validated non-empty before a dispatcher is built.
    let index = picker.pick(choices.len()).min(choices.len() - 1);
    &choices[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_pickers_agree() {
        let mut a = RngPicker::seeded(42);
        let mut b = RngPicker::seeded(42);

        let first: Vec<_> = (0..20).map(|_| a.pick(3)).collect();
        let second: Vec<_> = (0..20).map(|_| b.pick(3)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_stays_in_range() {
        let mut picker = RngPicker::from_entropy();
        for len in 1..10 {
            for _ in 0..50 {
                assert!(picker.pick(len) < len);
            }
        }
    }

    #[test]
    fn test_choose_clamps_out_of_range_picks() {
        struct Wild;
        impl ReplyPicker for Wild {
            fn pick(&mut self, _len: usize) -> usize {
                usize::MAX
            }
        }

        let choices = vec!["a".to_string(), "b".to_string()];
        assert_eq!(choose(&mut Wild, &choices), "b");
    }
}
