//! Sources of random slot indices.
use tiny_rng::{Rand, Rng};

/// A source of uniformly distributed indices.
pub trait RandomSource {
    /// Returns an integer in `0..bound`.
    ///
    /// PRECONDITION: `bound > 0`
    fn next_below(&mut self, bound: u64) -> u64;
}

impl RandomSource for Rng {
    fn next_below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be positive");
        self.rand_bounded_u64(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: u64) -> u64 {
        (**self).next_below(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_below(&mut self, bound: u64) -> u64 {
        (**self).next_below(bound)
    }
}

/// Replays a fixed sequence of draws.
///
/// Each draw is reduced modulo the requested bound. Once the script runs out it starts
/// over from the beginning. An empty script always draws 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedDraws {
    draws: Vec<u64>,
    next: usize,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = u64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            next: 0,
        }
    }

    /// The number of draws made so far, modulo the script length.
    pub fn position(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedDraws {
    fn next_below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be positive");
        match self.draws.get(self.next) {
            None => 0,
            Some(draw) => {
                self.next = (self.next + 1) % self.draws.len();
                draw % bound
            }
        }
    }
}

/// Returns a generator seeded from the current time.
///
/// Nothing about the sequence it produces is reproducible.
pub fn time_seeded_rng() -> Rng {
    Rng::from_time()
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use tiny_rng::Rng;

    #[test]
    fn scripted_draws_replay_in_order() {
        let mut draws = ScriptedDraws::new([2, 2, 0]);
        assert_eq!(draws.next_below(3), 2);
        assert_eq!(draws.next_below(3), 2);
        assert_eq!(draws.next_below(3), 0);
        assert_eq!(draws.position(), 0);
        // The script starts over.
        assert_eq!(draws.next_below(3), 2);
    }

    #[test]
    fn scripted_draws_are_reduced_modulo_bound() {
        let mut draws = ScriptedDraws::new([7, 10]);
        assert_eq!(draws.next_below(5), 2);
        assert_eq!(draws.next_below(5), 0);
    }

    #[test]
    fn empty_script_draws_zero() {
        let mut draws = ScriptedDraws::default();
        assert_eq!(draws.next_below(10), 0);
        assert_eq!(draws.next_below(1), 0);
    }

    #[test]
    fn sources_work_through_references_and_boxes() {
        fn draw<R: RandomSource>(mut source: R) -> u64 {
            source.next_below(10)
        }

        let mut draws = ScriptedDraws::new([4, 5]);
        assert_eq!(draw(&mut draws), 4);
        assert_eq!(draws.position(), 1);

        let boxed: Box<dyn RandomSource> = Box::new(ScriptedDraws::new([9]));
        assert_eq!(draw(boxed), 9);
    }

    #[test]
    fn rng_covers_every_index() {
        let mut rng = Rng::from_seed(0);
        let mut seen = [false; 10];
        for _ in 0..1_000 {
            seen[rng.next_below(10) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn bound_of_one_always_draws_zero() {
        let mut rng = time_seeded_rng();
        for _ in 0..100 {
            assert_eq!(rng.next_below(1), 0);
        }
    }

    #[test]
    fn rng_draws_match_the_bounded_generator() {
        let mut source = Rng::from_seed(7);
        let mut reference = Rng::from_seed(7);
        for _ in 0..5 {
            assert_eq!(source.next_below(10), reference.rand_bounded_u64(10));
        }
    }

    proptest! {
        #[test]
        fn rng_stays_below_bound(seed in any::<u64>(), bound in 1..u64::MAX) {
            let mut rng = Rng::from_seed(seed);
            for _ in 0..16 {
                prop_assert!(rng.next_below(bound) < bound);
            }
        }
    }
}
