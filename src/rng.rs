use rand::rngs::OsRng;
use rand::{Rng, SeedableRng, TryRngCore};
use rand_chacha::{ChaCha20Rng, ChaCha8Rng};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RngError {
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(String),
}

/// Entropy capability the engine shuffles and draws with.
///
/// Implementations must return a uniformly distributed integer in `[0, max]`
/// or fail; they must never degrade to a biased fallback.
pub trait RandomSource {
    fn uniform_index(&mut self, max: usize) -> Result<usize, RngError>;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn uniform_index(&mut self, max: usize) -> Result<usize, RngError> {
        (**self).uniform_index(max)
    }
}

/// Adapts any `rand` generator into a [`RandomSource`].
///
/// ```
/// use bingo_poker::rng::{RandomSource, RngSource};
///
/// let mut a = RngSource::seeded(7);
/// let mut b = RngSource::seeded(7);
/// assert_eq!(a.uniform_index(51).unwrap(), b.uniform_index(51).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<ChaCha8Rng> {
    /// Deterministic source for reproducible fixtures and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RngSource<ChaCha20Rng> {
    /// Production source seeded once from the operating system.
    pub fn from_os() -> Result<Self, RngError> {
        let rng = ChaCha20Rng::try_from_os_rng()
            .map_err(|e| RngError::RandomnessUnavailable(e.to_string()))?;
        Ok(Self::new(rng))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform_index(&mut self, max: usize) -> Result<usize, RngError> {
        Ok(self.rng.random_range(0..=max))
    }
}

/// Reads every index straight from the OS entropy pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSource;

impl RandomSource for OsSource {
    fn uniform_index(&mut self, max: usize) -> Result<usize, RngError> {
        let next = || {
            OsRng.try_next_u64().map_err(|e| RngError::RandomnessUnavailable(e.to_string()))
        };
        let bound = max as u64;
        if bound == u64::MAX {
            return Ok(next()? as usize);
        }
        let span = bound + 1;
        // 2^64 mod span; values at or above 2^64 - rem would bias the low residues.
        let rem = (u64::MAX % span + 1) % span;
        loop {
            let x = next()?;
            if rem == 0 || x < 0u64.wrapping_sub(rem) {
                return Ok((x % span) as usize);
            }
        }
    }
}

/// In-place Fisher–Yates shuffle.
///
/// Slices of length 0 or 1 are returned untouched and consume no randomness.
///
/// ```
/// use bingo_poker::rng::{shuffle, RngSource};
///
/// let mut xs = [1, 2, 3, 4, 5];
/// shuffle(&mut xs, &mut RngSource::seeded(1)).unwrap();
/// let mut sorted = xs;
/// sorted.sort();
/// assert_eq!(sorted, [1, 2, 3, 4, 5]);
/// ```
pub fn shuffle<T, S>(items: &mut [T], rng: &mut S) -> Result<(), RngError>
where
    S: RandomSource + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.uniform_index(i)?;
        items.swap(i, j);
    }
    Ok(())
}

/// Owned variant of [`shuffle`].
pub fn shuffled<T, S>(mut items: Vec<T>, rng: &mut S) -> Result<Vec<T>, RngError>
where
    S: RandomSource + ?Sized,
{
    shuffle(&mut items, rng)?;
    Ok(items)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Source that always fails, for exercising the fatal path.
    pub(crate) struct Broken;

    impl RandomSource for Broken {
        fn uniform_index(&mut self, _max: usize) -> Result<usize, RngError> {
            Err(RngError::RandomnessUnavailable("entropy pool closed".into()))
        }
    }

    /// Replays a fixed script of indices, clamped to the requested bound.
    pub(crate) struct Scripted(pub Vec<usize>);

    impl RandomSource for Scripted {
        fn uniform_index(&mut self, max: usize) -> Result<usize, RngError> {
            let v = if self.0.is_empty() { 0 } else { self.0.remove(0) };
            Ok(v.min(max))
        }
    }

    #[test]
    fn degenerate_inputs_are_unchanged() {
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut Broken).unwrap();
        let mut one = [9];
        shuffle(&mut one, &mut Broken).unwrap();
        assert_eq!(one, [9]);
    }

    #[test]
    fn broken_source_fails_instead_of_falling_back() {
        let mut xs = [1, 2, 3];
        let err = shuffle(&mut xs, &mut Broken).unwrap_err();
        assert!(matches!(err, RngError::RandomnessUnavailable(_)));
    }

    #[test]
    fn swaps_follow_fisher_yates_order() {
        // i=3 swaps with 0, i=2 with 2, i=1 with 0.
        let mut xs = ['a', 'b', 'c', 'd'];
        shuffle(&mut xs, &mut Scripted(vec![0, 2, 0])).unwrap();
        assert_eq!(xs, ['b', 'd', 'c', 'a']);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let a = shuffled((0..52).collect::<Vec<_>>(), &mut RngSource::seeded(42)).unwrap();
        let b = shuffled((0..52).collect::<Vec<_>>(), &mut RngSource::seeded(42)).unwrap();
        let c = shuffled((0..52).collect::<Vec<_>>(), &mut RngSource::seeded(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn os_source_stays_in_bounds() {
        let mut os = OsSource;
        for max in [0usize, 1, 2, 50, 74] {
            for _ in 0..32 {
                assert!(os.uniform_index(max).unwrap() <= max);
            }
        }
    }

    #[test]
    fn every_position_is_reachable() {
        let mut rng = RngSource::seeded(3);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let xs = shuffled(vec![0usize, 1, 2, 3, 4], &mut rng).unwrap();
            seen[xs[0]] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
