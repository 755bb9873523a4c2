use crate::filter::TriplePredicate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rdf_sieve_model::Triple;
use std::sync::{Mutex, PoisonError};

/// The error raised when a sampling filter is configured with a probability
/// outside of `[0, 1]`.
#[derive(Debug, thiserror::Error)]
#[error("the sampling probability {0} is outside of the range [0, 1]")]
pub struct InvalidProbability(pub f64);

/// A probabilistic triple predicate for sampling a stream.
///
/// Each test draws a uniform value and accepts when it falls below the
/// configured probability; over a long stream the accept rate converges to
/// that probability. An optional limit caps the number of accepted triples:
/// once reached, acceptance stops permanently regardless of the
/// probability. The draw and the limit bookkeeping sit in one critical
/// section, so the cap stays exact even when one filter instance is shared
/// between threads.
pub struct SamplingFilter {
    probability: f64,
    limit: Option<u64>,
    state: Mutex<SamplerState>,
}

struct SamplerState {
    rng: StdRng,
    accepted: u64,
}

impl SamplingFilter {
    /// Creates a filter accepting triples with the given probability.
    pub fn new(probability: f64, seed: u64) -> Result<Self, InvalidProbability> {
        Self::build(probability, None, seed)
    }

    /// Creates a filter that additionally stops accepting after `limit`
    /// accepted triples.
    pub fn with_limit(probability: f64, limit: u64, seed: u64) -> Result<Self, InvalidProbability> {
        Self::build(probability, Some(limit), seed)
    }

    fn build(probability: f64, limit: Option<u64>, seed: u64) -> Result<Self, InvalidProbability> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(InvalidProbability(probability));
        }
        Ok(Self {
            probability,
            limit,
            state: Mutex::new(SamplerState {
                rng: StdRng::seed_from_u64(seed),
                accepted: 0,
            }),
        })
    }

    /// Number of triples accepted so far.
    pub fn accepted(&self) -> u64 {
        self.lock_state().accepted
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SamplerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TriplePredicate for SamplingFilter {
    fn matches(&self, _triple: &Triple) -> bool {
        let mut state = self.lock_state();
        if state.rng.random::<f64>() >= self.probability {
            return false;
        }
        match self.limit {
            Some(limit) if state.accepted >= limit => false,
            _ => {
                state.accepted += 1;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_sieve_model::NamedNode;

    fn example_triple() -> Triple {
        let node = NamedNode::new("http://example.org/e").unwrap();
        Triple::new(node.clone(), node.clone(), node)
    }

    #[test]
    fn test_probability_one_accepts_everything() {
        let filter = SamplingFilter::new(1.0, 42).unwrap();
        let triple = example_triple();
        assert!((0..1000).all(|_| filter.matches(&triple)));
        assert_eq!(filter.accepted(), 1000);
    }

    #[test]
    fn test_probability_zero_accepts_nothing() {
        let filter = SamplingFilter::new(0.0, 42).unwrap();
        let triple = example_triple();
        assert!((0..1000).all(|_| !filter.matches(&triple)));
        assert_eq!(filter.accepted(), 0);
    }

    #[test]
    fn test_limit_is_never_exceeded() {
        let filter = SamplingFilter::with_limit(1.0, 5, 42).unwrap();
        let triple = example_triple();
        let accepted = (0..1000).filter(|_| filter.matches(&triple)).count();
        assert_eq!(accepted, 5);
        // Acceptance stays off once the limit is reached.
        assert!(!filter.matches(&triple));
    }

    #[test]
    fn test_out_of_range_probability_is_rejected() {
        assert!(SamplingFilter::new(-0.1, 42).is_err());
        assert!(SamplingFilter::new(1.1, 42).is_err());
        assert!(SamplingFilter::new(f64::NAN, 42).is_err());
    }

    #[test]
    fn test_same_seed_draws_the_same_sample() {
        let first = SamplingFilter::new(0.5, 7).unwrap();
        let second = SamplingFilter::new(0.5, 7).unwrap();
        let triple = example_triple();
        let a: Vec<bool> = (0..100).map(|_| first.matches(&triple)).collect();
        let b: Vec<bool> = (0..100).map(|_| second.matches(&triple)).collect();
        assert_eq!(a, b);
    }
}
