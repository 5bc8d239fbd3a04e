//! Stochastic particle-by-particle decay.
//!
//! Every surviving particle independently decays with probability `p` at each
//! step. Randomness is always passed in explicitly, so a trajectory is fully
//! determined by its parameters and the state of the supplied generator.

use rand::Rng;
use rand_distr::{Binomial, Distribution};

use crate::domain::{Sampler, Trajectory, validate_probability};
use crate::error::SimError;

/// Simulate one decay trajectory of length `steps`.
///
/// Step 0 is `n0`. `n0 == 0` yields all zeros; `steps == 0` yields an empty
/// trajectory.
pub fn simulate_decay<R: Rng + ?Sized>(
    n0: u64,
    p: f64,
    steps: usize,
    sampler: Sampler,
    rng: &mut R,
) -> Result<Trajectory, SimError> {
    validate_probability(p)?;

    let mut counts = Vec::with_capacity(steps);
    if steps == 0 {
        return Ok(Trajectory::from_counts(counts));
    }

    let mut alive = n0;
    counts.push(alive);
    for _ in 1..steps {
        if alive > 0 {
            let decayed = match sampler {
                Sampler::Bernoulli => count_decays(alive, p, rng),
                Sampler::Binomial => {
                    let dist = Binomial::new(alive, p)
                        .map_err(|e| SimError::invalid("decay_probability", e.to_string()))?;
                    dist.sample(rng)
                }
            };
            alive -= decayed.min(alive);
        }
        counts.push(alive);
    }

    Ok(Trajectory::from_counts(counts))
}

/// Draw `alive` uniforms in `[0, 1)` and count those below `p`.
fn count_decays<R: Rng + ?Sized>(alive: u64, p: f64, rng: &mut R) -> u64 {
    let mut decayed = 0u64;
    for _ in 0..alive {
        if rng.r#gen::<f64>() < p {
            decayed += 1;
        }
    }
    decayed
}
