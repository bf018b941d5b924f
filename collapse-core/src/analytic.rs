//! Closed-form estimates of how many edges a random graph needs to connect.
//!
//! These complement the simulated sweep: [`connectivity_probability`]
//! evaluates Gilbert's recurrence for `G(n, p)` exactly, and the two edge
//! estimates turn a target probability into an expected edge count.

use crate::{error::AnalyticError, simulate::pair_count};

/// Probability that a `G(n, p)` random graph on `nodes` nodes is connected.
///
/// Uses `P(1) = 1` and
/// `P(m) = 1 - Σ_{k=1}^{m-1} C(m-1, k-1) · P(k) · (1-p)^{k(m-k)}`,
/// evaluated bottom-up with binomials in log space. Graphs with zero or one
/// node count as connected.
///
/// # Errors
/// Returns [`AnalyticError::InvalidProbability`] unless `0 <= p <= 1`.
///
/// # Examples
/// ```
/// use collapse_core::connectivity_probability;
///
/// let p = 0.5;
/// let three = connectivity_probability(3, p)?;
/// assert!((three - (3.0 * p * p - 2.0 * p * p * p)).abs() < 1e-12);
/// assert_eq!(connectivity_probability(1, 0.0)?, 1.0);
/// # Ok::<(), collapse_core::AnalyticError>(())
/// ```
pub fn connectivity_probability(nodes: usize, probability: f64) -> Result<f64, AnalyticError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(AnalyticError::InvalidProbability { got: probability });
    }
    if nodes <= 1 {
        return Ok(1.0);
    }
    if probability == 0.0 {
        return Ok(0.0);
    }

    // ln(0) = -inf for p = 1, which makes every disconnection term vanish.
    let ln_absent = (1.0 - probability).ln();
    let ln_factorials = ln_factorials(nodes);
    let mut connected = vec![0.0_f64; nodes + 1];
    connected[1] = 1.0;

    for size in 2..=nodes {
        let mut disconnected = 0.0;
        for (part, &part_connected) in connected.iter().enumerate().take(size).skip(1) {
            let crossing = (part * (size - part)) as f64;
            let ln_ways = ln_choose(&ln_factorials, size - 1, part - 1);
            disconnected += part_connected * crossing.mul_add(ln_absent, ln_ways).exp();
        }
        connected[size] = (1.0 - disconnected).clamp(0.0, 1.0);
    }

    Ok(connected[nodes])
}

/// Smallest edge count whose edge density `e / C(n, 2)` makes a `G(n, p)`
/// graph connected with probability at least `threshold`.
///
/// # Errors
/// Returns [`AnalyticError::InvalidThreshold`] unless `0 < threshold <= 1`.
///
/// # Examples
/// ```
/// use collapse_core::exact_edges_to_collapse;
///
/// assert_eq!(exact_edges_to_collapse(1, 0.9)?, 0);
/// assert_eq!(exact_edges_to_collapse(2, 0.9)?, 1);
/// assert_eq!(exact_edges_to_collapse(3, 0.5)?, 2);
/// # Ok::<(), collapse_core::AnalyticError>(())
/// ```
pub fn exact_edges_to_collapse(nodes: usize, threshold: f64) -> Result<usize, AnalyticError> {
    check_threshold(threshold)?;
    let pairs = pair_count(nodes);
    if pairs == 0 {
        return Ok(0);
    }

    let total = pairs as f64;
    let reaches_threshold = |edges: usize| -> Result<bool, AnalyticError> {
        Ok(connectivity_probability(nodes, edges as f64 / total)? >= threshold)
    };

    // Invariant: `below` misses the threshold and `at_or_above` reaches it.
    // Density 0 never connects two or more nodes; density 1 always does.
    let mut below = 0_usize;
    let mut at_or_above = pairs;
    while at_or_above - below > 1 {
        let middle = below + (at_or_above - below) / 2;
        if reaches_threshold(middle)? {
            at_or_above = middle;
        } else {
            below = middle;
        }
    }
    Ok(at_or_above)
}

/// Large-`n` approximation of the edges needed to connect with probability
/// `threshold`.
///
/// Treats the graph as connected when no node is isolated, so
/// `n · (1-p)^(n-1) = 1 - threshold`; the result is `p · C(n, 2)`.
///
/// # Errors
/// Returns [`AnalyticError::InvalidThreshold`] unless `0 < threshold <= 1`.
///
/// # Examples
/// ```
/// use collapse_core::asymptotic_edges_to_collapse;
///
/// assert_eq!(asymptotic_edges_to_collapse(1, 0.9)?, 0.0);
/// assert_eq!(asymptotic_edges_to_collapse(5, 1.0)?, 10.0);
/// let estimate = asymptotic_edges_to_collapse(100, 0.5)?;
/// assert!(estimate > 99.0 && estimate < 4950.0);
/// # Ok::<(), collapse_core::AnalyticError>(())
/// ```
pub fn asymptotic_edges_to_collapse(nodes: usize, threshold: f64) -> Result<f64, AnalyticError> {
    check_threshold(threshold)?;
    if nodes <= 1 {
        return Ok(0.0);
    }
    let size = nodes as f64;
    let absent = ((1.0 - threshold) / size).powf((size - 1.0).recip());
    Ok((1.0 - absent) * pair_count(nodes) as f64)
}

fn check_threshold(threshold: f64) -> Result<(), AnalyticError> {
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(AnalyticError::InvalidThreshold { got: threshold })
    }
}

/// `ln(i!)` for `i` in `0..len`.
fn ln_factorials(len: usize) -> Vec<f64> {
    let mut table = Vec::with_capacity(len);
    let mut running = 0.0_f64;
    table.push(running);
    for value in 1..len {
        running += (value as f64).ln();
        table.push(running);
    }
    table
}

fn ln_choose(ln_factorials: &[f64], n: usize, k: usize) -> f64 {
    ln_factorials[n] - ln_factorials[k] - ln_factorials[n - k]
}
