//! Node-count sweep driving one collapse trial per sampled size.
//!
//! A sweep visits `0, step, 2 * step, …` up to and including the configured
//! maximum and runs a single trial on a fresh oracle at each size. Results
//! are produced lazily so callers can report each point as soon as its
//! trial finishes.

use std::{iter::StepBy, num::NonZeroUsize, ops::RangeInclusive};

use rand::Rng;
use tracing::{Span, debug, info_span};

use crate::{Result, error::CollapseError, simulate::run_trial};

/// Distance between consecutive node counts unless overridden.
pub const DEFAULT_SWEEP_STEP: usize = 10;

/// Configures and validates a [`SweepPlan`].
///
/// # Examples
/// ```
/// use collapse_core::SweepBuilder;
///
/// let plan = SweepBuilder::new(25).build()?;
/// assert_eq!(plan.node_counts().collect::<Vec<_>>(), [0, 10, 20]);
///
/// let plan = SweepBuilder::new(6).with_step(3).build()?;
/// assert_eq!(plan.node_counts().collect::<Vec<_>>(), [0, 3, 6]);
/// # Ok::<(), collapse_core::CollapseError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SweepBuilder {
    max_nodes: usize,
    step: usize,
}

impl SweepBuilder {
    /// Starts a sweep up to `max_nodes` inclusive with the default step.
    #[must_use]
    pub const fn new(max_nodes: usize) -> Self {
        Self {
            max_nodes,
            step: DEFAULT_SWEEP_STEP,
        }
    }

    /// Overrides the distance between sampled node counts.
    #[must_use]
    pub const fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`CollapseError::InvalidSweepStep`] when the step is zero.
    pub fn build(self) -> Result<SweepPlan> {
        let step = NonZeroUsize::new(self.step)
            .ok_or(CollapseError::InvalidSweepStep { got: self.step })?;
        Ok(SweepPlan {
            max_nodes: self.max_nodes,
            step,
        })
    }
}

/// Validated sweep configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SweepPlan {
    max_nodes: usize,
    step: NonZeroUsize,
}

impl SweepPlan {
    /// Inclusive upper bound of the sweep.
    #[must_use]
    pub const fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Distance between sampled node counts.
    #[must_use]
    pub const fn step(&self) -> NonZeroUsize {
        self.step
    }

    /// Node counts visited by the sweep, in increasing order.
    pub fn node_counts(&self) -> StepBy<RangeInclusive<usize>> {
        (0..=self.max_nodes).step_by(self.step.get())
    }

    /// Number of trials the sweep will run.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.max_nodes / self.step.get()).saturating_add(1)
    }

    /// Always `false`: node count zero is part of every sweep.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Starts the sweep, drawing randomness from `rng` across every trial.
    ///
    /// # Examples
    /// ```
    /// use collapse_core::SweepBuilder;
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// let points = SweepBuilder::new(20)
    ///     .build()?
    ///     .run(&mut rng)
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// let sizes: Vec<usize> = points.iter().map(|point| point.nodes).collect();
    /// assert_eq!(sizes, [0, 10, 20]);
    /// assert_eq!(points[0].edges, 0);
    /// # Ok::<(), collapse_core::CollapseError>(())
    /// ```
    pub fn run<'r, R>(&self, rng: &'r mut R) -> Sweep<'r, R>
    where
        R: Rng + ?Sized,
    {
        let span = info_span!(
            "collapse.sweep",
            max_nodes = self.max_nodes,
            step = self.step.get(),
        );
        span.in_scope(|| debug!(trials = self.len(), "sweep started"));
        Sweep {
            node_counts: self.node_counts(),
            rng,
            span,
            failed: false,
        }
    }
}

/// One `(node count, edge count)` result of a sweep.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SweepPoint {
    /// Node count of the trial.
    pub nodes: usize,
    /// Edges accepted when the trial's graph became connected.
    pub edges: usize,
}

/// Lazy iterator over sweep results; stops after the first error.
#[derive(Debug)]
pub struct Sweep<'r, R: ?Sized> {
    node_counts: StepBy<RangeInclusive<usize>>,
    rng: &'r mut R,
    span: Span,
    failed: bool,
}

impl<R> Iterator for Sweep<'_, R>
where
    R: Rng + ?Sized,
{
    type Item = Result<SweepPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let nodes = self.node_counts.next()?;
        let _entered = self.span.enter();
        match run_trial(nodes, &mut *self.rng) {
            Ok(outcome) => {
                debug!(
                    nodes,
                    edges = outcome.edges(),
                    draws = outcome.draws(),
                    "trial completed"
                );
                Some(Ok(SweepPoint {
                    nodes,
                    edges: outcome.edges(),
                }))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::simulate::pair_count;

    #[rstest]
    #[case(0, vec![0])]
    #[case(9, vec![0])]
    #[case(10, vec![0, 10])]
    #[case(20, vec![0, 10, 20])]
    #[case(35, vec![0, 10, 20, 30])]
    fn default_step_visits_inclusive_multiples_of_ten(
        #[case] max_nodes: usize,
        #[case] expected: Vec<usize>,
    ) {
        let plan = SweepBuilder::new(max_nodes).build().expect("valid plan");
        assert_eq!(plan.node_counts().collect::<Vec<_>>(), expected);
        assert_eq!(plan.len(), expected.len());
        assert_eq!(plan.step().get(), DEFAULT_SWEEP_STEP);
    }

    #[test]
    fn zero_step_is_rejected() {
        let err = SweepBuilder::new(10)
            .with_step(0)
            .build()
            .expect_err("zero step must fail");
        assert_eq!(err, CollapseError::InvalidSweepStep { got: 0 });
    }

    #[test]
    fn sweep_to_twenty_emits_three_points() {
        let mut rng = SmallRng::seed_from_u64(42);
        let plan = SweepBuilder::new(20).build().expect("valid plan");
        let points: Vec<SweepPoint> = plan
            .run(&mut rng)
            .collect::<Result<_>>()
            .expect("sweep must succeed");

        let sizes: Vec<usize> = points.iter().map(|point| point.nodes).collect();
        assert_eq!(sizes, [0, 10, 20]);
        assert_eq!(points[0].edges, 0);
        for point in &points[1..] {
            assert!(point.edges >= point.nodes - 1);
            assert!(point.edges <= pair_count(point.nodes));
        }
    }

    #[test]
    fn custom_step_reaches_every_size() {
        let mut rng = SmallRng::seed_from_u64(3);
        let plan = SweepBuilder::new(4).with_step(1).build().expect("valid plan");
        let points: Vec<SweepPoint> = plan
            .run(&mut rng)
            .collect::<Result<_>>()
            .expect("sweep must succeed");
        let edges: Vec<usize> = points.iter().map(|point| point.edges).collect();
        assert_eq!(edges[..3], [0, 0, 1]);
        assert_eq!(points.len(), 5);
    }
}
