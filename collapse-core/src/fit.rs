//! Least-squares line through `(node count, edge count)` sweep results.

use crate::error::FitError;

/// Slope and intercept of `edges ≈ slope · nodes + intercept`.
///
/// # Examples
/// ```
/// use collapse_core::LinearFit;
///
/// let fit = LinearFit::least_squares(&[(0.0, 1.0), (10.0, 21.0), (20.0, 41.0)])?;
/// assert!((fit.slope() - 2.0).abs() < 1e-12);
/// assert!((fit.intercept() - 1.0).abs() < 1e-12);
/// assert!((fit.predict(5.0) - 11.0).abs() < 1e-12);
/// # Ok::<(), collapse_core::FitError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
}

impl LinearFit {
    /// Fits a line through `points` by ordinary least squares.
    ///
    /// # Errors
    /// Returns [`FitError::TooFewPoints`] for fewer than two points,
    /// [`FitError::NonFinitePoint`] for NaN or infinite coordinates and
    /// [`FitError::DegenerateNodes`] when every point has the same node count.
    pub fn least_squares(points: &[(f64, f64)]) -> Result<Self, FitError> {
        if points.len() < 2 {
            return Err(FitError::TooFewPoints {
                points: points.len(),
            });
        }
        if let Some(index) = points
            .iter()
            .position(|(nodes, edges)| !nodes.is_finite() || !edges.is_finite())
        {
            return Err(FitError::NonFinitePoint { index });
        }

        let count = points.len() as f64;
        let mean_nodes = points.iter().map(|(nodes, _)| nodes).sum::<f64>() / count;
        let mean_edges = points.iter().map(|(_, edges)| edges).sum::<f64>() / count;

        let (spread, covariance) =
            points
                .iter()
                .fold((0.0, 0.0), |(spread, covariance), (nodes, edges)| {
                    let dx = nodes - mean_nodes;
                    (
                        dx.mul_add(dx, spread),
                        dx.mul_add(edges - mean_edges, covariance),
                    )
                });
        if spread == 0.0 {
            return Err(FitError::DegenerateNodes {
                points: points.len(),
            });
        }

        let slope = covariance / spread;
        Ok(Self {
            slope,
            intercept: slope.mul_add(-mean_nodes, mean_edges),
        })
    }

    /// Shifts the intercept by `offset`, e.g. to draw an upper envelope.
    #[must_use]
    pub fn with_intercept_offset(self, offset: f64) -> Self {
        Self {
            intercept: self.intercept + offset,
            ..self
        }
    }

    /// Edges added per extra node.
    #[must_use]
    pub const fn slope(&self) -> f64 {
        self.slope
    }

    /// Edge count predicted at zero nodes.
    #[must_use]
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predicted edge count for `nodes`.
    #[must_use]
    pub fn predict(&self, nodes: f64) -> f64 {
        self.slope.mul_add(nodes, self.intercept)
    }
}
