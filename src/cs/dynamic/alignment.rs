//! Monotone alignment of customer requests against agent positions.
//!
//! `dp[i][j]` holds the cheapest way to serve the first `i` requests with the
//! first `j` agents, where serving a request costs the absolute distance to
//! its agent. Agents may be skipped; requests may not be reordered.
//!
//! Unreachable states are `None` rather than an infinite float.

use log::{debug, trace};
use ndarray::Array2;
use num_traits::Float;

use crate::error::{Error, Result};

/// What the base column `dp[i][0]` (requests seen, no agents yet) holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnmatchedRequests<T> {
    /// A request can never go unserved; `dp[i][0]` is unreachable for `i >= 1`.
    Infeasible,
    /// Each leading request left without an agent costs this much.
    Penalty(T),
}

impl<T> Default for UnmatchedRequests<T> {
    fn default() -> Self {
        UnmatchedRequests::Infeasible
    }
}

/// Boundary handling for [`alignment_table`].
///
/// The default leaves both the base row and base column unreachable apart
/// from `dp[0][0]`. Under that rule the first request is always served by the
/// first agent, and an empty request list against a non-empty agent list has
/// no alignment at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentConfig<T> {
    /// Base column policy.
    pub unmatched_requests: UnmatchedRequests<T>,
    /// When set, `dp[0][j] = 0`: agents before the first served request are free to skip.
    pub skip_leading_agents: bool,
}

impl<T> Default for AlignmentConfig<T> {
    fn default() -> Self {
        Self {
            unmatched_requests: UnmatchedRequests::Infeasible,
            skip_leading_agents: false,
        }
    }
}

impl<T: Float> AlignmentConfig<T> {
    fn validate(&self) -> Result<()> {
        if let UnmatchedRequests::Penalty(penalty) = self.unmatched_requests {
            if !penalty.is_finite() || penalty < T::zero() {
                return Err(Error::invalid_input(
                    "unmatched request penalty must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }

    fn base_column(&self, i: usize) -> Option<T> {
        match self.unmatched_requests {
            UnmatchedRequests::Infeasible => None,
            UnmatchedRequests::Penalty(penalty) => T::from(i).map(|count| count * penalty),
        }
    }

    fn base_row(&self) -> Option<T> {
        if self.skip_leading_agents {
            Some(T::zero())
        } else {
            None
        }
    }
}

/// An optimal alignment: its total cost and the `(request, agent)` index
/// pairs it serves, in increasing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment<T> {
    pub cost: T,
    pub pairs: Vec<(usize, usize)>,
}

/// The filled `(n + 1) x (m + 1)` alignment table.
#[derive(Debug, Clone)]
pub struct AlignmentTable<T> {
    table: Array2<Option<T>>,
}

impl<T: Float> AlignmentTable<T> {
    /// Number of rows, `requests.len() + 1`.
    pub fn rows(&self) -> usize {
        self.table.nrows()
    }

    /// Number of columns, `agents.len() + 1`.
    pub fn cols(&self) -> usize {
        self.table.ncols()
    }

    /// Cost of aligning the first `i` requests against the first `j` agents.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside the table.
    pub fn cell(&self, i: usize, j: usize) -> Option<T> {
        self.table[[i, j]]
    }

    /// The corner cell: cost of aligning everything, if reachable.
    pub fn total(&self) -> Option<T> {
        self.cell(self.rows() - 1, self.cols() - 1)
    }

    /// Walks back from the corner and returns the served `(request, agent)` pairs.
    ///
    /// Returns an empty vector when the corner is unreachable. Ties prefer
    /// skipping an agent over serving with it.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let (mut i, mut j) = (self.rows() - 1, self.cols() - 1);
        if self.table[[i, j]].is_none() {
            return Vec::new();
        }

        let mut pairs = Vec::with_capacity(i.min(j));
        while i > 0 && j > 0 {
            if self.table[[i, j]] == self.table[[i, j - 1]] {
                j -= 1;
            } else {
                trace!("request {} served by agent {}", i - 1, j - 1);
                pairs.push((i - 1, j - 1));
                i -= 1;
                j -= 1;
            }
        }

        pairs.reverse();
        pairs
    }
}

/// Builds the full alignment table for `requests` against `agents`.
///
/// Fails with [`Error::InvalidInput`] if a reachable cell overflows the value
/// type, and with [`Error::TableTooLarge`] if the table cannot be allocated.
///
/// # Examples
///
/// ```
/// use dynopt::dynamic::{alignment_table, AlignmentConfig};
///
/// let table = alignment_table(&[1.0, 3.0], &[2.0, 4.0, 9.0], &AlignmentConfig::default()).unwrap();
/// assert_eq!(table.rows(), 3);
/// assert_eq!(table.cols(), 4);
/// assert_eq!(table.total(), Some(2.0));
/// assert_eq!(table.cell(1, 0), None);
/// ```
pub fn alignment_table<T: Float>(
    requests: &[T],
    agents: &[T],
    config: &AlignmentConfig<T>,
) -> Result<AlignmentTable<T>> {
    check_finite("request", requests)?;
    check_finite("agent", agents)?;
    config.validate()?;

    let (n, m) = (requests.len(), agents.len());
    debug!("building {}x{} alignment table", n + 1, m + 1);

    // Every cell starts unreachable; only the boundaries get seeded.
    let mut table: Array2<Option<T>> = Error::alloc_table(n + 1, m + 1, None)?;
    table[[0, 0]] = Some(T::zero());
    for j in 1..=m {
        table[[0, j]] = config.base_row();
    }
    for i in 1..=n {
        table[[i, 0]] = checked(config.base_column(i), i, 0)?;
    }

    // table[i + 1][j + 1] is the best of:
    //   1) table[i + 1][j]                  (agent j stays idle)
    //   2) table[i][j] + |request - agent|  (agent j serves request i)
    for (i, &request) in requests.iter().enumerate() {
        for (j, &agent) in agents.iter().enumerate() {
            let cost = (request - agent).abs();
            let skip = table[[i + 1, j]];
            let serve = table[[i, j]].map(|prev| prev + cost);
            table[[i + 1, j + 1]] = checked(cheaper(skip, serve), i + 1, j + 1)?;
        }
    }

    Ok(AlignmentTable { table })
}

/// Minimal total distance for serving `requests` with `agents` in order,
/// using the default boundary handling.
///
/// Returns `Ok(None)` when no alignment exists, e.g. more requests than
/// agents, or exactly one of the two sequences empty.
///
/// # Examples
///
/// ```
/// use dynopt::dynamic::sequence_alignment_cost;
///
/// let cost = sequence_alignment_cost(&[1.0, 3.0, 5.0, 7.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
/// assert_eq!(cost, Some(4.0));
///
/// assert_eq!(sequence_alignment_cost::<f64>(&[], &[]).unwrap(), Some(0.0));
/// assert_eq!(sequence_alignment_cost(&[1.0, 2.0], &[1.0]).unwrap(), None);
/// ```
pub fn sequence_alignment_cost<T: Float>(requests: &[T], agents: &[T]) -> Result<Option<T>> {
    sequence_alignment_cost_with(requests, agents, &AlignmentConfig::default())
}

/// [`sequence_alignment_cost`] with explicit boundary handling.
pub fn sequence_alignment_cost_with<T: Float>(
    requests: &[T],
    agents: &[T],
    config: &AlignmentConfig<T>,
) -> Result<Option<T>> {
    let total = alignment_table(requests, agents, config)?.total();
    debug!("alignment cost: {:?}", total.and_then(|c| c.to_f64()));
    Ok(total)
}

/// Computes an optimal alignment together with the pairs that realise it.
///
/// # Examples
///
/// ```
/// use dynopt::dynamic::{best_alignment, AlignmentConfig};
///
/// let config = AlignmentConfig { skip_leading_agents: true, ..AlignmentConfig::default() };
/// let best = best_alignment(&[5.0, 10.0], &[0.0, 5.0, 9.0, 30.0], &config).unwrap().unwrap();
/// assert_eq!(best.cost, 1.0);
/// assert_eq!(best.pairs, vec![(0, 1), (1, 2)]);
/// ```
pub fn best_alignment<T: Float>(
    requests: &[T],
    agents: &[T],
    config: &AlignmentConfig<T>,
) -> Result<Option<Alignment<T>>> {
    let table = alignment_table(requests, agents, config)?;
    Ok(table.total().map(|cost| Alignment {
        cost,
        pairs: table.pairs(),
    }))
}

fn cheaper<T: Float>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(x), Some(y)) => Some(if y < x { y } else { x }),
        (Some(x), None) => Some(x),
        (None, other) => other,
    }
}

fn checked<T: Float>(cell: Option<T>, i: usize, j: usize) -> Result<Option<T>> {
    cell.map(|value| Error::check_cell(value, i, j)).transpose()
}

fn check_finite<T: Float>(what: &str, values: &[T]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(Error::invalid_input(format!(
            "{what} at index {idx} is not finite"
        ))),
        None => Ok(()),
    }
}
