//! Campaign selection under a fixed budget (0/1 knapsack).

use log::{debug, trace};
use ndarray::Array2;
use num_traits::Float;

use crate::error::{Error, Result};

/// A campaign that can be funded at most once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Campaign<T> {
    pub cost: usize,
    pub value: T,
}

impl<T> Campaign<T> {
    pub fn new(cost: usize, value: T) -> Self {
        Self { cost, value }
    }
}

impl<T> From<(usize, T)> for Campaign<T> {
    fn from((cost, value): (usize, T)) -> Self {
        Self::new(cost, value)
    }
}

/// A chosen set of campaigns.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    /// Total value of the chosen campaigns.
    pub value: T,
    /// Indices into the input slice, ascending.
    pub indices: Vec<usize>,
    /// Total cost of the chosen campaigns, never above the budget.
    pub total_cost: usize,
}

/// The filled `(n + 1) x (budget + 1)` table, where cell `(i, j)` is the best
/// value reachable with the first `i` campaigns and at most `j` spent.
#[derive(Debug, Clone)]
pub struct BudgetTable<T> {
    table: Array2<T>,
    costs: Vec<usize>,
}

impl<T: Float> BudgetTable<T> {
    /// Number of rows, `campaigns.len() + 1`.
    pub fn rows(&self) -> usize {
        self.table.nrows()
    }

    /// Number of columns, `budget + 1`.
    pub fn cols(&self) -> usize {
        self.table.ncols()
    }

    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside the table.
    pub fn cell(&self, i: usize, j: usize) -> T {
        self.table[[i, j]]
    }

    /// Best value for the whole budget over all campaigns.
    pub fn best(&self) -> T {
        self.cell(self.rows() - 1, self.cols() - 1)
    }

    /// Indices of the campaigns behind [`BudgetTable::best`], ascending.
    ///
    /// A campaign whose inclusion does not change the optimum is left out.
    pub fn selected(&self) -> Vec<usize> {
        let mut j = self.cols() - 1;
        let mut picked = Vec::new();

        for i in (1..self.rows()).rev() {
            if self.table[[i, j]] != self.table[[i - 1, j]] {
                trace!("campaign {} selected with {} budget left", i - 1, j);
                picked.push(i - 1);
                j -= self.costs[i - 1];
            }
        }

        picked.reverse();
        picked
    }
}

/// Fills the budget table for `campaigns`.
///
/// Campaigns that cost more than `budget` are never selected. Fails with
/// [`Error::InvalidInput`] if a cell overflows the value type, and with
/// [`Error::TableTooLarge`] if the table cannot be allocated.
pub fn budget_table<T: Float>(budget: usize, campaigns: &[Campaign<T>]) -> Result<BudgetTable<T>> {
    if let Some(idx) = campaigns.iter().position(|c| !c.value.is_finite()) {
        return Err(Error::invalid_input(format!(
            "campaign {idx} has a non-finite value"
        )));
    }

    let rows = campaigns.len() + 1;
    let cols = budget
        .checked_add(1)
        .ok_or(Error::TableTooLarge { rows, cols: budget })?;
    debug!("building {}x{} budget table", rows, cols);

    // Row 0 funds nothing, so every budget is worth zero there.
    let mut table = Error::alloc_table(rows, cols, T::zero())?;

    // table[i + 1][j] either skips campaign i, or funds it out of budget j
    // on top of the best use of the remaining j - cost.
    for (i, campaign) in campaigns.iter().enumerate() {
        for j in 0..cols {
            let skip = table[[i, j]];
            let best = if j >= campaign.cost {
                skip.max(table[[i, j - campaign.cost]] + campaign.value)
            } else {
                skip
            };
            table[[i + 1, j]] = Error::check_cell(best, i + 1, j)?;
        }
    }

    Ok(BudgetTable {
        table,
        costs: campaigns.iter().map(|c| c.cost).collect(),
    })
}

/// Maximum total value of a subset of `campaigns` whose costs fit in `budget`.
///
/// # Examples
///
/// ```
/// use dynopt::dynamic::{bounded_budget_max_value, Campaign};
///
/// let raw: [(usize, f64); 4] = [(3, 60.0), (2, 100.0), (4, 120.0), (1, 40.0)];
/// let campaigns: Vec<Campaign<f64>> = raw.into_iter().map(Campaign::from).collect();
/// assert_eq!(bounded_budget_max_value(5, &campaigns).unwrap(), 160.0);
/// assert_eq!(bounded_budget_max_value(0, &campaigns).unwrap(), 0.0);
/// ```
pub fn bounded_budget_max_value<T: Float>(budget: usize, campaigns: &[Campaign<T>]) -> Result<T> {
    let best = budget_table(budget, campaigns)?.best();
    debug!("best value for budget {}: {:?}", budget, best.to_f64());
    Ok(best)
}

/// Like [`bounded_budget_max_value`], but also reports which campaigns to fund.
///
/// # Examples
///
/// ```
/// use dynopt::dynamic::{best_campaign_selection, Campaign};
///
/// let campaigns = [Campaign::new(4, 10.0), Campaign::new(3, 7.0), Campaign::new(3, 6.0)];
/// let selection = best_campaign_selection(6, &campaigns).unwrap();
/// assert_eq!(selection.value, 13.0);
/// assert_eq!(selection.indices, vec![1, 2]);
/// assert_eq!(selection.total_cost, 6);
/// ```
pub fn best_campaign_selection<T: Float>(
    budget: usize,
    campaigns: &[Campaign<T>],
) -> Result<Selection<T>> {
    let table = budget_table(budget, campaigns)?;
    let indices = table.selected();
    let total_cost = indices.iter().map(|&idx| campaigns[idx].cost).sum();

    Ok(Selection {
        value: table.best(),
        indices,
        total_cost,
    })
}
