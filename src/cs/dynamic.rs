//! Dynamic programming routines for agent allocation and campaign budgeting.

pub mod alignment;
pub mod knapsack;

pub use alignment::{
    alignment_table, best_alignment, sequence_alignment_cost, sequence_alignment_cost_with,
    Alignment, AlignmentConfig, AlignmentTable, UnmatchedRequests,
};
pub use knapsack::{
    best_campaign_selection, bounded_budget_max_value, budget_table, BudgetTable, Campaign,
    Selection,
};
