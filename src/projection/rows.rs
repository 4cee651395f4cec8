//! Projection output structures

use serde::Serialize;

/// One projected month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    /// 1-based month label
    pub month: i64,

    // Cumulative figures
    pub total_income: f64,
    pub total_insurance: f64,
    pub total_deduction: f64,
    pub total_base_num: f64,

    // Withholding
    pub taxable_income: f64,
    pub tax_rate: f64,
    pub quick_deduction: f64,
    pub total_tax: f64,

    // This month
    pub tax: f64,
    pub net_income: f64,
}

/// Fully materialized projection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectionResult {
    /// Monthly rows in order
    pub rows: Vec<ProjectionRow>,
}

impl ProjectionResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let mut summary = ProjectionSummary::default();
        for row in &self.rows {
            summary.record(row);
        }
        summary
    }
}

/// Summary statistics for a projection, folded one row at a time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub total_months: usize,
    pub total_tax_withheld: f64,
    pub total_net_income: f64,
    pub final_total_income: f64,
    pub final_taxable_income: f64,
    pub final_tax_rate: f64,
}

impl ProjectionSummary {
    /// Fold the next month into the running totals
    pub fn record(&mut self, row: &ProjectionRow) {
        self.total_months += 1;
        self.total_tax_withheld += row.tax;
        self.total_net_income += row.net_income;
        self.final_total_income = row.total_income;
        self.final_taxable_income = row.taxable_income;
        self.final_tax_rate = row.tax_rate;
    }
}
