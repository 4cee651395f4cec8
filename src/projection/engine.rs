//! Core engine for the monthly cumulative-withholding projection

use std::iter::FusedIterator;

use log::debug;

use crate::profile::Profile;
use super::brackets::BracketSchedule;
use super::rows::{ProjectionRow, ProjectionResult};
use super::state::ProjectionState;

/// Main projection engine
///
/// Tax for each month is the difference between the cumulative tax payable
/// this month and last month, so the withholding rate climbs as year-to-date
/// taxable income crosses each bracket bound.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    profile: Profile,
    schedule: BracketSchedule,
}

impl ProjectionEngine {
    /// Engine using the 2019 bracket schedule
    pub fn new(profile: Profile) -> Self {
        Self::with_schedule(profile, BracketSchedule::iit_2019())
    }

    pub fn with_schedule(profile: Profile, schedule: BracketSchedule) -> Self {
        Self { profile, schedule }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn schedule(&self) -> &BracketSchedule {
        &self.schedule
    }

    /// Lazily project months `0..=calc_months`, one row per call to `next`
    pub fn rows(&self) -> ProjectionRows<'_> {
        ProjectionRows {
            engine: self,
            state: ProjectionState::new(),
            next_index: Some(0),
        }
    }

    /// Project every month into memory
    pub fn project(&self) -> ProjectionResult {
        ProjectionResult {
            rows: self.rows().collect(),
        }
    }

    /// Accumulate one month and derive its withholding figures
    fn calculate_month(&self, state: &mut ProjectionState, month_index: i64) -> ProjectionRow {
        state.accumulate_month(&self.profile, month_index);

        let taxable_income = state.taxable_income();
        let (tax_rate, quick_deduction) = self.schedule.rate_for(taxable_income);
        let total_tax = taxable_income * tax_rate - quick_deduction;
        let tax = total_tax - state.last_total_tax;

        // Regular monthly insurance only; the bonus reaches net income through `tax`
        let net_income = self.profile.salary_monthly - self.profile.monthly_insurance() - tax;

        state.last_total_tax = total_tax;

        let month = month_index.saturating_add(1);
        debug!(
            "month {}: taxable {:.2} at rate {:.2}, tax {:.2}",
            month,
            taxable_income,
            tax_rate,
            tax
        );

        ProjectionRow {
            month,
            total_income: state.total_income,
            total_insurance: state.total_insurance,
            total_deduction: state.total_deduction,
            total_base_num: state.total_base_num,
            taxable_income,
            tax_rate,
            quick_deduction,
            total_tax,
            tax,
            net_income,
        }
    }
}

/// Iterator over projected months, carrying the year-to-date state
#[derive(Debug, Clone)]
pub struct ProjectionRows<'a> {
    engine: &'a ProjectionEngine,
    state: ProjectionState,
    /// `None` once the index space is exhausted
    next_index: Option<i64>,
}

impl ProjectionRows<'_> {
    fn remaining(&self) -> i128 {
        match self.next_index {
            Some(index) => {
                let last = i128::from(self.engine.profile.calc_months);
                (last - i128::from(index) + 1).max(0)
            }
            None => 0,
        }
    }
}

impl Iterator for ProjectionRows<'_> {
    type Item = ProjectionRow;

    fn next(&mut self) -> Option<ProjectionRow> {
        let month_index = self.next_index?;
        if month_index > self.engine.profile.calc_months {
            return None;
        }

        let row = self.engine.calculate_month(&mut self.state, month_index);
        self.next_index = month_index.checked_add(1);
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for ProjectionRows<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::TaxBracket;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_profile_first_month() {
        let result = ProjectionEngine::new(Profile::default_settings()).project();
        let row = &result.rows[0];

        assert_eq!(row.month, 1);
        assert_relative_eq!(row.total_income, 10000.0);
        assert_relative_eq!(row.total_insurance, 525.0);
        assert_relative_eq!(row.total_deduction, 2000.0);
        assert_relative_eq!(row.total_base_num, 2500.0);
        assert_relative_eq!(row.taxable_income, 4975.0);
        assert_eq!(row.tax_rate, 0.03);
        assert_eq!(row.quick_deduction, 0.0);
        assert_relative_eq!(row.total_tax, 149.25, epsilon = 1e-9);
        assert_relative_eq!(row.tax, 149.25, epsilon = 1e-9);
        assert_relative_eq!(row.net_income, 9325.75, epsilon = 1e-9);
    }

    #[test]
    fn test_default_profile_bonus_month() {
        let result = ProjectionEngine::new(Profile::default_settings()).project();
        assert_eq!(result.len(), 7);

        // Months 2-6 repeat month 1's withholding
        for row in &result.rows[1..6] {
            assert_relative_eq!(row.tax, 149.25, epsilon = 1e-9);
            assert_relative_eq!(row.net_income, 9325.75, epsilon = 1e-9);
        }

        let bonus = &result.rows[6];
        assert_eq!(bonus.month, 7);
        assert_relative_eq!(bonus.total_income, 87800.0, epsilon = 1e-9);
        assert_relative_eq!(bonus.taxable_income, 52625.0, epsilon = 1e-9);
        assert_eq!(bonus.tax_rate, 0.10);
        assert_eq!(bonus.quick_deduction, 2520.0);
        assert_relative_eq!(bonus.total_tax, 2742.5, epsilon = 1e-6);
        assert_relative_eq!(bonus.tax, 1847.0, epsilon = 1e-6);
        assert_relative_eq!(bonus.net_income, 7628.0, epsilon = 1e-6);
    }

    #[test]
    fn test_row_count() {
        for calc_months in [0, 1, 6, 11, 23] {
            let profile = Profile {
                calc_months,
                ..Profile::default_settings()
            };
            let result = ProjectionEngine::new(profile).project();
            assert_eq!(result.len(), calc_months as usize + 1);
            assert_eq!(result.rows.last().map(|r| r.month), Some(calc_months + 1));
        }
    }

    #[test]
    fn test_negative_calc_months_projects_nothing() {
        let profile = Profile {
            calc_months: -1,
            ..Profile::default_settings()
        };
        assert!(ProjectionEngine::new(profile).project().is_empty());
    }

    #[test]
    fn test_accumulators_non_decreasing() {
        let profile = Profile {
            calc_months: 11,
            year_end_bonus_date: 3,
            ..Profile::default_settings()
        };
        let result = ProjectionEngine::new(profile).project();

        for pair in result.rows.windows(2) {
            assert!(pair[1].total_income >= pair[0].total_income);
            assert!(pair[1].total_insurance >= pair[0].total_insurance);
            assert!(pair[1].total_deduction >= pair[0].total_deduction);
            assert!(pair[1].total_base_num >= pair[0].total_base_num);
        }
    }

    #[test]
    fn test_projection_is_idempotent() {
        let engine = ProjectionEngine::new(Profile::default_settings());
        assert_eq!(engine.project(), engine.project());
    }

    #[test]
    fn test_bonus_on_last_month_fires() {
        let profile = Profile {
            calc_months: 4,
            year_end_bonus_date: 4,
            ..Profile::default_settings()
        };
        let result = ProjectionEngine::new(profile).project();

        let last = result.rows.last().unwrap();
        assert_relative_eq!(last.total_income, 5.0 * 10000.0 + 17800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bonus_out_of_range_matches_no_bonus() {
        let late = Profile {
            year_end_bonus_date: 7,
            ..Profile::default_settings()
        };
        let none = Profile {
            year_end_bonus_ratio: 0.0,
            ..Profile::default_settings()
        };

        assert_eq!(
            ProjectionEngine::new(late).project(),
            ProjectionEngine::new(none.clone()).project()
        );

        let negative = Profile {
            year_end_bonus_date: -1,
            ..Profile::default_settings()
        };
        assert_eq!(
            ProjectionEngine::new(negative).project(),
            ProjectionEngine::new(none).project()
        );
    }

    #[test]
    fn test_negative_taxable_income_gives_negative_tax() {
        let profile = Profile {
            salary_monthly: 3000.0,
            calc_months: 0,
            ..Profile::default_settings()
        };
        let row = &ProjectionEngine::new(profile).project().rows[0];

        // 3000 - 525 - 2000 - 2500
        assert_relative_eq!(row.taxable_income, -2025.0);
        assert_eq!(row.tax_rate, 0.03);
        assert_relative_eq!(row.total_tax, -60.75, epsilon = 1e-9);
        assert_relative_eq!(row.net_income, 3000.0 - 525.0 + 60.75, epsilon = 1e-9);
    }

    #[test]
    fn test_monthly_taxes_sum_to_cumulative() {
        let profile = Profile {
            calc_months: 11,
            ..Profile::default_settings()
        };
        let result = ProjectionEngine::new(profile).project();

        let withheld: f64 = result.rows.iter().map(|r| r.tax).sum();
        assert_relative_eq!(withheld, result.rows[11].total_tax, epsilon = 1e-6);
        assert_relative_eq!(result.summary().total_tax_withheld, withheld);
    }

    #[test]
    fn test_custom_schedule() {
        let flat = BracketSchedule::from_brackets(vec![TaxBracket::top(0.2, 0.0)]).unwrap();
        let profile = Profile {
            calc_months: 0,
            ..Profile::default_settings()
        };
        let row = &ProjectionEngine::with_schedule(profile, flat).project().rows[0];

        assert_relative_eq!(row.total_tax, 4975.0 * 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_summary() {
        let result = ProjectionEngine::new(Profile::default_settings()).project();
        let summary = result.summary();

        assert_eq!(summary.total_months, 7);
        assert_relative_eq!(summary.total_tax_withheld, 2742.5, epsilon = 1e-6);
        assert_relative_eq!(summary.total_net_income, 6.0 * 9325.75 + 7628.0, epsilon = 1e-6);
        assert_relative_eq!(summary.final_total_income, 87800.0, epsilon = 1e-9);
        assert_eq!(summary.final_tax_rate, 0.10);
    }

    #[test]
    fn test_rows_are_produced_lazily() {
        let profile = Profile {
            calc_months: i64::MAX,
            ..Profile::default_settings()
        };
        let engine = ProjectionEngine::new(profile);

        let first: Vec<ProjectionRow> = engine.rows().take(3).collect();

        assert_eq!(first.len(), 3);
        assert_eq!(first[2].month, 3);
        assert_relative_eq!(first[2].total_income, 30000.0);
    }

    #[test]
    fn test_rows_match_project() {
        let engine = ProjectionEngine::new(Profile::default_settings());
        let streamed: Vec<ProjectionRow> = engine.rows().collect();

        assert_eq!(streamed, engine.project().rows);
    }

    #[test]
    fn test_rows_size_hint() {
        let engine = ProjectionEngine::new(Profile::default_settings());
        let mut rows = engine.rows();
        assert_eq!(rows.size_hint(), (7, Some(7)));

        rows.next();
        assert_eq!(rows.size_hint(), (6, Some(6)));

        let empty = ProjectionEngine::new(Profile {
            calc_months: -5,
            ..Profile::default()
        });
        assert_eq!(empty.rows().size_hint(), (0, Some(0)));
        assert_eq!(empty.rows().next(), None);
    }

    #[test]
    fn test_last_representable_month_ends_iteration() {
        let profile = Profile {
            calc_months: i64::MAX,
            ..Profile::default()
        };
        let engine = ProjectionEngine::new(profile);
        let mut rows = engine.rows();
        rows.next_index = Some(i64::MAX);

        assert_eq!(rows.next().map(|r| r.month), Some(i64::MAX));
        assert_eq!(rows.next(), None);
        assert_eq!(rows.size_hint(), (0, Some(0)));
    }
}
