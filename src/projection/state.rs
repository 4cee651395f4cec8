//! Year-to-date accumulators carried between projected months

use crate::profile::Profile;

/// Running totals at a point in the projection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionState {
    /// Cumulative pre-tax income, bonus included
    pub total_income: f64,

    /// Cumulative personal insurance contributions
    pub total_insurance: f64,

    /// Cumulative special deductions
    pub total_deduction: f64,

    /// Cumulative deduction base (social insurance base added each month)
    pub total_base_num: f64,

    /// Cumulative tax payable as of the previous month
    pub last_total_tax: f64,
}

impl ProjectionState {
    /// Fresh state before the first month
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one month of income and deductions.
    ///
    /// The bonus is booked before the regular salary when both fall in the
    /// same month.
    pub fn accumulate_month(&mut self, profile: &Profile, month_index: i64) {
        if profile.bonus_paid_in(month_index) {
            self.total_income += profile.year_end_bonus();
        }
        self.total_income += profile.salary_monthly;
        self.total_insurance += profile.monthly_insurance();
        self.total_deduction += profile.monthly_deduction();
        self.total_base_num += profile.insurance.social_insurance_base;
    }

    /// Cumulative taxable income; not clamped at zero
    pub fn taxable_income(&self) -> f64 {
        self.total_income - self.total_insurance - self.total_deduction - self.total_base_num
    }
}
