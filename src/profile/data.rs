//! Profile data structures matching the persisted JSON layout

use serde::{Deserialize, Serialize};

/// Social insurance and housing fund ("five insurances, one fund") parameters
///
/// Only the personal ratios reach the projection; the company ratios are
/// carried so the persisted document round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Insurance {
    /// Contribution base for social insurance
    pub social_insurance_base: f64,
    /// Contribution base for the housing fund
    pub housing_fund_base: f64,
    pub social_insurance_comp_ratio: f64,
    pub housing_fund_comp_ratio: f64,
    pub social_insurance_pers_ratio: f64,
    pub housing_fund_pers_ratio: f64,
}

impl Insurance {
    /// Employee share withheld each month
    pub fn personal_contribution(&self) -> f64 {
        self.social_insurance_base * self.social_insurance_pers_ratio
            + self.housing_fund_base * self.housing_fund_pers_ratio
    }

    /// Employer share paid each month
    pub fn company_contribution(&self) -> f64 {
        self.social_insurance_base * self.social_insurance_comp_ratio
            + self.housing_fund_base * self.housing_fund_comp_ratio
    }
}

/// Fixed monthly special additional deductions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecialDeduction {
    /// Children's education
    #[serde(rename = "children")]
    pub education_children: f64,
    /// Continuing education for the taxpayer
    #[serde(rename = "myself")]
    pub education_myself: f64,
    pub medical_cost: f64,
    pub housing_cost: f64,
    pub support_parents: f64,
}

impl SpecialDeduction {
    /// Sum of all categories, unweighted
    pub fn monthly_total(&self) -> f64 {
        self.education_children
            + self.education_myself
            + self.housing_cost
            + self.medical_cost
            + self.support_parents
    }
}

/// Complete configuration for one projection run
///
/// `Default` yields an all-zero profile, which is also what a persisted
/// document with missing keys deserializes to. The documented starter
/// values come from [`Profile::default_settings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    /// Gross monthly salary
    pub salary_monthly: f64,

    /// Year-end bonus as a multiple of the monthly salary
    pub year_end_bonus_ratio: f64,

    /// 0-based month index in which the bonus is paid; may fall outside the
    /// projected range, in which case it is never paid
    pub year_end_bonus_date: i64,

    pub insurance: Insurance,

    pub deduction: SpecialDeduction,

    /// Last 0-based month index to project (rows = calc_months + 1)
    pub calc_months: i64,
}

impl Profile {
    /// Starter profile written on first run
    pub fn default_settings() -> Self {
        Self {
            salary_monthly: 10000.0,
            year_end_bonus_ratio: 1.78,
            year_end_bonus_date: 6,
            insurance: Insurance {
                social_insurance_base: 2500.0,
                housing_fund_base: 8000.0,
                social_insurance_comp_ratio: 0.05,
                housing_fund_comp_ratio: 0.05,
                social_insurance_pers_ratio: 0.05,
                housing_fund_pers_ratio: 0.05,
            },
            deduction: SpecialDeduction {
                education_children: 0.0,
                education_myself: 0.0,
                medical_cost: 0.0,
                housing_cost: 1000.0,
                support_parents: 1000.0,
            },
            calc_months: 6,
        }
    }

    /// Personal insurance contribution for one month
    pub fn monthly_insurance(&self) -> f64 {
        self.insurance.personal_contribution()
    }

    /// Employer insurance contribution for one month (not used in withholding)
    pub fn monthly_company_contribution(&self) -> f64 {
        self.insurance.company_contribution()
    }

    /// Special deductions claimed each month
    pub fn monthly_deduction(&self) -> f64 {
        self.deduction.monthly_total()
    }

    /// One-time year-end bonus amount
    pub fn year_end_bonus(&self) -> f64 {
        self.salary_monthly * self.year_end_bonus_ratio
    }

    /// Whether the bonus lands in the given 0-based month
    pub fn bonus_paid_in(&self, month_index: i64) -> bool {
        month_index == self.year_end_bonus_date
    }
}
