//! Progressive tax bracket schedule

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One band of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Exclusive upper bound of cumulative taxable income; `None` for the top band
    pub upper_bound: Option<f64>,
    /// Marginal rate
    pub rate: f64,
    /// Quick deduction subtracted from `income * rate`
    pub quick_deduction: f64,
}

impl TaxBracket {
    pub const fn bounded(upper_bound: f64, rate: f64, quick_deduction: f64) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
            quick_deduction,
        }
    }

    pub const fn top(rate: f64, quick_deduction: f64) -> Self {
        Self {
            upper_bound: None,
            rate,
            quick_deduction,
        }
    }

    fn contains(&self, taxable_income: f64) -> bool {
        match self.upper_bound {
            Some(bound) => taxable_income < bound,
            None => true,
        }
    }
}

/// Cumulative (year-to-date) withholding schedule for wages, 2019 reform
const IIT_2019: [TaxBracket; 7] = [
    TaxBracket::bounded(36_000.0, 0.03, 0.0),
    TaxBracket::bounded(144_000.0, 0.10, 2_520.0),
    TaxBracket::bounded(300_000.0, 0.20, 16_920.0),
    TaxBracket::bounded(420_000.0, 0.25, 31_920.0),
    TaxBracket::bounded(660_000.0, 0.30, 52_920.0),
    TaxBracket::bounded(960_000.0, 0.35, 85_920.0),
    TaxBracket::top(0.45, 181_920.0),
];

/// Errors for schedules built from caller-supplied bands
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("no tax brackets provided")]
    Empty,

    #[error("bracket {index} upper bound {bound} is not above the previous bound")]
    NotAscending { index: usize, bound: f64 },

    #[error("only the last bracket may be unbounded (bracket {index})")]
    UnboundedBeforeEnd { index: usize },

    #[error("last bracket must be unbounded")]
    BoundedTop,
}

/// Ordered list of bands; the first band whose bound exceeds the income applies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Schedule in force since 2019
    pub fn iit_2019() -> Self {
        Self {
            brackets: IIT_2019.to_vec(),
        }
    }

    /// Build a custom schedule. Bounds must strictly increase and only the
    /// last band may (and must) be unbounded.
    pub fn from_brackets(brackets: Vec<TaxBracket>) -> Result<Self, ScheduleError> {
        let last = brackets.len().checked_sub(1).ok_or(ScheduleError::Empty)?;

        let mut previous: Option<f64> = None;
        for (index, bracket) in brackets.iter().enumerate() {
            match bracket.upper_bound {
                Some(bound) => {
                    if index == last {
                        return Err(ScheduleError::BoundedTop);
                    }
                    if previous.is_some_and(|p| bound <= p) {
                        return Err(ScheduleError::NotAscending { index, bound });
                    }
                    previous = Some(bound);
                }
                None if index != last => return Err(ScheduleError::UnboundedBeforeEnd { index }),
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Band applying to the given cumulative taxable income.
    ///
    /// Bounds are exclusive, so income equal to a bound falls into the next
    /// band. Negative income lands in the lowest band.
    pub fn lookup(&self, taxable_income: f64) -> &TaxBracket {
        self.brackets
            .iter()
            .find(|b| b.contains(taxable_income))
            .unwrap_or(&self.brackets[self.brackets.len() - 1])
    }

    /// `(rate, quick_deduction)` for the given cumulative taxable income
    pub fn rate_for(&self, taxable_income: f64) -> (f64, f64) {
        let bracket = self.lookup(taxable_income);
        (bracket.rate, bracket.quick_deduction)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl Default for BracketSchedule {
    fn default() -> Self {
        Self::iit_2019()
    }
}
