//! Plain-text table for projection results

use std::io::{self, Write};

use crate::projection::{ProjectionRow, ProjectionSummary};

/// Column labels, in row order
pub const COLUMN_HEADERS: [&str; 11] = [
    "统计月份",
    "累计税前收入",
    "累计社保",
    "累计专项扣除",
    "累计扣除基数",
    "计税收入",
    "税率",
    "速算扣除数",
    "累计应纳税额",
    "当月纳税额",
    "当月税后收入",
];

const SEPARATOR: &str = " | ";

pub fn header() -> String {
    COLUMN_HEADERS.join(SEPARATOR)
}

/// Fixed-width line for one month: money rounded to whole units, rate to two decimals
pub fn format_row(row: &ProjectionRow) -> String {
    format!(
        "{:>4}月份 | {:<12.0} | {:<8.0} | {:<12.0} | {:<12.0} | {:<8.0} | {:<4.2} | {:<10.0} | {:<12.0} | {:<10.0} | {:<12.0}",
        row.month,
        row.total_income,
        row.total_insurance,
        row.total_deduction,
        row.total_base_num,
        row.taxable_income,
        row.tax_rate,
        row.quick_deduction,
        row.total_tax,
        row.tax,
        row.net_income,
    )
}

/// Write the header, then each row as it is produced.
///
/// Rows are dropped once written; the returned summary is folded along the way.
pub fn write_table<W, I>(out: &mut W, rows: I) -> io::Result<ProjectionSummary>
where
    W: Write,
    I: IntoIterator<Item = ProjectionRow>,
{
    let mut summary = ProjectionSummary::default();

    writeln!(out, "{}", header())?;
    for row in rows {
        writeln!(out, "{}", format_row(&row))?;
        summary.record(&row);
    }
    out.flush()?;

    Ok(summary)
}
