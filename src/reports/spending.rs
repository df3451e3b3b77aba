//! Spending Report
//!
//! Spending over a period: totals, a per-category breakdown (pie chart data)
//! and a trend series (line chart data).

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use chrono::{Datelike, NaiveDate};

use crate::display::DisplayOptions;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::category::UNKNOWN_CATEGORY_COLOR;
use crate::models::{CategoryId, Expense, Money};
use crate::services::{CategoryService, ExpenseService};
use crate::storage::Storage;

use super::listing::UNKNOWN_LABEL;
use super::period::{day_label, month_label, Granularity, ReportPeriod};

/// Label of the placeholder point in an empty trend
pub const NO_DATA_LABEL: &str = "No Data";

/// One slice of the category breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    /// `None` groups expenses whose category no longer exists
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub color: String,
    pub amount: Money,
    pub count: usize,
    /// Share of the period total, 0-100
    pub percentage: f64,
}

/// One point of the trend series
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub amount: Money,
}

#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub period: ReportPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total: Money,
    pub count: usize,
    pub average: Money,
    /// Largest amount first
    pub by_category: Vec<CategorySlice>,
    /// Oldest first, never empty
    pub trend: Vec<TrendPoint>,
}

impl SpendingReport {
    /// Generate the report for the period ending `today`
    pub fn generate(
        storage: &Storage,
        period: ReportPeriod,
        today: NaiveDate,
        trend_points: usize,
    ) -> Self {
        let expenses: Vec<Expense> = ExpenseService::new(storage)
            .list()
            .into_iter()
            .filter(|e| period.contains(e.date, today))
            .collect();

        let total: Money = expenses.iter().map(|e| e.amount).sum();
        let by_category = breakdown(storage, &expenses, total);
        let trend = trend(&expenses, period.granularity(), trend_points);

        Self {
            period,
            start_date: period.start_date(today),
            end_date: today,
            total,
            count: expenses.len(),
            average: Money::average(total, expenses.len()),
            by_category,
            trend,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, opts: &DisplayOptions) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Report ({}): {} to {}\n",
            self.period,
            opts.date(self.start_date),
            opts.date(self.end_date)
        ));
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!("Total Spending: {}\n", opts.money(self.total)));
        output.push_str(&format!("Expenses:       {}\n", self.count));
        output.push_str(&format!("Average:        {}\n\n", opts.money(self.average)));

        output.push_str(&format!(
            "{:<30} {:>20} {:>6} {:>7}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        if self.by_category.is_empty() {
            output.push_str("No expenses in this period.\n");
        }
        for slice in &self.by_category {
            output.push_str(&format!(
                "{:<30} {:>20} {:>6} {:>6.1}%\n",
                crate::display::truncate(&slice.name, 30),
                opts.money(slice.amount),
                slice.count,
                slice.percentage
            ));
        }

        output.push_str("\nTrend\n");
        output.push_str(&"-".repeat(70));
        output.push('\n');
        let peak = self.trend.iter().map(|p| p.amount).max().unwrap_or_default();
        for point in &self.trend {
            output.push_str(&format!(
                "{:<10} {:>20} {}\n",
                point.label,
                opts.money(point.amount),
                bar(point.amount, peak, 30)
            ));
        }

        output
    }

    /// Export the category breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let to_err = |e: csv::Error| ExpenseError::Export(e.to_string());

        csv.write_record([
            "Period",
            "Start Date",
            "End Date",
            "Category",
            "Amount",
            "Count",
            "Percentage",
        ])
        .map_err(to_err)?;

        for slice in &self.by_category {
            csv.write_record([
                self.period.as_str().to_string(),
                self.start_date.to_string(),
                self.end_date.to_string(),
                slice.name.clone(),
                format!("{:.2}", slice.amount.as_f64()),
                slice.count.to_string(),
                format!("{:.2}", slice.percentage),
            ])
            .map_err(to_err)?;
        }

        csv.flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        Ok(())
    }
}

fn breakdown(storage: &Storage, expenses: &[Expense], total: Money) -> Vec<CategorySlice> {
    let categories = CategoryService::new(storage).lookup();

    let mut sums: HashMap<Option<CategoryId>, (Money, usize)> = HashMap::new();
    for expense in expenses {
        let key = categories
            .contains_key(&expense.category_id)
            .then_some(expense.category_id);
        let entry = sums.entry(key).or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut slices: Vec<CategorySlice> = sums
        .into_iter()
        .map(|(key, (amount, count))| {
            let (name, color) = match key.and_then(|id| categories.get(&id)) {
                Some(c) => (c.name.clone(), c.color.clone()),
                None => (UNKNOWN_LABEL.to_string(), UNKNOWN_CATEGORY_COLOR.to_string()),
            };
            let percentage = if total.is_zero() {
                0.0
            } else {
                amount.as_f64() / total.as_f64() * 100.0
            };
            CategorySlice {
                category_id: key,
                name,
                color,
                amount,
                count,
                percentage,
            }
        })
        .collect();

    slices.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
    slices
}

fn trend(expenses: &[Expense], granularity: Granularity, points: usize) -> Vec<TrendPoint> {
    let mut series: Vec<TrendPoint> = match granularity {
        Granularity::Daily => {
            let mut days: BTreeMap<NaiveDate, Money> = BTreeMap::new();
            for e in expenses {
                *days.entry(e.date).or_default() += e.amount;
            }
            days.into_iter()
                .map(|(day, amount)| TrendPoint {
                    label: day_label(day),
                    amount,
                })
                .collect()
        }
        Granularity::Monthly => {
            let mut months: BTreeMap<(i32, u32), Money> = BTreeMap::new();
            for e in expenses {
                *months.entry((e.date.year(), e.date.month())).or_default() += e.amount;
            }
            months
                .into_iter()
                .map(|((year, month), amount)| TrendPoint {
                    label: month_label(year, month),
                    amount,
                })
                .collect()
        }
    };

    let skip = series.len().saturating_sub(points);
    series.drain(..skip);

    if series.is_empty() {
        series.push(TrendPoint {
            label: NO_DATA_LABEL.to_string(),
            amount: Money::zero(),
        });
    }
    series
}

fn bar(amount: Money, peak: Money, width: usize) -> String {
    if peak.minor() <= 0 {
        return String::new();
    }
    let filled = (amount.as_f64() / peak.as_f64() * width as f64).round() as usize;
    "#".repeat(filled.min(width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCategory, NewExpense, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(storage: &Storage, units: i64, date: NaiveDate, category_id: CategoryId) {
        storage.expenses.add(NewExpense {
            title: "x".into(),
            amount: Money::from_units(units),
            category_id,
            date,
            notes: None,
            user_id: UserId::new(),
        });
    }

    #[test]
    fn test_period_filter_and_totals() {
        let storage = Storage::in_memory();
        let food = storage.categories.add(NewCategory::new("Makanan", "#FF6384"));
        let today = date(2024, 6, 15);

        add(&storage, 10_000, today, food.id);
        add(&storage, 20_000, date(2024, 6, 8), food.id);
        add(&storage, 40_000, date(2024, 6, 1), food.id);
        add(&storage, 80_000, date(2023, 6, 1), food.id);

        let week = SpendingReport::generate(&storage, ReportPeriod::Week, today, 6);
        assert_eq!(week.total, Money::from_units(30_000));
        assert_eq!(week.count, 2);
        assert_eq!(week.average, Money::from_units(15_000));

        let month = SpendingReport::generate(&storage, ReportPeriod::Month, today, 6);
        assert_eq!(month.total, Money::from_units(70_000));

        let year = SpendingReport::generate(&storage, ReportPeriod::Year, today, 6);
        assert_eq!(year.total, Money::from_units(70_000));
    }

    #[test]
    fn test_breakdown_sorted_with_unknown() {
        let storage = Storage::in_memory();
        let food = storage.categories.add(NewCategory::new("Makanan", "#FF6384"));
        let bills = storage.categories.add(NewCategory::new("Tagihan", "#4BC0C0"));
        let today = date(2024, 6, 15);

        add(&storage, 10_000, today, food.id);
        add(&storage, 50_000, today, bills.id);
        add(&storage, 25_000, today, CategoryId::new());
        add(&storage, 15_000, today, CategoryId::new());

        let report = SpendingReport::generate(&storage, ReportPeriod::Month, today, 6);
        let names: Vec<_> = report.by_category.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Tagihan", "Unknown", "Makanan"]);

        let unknown = &report.by_category[1];
        assert_eq!(unknown.amount, Money::from_units(40_000));
        assert_eq!(unknown.count, 2);
        assert_eq!(unknown.color, UNKNOWN_CATEGORY_COLOR);
        assert!((report.by_category[0].percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_trend_keeps_last_points() {
        let storage = Storage::in_memory();
        let cat = CategoryId::new();
        let today = date(2024, 6, 15);
        for day in 1..=10 {
            add(&storage, 1_000 * day as i64, date(2024, 6, day), cat);
        }
        add(&storage, 500, date(2024, 6, 10), cat);

        let report = SpendingReport::generate(&storage, ReportPeriod::Month, today, 6);
        let labels: Vec<_> = report.trend.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["5 Jun", "6 Jun", "7 Jun", "8 Jun", "9 Jun", "10 Jun"]);
        assert_eq!(report.trend[5].amount, Money::from_units(10_500));
    }

    #[test]
    fn test_monthly_trend_for_year() {
        let storage = Storage::in_memory();
        let cat = CategoryId::new();
        let today = date(2024, 2, 10);
        add(&storage, 1_000, date(2023, 12, 5), cat);
        add(&storage, 2_000, date(2024, 1, 5), cat);
        add(&storage, 3_000, date(2024, 1, 25), cat);

        let report = SpendingReport::generate(&storage, ReportPeriod::Year, today, 6);
        let labels: Vec<_> = report.trend.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Des 2023", "Jan 2024"]);
        assert_eq!(report.trend[1].amount, Money::from_units(5_000));
    }

    #[test]
    fn test_empty_period_has_placeholder_point() {
        let storage = Storage::in_memory();
        let report =
            SpendingReport::generate(&storage, ReportPeriod::Week, date(2024, 6, 15), 6);

        assert!(report.by_category.is_empty());
        assert!(report.average.is_zero());
        assert_eq!(
            report.trend,
            vec![TrendPoint {
                label: NO_DATA_LABEL.to_string(),
                amount: Money::zero()
            }]
        );
        assert!(report
            .format_terminal(&DisplayOptions::default())
            .contains("No expenses in this period."));
    }

    #[test]
    fn test_export_csv() {
        let storage = Storage::in_memory();
        let food = storage.categories.add(NewCategory::new("Makanan, Minuman", "#FF6384"));
        let today = date(2024, 6, 15);
        add(&storage, 12_500, today, food.id);

        let report = SpendingReport::generate(&storage, ReportPeriod::Month, today, 6);
        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Period,Start Date,End Date,Category,Amount,Count,Percentage\n"));
        assert!(text.contains("month,2024-05-15,2024-06-15,\"Makanan, Minuman\",12500.00,1,100.00"));
    }
}
