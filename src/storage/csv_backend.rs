use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::info;

use crate::analysis::collector::RollingReport;
use crate::domain::Transaction;
use crate::errors::{AnalysisError, Result};

/// Reads transactions from a headered CSV file of
/// `transaction_id,account_id,transaction_day,category,transaction_amount`.
///
/// Field extraction failures surface as [`AnalysisError::MissingField`] and
/// numeric parse failures as [`AnalysisError::TypeConversion`], both carrying
/// the zero-based data row they occurred on.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    // Flexible so short rows surface as MissingField rather than a framing
    // error from the reader itself.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut transactions = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        transactions.push(parse_record(&record, row)?);
    }
    info!(
        count = transactions.len(),
        path = %path.display(),
        "loaded transactions"
    );
    Ok(transactions)
}

fn parse_record(record: &csv::StringRecord, row: usize) -> Result<Transaction> {
    let field = |index: usize, name: &'static str| {
        record.get(index).ok_or(AnalysisError::MissingField {
            field: name,
            record: row,
        })
    };

    let id = field(0, "transaction_id")?.to_string();
    let account_id = field(1, "account_id")?.to_string();
    let day = field(2, "transaction_day")?
        .parse::<u32>()
        .map_err(|err| AnalysisError::TypeConversion {
            field: "transaction_day",
            record: row,
            message: err.to_string(),
        })?;
    let category = field(3, "category")?.to_string();
    let amount = field(4, "transaction_amount")?
        .parse::<f64>()
        .map_err(|err| AnalysisError::TypeConversion {
            field: "transaction_amount",
            record: row,
            message: err.to_string(),
        })?;

    Ok(Transaction {
        id,
        account_id,
        day,
        category,
        amount,
    })
}

/// Writes the `Day,Total` daily totals report.
pub fn write_daily_totals(path: &Path, totals: &BTreeMap<u32, f64>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Day", "Total"])?;
    for (day, total) in totals {
        writer.write_record([day.to_string(), format!("{total:.2}")])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the per-account category average report, one column per observed
/// category.
pub fn write_category_averages(
    path: &Path,
    averages: &BTreeMap<String, BTreeMap<String, f64>>,
    categories: &BTreeSet<String>,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec!["Account ID".to_string()];
    header.extend(categories.iter().map(|name| format!("{name} Average")));
    writer.write_record(&header)?;

    for (account_id, row) in averages {
        let mut fields = vec![account_id.clone()];
        for category in categories {
            let mean = row.get(category).copied().unwrap_or(0.0);
            fields.push(format!("{mean:.2}"));
        }
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the rolling window report, one row per `(day, account)` pair and
/// one trailing column per target category.
pub fn write_rolling_report(
    path: &Path,
    report: &RollingReport,
    targets: &BTreeSet<String>,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec![
        "Day".to_string(),
        "Account ID".to_string(),
        "Max Transaction".to_string(),
        "Mean Transaction".to_string(),
    ];
    header.extend(targets.iter().map(|name| format!("{name} Total Value")));
    writer.write_record(&header)?;

    for row in report.rows() {
        let mut fields = vec![
            row.day.to_string(),
            row.account_id.to_string(),
            format!("{:.2}", row.aggregate.max),
            format!("{:.2}", row.aggregate.mean()),
        ];
        for category in targets {
            let value = row
                .aggregate
                .category_totals
                .get(category)
                .copied()
                .unwrap_or(0.0);
            fields.push(format!("{value:.2}"));
        }
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    info!(rows = report.len(), path = %path.display(), "wrote rolling report");
    Ok(())
}
