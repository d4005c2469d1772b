//! CSV export of sales history.

use crate::{
    entities::sale,
    errors::{Error, Result},
};
use chrono::{Local, NaiveDate, TimeZone};

/// Column headers, in output order.
pub const SALES_CSV_HEADERS: [&str; 5] = ["Product Name", "Company", "Price", "Units Sold", "Date"];

/// Renders sales as CSV with every field double-quoted. Dates are the sale's
/// calendar day in `tz`.
///
/// # Errors
/// Returns `Error::Export` if the CSV writer fails.
pub fn export_sales_csv_in<Tz: TimeZone>(sales: &[sale::Model], tz: &Tz) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(SALES_CSV_HEADERS)?;
    for sale in sales {
        let date = sale.sale_date.with_timezone(tz).date_naive();
        wtr.write_record([
            sale.product_name.clone(),
            sale.company.clone(),
            format!("{:.2}", sale.price),
            sale.quantity.to_string(),
            date.format("%Y-%m-%d").to_string(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| Error::Export {
        message: format!("CSV writer error: {}", e.error()),
    })?;
    String::from_utf8(bytes).map_err(|e| Error::Export {
        message: format!("UTF-8 conversion error: {e}"),
    })
}

/// [`export_sales_csv_in`] using the local timezone.
pub fn export_sales_csv(sales: &[sale::Model]) -> Result<String> {
    export_sales_csv_in(sales, &Local)
}

/// File name for an export made on `date`: `sales-history-YYYY-MM-DD.csv`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("sales-history-{}.csv", date.format("%Y-%m-%d"))
}
