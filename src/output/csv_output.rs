//! CSV export of extracted records

use crate::config::CsvLayout;
use crate::output::Record;
use crate::HarvestError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes records as CSV to any writer
///
/// The header row is always written, so a run without records still
/// produces a valid file. Fields are quoted by the CSV writer when they
/// contain delimiters, quotes or newlines.
///
/// # Arguments
///
/// * `writer` - Destination of the CSV text
/// * `records` - Records in the order they should appear
/// * `layout` - `Full` for `Url,Image,Name,Price`, `UrlOnly` for `Url`
pub fn write_records<W: Write>(
    writer: W,
    records: &[Record],
    layout: CsvLayout,
) -> Result<(), HarvestError> {
    let mut writer = csv::Writer::from_writer(writer);

    match layout {
        CsvLayout::Full => {
            writer.write_record(["Url", "Image", "Name", "Price"])?;
            for record in records {
                writer.write_record(record.fields_or_sentinel())?;
            }
        }
        CsvLayout::UrlOnly => {
            writer.write_record(["Url"])?;
            for record in records {
                writer.write_record([record.url_or_sentinel()])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes records to a CSV file, replacing any existing file
///
/// # Example
///
/// ```no_run
/// use paged_harvest::config::CsvLayout;
/// use paged_harvest::output::write_csv;
/// use std::path::Path;
///
/// write_csv(Path::new("products.csv"), &[], CsvLayout::Full).unwrap();
/// ```
pub fn write_csv(path: &Path, records: &[Record], layout: CsvLayout) -> Result<(), HarvestError> {
    let file = File::create(path)?;
    write_records(file, records, layout)?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
