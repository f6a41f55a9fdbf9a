//! Full search analytics export for one property.

use chrono::Local;
use gsc_api::credentials::GscClient;
use gsc_api::date_window::{plan_windows, DateWindow};
use gsc_api::search_analytics::{
    self, AnalyticsRow, DEFAULT_DIMENSIONS, DEFAULT_ROW_LIMIT,
};
use log::info;
use std::future::Future;

/// Metric columns appended after the dimension columns, in fixed order.
const METRIC_COLUMNS: [&str; 4] = ["clicks", "impressions", "ctr", "position"];

/// Fetch the full lookback horizon for one property and write it to CSV.
///
/// Windows are fetched strictly in the planner's emission order, most
/// recent first, one request at a time. All rows are held in memory and
/// written in a single pass at the end, so a failed window aborts the
/// run with nothing on disk.
pub async fn run_retrieve(
    site_url: &str,
    key_file: &str,
    months: u32,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let client = GscClient::from_key_file(key_file).await?;
    let today = Local::now().naive_local().date();
    let windows = plan_windows(today, months);
    let dimensions: Vec<String> = DEFAULT_DIMENSIONS.iter().map(|d| d.to_string()).collect();

    let all_rows = collect_rows(&windows, |window| {
        search_analytics::fetch_window(&client, site_url, window, &dimensions, DEFAULT_ROW_LIMIT)
    })
    .await?;

    let output_path = match output {
        Some(path) => path.to_string(),
        None => format!("gsc_data_{}.csv", today.format("%Y%m%d")),
    };
    let file = std::fs::File::create(&output_path)?;
    write_rows(file, &dimensions, &all_rows)?;

    info!("Data retrieval complete! Total rows: {}", all_rows.len());
    info!("Data saved to {}", output_path);
    Ok(())
}

/// Fetch every window in order and concatenate the non-empty results.
///
/// The first failed window aborts the whole collection; rows from
/// already-fetched windows are dropped with it, so nothing reaches the
/// output file on a partial run.
async fn collect_rows<F, Fut>(
    windows: &[DateWindow],
    mut fetch: F,
) -> gsc_api::error::Result<Vec<AnalyticsRow>>
where
    F: FnMut(DateWindow) -> Fut,
    Fut: Future<Output = gsc_api::error::Result<Vec<AnalyticsRow>>>,
{
    let mut all_rows: Vec<AnalyticsRow> = Vec::new();
    for window in windows {
        info!(
            "Fetching data from {} to {}...",
            window.start_date, window.end_date
        );

        let rows = fetch(*window).await?;
        if rows.is_empty() {
            info!("No data retrieved for this period");
        } else {
            info!("Retrieved {} rows of data", rows.len());
            all_rows.extend(rows);
        }
    }
    Ok(all_rows)
}

/// Serialize flattened rows as CSV: dimension columns in configured
/// order, then the metric columns.
fn write_rows<W: std::io::Write>(
    writer: W,
    dimensions: &[String],
    rows: &[AnalyticsRow],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = dimensions.iter().map(String::as_str).collect();
    header.extend(METRIC_COLUMNS);
    wtr.write_record(&header)?;

    for row in rows {
        let mut record: Vec<String> = row
            .dimensions
            .iter()
            .map(|(_, value)| value.clone())
            .collect();
        record.push(row.clicks.to_string());
        record.push(row.impressions.to_string());
        record.push(row.ctr.to_string());
        record.push(row.position.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
