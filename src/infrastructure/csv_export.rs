//! CSV export of scraped records
//!
//! Rows are projected onto the fixed column list of a record family, so the
//! header is identical for every run of the same mode and null fields come
//! out as empty cells.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::{BenchmarkRecord, RecordFamily};
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Write `records` under the header of `family` to `path`.
///
/// Missing parent directories are created. Returns the number of data rows.
pub fn write_records(
    path: &Path,
    family: RecordFamily,
    records: &[BenchmarkRecord],
) -> ScrapeResult<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ScrapeError::io(parent, e))?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(family.headers())?;

    let columns = family.columns();
    for record in records {
        writer.write_record(record.project(columns))?;
    }
    writer.flush().map_err(|e| ScrapeError::io(path, e))?;

    debug!("Wrote {} {:?} rows to {:?}", records.len(), family, path);
    info!("💾 Saved {} rows → {}", records.len(), path.display());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CpuDetails, CpuRecord, GpuRecord, SchemaTag};

    fn cpu_record() -> BenchmarkRecord {
        CpuRecord {
            uploaded: "Mar 05, 2025".to_string(),
            system: "Lenovo ThinkPad, Gen 3".to_string(),
            details: CpuDetails::from_text("Intel Core i7 2800 MHz (4 cores)".to_string()),
            platform: "Windows".to_string(),
            user: String::new(),
            single_core_score: Some(1500),
            multi_core_score: None,
            result_url: "/v6/cpu/42".to_string(),
            schema: SchemaTag::V6,
        }
        .into()
    }

    #[test]
    fn test_cpu_rows_follow_fixed_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");

        let written = write_records(&path, RecordFamily::Cpu, &[cpu_record()]).unwrap();
        assert_eq!(written, 1);

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Uploaded,System,CPU Details,Frequency_MHz,Cores,Platform,User,Single-Core Score,Multi-Core Score,Result URL,Schema"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Mar 05, 2025\",\"Lenovo ThinkPad, Gen 3\",Intel Core i7 2800 MHz (4 cores),2800.0,4,Windows,,1500,,/v6/cpu/42,v6"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_gpu_header_and_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpu.csv");

        assert_eq!(write_records(&path, RecordFamily::Gpu, &[]).unwrap(), 0);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.trim_end(),
            "Uploaded,System,CPU Details,Frequency_MHz,Cores,Platform,API,Score Label,Compute Score,Result URL,Schema"
        );
    }

    #[test]
    fn test_gpu_row_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpu.csv");
        let record: BenchmarkRecord = GpuRecord {
            uploaded: "today".to_string(),
            system: "Mac14,6".to_string(),
            details: CpuDetails::default(),
            platform: "macOS".to_string(),
            api: "Metal".to_string(),
            score_label: "Metal Score".to_string(),
            compute_score: Some(150_000),
            result_url: "/v6/compute/1".to_string(),
            schema: SchemaTag::V6Compute,
        }
        .into();

        write_records(&path, RecordFamily::Gpu, &[record]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[1], "Mac14,6");
        assert_eq!(&row[3], "");
        assert_eq!(&row[6], "Metal");
        assert_eq!(&row[7], "Metal Score");
        assert_eq!(&row[8], "150000");
        assert_eq!(&row[10], "v6-compute");
    }
}
