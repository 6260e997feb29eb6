//! Benchmark records produced by the listing parsers
//!
//! Two record families exist: CPU results (legacy table and current cards)
//! and GPU compute results. Each family has a fixed column list; projecting
//! a record onto a column list goes through the closed [`Column`] enum so a
//! column the record does not own simply comes back as `None`.

use std::fmt;

/// Schema identifier stamped on every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaTag {
    /// Legacy CPU results table (`/v4/cpu`)
    V4,
    /// Current CPU result cards (`/v6/cpu`)
    V6,
    /// Current GPU compute result cards (`/v6/compute`)
    V6Compute,
}

impl SchemaTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V4 => "v4",
            Self::V6 => "v6",
            Self::V6Compute => "v6-compute",
        }
    }

    pub const fn family(self) -> RecordFamily {
        match self {
            Self::V4 | Self::V6 => RecordFamily::Cpu,
            Self::V6Compute => RecordFamily::Gpu,
        }
    }
}

impl fmt::Display for SchemaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every column any record family can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Uploaded,
    System,
    CpuDetails,
    FrequencyMhz,
    Cores,
    Platform,
    User,
    SingleCoreScore,
    MultiCoreScore,
    Api,
    ScoreLabel,
    ComputeScore,
    ResultUrl,
    Schema,
}

impl Column {
    /// Header text written to the output file
    pub const fn header(self) -> &'static str {
        match self {
            Self::Uploaded => "Uploaded",
            Self::System => "System",
            Self::CpuDetails => "CPU Details",
            Self::FrequencyMhz => "Frequency_MHz",
            Self::Cores => "Cores",
            Self::Platform => "Platform",
            Self::User => "User",
            Self::SingleCoreScore => "Single-Core Score",
            Self::MultiCoreScore => "Multi-Core Score",
            Self::Api => "API",
            Self::ScoreLabel => "Score Label",
            Self::ComputeScore => "Compute Score",
            Self::ResultUrl => "Result URL",
            Self::Schema => "Schema",
        }
    }
}

pub const CPU_COLUMNS: [Column; 11] = [
    Column::Uploaded,
    Column::System,
    Column::CpuDetails,
    Column::FrequencyMhz,
    Column::Cores,
    Column::Platform,
    Column::User,
    Column::SingleCoreScore,
    Column::MultiCoreScore,
    Column::ResultUrl,
    Column::Schema,
];

pub const GPU_COLUMNS: [Column; 11] = [
    Column::Uploaded,
    Column::System,
    Column::CpuDetails,
    Column::FrequencyMhz,
    Column::Cores,
    Column::Platform,
    Column::Api,
    Column::ScoreLabel,
    Column::ComputeScore,
    Column::ResultUrl,
    Column::Schema,
];

/// Record family; decides the column list used for export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFamily {
    Cpu,
    Gpu,
}

impl RecordFamily {
    pub const fn columns(self) -> &'static [Column] {
        match self {
            Self::Cpu => &CPU_COLUMNS,
            Self::Gpu => &GPU_COLUMNS,
        }
    }

    pub fn headers(self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.header()).collect()
    }
}

/// CPU model line, e.g. "Intel Core i7-8700K 3700 MHz (6 cores)", with the
/// numbers pulled out of it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuDetails {
    pub text: String,
    pub frequency_mhz: Option<f64>,
    pub cores: Option<u32>,
}

impl CpuDetails {
    pub fn from_text(text: String) -> Self {
        use crate::infrastructure::text_normalizer::{extract_core_count, extract_frequency_mhz};

        let frequency_mhz = extract_frequency_mhz(&text);
        let cores = extract_core_count(&text);
        Self {
            text,
            frequency_mhz,
            cores,
        }
    }
}

/// One CPU benchmark submission (`v4` or `v6`)
#[derive(Debug, Clone, PartialEq)]
pub struct CpuRecord {
    pub uploaded: String,
    pub system: String,
    pub details: CpuDetails,
    pub platform: String,
    pub user: String,
    pub single_core_score: Option<u64>,
    pub multi_core_score: Option<u64>,
    pub result_url: String,
    pub schema: SchemaTag,
}

/// One GPU compute submission (`v6-compute`)
#[derive(Debug, Clone, PartialEq)]
pub struct GpuRecord {
    pub uploaded: String,
    pub system: String,
    pub details: CpuDetails,
    pub platform: String,
    pub api: String,
    /// Observed score column label, e.g. "Vulkan Score"
    pub score_label: String,
    pub compute_score: Option<u64>,
    pub result_url: String,
    pub schema: SchemaTag,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BenchmarkRecord {
    Cpu(CpuRecord),
    Gpu(GpuRecord),
}

impl BenchmarkRecord {
    pub const fn schema(&self) -> SchemaTag {
        match self {
            Self::Cpu(r) => r.schema,
            Self::Gpu(r) => r.schema,
        }
    }

    pub const fn family(&self) -> RecordFamily {
        match self {
            Self::Cpu(_) => RecordFamily::Cpu,
            Self::Gpu(_) => RecordFamily::Gpu,
        }
    }

    pub fn system(&self) -> &str {
        match self {
            Self::Cpu(r) => &r.system,
            Self::Gpu(r) => &r.system,
        }
    }

    pub fn result_url(&self) -> &str {
        match self {
            Self::Cpu(r) => &r.result_url,
            Self::Gpu(r) => &r.result_url,
        }
    }

    /// A record with neither a system name nor a result link carries nothing
    /// worth keeping
    pub fn is_valid(&self) -> bool {
        !self.system().is_empty() || !self.result_url().is_empty()
    }

    /// Rendered value of `column`, `None` when the record has no such field
    /// or the field is null
    pub fn field(&self, column: Column) -> Option<String> {
        match self {
            Self::Cpu(r) => r.field(column),
            Self::Gpu(r) => r.field(column),
        }
    }

    /// Values in `columns` order; absent fields become the empty placeholder
    pub fn project(&self, columns: &[Column]) -> Vec<String> {
        columns
            .iter()
            .map(|c| self.field(*c).unwrap_or_default())
            .collect()
    }
}

impl From<CpuRecord> for BenchmarkRecord {
    fn from(record: CpuRecord) -> Self {
        Self::Cpu(record)
    }
}

impl From<GpuRecord> for BenchmarkRecord {
    fn from(record: GpuRecord) -> Self {
        Self::Gpu(record)
    }
}

impl CpuRecord {
    fn field(&self, column: Column) -> Option<String> {
        match column {
            Column::Uploaded => Some(self.uploaded.clone()),
            Column::System => Some(self.system.clone()),
            Column::CpuDetails => Some(self.details.text.clone()),
            Column::FrequencyMhz => self.details.frequency_mhz.map(format_frequency),
            Column::Cores => self.details.cores.map(|c| c.to_string()),
            Column::Platform => Some(self.platform.clone()),
            Column::User => Some(self.user.clone()),
            Column::SingleCoreScore => self.single_core_score.map(|s| s.to_string()),
            Column::MultiCoreScore => self.multi_core_score.map(|s| s.to_string()),
            Column::ResultUrl => Some(self.result_url.clone()),
            Column::Schema => Some(self.schema.as_str().to_string()),
            Column::Api | Column::ScoreLabel | Column::ComputeScore => None,
        }
    }
}

impl GpuRecord {
    fn field(&self, column: Column) -> Option<String> {
        match column {
            Column::Uploaded => Some(self.uploaded.clone()),
            Column::System => Some(self.system.clone()),
            Column::CpuDetails => Some(self.details.text.clone()),
            Column::FrequencyMhz => self.details.frequency_mhz.map(format_frequency),
            Column::Cores => self.details.cores.map(|c| c.to_string()),
            Column::Platform => Some(self.platform.clone()),
            Column::Api => Some(self.api.clone()),
            Column::ScoreLabel => Some(self.score_label.clone()),
            Column::ComputeScore => self.compute_score.map(|s| s.to_string()),
            Column::ResultUrl => Some(self.result_url.clone()),
            Column::Schema => Some(self.schema.as_str().to_string()),
            Column::User | Column::SingleCoreScore | Column::MultiCoreScore => None,
        }
    }
}

/// Frequencies always keep a decimal point: `3200.0`, `2400.5`
fn format_frequency(mhz: f64) -> String {
    if mhz.fract() == 0.0 {
        format!("{mhz:.1}")
    } else {
        mhz.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_record() -> CpuRecord {
        CpuRecord {
            uploaded: "Mar 01, 2024".to_string(),
            system: "Dell Inc. XPS 15".to_string(),
            details: CpuDetails::from_text("Intel Core i7-8700K 3700 MHz (6 cores)".to_string()),
            platform: "Windows".to_string(),
            user: "alice".to_string(),
            single_core_score: Some(1234),
            multi_core_score: None,
            result_url: "/v6/cpu/123".to_string(),
            schema: SchemaTag::V6,
        }
    }

    #[test]
    fn test_column_lists_differ_from_offset_six() {
        assert_eq!(CPU_COLUMNS.len(), 11);
        assert_eq!(GPU_COLUMNS.len(), 11);
        assert_eq!(CPU_COLUMNS[..6], GPU_COLUMNS[..6]);
        assert_eq!(
            RecordFamily::Gpu.headers()[6..9],
            ["API", "Score Label", "Compute Score"]
        );
        assert_eq!(RecordFamily::Cpu.headers()[6], "User");
    }

    #[test]
    fn test_cpu_projection_fills_nulls() {
        let record = BenchmarkRecord::from(cpu_record());
        let row = record.project(&CPU_COLUMNS);
        assert_eq!(
            row,
            vec![
                "Mar 01, 2024",
                "Dell Inc. XPS 15",
                "Intel Core i7-8700K 3700 MHz (6 cores)",
                "3700.0",
                "6",
                "Windows",
                "alice",
                "1234",
                "",
                "/v6/cpu/123",
                "v6",
            ]
        );
    }

    #[test]
    fn test_projection_onto_foreign_columns_is_empty() {
        let record = BenchmarkRecord::from(cpu_record());
        let row = record.project(&GPU_COLUMNS);
        assert_eq!(row[6], "");
        assert_eq!(row[7], "");
        assert_eq!(row[8], "");
        assert_eq!(row[10], "v6");
    }

    #[test]
    fn test_validity_requires_system_or_url() {
        let mut record = cpu_record();
        record.system.clear();
        assert!(BenchmarkRecord::from(record.clone()).is_valid());
        record.result_url.clear();
        assert!(!BenchmarkRecord::from(record).is_valid());
    }

    #[test]
    fn test_format_frequency() {
        assert_eq!(format_frequency(3200.0), "3200.0");
        assert_eq!(format_frequency(2400.5), "2400.5");
    }

    #[test]
    fn test_schema_families() {
        assert_eq!(SchemaTag::V4.family(), RecordFamily::Cpu);
        assert_eq!(SchemaTag::V6.family(), RecordFamily::Cpu);
        assert_eq!(SchemaTag::V6Compute.family(), RecordFamily::Gpu);
        assert_eq!(SchemaTag::V6Compute.to_string(), "v6-compute");
    }
}
