use crate::config::PartitionConfig;
use crate::engine::Plan;
use crate::feasibility::FeasibilityReport;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub version: String,
    pub created_at: String,
    pub generator: String,
    /// True when nothing was written
    pub dry_run: bool,
    pub limits: ReportLimits,
    pub feasibility: FeasibilityReport,
    pub stats: ReportStats,
    pub outputs: Vec<ReportEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportLimits {
    pub max_size: usize,
    pub max_files: usize,
    pub split_pattern: String,
    pub join_separator: String,
    pub encoding: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportStats {
    pub input_count: usize,
    pub split_documents: usize,
    pub part_count: usize,
    pub bin_count: usize,
    pub merged_documents: usize,
    pub untouched_count: usize,
    pub output_count: usize,
    /// Outputs over max_size because a single line could not be cut
    pub oversized_outputs: usize,
    pub total_chars: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportEntry {
    pub path: String,
    pub kind: String,
    pub size: usize,
    pub sha256: String,
    pub sources: Vec<String>,
}

impl RunReport {
    /// Summarize a plan, whether or not it was committed
    pub fn new(plan: &Plan, config: &PartitionConfig, dry_run: bool) -> Self {
        let outputs: Vec<ReportEntry> = plan
            .outputs
            .iter()
            .map(|output| ReportEntry {
                path: output.path.display().to_string(),
                kind: output.kind.label().to_string(),
                size: output.size,
                sha256: sha256_hex(&output.content),
                sources: output
                    .kind
                    .sources(&output.path)
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            })
            .collect();

        let bin_count = plan.count("bin");
        let stats = ReportStats {
            input_count: plan.input_count,
            split_documents: plan.split_documents,
            part_count: plan.count("part"),
            bin_count,
            merged_documents: plan.merges + bin_count,
            untouched_count: plan.count("untouched"),
            output_count: outputs.len(),
            oversized_outputs: plan.oversized_outputs(config.max_size),
            total_chars: outputs.iter().map(|o| o.size).sum(),
        };

        Self {
            version: "1.0.0".to_string(),
            created_at: Utc::now().to_rfc3339(),
            generator: format!("partpack v{}", env!("CARGO_PKG_VERSION")),
            dry_run,
            limits: ReportLimits {
                max_size: config.max_size,
                max_files: config.max_files,
                split_pattern: config.split_pattern.clone(),
                join_separator: config.join_separator.clone(),
                encoding: config.encoding.clone(),
            },
            feasibility: plan.feasibility,
            stats,
            outputs,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize run report")
    }

    /// Write the report as pretty JSON
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write run report to {}", path.display()))?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}

/// Hex SHA-256 of the UTF-8 text
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
