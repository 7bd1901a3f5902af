use std::path::{Path, PathBuf};
use crate::errors::MuniError;
use crate::models::{RemediationDocument, ScoreRecord};
use super::charts::ChartSpec;
use super::formatter::{format_remediation_html, format_remediation_markdown, format_top_findings};
use tracing::{debug, info};

async fn ensure_parent(path: &Path) -> Result<(), MuniError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Write one JSON object per line. The file is truncated first so a run
/// always leaves exactly its own records behind.
pub async fn write_score_records(path: &Path, records: &[ScoreRecord]) -> Result<(), MuniError> {
    ensure_parent(path).await?;
    let mut content = String::new();
    for record in records {
        content.push_str(&serde_json::to_string(record)?);
        content.push('\n');
    }
    tokio::fs::write(path, content).await?;
    info!(path = %path.display(), records = records.len(), "Score records written");
    Ok(())
}

/// Read an NDJSON score file. Blank lines are ignored; any other line that
/// does not decode is a malformed record.
pub async fn read_score_records(path: &Path) -> Result<Vec<ScoreRecord>, MuniError> {
    if !path.exists() {
        return Err(MuniError::NotFound(format!("Score file not found: {}", path.display())));
    }
    let content = tokio::fs::read_to_string(path).await?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| {
                MuniError::malformed(&format!("{}:{}", path.display(), i + 1), e.to_string())
            })
        })
        .collect()
}

pub async fn write_top_findings(path: &Path, entries: &[(String, usize)]) -> Result<(), MuniError> {
    ensure_parent(path).await?;
    tokio::fs::write(path, format_top_findings(entries)).await?;
    info!(path = %path.display(), entries = entries.len(), "Finding frequencies written");
    Ok(())
}

/// Write each chart spec as pretty JSON under `dir`. Returns the paths in
/// chart order.
pub async fn write_chart_specs(dir: &Path, charts: &[ChartSpec]) -> Result<Vec<PathBuf>, MuniError> {
    tokio::fs::create_dir_all(dir).await?;
    let mut written = Vec::with_capacity(charts.len());
    for chart in charts {
        let path = dir.join(chart.spec_file_name());
        tokio::fs::write(&path, serde_json::to_string_pretty(chart)?).await?;
        debug!(path = %path.display(), "Chart spec written");
        written.push(path);
    }
    Ok(written)
}

/// Render a remediation report to `<dir>/<Title>.md` and `<dir>/<Title>.html`.
pub async fn write_remediation(
    dir: &Path,
    doc: &RemediationDocument,
    date: &str,
) -> Result<Vec<PathBuf>, MuniError> {
    tokio::fs::create_dir_all(dir).await?;
    let md_path = dir.join(format!("{}.md", doc.title));
    let html_path = dir.join(format!("{}.html", doc.title));
    tokio::fs::write(&md_path, format_remediation_markdown(doc, date)).await?;
    tokio::fs::write(&html_path, format_remediation_html(doc, date)).await?;
    info!(host = %doc.hostname, path = %md_path.display(), "Remediation report written");
    Ok(vec![md_path, html_path])
}
