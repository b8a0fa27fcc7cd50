//! Report files derived from a rollup summary.
//!
//! `<label>_data.txt` is the human-readable summary; `<label>_top.json` carries the
//! top rows and statistics for external chart rendering.

use crate::error::Result;
use crate::summary::{Summary, SummaryStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
struct ChartData<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    summary: &'a Summary,
}

/// Paths written for one summary
#[derive(Debug, Clone)]
pub struct ReportFiles {
    pub text: PathBuf,
    pub chart_data: PathBuf,
}

pub fn write_report(dir: &Path, summary: &Summary) -> Result<ReportFiles> {
    fs::create_dir_all(dir)?;
    let text = dir.join(format!("{}_data.txt", summary.label));
    let chart_data = dir.join(format!("{}_top.json", summary.label));

    fs::write(&text, render_text(summary))?;
    let payload = ChartData { generated_at: Utc::now(), summary };
    fs::write(&chart_data, serde_json::to_vec_pretty(&payload)?)?;

    info!(text = %text.display(), chart_data = %chart_data.display(), "Wrote report");
    Ok(ReportFiles { text, chart_data })
}

pub fn render_text(summary: &Summary) -> String {
    let mut out = String::new();
    render_describe(&mut out, &summary.label, &summary.stats);
    out.push('\n');

    let width = summary
        .top
        .iter()
        .map(|r| r.key.chars().count())
        .chain(std::iter::once(summary.index_label.chars().count()))
        .max()
        .unwrap_or(0);
    out.push_str(&format!("{:<width$}  {}\n", summary.index_label, summary.label, width = width));
    for row in &summary.top {
        out.push_str(&format!("{:<width$}  {}\n", row.key, row.value, width = width));
    }
    out.push('\n');

    let s = &summary.stats;
    out.push_str(&format!(
        "Most common value: {} appears {} times ({:.2}%)\n",
        s.mode_value, s.mode_frequency, s.mode_percentage
    ));
    out
}

fn render_describe(out: &mut String, label: &str, s: &SummaryStats) {
    let std = s.std.map_or_else(|| "NaN".to_string(), |v| format!("{:.6}", v));
    let lines = [
        ("count", format!("{}", s.count)),
        ("mean", format!("{:.6}", s.mean)),
        ("std", std),
        ("min", format!("{}", s.min)),
        ("25%", format!("{:.6}", s.q25)),
        ("50%", format!("{:.6}", s.median)),
        ("75%", format!("{:.6}", s.q75)),
        ("max", format!("{}", s.max)),
    ];
    out.push_str(&format!("{:<6} {}\n", "", label));
    for (name, value) in lines {
        out.push_str(&format!("{:<6} {}\n", name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollup::{Rollup, RollupRow};
    use crate::summary::summarize;

    fn summary() -> Summary {
        let rows = vec![
            RollupRow { key: "Spider-Man".into(), value: 3 },
            RollupRow { key: "Thor".into(), value: 1 },
            RollupRow { key: "Hulk".into(), value: 1 },
        ];
        summarize(&Rollup::new("Universes", "Character", rows), 2).unwrap()
    }

    #[test]
    fn text_has_describe_top_rows_and_mode() {
        let text = render_text(&summary());
        assert!(text.starts_with("       Universes\ncount  3\n"));
        assert!(text.contains("Character   Universes\nSpider-Man  3\nThor        1\n"));
        assert!(!text.contains("Hulk"));
        assert!(text.ends_with("Most common value: 1 appears 2 times (66.67%)\n"));
    }

    #[test]
    fn writes_text_and_chart_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_report(dir.path(), &summary()).unwrap();
        assert_eq!(files.text.file_name().unwrap(), "Universes_data.txt");

        let json: serde_json::Value =
            serde_json::from_slice(&fs::read(&files.chart_data).unwrap()).unwrap();
        assert_eq!(json["label"], "Universes");
        assert_eq!(json["top"].as_array().unwrap().len(), 2);
        assert_eq!(json["top"][0]["key"], "Spider-Man");
        assert_eq!(json["stats"]["mode_frequency"], 2);
        assert!(json["generated_at"].is_string());
    }
}
