use serde::{Deserialize, Serialize};
use crate::models::{Category, ScoreRecord};
use super::assembler::StackedChart;

/// A chart for the external renderer: labels, titles and the data series.
/// `image` is the file name the renderer should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub image: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

impl ChartSpec {
    /// File name of the JSON spec written next to the rendered image.
    pub fn spec_file_name(&self) -> String {
        let stem = self.image.rsplit_once('.').map_or(self.image.as_str(), |(stem, _)| stem);
        format!("{}.json", stem)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Bar { labels: Vec<String>, values: Vec<f64> },
    Histogram(Histogram),
    StackedBar(StackedChart),
}

/// Which score a bar chart or series is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Overall,
    Category(Category),
}

/// Name→score mapping for one metric, in record order.
pub fn score_series(records: &[ScoreRecord], metric: Metric) -> Vec<(String, f64)> {
    records
        .iter()
        .map(|r| {
            let value = match metric {
                Metric::Overall => r.overall_score,
                Metric::Category(category) => r.category(category),
            };
            (r.name.clone(), value)
        })
        .collect()
}

pub fn bar_chart(image: &str, title: &str, x_label: &str, y_label: &str, ranked: &[(String, f64)]) -> ChartSpec {
    ChartSpec {
        image: image.to_string(),
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        data: ChartData::Bar {
            labels: ranked.iter().map(|(k, _)| k.clone()).collect(),
            values: ranked.iter().map(|(_, v)| *v).collect(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// `bins` equal-width bins spanning min..=max. Every bin is half-open
    /// except the last, which includes the maximum. A single distinct value
    /// is spread over value-0.5..value+0.5.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        if values.is_empty() || bins == 0 {
            return Self { bins: Vec::new() };
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }
        let width = (max - min) / bins as f64;

        let mut counts = vec![0usize; bins];
        for v in values {
            let slot = (((v - min) / width) as usize).min(bins - 1);
            counts[slot] += 1;
        }

        Self {
            bins: counts
                .into_iter()
                .enumerate()
                .map(|(i, count)| HistogramBin {
                    lower: min + width * i as f64,
                    upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
                    count,
                })
                .collect(),
        }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Greedy word wrap for long axis labels. A word longer than `width` is
/// split: its head fills the rest of the current line and the remainder is
/// cut into `width`-sized pieces. No line exceeds `width`; a width of 0 acts as 1.
pub fn wrap_label(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        let word_len = word.chars().count();

        if word_len > width {
            let mut chars: Vec<char> = word.chars().collect();
            if !current.is_empty() {
                if current_len + 1 < width {
                    let room = width - current_len - 1;
                    current.push(' ');
                    current.extend(chars.drain(..room));
                }
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = chars.chunks(width).map(|c| c.iter().collect::<String>()).collect::<Vec<_>>();
            if let Some(last) = pieces.pop() {
                lines.extend(pieces);
                current = last;
            }
            continue;
        }

        if !current.is_empty() && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}
