use crate::db::{Collection, Database, RecordStore};
use crate::errors::MuniError;
use crate::models::{Category, Finding, ScoreRecord};
use crate::reporting::writer;
use crate::reporting::charts::{bar_chart, score_series, wrap_label, ChartData, ChartSpec, Histogram, Metric};
use crate::reporting::assemble_stacked;
use super::aggregator::{self, FrequencyTable};
use super::ranker::rank;
use super::state::{AnalysisSettings, BatchReport, PipelineConfig};
use tracing::info;

const ENTITY_AXIS: &str = "Municipalities";

struct BarChartDef {
    metric: Metric,
    image: &'static str,
    title: &'static str,
    y_label: &'static str,
}

const BAR_CHARTS: [BarChartDef; 4] = [
    BarChartDef {
        metric: Metric::Overall,
        image: "general_map.png",
        title: "Scores across all municipalities",
        y_label: "General Scores",
    },
    BarChartDef {
        metric: Metric::Category(Category::EmailSecurity),
        image: "email_security_map.png",
        title: "Email Security Scores across all municipalities",
        y_label: "Email Security Scores",
    },
    BarChartDef {
        metric: Metric::Category(Category::WebsiteSecurity),
        image: "web_security_map.png",
        title: "Web Security Scores across all municipalities",
        y_label: "Web Security Scores",
    },
    BarChartDef {
        metric: Metric::Category(Category::NetworkSecurity),
        image: "network_security_map.png",
        title: "Network Security Scores across all municipalities",
        y_label: "Network Security Scores",
    },
];

/// Chart specs derived from one batch of score records: one ascending bar
/// chart per ranking, the overall-score histogram and the stacked chart.
pub fn analyze_scores(records: &[ScoreRecord], settings: &AnalysisSettings) -> Result<Vec<ChartSpec>, MuniError> {
    let mode = settings.rank_mode;
    let mut charts = Vec::with_capacity(BAR_CHARTS.len() + 2);
    let mut rankings = Vec::with_capacity(BAR_CHARTS.len());

    for def in &BAR_CHARTS {
        let ranked = rank(&score_series(records, def.metric), mode);
        charts.push(bar_chart(def.image, def.title, ENTITY_AXIS, def.y_label, &ranked));
        rankings.push(ranked);
    }

    let overall: Vec<f64> = records.iter().map(|r| r.overall_score).collect();
    charts.push(ChartSpec {
        image: "histogram.png".into(),
        title: "Histogram of Scores across all municipalities".into(),
        x_label: "Scores".into(),
        y_label: "Frequency".into(),
        data: ChartData::Histogram(Histogram::from_values(&overall, settings.histogram_bins)),
    });

    let stacked = assemble_stacked(&rankings[0], &rankings[1], &rankings[2], &rankings[3])?;
    charts.push(ChartSpec {
        image: "stacked_bar_graph.png".into(),
        title: "Stacked Bar Graph of all categories of vulnerabilities".into(),
        x_label: ENTITY_AXIS.into(),
        y_label: "Scores".into(),
        data: ChartData::StackedBar(stacked),
    });

    Ok(charts)
}

/// Findings analysis output: the entries for the frequency file and the
/// chart of the most common findings.
#[derive(Debug, Clone)]
pub struct FindingsAnalysis {
    pub top_entries: Vec<(String, usize)>,
    pub chart: ChartSpec,
}

pub fn analyze_findings(table: &FrequencyTable, settings: &AnalysisSettings) -> FindingsAnalysis {
    let top_entries = aggregator::top_k(table, settings.top_k_file, settings.rank_mode);
    let charted = aggregator::top_k(table, settings.top_k_chart, settings.rank_mode);

    let chart = ChartSpec {
        image: "vulnerability_frequency_graph.png".into(),
        title: "Most common vulnerabilities across all municipalities".into(),
        x_label: ENTITY_AXIS.into(),
        y_label: "Number of Vulnerabilities".into(),
        data: ChartData::Bar {
            labels: charted.iter().map(|(d, _)| wrap_label(d, settings.label_width)).collect(),
            values: charted.iter().map(|(_, c)| *c as f64).collect(),
        },
    };

    FindingsAnalysis { top_entries, chart }
}

/// Build every chart and the frequency file, then write them. Charts are
/// built before anything is written so an inconsistent ranking leaves no
/// partial chart set behind.
pub async fn write_outputs(
    config: &PipelineConfig,
    records: &[ScoreRecord],
    table: &FrequencyTable,
    report: &mut BatchReport,
) -> Result<(), MuniError> {
    let mut charts = analyze_scores(records, &config.analysis)?;
    let findings = analyze_findings(table, &config.analysis);
    charts.push(findings.chart);

    let frequency_path = config.frequency_file();
    writer::write_top_findings(&frequency_path, &findings.top_entries).await?;
    report.outputs.push(frequency_path);

    let written = writer::write_chart_specs(&config.graph_dir, &charts).await?;
    report.outputs.extend(written);
    Ok(())
}

/// Rebuild rankings and charts from the score file of an earlier run and
/// the findings already stored. No vendor calls are made.
pub async fn analyze_offline(config: &PipelineConfig, db: &Database) -> Result<BatchReport, MuniError> {
    let records = writer::read_score_records(&config.scores_file()).await?;
    let mut report = BatchReport::new(&config.run_id, records.len());
    report.scored = records.len();

    let store = RecordStore::new(db, Collection::Vulnerabilities);
    let mut table = FrequencyTable::new();
    for key in store.keys()? {
        let findings: Vec<Finding> = store.get(&key)?;
        if !findings.is_empty() {
            report.with_findings += 1;
        }
        for finding in &findings {
            table.add(&finding.description);
        }
    }
    report.distinct_findings = table.len();
    report.total_findings = table.total();

    write_outputs(config, &records, &table, &mut report).await?;
    info!(records = records.len(), findings = table.total(), "Offline analysis complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankMode;
    use crate::models::CategoryScores;

    fn record(name: &str, overall: f64, email: f64, web: f64, network: f64) -> ScoreRecord {
        ScoreRecord {
            name: name.into(),
            overall_score: overall,
            category_scores: CategoryScores {
                email_security: email,
                website_security: web,
                network_security: network,
                ..Default::default()
            },
        }
    }

    fn records() -> Vec<ScoreRecord> {
        vec![
            record("Maynard", 720.0, 500.0, 610.0, 950.0),
            record("Acton", 650.0, 700.0, 400.0, 950.0),
            record("Bolton", 801.0, 300.0, 800.0, 600.0),
        ]
    }

    #[test]
    fn test_analyze_scores_chart_set() {
        let charts = analyze_scores(&records(), &AnalysisSettings::default()).unwrap();
        let images: Vec<&str> = charts.iter().map(|c| c.image.as_str()).collect();
        assert_eq!(
            images,
            vec![
                "general_map.png",
                "email_security_map.png",
                "web_security_map.png",
                "network_security_map.png",
                "histogram.png",
                "stacked_bar_graph.png",
            ]
        );
    }

    #[test]
    fn test_bar_charts_are_ascending() {
        let charts = analyze_scores(&records(), &AnalysisSettings::default()).unwrap();
        match &charts[0].data {
            ChartData::Bar { labels, values } => {
                assert_eq!(labels, &vec!["Acton".to_string(), "Maynard".into(), "Bolton".into()]);
                assert_eq!(values, &vec![650.0, 720.0, 801.0]);
            }
            other => panic!("unexpected chart data: {:?}", other),
        }
    }

    #[test]
    fn test_stacked_rows_follow_overall_ranking() {
        let charts = analyze_scores(&records(), &AnalysisSettings::default()).unwrap();
        let ChartData::StackedBar(stacked) = &charts[5].data else {
            panic!("expected stacked chart");
        };
        assert_eq!(stacked.labels[0], "Acton");
        assert_eq!(stacked.row("Acton").unwrap(), vec![650.0, 700.0, 400.0, 950.0]);
    }

    #[test]
    fn test_legacy_zip_pairs_sorted_values_with_record_order() {
        let settings = AnalysisSettings { rank_mode: RankMode::LegacyZip, ..Default::default() };
        let charts = analyze_scores(&records(), &settings).unwrap();

        let ChartData::Bar { labels, values } = &charts[0].data else {
            panic!("expected bar chart");
        };
        assert_eq!(labels, &vec!["Maynard".to_string(), "Acton".into(), "Bolton".into()]);
        assert_eq!(values, &vec![650.0, 720.0, 801.0]);

        let ChartData::StackedBar(stacked) = &charts[5].data else {
            panic!("expected stacked chart");
        };
        assert_eq!(stacked.labels, vec!["Maynard".to_string(), "Acton".into(), "Bolton".into()]);
        assert_eq!(stacked.row("Maynard").unwrap(), vec![650.0, 300.0, 400.0, 600.0]);
        assert_eq!(stacked.row("Acton").unwrap(), vec![720.0, 500.0, 610.0, 950.0]);
        assert_eq!(stacked.row("Bolton").unwrap(), vec![801.0, 700.0, 800.0, 950.0]);
        assert_eq!(stacked.column("Email Security").unwrap().values, vec![300.0, 500.0, 700.0]);
        assert_eq!(stacked.column("Network Security").unwrap().values, vec![600.0, 950.0, 950.0]);
    }

    #[test]
    fn test_histogram_counts_every_record() {
        let charts = analyze_scores(&records(), &AnalysisSettings::default()).unwrap();
        let ChartData::Histogram(histogram) = &charts[4].data else {
            panic!("expected histogram");
        };
        assert_eq!(histogram.bins.len(), 30);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_analyze_findings_limits() {
        let mut table = FrequencyTable::new();
        for i in 0..20 {
            for _ in 0..=i {
                table.add(&format!("finding number {} with a fairly long description", i));
            }
        }
        let settings = AnalysisSettings::default();
        let analysis = analyze_findings(&table, &settings);
        assert_eq!(analysis.top_entries.len(), 15);
        assert_eq!(analysis.top_entries[0].1, 20);

        let ChartData::Bar { labels, values } = &analysis.chart.data else {
            panic!("expected bar chart");
        };
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], 20.0);
        assert!(labels[0].contains('\n'));
    }
}
