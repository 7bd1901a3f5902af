pub mod assembler;
pub mod charts;
pub mod formatter;
pub mod writer;

pub use assembler::{assemble_stacked, StackedChart, StackedColumn, STACK_COLUMNS};
pub use charts::{bar_chart, score_series, ChartData, ChartSpec, Histogram, HistogramBin, Metric};
