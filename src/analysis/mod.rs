//! Descriptive analyses over a batch of points.
//!
//! - [`analyze_temporal_evolution`]: per-day averages, overall trends and insights
//! - [`compare_providers`]: per-provider averages
//! - [`summary_statistics`]: batch-wide avg/min/max
//! - [`build_expansion_report`]: classification, zones, ROI and top areas in one report

mod providers;
mod report;
mod temporal;

pub use providers::{
    compare_providers, summary_statistics, MetricStats, ProviderComparison, SummaryStatistics,
};
pub use report::{build_expansion_report, ExpansionReport, PriorityArea, ReportSummary};
pub use temporal::{
    analyze_temporal_evolution, DailyStats, DateRange, OverallTrends, ProviderScore,
    TemporalAnalysis,
};
