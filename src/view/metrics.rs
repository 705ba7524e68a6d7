//! Metric tiles from `PerformanceMetrics`.

use crate::fmt;
use crate::model::PerformanceMetrics;
use crate::view::common::{RowStyleClass, Section, TileViewModel};

/// Tiles in dashboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricTile {
    CacheHitRatio,
    CommitRatio,
    RollbackRatio,
    BlocksReadRatio,
    Locks,
    Deadlocks,
    TempFiles,
    TempBytes,
}

impl MetricTile {
    pub const DASHBOARD: [MetricTile; 8] = [
        MetricTile::CacheHitRatio,
        MetricTile::CommitRatio,
        MetricTile::RollbackRatio,
        MetricTile::BlocksReadRatio,
        MetricTile::Locks,
        MetricTile::Deadlocks,
        MetricTile::TempFiles,
        MetricTile::TempBytes,
    ];

    pub const REPORT: [MetricTile; 4] = [
        MetricTile::CacheHitRatio,
        MetricTile::Locks,
        MetricTile::Deadlocks,
        MetricTile::TempFiles,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricTile::CacheHitRatio => "Cache hit ratio",
            MetricTile::CommitRatio => "Commit ratio",
            MetricTile::RollbackRatio => "Rollback ratio",
            MetricTile::BlocksReadRatio => "Blocks read ratio",
            MetricTile::Locks => "Locks",
            MetricTile::Deadlocks => "Deadlocks",
            MetricTile::TempFiles => "Temp files",
            MetricTile::TempBytes => "Temp bytes",
        }
    }

    fn build(&self, m: &PerformanceMetrics) -> TileViewModel {
        let (value, style) = match self {
            MetricTile::CacheHitRatio => {
                let style = if m.cache_hit_ratio_pct < 80.0 {
                    RowStyleClass::Critical
                } else if m.cache_hit_ratio_pct < 90.0 {
                    RowStyleClass::Warning
                } else {
                    RowStyleClass::Active
                };
                (fmt::format_pct(m.cache_hit_ratio_pct), style)
            }
            MetricTile::CommitRatio => (fmt::format_ratio(m.commits_ratio), RowStyleClass::Normal),
            MetricTile::RollbackRatio => {
                let style = if m.rollbacks_ratio > 0.1 {
                    RowStyleClass::Warning
                } else {
                    RowStyleClass::Normal
                };
                (fmt::format_ratio(m.rollbacks_ratio), style)
            }
            MetricTile::BlocksReadRatio => {
                (fmt::format_ratio(m.blocks_read_ratio), RowStyleClass::Normal)
            }
            MetricTile::Locks => (m.lock_count.to_string(), RowStyleClass::Normal),
            MetricTile::Deadlocks => {
                let style = if m.deadlock_count > 0 {
                    RowStyleClass::Critical
                } else {
                    RowStyleClass::Normal
                };
                (m.deadlock_count.to_string(), style)
            }
            MetricTile::TempFiles => (m.temp_file_count.to_string(), RowStyleClass::Normal),
            MetricTile::TempBytes => (fmt::format_bytes(m.temp_bytes), RowStyleClass::Normal),
        };
        TileViewModel {
            label: self.label().to_string(),
            value,
            style,
        }
    }
}

pub fn build_metric_tiles(
    metrics: Option<&PerformanceMetrics>,
    tiles: &[MetricTile],
) -> Section<Vec<TileViewModel>> {
    match metrics {
        Some(m) => Section::Available(tiles.iter().map(|t| t.build(m)).collect()),
        None => Section::unavailable("Performance metrics"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> PerformanceMetrics {
        PerformanceMetrics {
            cache_hit_ratio_pct: 99.12,
            commits_ratio: 0.97,
            rollbacks_ratio: 0.03,
            blocks_read_ratio: 0.01,
            lock_count: 14,
            deadlock_count: 0,
            temp_file_count: 2,
            temp_bytes: 1_073_741_824,
        }
    }

    #[test]
    fn dashboard_has_eight_tiles_in_order() {
        let section = build_metric_tiles(Some(&metrics()), &MetricTile::DASHBOARD);
        let tiles = section.available().unwrap();
        let values: Vec<&str> = tiles.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(
            values,
            ["99.1%", "0.97", "0.03", "0.01", "14", "0", "2", "1.00 GB"]
        );
        assert_eq!(tiles[0].style, RowStyleClass::Active);
        assert_eq!(tiles[5].style, RowStyleClass::Normal);
    }

    #[test]
    fn deadlocks_and_poor_cache_are_flagged() {
        let mut m = metrics();
        m.deadlock_count = 3;
        m.cache_hit_ratio_pct = 75.0;
        let section = build_metric_tiles(Some(&m), &MetricTile::REPORT);
        let tiles = section.available().unwrap();
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].style, RowStyleClass::Critical);
        assert_eq!(tiles[2].label, "Deadlocks");
        assert_eq!(tiles[2].style, RowStyleClass::Critical);
    }

    #[test]
    fn missing_metrics_is_a_placeholder() {
        assert!(!build_metric_tiles(None, &MetricTile::DASHBOARD).is_available());
    }
}
