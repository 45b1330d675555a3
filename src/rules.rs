//! Pluggable floor-area rules.
//!
//! A rule maps parcel shape to a permitted floor-area ratio when the parcel's
//! own attributes do not carry one. Rules must be pure: the batch may call
//! them from several threads and in any order.

use anyhow::{ensure, Result};

use crate::geom::ParcelMetrics;

/// Strategy for deriving a floor-area ratio from parcel metrics.
///
/// An `Err`, a non-finite value or a value `<= 0` all count as failure and
/// send the parcel to the configured default ratio.
pub trait FloorAreaRule: Send + Sync {
    fn floor_area_ratio(&self, metrics: &ParcelMetrics) -> Result<f64>;

    /// Short name used in output file names and logs.
    fn name(&self) -> &str { "custom" }
}

impl<F> FloorAreaRule for F
where
    F: Fn(&ParcelMetrics) -> Result<f64> + Send + Sync,
{
    fn floor_area_ratio(&self, metrics: &ParcelMetrics) -> Result<f64> { self(metrics) }
}

/// Tiered by parcel area: larger lots take more intensive development.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaTierRule;

impl FloorAreaRule for AreaTierRule {
    fn floor_area_ratio(&self, metrics: &ParcelMetrics) -> Result<f64> {
        ensure!(metrics.area.is_finite(), "[AreaTierRule] non-finite parcel area");

        Ok(match metrics.area {
            a if a < 600.0 => 1.8,
            a if a < 1200.0 => 2.6,
            a if a < 2500.0 => 3.2,
            _ => 4.0,
        })
    }

    fn name(&self) -> &str { "area" }
}

/// Tiered by frontage: wide lots build denser, long thin lots less so.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontageRule;

impl FloorAreaRule for FrontageRule {
    fn floor_area_ratio(&self, metrics: &ParcelMetrics) -> Result<f64> {
        ensure!(metrics.width.is_finite(), "[FrontageRule] non-finite parcel width");

        Ok(if metrics.width >= 30.0 {
            4.0
        } else if metrics.width >= 20.0 {
            3.2
        } else if metrics.aspect_ratio >= 3.5 {
            2.0
        } else {
            2.6
        })
    }

    fn name(&self) -> &str { "frontage" }
}

/// The same ratio for every parcel.
#[derive(Debug, Clone, Copy)]
pub struct FixedRule(pub f64);

impl FloorAreaRule for FixedRule {
    fn floor_area_ratio(&self, _metrics: &ParcelMetrics) -> Result<f64> { Ok(self.0) }

    fn name(&self) -> &str { "fixed" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;

    fn metrics(area: f64, width: f64, depth: f64) -> ParcelMetrics {
        ParcelMetrics {
            area,
            centroid: Coord { x: 0.0, y: 0.0 },
            width,
            depth,
            aspect_ratio: width / depth,
        }
    }

    #[test]
    fn area_tiers() {
        let rule = AreaTierRule;
        assert_eq!(rule.floor_area_ratio(&metrics(599.0, 30.0, 20.0)).unwrap(), 1.8);
        assert_eq!(rule.floor_area_ratio(&metrics(600.0, 30.0, 20.0)).unwrap(), 2.6);
        assert_eq!(rule.floor_area_ratio(&metrics(2400.0, 60.0, 40.0)).unwrap(), 3.2);
        assert_eq!(rule.floor_area_ratio(&metrics(2500.0, 60.0, 40.0)).unwrap(), 4.0);
    }

    #[test]
    fn frontage_tiers() {
        let rule = FrontageRule;
        assert_eq!(rule.floor_area_ratio(&metrics(1000.0, 30.0, 10.0)).unwrap(), 4.0);
        assert_eq!(rule.floor_area_ratio(&metrics(1000.0, 25.0, 10.0)).unwrap(), 3.2);
        assert_eq!(rule.floor_area_ratio(&metrics(1000.0, 18.0, 5.0)).unwrap(), 2.0);
        assert_eq!(rule.floor_area_ratio(&metrics(1000.0, 18.0, 10.0)).unwrap(), 2.6);
    }

    #[test]
    fn closures_are_rules() {
        let rule = |m: &ParcelMetrics| -> Result<f64> { Ok(m.area / 1000.0) };
        assert_eq!(rule.floor_area_ratio(&metrics(2000.0, 50.0, 40.0)).unwrap(), 2.0);
        assert_eq!(FloorAreaRule::name(&rule), "custom");
    }
}
