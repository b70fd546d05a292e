//! Chart-ready series for the external renderer.
//!
//! The petal chart shows one bar per thematic area on a 0-4 ring scale;
//! the pillar chart shows one horizontal bar per pillar, colored by band.

use crate::models::{Assessment, MaturityBand};
use crate::taxonomy::strip_numbering;
use serde::{Deserialize, Serialize};

/// Outer ring of the petal chart.
pub const PETAL_SCALE: f64 = 4.0;

/// One bar of the petal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetalBar {
    pub label: String,
    pub pillar: String,
    /// Normalized score in [0, 1].
    pub score: f64,
    /// Score on the ring scale, in [0, PETAL_SCALE].
    pub scaled: f64,
    /// Drawn in red when set.
    pub below_minimum: bool,
}

/// A reference ring of the petal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRing {
    pub label: String,
    /// Position on the normalized scale.
    pub value: f64,
    /// Radius on the ring scale.
    pub radius: f64,
}

/// One horizontal bar of the pillar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarBar {
    pub label: String,
    pub score: f64,
    pub percent: f64,
    pub band: MaturityBand,
    pub color: String,
    /// Label drawn beside the bar, e.g. `42%`.
    pub text: String,
}

/// Both chart series for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub petal: Vec<PetalBar>,
    pub rings: Vec<ReferenceRing>,
    pub pillars: Vec<PillarBar>,
}

impl ChartSeries {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        Self {
            petal: petal_series(assessment),
            rings: reference_rings(),
            pillars: pillar_series(assessment),
        }
    }
}

/// Thematic bars in taxonomy order, grouped by pillar.
pub fn petal_series(assessment: &Assessment) -> Vec<PetalBar> {
    assessment
        .thematic
        .iter()
        .map(|t| PetalBar {
            label: strip_numbering(&t.thematic).to_string(),
            pillar: strip_numbering(&t.pillar).to_string(),
            score: t.score,
            scaled: t.score * PETAL_SCALE,
            below_minimum: t.below_minimum,
        })
        .collect()
}

pub fn reference_rings() -> Vec<ReferenceRing> {
    MaturityBand::RINGS
        .iter()
        .map(|(value, band)| ReferenceRing {
            label: band.to_string(),
            value: *value,
            radius: value * PETAL_SCALE,
        })
        .collect()
}

/// Pillar bars in taxonomy order.
pub fn pillar_series(assessment: &Assessment) -> Vec<PillarBar> {
    assessment
        .pillars
        .iter()
        .map(|p| {
            let band = p.band();
            PillarBar {
                label: strip_numbering(&p.pillar).to_string(),
                score: p.score,
                percent: p.percent(),
                band,
                color: band.color().to_string(),
                text: format!("{:.0}%", p.percent()),
            }
        })
        .collect()
}
