//! Tunables for the hover effects.
//!
//! Every constant the renderers depend on lives here so a page with a different fade transition
//! (or a different card grid) can adjust them without touching renderer code. All sections use
//! `#[serde(default)]`, so a JSON config only needs the keys it overrides.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{CardFxError, CardFxResult};

/// Top-level effect configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FxConfig {
    /// Delay between stopping and clearing the last painted frame.
    ///
    /// Matches the page's CSS fade-out duration.
    pub grace_period_ms: f64,
    /// Upper bound applied to the host's device pixel ratio for backing stores.
    pub max_device_pixel_ratio: f64,
    /// Display refresh interval used for animation-frame scheduling.
    pub frame_interval_ms: f64,
    /// Seed for digit and molecule draws. Mixed with the host id per renderer.
    pub seed: u64,
    /// `glow-matrix` settings.
    pub text_matrix: TextMatrixConfig,
    /// `vector-field` settings.
    pub vector_field: VectorFieldConfig,
    /// `molecules` settings.
    pub molecules: MoleculeConfig,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            grace_period_ms: 260.0,
            max_device_pixel_ratio: 2.0,
            frame_interval_ms: 1000.0 / 60.0,
            seed: 0x00C0_FFEE,
            text_matrix: TextMatrixConfig::default(),
            vector_field: VectorFieldConfig::default(),
            molecules: MoleculeConfig::default(),
        }
    }
}

/// Text-matrix ("static noise" digits) settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextMatrixConfig {
    /// Repaint period.
    pub interval_ms: f64,
    /// Fixed row height in logical units.
    pub row_height: f64,
    /// Minimum column count.
    pub min_cols: usize,
    /// Minimum row count.
    pub min_rows: usize,
    /// Probability that a cell is blank.
    pub blank_probability: f64,
    /// Glyph width used when the probe measures nothing.
    pub fallback_glyph_width: f64,
}

impl Default for TextMatrixConfig {
    fn default() -> Self {
        Self {
            interval_ms: 80.0,
            row_height: 18.0,
            min_cols: 22,
            min_rows: 8,
            blank_probability: 0.22,
            fallback_glyph_width: 8.0,
        }
    }
}

/// Vector-field ("streamlines toward the cursor") settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VectorFieldConfig {
    /// Frame cap.
    pub max_fps: f64,
    /// Grid spacing in logical units.
    pub spacing: f64,
    /// Maximum jitter applied to each grid point along each axis.
    pub jitter: f64,
    /// Base segment length; drawn length ranges over `[0.65, 1.65]` times this.
    pub segment_length: f64,
    /// Stroke width in logical units.
    pub line_width: f64,
    /// Lower bound for the influence normalization distance.
    pub min_influence_distance: f64,
    /// Fraction of the shorter host side used as influence normalization distance.
    pub influence_fraction: f64,
    /// Maximum angle perturbation (radians) applied far from the cursor.
    pub noise_strength: f64,
    /// Cursor stand-in before the pointer has entered, as fractions of the host size.
    pub default_focus: [f64; 2],
}

impl Default for VectorFieldConfig {
    fn default() -> Self {
        Self {
            max_fps: 40.0,
            spacing: 17.0,
            jitter: 3.4,
            segment_length: 11.0,
            line_width: 1.2,
            min_influence_distance: 140.0,
            influence_fraction: 0.75,
            noise_strength: 0.85,
            default_focus: [0.5, 0.42],
        }
    }
}

/// Molecule-swarm settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoleculeConfig {
    /// Frame cap.
    pub max_fps: f64,
    /// Host area per molecule.
    pub area_per_molecule: f64,
    /// Lower bound on molecule count.
    pub min_count: usize,
    /// Upper bound on molecule count.
    pub max_count: usize,
    /// Maximum absolute linear speed per axis, units per second.
    pub max_speed: f64,
    /// Maximum absolute angular speed, radians per second.
    pub max_spin: f64,
    /// Largest simulation step, to avoid jumps after a stall.
    pub max_step_ms: f64,
    /// Off-screen margin before a molecule wraps to the opposite edge.
    pub wrap_margin: f64,
    /// Perpendicular distance between parallel strokes of multi-order bonds.
    pub bond_separation: f64,
    /// Bond stroke width.
    pub bond_width: f64,
}

impl Default for MoleculeConfig {
    fn default() -> Self {
        Self {
            max_fps: 30.0,
            area_per_molecule: 6500.0,
            min_count: 8,
            max_count: 14,
            max_speed: 12.0,
            max_spin: 0.35,
            max_step_ms: 50.0,
            wrap_margin: 24.0,
            bond_separation: 2.6,
            bond_width: 1.3,
        }
    }
}

impl FxConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json_str(s: &str) -> CardFxResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> CardFxResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Reject values that would stall or divide by zero.
    pub fn validate(&self) -> CardFxResult<()> {
        fn positive(name: &str, v: f64) -> CardFxResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CardFxError::validation(format!("{name} must be > 0")))
            }
        }
        fn non_negative(name: &str, v: f64) -> CardFxResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(CardFxError::validation(format!("{name} must be >= 0")))
            }
        }

        non_negative("grace_period_ms", self.grace_period_ms)?;
        positive("max_device_pixel_ratio", self.max_device_pixel_ratio)?;
        positive("frame_interval_ms", self.frame_interval_ms)?;

        let t = &self.text_matrix;
        positive("text_matrix.interval_ms", t.interval_ms)?;
        positive("text_matrix.row_height", t.row_height)?;
        positive("text_matrix.fallback_glyph_width", t.fallback_glyph_width)?;
        if !(0.0..=1.0).contains(&t.blank_probability) {
            return Err(CardFxError::validation(
                "text_matrix.blank_probability must be within [0, 1]",
            ));
        }

        let v = &self.vector_field;
        positive("vector_field.max_fps", v.max_fps)?;
        positive("vector_field.spacing", v.spacing)?;
        non_negative("vector_field.jitter", v.jitter)?;
        positive("vector_field.segment_length", v.segment_length)?;
        positive("vector_field.line_width", v.line_width)?;
        positive(
            "vector_field.min_influence_distance",
            v.min_influence_distance,
        )?;

        let m = &self.molecules;
        positive("molecules.max_fps", m.max_fps)?;
        positive("molecules.area_per_molecule", m.area_per_molecule)?;
        positive("molecules.max_step_ms", m.max_step_ms)?;
        non_negative("molecules.wrap_margin", m.wrap_margin)?;
        if m.min_count > m.max_count {
            return Err(CardFxError::validation(
                "molecules.min_count must be <= molecules.max_count",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
