use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{RenderError, RenderResult};

/// Fixed colors used for fills, borders, progress bars and text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Background fill for walkable floor.
    pub floor: Rgb8,
    /// Fill for counters and every counter-like station.
    pub counter: Rgb8,
    /// 1px outline drawn around counter-like tiles.
    pub counter_border: Rgb8,
    /// Fill for delivery squares.
    pub delivery: Rgb8,
    /// Progress bars for chopping, cooking countdown and fresh recipes.
    pub progress_green: Rgb8,
    /// Recipe bars between one and two thirds remaining.
    pub progress_yellow: Rgb8,
    /// Recipe bars below one third remaining.
    pub progress_red: Rgb8,
    /// Burning progress and fire extinguishing progress.
    pub fire: Rgb8,
    /// Status line text.
    pub text: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            floor: Rgb8::new(245, 230, 210),
            counter: Rgb8::new(220, 170, 110),
            counter_border: Rgb8::new(114, 93, 51),
            delivery: Rgb8::new(96, 96, 96),
            progress_green: Rgb8::new(0, 200, 0),
            progress_yellow: Rgb8::new(230, 200, 0),
            progress_red: Rgb8::new(220, 0, 0),
            fire: Rgb8::new(255, 110, 0),
            text: Rgb8::new(0, 0, 0),
        }
    }
}

/// Options for a [`crate::GraphicPipeline`].
///
/// All fields are defaulted so partial JSON documents are accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineOpts {
    /// Side length of one tile in pixels.
    pub pixel_per_tile: u32,
    /// Fraction of a tile used for items held by an agent.
    pub holding_scale: f64,
    /// Fraction of a tile used for plated items.
    pub container_scale: f64,
    /// Fraction of a tile used for pot contents and recipe icons.
    pub souppot_scale: f64,
    /// Episode length; the status line shows `max_steps - elapsed_ticks`.
    pub max_steps: u64,
    /// Root directory that `graphics_dir` is resolved against.
    pub asset_root: PathBuf,
    /// Sprite directory, relative to `asset_root`.
    pub graphics_dir: PathBuf,
    /// Directory receiving `t=NNN.png` exports.
    pub record_dir: PathBuf,
    /// TTF/OTF font for the status line. No status line is drawn without one.
    pub font_path: Option<PathBuf>,
    /// Status line font size in pixels.
    pub font_size_px: f32,
    /// Fill and bar colors.
    pub palette: Palette,
    /// Present every rendered frame to the attached display sink.
    pub display: bool,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            pixel_per_tile: 45,
            holding_scale: 0.5,
            container_scale: 0.7,
            souppot_scale: 0.9,
            max_steps: 1000,
            asset_root: PathBuf::from("."),
            graphics_dir: PathBuf::from("misc/game/graphics"),
            record_dir: PathBuf::from("misc/game/record/example"),
            font_path: None,
            font_size_px: 20.0,
            palette: Palette::default(),
            display: false,
        }
    }
}

impl PipelineOpts {
    /// Load options from a JSON document on disk.
    pub fn from_json_path(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read pipeline options '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse options from a JSON string.
    pub fn from_json_str(text: &str) -> RenderResult<Self> {
        let opts: Self =
            serde_json::from_str(text).map_err(|e| RenderError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Check the invariants graphics properties are derived from.
    pub fn validate(&self) -> RenderResult<()> {
        if self.pixel_per_tile == 0 {
            return Err(RenderError::validation("pixel_per_tile must be > 0"));
        }
        for (name, v) in [
            ("holding_scale", self.holding_scale),
            ("container_scale", self.container_scale),
            ("souppot_scale", self.souppot_scale),
        ] {
            if !v.is_finite() || v <= 0.0 || v > 1.0 {
                return Err(RenderError::validation(format!(
                    "{name} must be in (0, 1], got {v}"
                )));
            }
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(RenderError::validation("font_size_px must be finite and > 0"));
        }
        Ok(())
    }

    /// Sprite directory resolved against the asset root.
    pub fn graphics_root(&self) -> PathBuf {
        self.asset_root.join(&self.graphics_dir)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
