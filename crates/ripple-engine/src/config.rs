//! Engine configuration, validation, and the builder used by hosts that
//! construct a [`WaveEngine`](crate::WaveEngine) directly.

use ripple_core::{ConfigError, DepthBounds};
use ripple_field::TileTopology;
use ripple_propagator::{damping_for_rows, validate_damping};

use crate::protocol::InitParams;

/// Complete configuration for constructing a [`WaveEngine`](crate::WaveEngine).
///
/// `validate()` checks every structural invariant. `WaveEngine::new()`
/// calls it internally.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Tiles along the vertical axis.
    pub tile_rows: u32,
    /// Tiles along the horizontal axis.
    pub tile_cols: u32,
    /// Cell rows per tile.
    pub cells_per_tile_row: usize,
    /// Cell columns per tile.
    pub cells_per_tile_col: usize,
    /// Lowest representable depth.
    pub min_depth: f32,
    /// Highest representable depth.
    pub max_depth: f32,
    /// Explicit damping, or `None` for the row-count default.
    pub damping: Option<f32>,
    /// Per-tile starting depths, row-major, `cells_per_tile` long.
    pub template: Vec<f32>,
}

impl EngineConfig {
    /// Start a builder with a single 4x4 tile over `[-1, 1]`.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Take over the parameters of an `Init` request.
    pub fn from_init(params: InitParams) -> Self {
        let InitParams {
            tile_rows,
            tile_cols,
            cells_per_tile_row,
            cells_per_tile_col,
            min_depth,
            max_depth,
            damping,
            template,
        } = params;
        Self {
            tile_rows,
            tile_cols,
            cells_per_tile_row,
            cells_per_tile_col,
            min_depth,
            max_depth,
            damping,
            template,
        }
    }

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let topology = self.topology()?;
        self.bounds()?;
        self.resolved_damping()?;

        let expected = topology.cells_per_tile();
        if self.template.len() != expected {
            return Err(ConfigError::TemplateSizeMismatch {
                expected,
                got: self.template.len(),
            });
        }
        if let Some(index) = self.template.iter().position(|d| !d.is_finite()) {
            return Err(ConfigError::NonFiniteTemplate { index });
        }
        Ok(())
    }

    /// The tile layout described by this configuration.
    pub fn topology(&self) -> Result<TileTopology, ConfigError> {
        TileTopology::new(
            self.tile_rows,
            self.tile_cols,
            self.cells_per_tile_row,
            self.cells_per_tile_col,
        )
    }

    /// The depth range described by this configuration.
    pub fn bounds(&self) -> Result<DepthBounds, ConfigError> {
        DepthBounds::new(self.min_depth, self.max_depth)
    }

    /// The explicit damping if set, else the factor derived from the
    /// whole grid's row count.
    pub fn resolved_damping(&self) -> Result<f32, ConfigError> {
        match self.damping {
            Some(value) => validate_damping(value),
            None => damping_for_rows(self.topology()?.total_rows()),
        }
    }
}

/// Builder for [`EngineConfig`]. A template left unset is filled with the
/// baseline depth at build time.
#[derive(Clone, Debug)]
pub struct EngineConfigBuilder {
    tile_rows: u32,
    tile_cols: u32,
    cells_per_tile_row: usize,
    cells_per_tile_col: usize,
    min_depth: f32,
    max_depth: f32,
    damping: Option<f32>,
    template: Option<Vec<f32>>,
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self {
            tile_rows: 1,
            tile_cols: 1,
            cells_per_tile_row: 4,
            cells_per_tile_col: 4,
            min_depth: -1.0,
            max_depth: 1.0,
            damping: None,
            template: None,
        }
    }
}

impl EngineConfigBuilder {
    /// Number of tiles along each axis.
    pub fn tiles(mut self, rows: u32, cols: u32) -> Self {
        self.tile_rows = rows;
        self.tile_cols = cols;
        self
    }

    /// Cell rows and columns per tile.
    pub fn cells_per_tile(mut self, rows: usize, cols: usize) -> Self {
        self.cells_per_tile_row = rows;
        self.cells_per_tile_col = cols;
        self
    }

    /// Depth range.
    pub fn depth_range(mut self, min: f32, max: f32) -> Self {
        self.min_depth = min;
        self.max_depth = max;
        self
    }

    /// Explicit damping factor.
    pub fn damping(mut self, damping: f32) -> Self {
        self.damping = Some(damping);
        self
    }

    /// Per-tile starting depths.
    pub fn template(mut self, template: Vec<f32>) -> Self {
        self.template = Some(template);
        self
    }

    /// Assemble and validate.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let template = match self.template {
            Some(t) => t,
            None => {
                // Size-check the grid before allocating the template.
                let topology = TileTopology::new(
                    self.tile_rows,
                    self.tile_cols,
                    self.cells_per_tile_row,
                    self.cells_per_tile_col,
                )?;
                let baseline = (self.min_depth + self.max_depth) * 0.5;
                vec![baseline; topology.cells_per_tile()]
            }
        };
        let config = EngineConfig {
            tile_rows: self.tile_rows,
            tile_cols: self.tile_cols,
            cells_per_tile_row: self.cells_per_tile_row,
            cells_per_tile_col: self.cells_per_tile_col,
            min_depth: self.min_depth,
            max_depth: self.max_depth,
            damping: self.damping,
            template,
        };
        config.validate()?;
        Ok(config)
    }
}
