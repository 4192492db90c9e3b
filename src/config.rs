//! Configuration types for the ribbon simulation.

use crate::error::RibbonError;
use crate::float::Float;

/// Velocity retained per tick when no friction is configured.
pub const DEFAULT_FRICTION: f32 = 0.965;
/// Nominal spring stiffness when none is configured.
pub const DEFAULT_STIFFNESS: f32 = 0.1;
/// Particles kept beyond the visible ones so recycling happens off screen.
pub const DEFAULT_WINDOW_MARGIN: usize = 6;
/// Largest particle window a ribbon will allocate.
pub const MAX_WINDOW_LEN: usize = 1 << 16;

/// Drawable area the ribbon scrolls through. Fixed for the ribbon's lifetime.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport<F: Float> {
    pub width: F,
    pub height: F,
}

impl<F: Float> Viewport<F> {
    pub fn new(width: F, height: F) -> Self {
        Viewport { width, height }
    }
}

/// Configuration for a [`Ribbon`](crate::ribbon::Ribbon).
///
/// # Builder Pattern
/// ```
/// use ribbon::config::{RibbonConfig, Viewport};
///
/// let config: RibbonConfig<f32> = RibbonConfig::new(Viewport::new(800.0, 600.0))
///     .with_segment_width(80.0)
///     .with_segment_padding(130.0)
///     .with_edge_padding(40.0)
///     .with_jitter(0.4, 0.0)
///     .with_stiffness(0.05);
/// assert_eq!(config.segment_spacing(), 210.0);
/// ```
#[derive(Clone, Debug)]
pub struct RibbonConfig<F: Float> {
    pub viewport: Viewport<F>,
    /// Half-thickness of each drawn segment. Default: 30.
    pub segment_width: F,
    /// Gap added to the width to get the vertical spacing. Default: 100.
    pub segment_padding: F,
    /// Horizontal inset of the zig-zag from the viewport edges. Default: 50.
    pub edge_padding: F,
    /// Horizontal position jitter as a fraction of the usable width. Default: 0.1.
    pub jitter_x: F,
    /// Vertical position jitter as a fraction of the spacing. Default: 0.3.
    pub jitter_y: F,
    /// Extra mass drawn uniformly from `[0, mass_jitter)` on top of 1. Default: 0.5.
    pub mass_jitter: F,
    /// Velocity retained per tick, in (0, 1]. Default: 0.965.
    pub friction: F,
    /// Nominal stiffness of neighbour springs. Default: 0.1.
    pub stiffness: F,
    /// Particles beyond those that fit on screen. Default: 6.
    pub window_margin: usize,
    /// Seed for the jitter generator. Default: 0.
    pub seed: u64,
}

impl<F: Float> RibbonConfig<F> {
    /// Create a config for `viewport` with default values.
    pub fn new(viewport: Viewport<F>) -> Self {
        RibbonConfig {
            viewport,
            segment_width: F::from_f32(30.0),
            segment_padding: F::from_f32(100.0),
            edge_padding: F::from_f32(50.0),
            jitter_x: F::from_f32(0.1),
            jitter_y: F::from_f32(0.3),
            mass_jitter: F::from_f32(0.5),
            friction: F::from_f32(DEFAULT_FRICTION),
            stiffness: F::from_f32(DEFAULT_STIFFNESS),
            window_margin: DEFAULT_WINDOW_MARGIN,
            seed: 0,
        }
    }

    pub fn with_segment_width(mut self, width: F) -> Self {
        self.segment_width = width;
        self
    }

    pub fn with_segment_padding(mut self, padding: F) -> Self {
        self.segment_padding = padding;
        self
    }

    pub fn with_edge_padding(mut self, padding: F) -> Self {
        self.edge_padding = padding;
        self
    }

    /// Set horizontal and vertical position jitter.
    pub fn with_jitter(mut self, x: F, y: F) -> Self {
        self.jitter_x = x;
        self.jitter_y = y;
        self
    }

    pub fn with_mass_jitter(mut self, mass_jitter: F) -> Self {
        self.mass_jitter = mass_jitter;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_window_margin(mut self, margin: usize) -> Self {
        self.window_margin = margin;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Vertical distance between consecutive particles.
    pub fn segment_spacing(&self) -> F {
        self.segment_width + self.segment_padding
    }

    /// Particles that fit on screen, rounded to an even count so the
    /// zig-zag alternation survives recycling.
    pub fn amount_on_screen(&self) -> usize {
        let per_screen = self.viewport.height / self.segment_spacing();
        let pairs = (per_screen / F::two()).round();
        if pairs > F::zero() && pairs.is_finite() {
            // float-to-int casts saturate
            (pairs.to_f32() as usize).saturating_mul(2)
        } else {
            0
        }
    }

    /// Fixed particle count `N` of the window. The margin is rounded up to
    /// an even count so `N` stays even.
    pub fn window_len(&self) -> usize {
        let margin = self.window_margin.saturating_add(self.window_margin % 2);
        self.amount_on_screen().saturating_add(margin)
    }

    /// Reject configurations that would make the simulation degenerate.
    pub fn validate(&self) -> Result<(), RibbonError> {
        let positive = |v: F| v > F::zero() && v.is_finite();
        let non_negative = |v: F| v >= F::zero() && v.is_finite();

        if !positive(self.viewport.width) || !positive(self.viewport.height) {
            return Err(RibbonError::InvalidViewport);
        }
        let edge = self.edge_padding;
        if !non_negative(edge) || !(F::two() * edge < self.viewport.width) {
            return Err(RibbonError::InvalidEdgePadding);
        }
        if !positive(self.segment_width) {
            return Err(RibbonError::InvalidSegmentWidth);
        }
        if !positive(self.segment_spacing()) {
            return Err(RibbonError::InvalidSpacing);
        }
        if !(self.friction > F::zero() && self.friction <= F::one()) {
            return Err(RibbonError::InvalidFriction);
        }
        if !positive(self.stiffness) {
            return Err(RibbonError::InvalidStiffness);
        }
        if !non_negative(self.jitter_x) || !non_negative(self.jitter_y) {
            return Err(RibbonError::InvalidJitter);
        }
        if !non_negative(self.mass_jitter) {
            return Err(RibbonError::InvalidMass);
        }
        let len = self.window_len();
        if len < 2 {
            return Err(RibbonError::WindowTooSmall { len });
        }
        if len > MAX_WINDOW_LEN {
            return Err(RibbonError::WindowTooLarge { len });
        }
        Ok(())
    }
}
