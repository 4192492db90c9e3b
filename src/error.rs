//! Error types for ribbon construction.

use crate::config::MAX_WINDOW_LEN;
use core::fmt;

/// Configuration errors rejected at construction time.
///
/// Topology bugs are not represented here; they trip `debug_assert!`s.
#[derive(Debug, Clone, PartialEq)]
pub enum RibbonError {
    /// Mass must be positive and finite.
    InvalidMass,
    /// Friction must be in (0, 1].
    InvalidFriction,
    /// Stiffness must be positive and finite.
    InvalidStiffness,
    /// Segment spacing (width + padding) must be positive.
    InvalidSpacing,
    /// Segment width must be positive.
    InvalidSegmentWidth,
    /// Viewport width and height must be positive.
    InvalidViewport,
    /// Jitter amplitudes must be non-negative.
    InvalidJitter,
    /// Edge padding must be non-negative and leave room inside the viewport.
    InvalidEdgePadding,
    /// The window needs at least two particles to form a segment.
    WindowTooSmall { len: usize },
    /// The window would exceed [`MAX_WINDOW_LEN`](crate::config::MAX_WINDOW_LEN) particles.
    WindowTooLarge { len: usize },
}

impl fmt::Display for RibbonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RibbonError::InvalidMass => write!(f, "mass must be positive and finite"),
            RibbonError::InvalidFriction => write!(f, "friction must be in (0, 1]"),
            RibbonError::InvalidStiffness => write!(f, "stiffness must be positive and finite"),
            RibbonError::InvalidSpacing => write!(f, "segment spacing must be positive"),
            RibbonError::InvalidSegmentWidth => write!(f, "segment width must be positive"),
            RibbonError::InvalidViewport => write!(f, "viewport width and height must be positive"),
            RibbonError::InvalidJitter => write!(f, "jitter amplitudes must be non-negative"),
            RibbonError::InvalidEdgePadding => {
                write!(f, "edge padding must be non-negative and less than half the viewport width")
            }
            RibbonError::WindowTooSmall { len } => {
                write!(f, "window of {} particles is too small (need at least 2)", len)
            }
            RibbonError::WindowTooLarge { len } => {
                write!(f, "window of {} particles exceeds the limit of {}", len, MAX_WINDOW_LEN)
            }
        }
    }
}
