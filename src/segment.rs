//! Segment geometry handed to an external renderer.
//!
//! The ribbon is drawn as one quad per window node, spanning from the
//! node's predecessor to the node itself and offset sideways by the
//! segment width. Colours, gradients and the canvas stay outside the crate;
//! this module only decides geometry, which face a quad shows, and which
//! tint strategy applies.

use crate::float::Float;
use crate::system::ParticleSystem;
use crate::vec::Vector2;
use alloc::vec::Vec as AllocVec;

/// Which side of the ribbon a segment shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

impl Face {
    /// Odd segments show the front until the phase flips, even ones the back.
    pub fn for_index(index: usize, phase: bool) -> Face {
        if (index % 2 == 1) != phase { Face::Front } else { Face::Back }
    }
}

/// A drawable quadrilateral between two consecutive particles.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment<F: Float> {
    /// Window index of the node that closes the segment.
    pub index: usize,
    /// `[prev - pn, prev + pn, curr + cn, curr - cn]`.
    pub corners: [Vector2<F>; 4],
    /// Rotation for a fill gradient aligned with the segment.
    pub gradient_angle: F,
    pub face: Face,
}

/// Receiver of segments, implemented by the host renderer.
pub trait SegmentSink<F: Float> {
    fn fill_segment(&mut self, segment: &Segment<F>);
}

impl<F: Float> SegmentSink<F> for AllocVec<Segment<F>> {
    fn fill_segment(&mut self, segment: &Segment<F>) {
        self.push(segment.clone());
    }
}

/// Quad from `prev` to `curr`; `prev_prev` orients the trailing edge.
pub fn quad<F: Float>(
    prev_prev: &Vector2<F>,
    prev: &Vector2<F>,
    curr: &Vector2<F>,
    width: F,
) -> ([Vector2<F>; 4], F) {
    let current_normal = curr.minus(prev).unit_normal().scale((width, width));
    let previous_normal = prev.minus(prev_prev).unit_normal().negate().scale((width, width));
    let corners = [
        prev.minus(&previous_normal),
        prev.plus(&previous_normal),
        curr.plus(&current_normal),
        curr.minus(&current_normal),
    ];
    (corners, -current_normal.angle())
}

/// One segment per node that has two predecessors, in window order.
pub fn build_segments<F: Float, D>(
    system: &ParticleSystem<F, D>,
    width: F,
    phase: bool,
) -> AllocVec<Segment<F>> {
    let mut segments = AllocVec::with_capacity(system.len().saturating_sub(2));
    system.for_each(|particle, index, node| {
        let Some(prev) = node.prev() else { return };
        let Some(prev_prev) = prev.prev() else { return };
        let (corners, gradient_angle) = quad(
            &system.particle(*prev_prev.data()).position,
            &system.particle(*prev.data()).position,
            &particle.position,
            width,
        );
        segments.push(Segment {
            index,
            corners,
            gradient_angle,
            face: Face::for_index(index, phase),
        });
    });
    segments
}

/// Back faces first, then front faces, each group keeping window order.
pub fn in_draw_order<F: Float>(segments: AllocVec<Segment<F>>) -> impl Iterator<Item = Segment<F>> {
    let (front, back): (AllocVec<_>, AllocVec<_>) =
        segments.into_iter().partition(|s| s.face == Face::Front);
    back.into_iter().chain(front)
}

/// How the ribbon is tinted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TintMode<F: Float> {
    /// A constant hue in degrees.
    Fixed { hue: F },
    /// Hue follows the cumulative scroll offset around the colour wheel.
    ScrollHue,
}

impl<F: Float> TintMode<F> {
    /// Hue in `[0, 360)` degrees.
    pub fn hue(&self, scroll_offset: F) -> F {
        let full_turn = F::from_f32(360.0);
        match *self {
            TintMode::Fixed { hue } => hue.wrap_to(full_turn),
            TintMode::ScrollHue => scroll_offset.wrap_to(full_turn),
        }
    }
}

/// What sits behind the ribbon.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BackgroundMode<F: Float> {
    Transparent,
    /// A constant hue in degrees.
    Solid { hue: F },
    /// The tint rotated half a turn.
    Complementary,
}

impl<F: Float> BackgroundMode<F> {
    /// Background hue for a given tint hue, or `None` when nothing is drawn.
    pub fn hue(&self, tint_hue: F) -> Option<F> {
        let full_turn = F::from_f32(360.0);
        match *self {
            BackgroundMode::Transparent => None,
            BackgroundMode::Solid { hue } => Some(hue.wrap_to(full_turn)),
            BackgroundMode::Complementary => {
                Some((tint_hue + F::from_f32(180.0)).wrap_to(full_turn))
            }
        }
    }
}
