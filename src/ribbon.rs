//! Windowed ribbon: a fixed particle chain that recycles boundary particles.

use crate::config::RibbonConfig;
use crate::error::RibbonError;
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::{ParticleConfig, ParticleId};
use crate::segment::{self, Segment, SegmentSink};
use crate::system::ParticleSystem;
use crate::vec::Vector2;
use alloc::vec::Vec as AllocVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Edge of the window a particle can leave through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Boundary {
    Top,
    Bottom,
}

/// Per-boundary recycling state, evaluated once per tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WrapState {
    Steady,
    /// The head has scrolled above the window and moves to the tail.
    WrappingTop,
    /// The tail has scrolled below the window and moves to the head.
    WrappingBottom,
}

/// A completed recycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WrapEvent {
    pub boundary: Boundary,
    pub particle: ParticleId,
    /// Index the particle was created with.
    pub origin_index: usize,
    pub tick: u64,
    /// Phase flag after the wrap.
    pub phase: bool,
}

/// An endless elastic ribbon built from a fixed window of particles.
///
/// The window holds `N` particles ordered top to bottom. Scrolling applies
/// forces only; whenever the second particle from one end leaves the
/// viewport by more than two spacings, the outermost particle is relinked at
/// the other end and its springs are rebuilt.
pub struct Ribbon<F: Float> {
    system: ParticleSystem<F, usize>,
    config: RibbonConfig<F>,
    spacing: F,
    phase: bool,
    wrap_count: u64,
    scroll_offset: F,
    ticks: u64,
}

impl<F: Float> Ribbon<F> {
    pub fn new(config: RibbonConfig<F>) -> Result<Self, RibbonError> {
        config.validate()?;

        let spacing = config.segment_spacing();
        let len = config.window_len();
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut system = ParticleSystem::with_capacity(config.stiffness, len)?;

        let half = F::half();
        let usable = config.viewport.width - F::two() * config.edge_padding;
        let sample = |rng: &mut SmallRng| F::from_f32(rng.gen::<f32>());

        for index in 0..len {
            // even particles lean left, odd particles lean right
            let side = if index % 2 == 0 { -F::one() } else { F::one() };
            let x = config.edge_padding
                + usable * (half + side * (half - sample(&mut rng) * config.jitter_x));
            let y = spacing
                * (F::from_f32(index as f32) + (sample(&mut rng) - half) * config.jitter_y);
            let mass = F::one() + sample(&mut rng) * config.mass_jitter;

            let particle = ParticleConfig::<F, ()>::at(Vector2::new(x, y))
                .with_friction(config.friction)
                .with_mass(mass)
                .with_data(index);
            system.add(particle)?;
        }

        tracing::debug!(particles = len, spacing = ?spacing, seed = config.seed, "ribbon initialised");

        Ok(Ribbon {
            system,
            config,
            spacing,
            phase: false,
            wrap_count: 0,
            scroll_offset: F::zero(),
            ticks: 0,
        })
    }

    /// Convert a scroll delta into a uniform vertical force.
    pub fn scroll(&mut self, amount: F) {
        self.system.apply_force(&Vector2::new(F::zero(), amount));
        self.scroll_offset = self.scroll_offset + amount;
    }

    /// Apply an arbitrary force to every particle for the next tick.
    pub fn apply_force(&mut self, force: &Vector2<F>) {
        self.system.apply_force(force);
    }

    /// Advance one tick without observation.
    pub fn update(&mut self) {
        self.step(&mut NoOpStepObserver);
    }

    /// Advance one tick: integrate, then recycle at most once per boundary.
    pub fn step<O: StepObserver>(&mut self, observer: &mut O) {
        self.system.update();
        observer.on_integrate();

        for boundary in [Boundary::Top, Boundary::Bottom] {
            if self.wrap_state(boundary) != WrapState::Steady {
                if let Some(event) = self.recycle(boundary) {
                    observer.on_wrap(&event);
                }
            }
        }

        self.ticks += 1;
        tracing::trace!(tick = self.ticks, phase = self.phase, "ribbon step");
        observer.on_step_complete();
    }

    /// Whether `boundary` needs a recycle given the current positions.
    pub fn wrap_state(&self, boundary: Boundary) -> WrapState {
        let order = self.system.order();
        let threshold = F::two() * self.spacing;
        match boundary {
            Boundary::Top => {
                let second = order.head().and_then(|head| order.next(head));
                match second.and_then(|node| self.system.particle_at(node)) {
                    Some(p) if p.position.y() < -threshold => WrapState::WrappingTop,
                    _ => WrapState::Steady,
                }
            }
            Boundary::Bottom => {
                let second = order.tail().and_then(|tail| order.prev(tail));
                match second.and_then(|node| self.system.particle_at(node)) {
                    Some(p) if p.position.y() > self.config.viewport.height + threshold => {
                        WrapState::WrappingBottom
                    }
                    _ => WrapState::Steady,
                }
            }
        }
    }

    /// Move the outermost particle at `boundary` to the opposite end, place
    /// it one spacing beyond its new neighbour, rebuild its springs and flip
    /// the phase flag.
    pub fn recycle(&mut self, boundary: Boundary) -> Option<WrapEvent> {
        debug_assert!(!self.system.is_empty(), "recycle on an empty window");
        let node = match boundary {
            Boundary::Top => self.system.move_head_to_tail()?,
            Boundary::Bottom => self.system.move_tail_to_head()?,
        };

        let order = self.system.order();
        let (neighbour, offset) = match boundary {
            Boundary::Top => (order.prev(node), self.spacing),
            Boundary::Bottom => (order.next(node), -self.spacing),
        };
        let anchor_y = neighbour
            .and_then(|n| self.system.particle_at(n))
            .map(|p| p.position.y());
        let particle = self.system.particle_at_mut(node)?;
        if let Some(anchor_y) = anchor_y {
            let position = particle.position.with_y(anchor_y + offset);
            particle.move_to(position);
        }
        let origin_index = particle.data;

        self.system.reattach_springs(node);
        self.phase = !self.phase;
        self.wrap_count += 1;

        let particle = *self.system.order().get(node)?;
        tracing::debug!(
            boundary = ?boundary,
            origin_index,
            wraps = self.wrap_count,
            phase = self.phase,
            "recycled boundary particle"
        );
        Some(WrapEvent {
            boundary,
            particle,
            origin_index,
            tick: self.ticks,
            phase: self.phase,
        })
    }

    /// Number of particles in the window. Constant for the ribbon's lifetime.
    pub fn len(&self) -> usize {
        self.system.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system.is_empty()
    }

    /// Parity of the number of wraps so far.
    pub fn phase(&self) -> bool {
        self.phase
    }

    pub fn wrap_count(&self) -> u64 {
        self.wrap_count
    }

    /// Sum of every scroll delta received.
    pub fn scroll_offset(&self) -> F {
        self.scroll_offset
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn spacing(&self) -> F {
        self.spacing
    }

    pub fn config(&self) -> &RibbonConfig<F> {
        &self.config
    }

    pub fn system(&self) -> &ParticleSystem<F, usize> {
        &self.system
    }

    /// Particle positions in window order. Each call starts a fresh pass.
    pub fn positions(&self) -> impl Iterator<Item = &Vector2<F>> + '_ {
        self.system.iter().map(|p| &p.position)
    }

    pub fn kinetic_energy(&self) -> F {
        self.system.kinetic_energy()
    }

    /// Drawable quads in window order.
    pub fn segments(&self) -> AllocVec<Segment<F>> {
        segment::build_segments(&self.system, self.config.segment_width, self.phase)
    }

    /// Hand every segment to `sink`, back faces first.
    pub fn render<S: SegmentSink<F>>(&self, sink: &mut S) {
        for segment in segment::in_draw_order(self.segments()) {
            sink.fill_segment(&segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Viewport;
    use alloc::vec;

    fn still_config() -> RibbonConfig<f64> {
        RibbonConfig::new(Viewport::new(400.0, 200.0))
            .with_segment_width(30.0)
            .with_segment_padding(70.0)
            .with_jitter(0.0, 0.0)
            .with_mass_jitter(0.0)
            .with_window_margin(2)
    }

    fn ys(ribbon: &Ribbon<f64>) -> AllocVec<f64> {
        ribbon.positions().map(|p| p.y()).collect()
    }

    #[test]
    fn initial_layout_zig_zags() {
        let ribbon = Ribbon::new(still_config()).unwrap();
        assert_eq!(ribbon.len(), 4);
        let xs: AllocVec<f64> = ribbon.positions().map(|p| p.x()).collect();
        // edge 50, usable 300: even at 50, odd at 350
        assert_eq!(xs, vec![50.0, 350.0, 50.0, 350.0]);
        assert_eq!(ys(&ribbon), vec![0.0, 100.0, 200.0, 300.0]);
    }

    #[test]
    fn steady_without_motion() {
        let mut ribbon = Ribbon::new(still_config()).unwrap();
        ribbon.update();
        assert_eq!(ribbon.wrap_state(Boundary::Top), WrapState::Steady);
        assert_eq!(ribbon.wrap_state(Boundary::Bottom), WrapState::Steady);
        assert_eq!(ribbon.wrap_count(), 0);
    }

    #[test]
    fn recycle_top_places_particle_after_tail() {
        let mut ribbon = Ribbon::new(still_config()).unwrap();
        let event = ribbon.recycle(Boundary::Top).unwrap();
        assert_eq!(event.origin_index, 0);
        assert!(event.phase);
        assert_eq!(ys(&ribbon), vec![100.0, 200.0, 300.0, 400.0]);
        assert!(ribbon.phase());
    }

    #[test]
    fn recycle_bottom_places_particle_before_head() {
        let mut ribbon = Ribbon::new(still_config()).unwrap();
        let event = ribbon.recycle(Boundary::Bottom).unwrap();
        assert_eq!(event.origin_index, 3);
        assert_eq!(ys(&ribbon), vec![-100.0, 0.0, 100.0, 200.0]);
    }

    #[test]
    fn odd_margin_keeps_sides_alternating_across_recycles() {
        let mut ribbon = Ribbon::new(still_config().with_window_margin(3)).unwrap();
        assert_eq!(ribbon.len(), 6);
        let xs = |r: &Ribbon<f64>| r.positions().map(|p| p.x()).collect::<AllocVec<f64>>();

        ribbon.recycle(Boundary::Top).unwrap();
        assert_eq!(xs(&ribbon), vec![350.0, 50.0, 350.0, 50.0, 350.0, 50.0]);
        ribbon.recycle(Boundary::Bottom).unwrap();
        ribbon.recycle(Boundary::Bottom).unwrap();
        let after = xs(&ribbon);
        for pair in after.windows(2) {
            assert_ne!(pair[0], pair[1], "{:?}", after);
        }
    }

    #[test]
    fn scroll_accumulates_offset() {
        let mut ribbon = Ribbon::new(still_config()).unwrap();
        ribbon.scroll(2.0);
        ribbon.scroll(-0.5);
        assert!((ribbon.scroll_offset() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = still_config().with_friction(0.0);
        assert_eq!(Ribbon::new(config).err(), Some(RibbonError::InvalidFriction));
    }
}
