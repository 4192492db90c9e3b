//! Rest-length springs and the edge registry that owns them.

use crate::float::Float;
use crate::particle::{Particle, ParticleId};
use crate::vec::Vector2;
use alloc::collections::BTreeMap;
use alloc::vec::Vec as AllocVec;

/// Coefficient applied to the horizontal component of a spring correction.
///
/// The vertical component uses the spring's stiffness. The split makes the
/// ribbon resist stretch along its length while staying loose sideways.
pub const LATERAL_COEFFICIENT: f32 = 0.00001;

/// Maximum number of springs touching one particle: predecessor, successor
/// and one skip link.
pub const MAX_SPRINGS_PER_PARTICLE: usize = 3;

/// A pairwise constraint pulling two particles toward their initial separation.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring<F: Float> {
    pub start: ParticleId,
    pub end: ParticleId,
    pub stiffness: F,
    pub rest_length: F,
}

impl<F: Float> Spring<F> {
    /// Connect two particles, remembering their current separation as rest length.
    pub fn between<D>(
        start: ParticleId,
        end: ParticleId,
        particles: &[Particle<F, D>],
        stiffness: F,
    ) -> Self {
        let rest_length = particles[start.0]
            .position
            .minus(&particles[end.0].position)
            .magnitude();
        Spring { start, end, stiffness, rest_length }
    }

    pub fn connects(&self, particle: ParticleId) -> bool {
        self.start == particle || self.end == particle
    }

    /// The endpoint that is not `particle`.
    pub fn other(&self, particle: ParticleId) -> ParticleId {
        if self.start == particle { self.end } else { self.start }
    }

    /// Force on `start`; `end` receives the negation.
    pub fn force<D>(&self, particles: &[Particle<F, D>]) -> Vector2<F> {
        let delta = particles[self.start.0]
            .position
            .minus(&particles[self.end.0].position);
        let error = self.rest_length - delta.magnitude();
        delta.unit().scale((
            error * F::from_f32(LATERAL_COEFFICIENT),
            error * self.stiffness,
        ))
    }

    /// Apply `+force` to `start` and `-force` to `end`.
    pub fn apply<D>(&self, particles: &mut [Particle<F, D>]) {
        let force = self.force(particles);
        particles[self.start.0].apply_force(&force);
        particles[self.end.0].apply_force(&force.negate());
    }
}

/// Unordered particle pair, normalised so `a <= b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    a: ParticleId,
    b: ParticleId,
}

impl EdgeKey {
    pub fn new(x: ParticleId, y: ParticleId) -> Self {
        if x <= y { EdgeKey { a: x, b: y } } else { EdgeKey { a: y, b: x } }
    }

    pub fn endpoints(&self) -> (ParticleId, ParticleId) {
        (self.a, self.b)
    }
}

/// Single source of truth for spring connectivity.
///
/// Each unordered pair maps to at most one spring. The per-particle
/// adjacency index is derived data, rewritten only by this type alongside
/// the edge map.
pub struct SpringRegistry<F: Float> {
    edges: BTreeMap<EdgeKey, Spring<F>>,
    adjacency: AllocVec<AllocVec<ParticleId>>,
}

impl<F: Float> SpringRegistry<F> {
    pub fn new() -> Self {
        SpringRegistry { edges: BTreeMap::new(), adjacency: AllocVec::new() }
    }

    /// Make room for a newly allocated particle.
    pub fn track(&mut self, particle: ParticleId) {
        if self.adjacency.len() <= particle.0 {
            self.adjacency.resize_with(particle.0 + 1, AllocVec::new);
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, a: ParticleId, b: ParticleId) -> bool {
        self.edges.contains_key(&EdgeKey::new(a, b))
    }

    pub fn get(&self, a: ParticleId, b: ParticleId) -> Option<&Spring<F>> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    pub fn degree(&self, particle: ParticleId) -> usize {
        self.adjacency.get(particle.0).map_or(0, |n| n.len())
    }

    pub fn neighbours(&self, particle: ParticleId) -> &[ParticleId] {
        match self.adjacency.get(particle.0) {
            Some(neighbours) => neighbours,
            None => &[],
        }
    }

    /// Springs touching `particle`, in insertion order.
    pub fn incident(&self, particle: ParticleId) -> impl Iterator<Item = &Spring<F>> + '_ {
        self.neighbours(particle)
            .iter()
            .filter_map(move |&other| self.edges.get(&EdgeKey::new(particle, other)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spring<F>> + '_ {
        self.edges.values()
    }

    /// Insert a spring unless the pair is already connected. Returns whether
    /// a spring was added.
    pub fn insert(&mut self, spring: Spring<F>) -> bool {
        let (start, end) = (spring.start, spring.end);
        if start == end || self.contains(start, end) {
            return false;
        }
        let saturated = self.degree(start) >= MAX_SPRINGS_PER_PARTICLE
            || self.degree(end) >= MAX_SPRINGS_PER_PARTICLE;
        debug_assert!(
            !saturated,
            "spring {:?}-{:?} would exceed {} springs per particle",
            start, end, MAX_SPRINGS_PER_PARTICLE
        );
        if saturated {
            return false;
        }
        self.track(start.max(end));
        self.adjacency[start.0].push(end);
        self.adjacency[end.0].push(start);
        self.edges.insert(EdgeKey::new(start, end), spring);
        true
    }

    /// Remove the spring between `a` and `b`, if any.
    pub fn remove(&mut self, a: ParticleId, b: ParticleId) -> Option<Spring<F>> {
        if a == b {
            return None;
        }
        let spring = self.edges.remove(&EdgeKey::new(a, b))?;
        self.adjacency[a.0].retain(|&n| n != b);
        self.adjacency[b.0].retain(|&n| n != a);
        Some(spring)
    }

    /// Remove every spring touching `particle`. Returns how many were dropped.
    pub fn remove_all(&mut self, particle: ParticleId) -> usize {
        let neighbours = match self.adjacency.get_mut(particle.0) {
            Some(n) => core::mem::take(n),
            None => return 0,
        };
        for &other in &neighbours {
            self.edges.remove(&EdgeKey::new(particle, other));
            self.adjacency[other.0].retain(|&n| n != particle);
        }
        neighbours.len()
    }
}

impl<F: Float> Default for SpringRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}
