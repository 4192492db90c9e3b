//! Particle arena, window order and spring registry in one aggregate.

use crate::config::DEFAULT_STIFFNESS;
use crate::error::RibbonError;
use crate::float::Float;
use crate::particle::{Particle, ParticleConfig, ParticleId};
use crate::ring::{NodeId, NodeRef, RingList};
use crate::spring::{Spring, SpringRegistry};
use crate::vec::Vector2;
use alloc::vec::Vec as AllocVec;

/// A mass-spring network whose particles are ordered by a [`RingList`].
///
/// Particles live in an arena and never move in memory; the ring stores
/// their handles, so relocating a ring node leaves every spring valid.
pub struct ParticleSystem<F: Float, D = ()> {
    particles: AllocVec<Particle<F, D>>,
    order: RingList<ParticleId>,
    springs: SpringRegistry<F>,
    stiffness: F,
}

impl<F: Float, D> ParticleSystem<F, D> {
    pub fn new(stiffness: F) -> Result<Self, RibbonError> {
        if !(stiffness > F::zero()) || !stiffness.is_finite() {
            return Err(RibbonError::InvalidStiffness);
        }
        Ok(ParticleSystem {
            particles: AllocVec::new(),
            order: RingList::new(),
            springs: SpringRegistry::new(),
            stiffness,
        })
    }

    pub fn with_capacity(stiffness: F, capacity: usize) -> Result<Self, RibbonError> {
        let mut system = Self::new(stiffness)?;
        system.particles.reserve(capacity);
        Ok(system)
    }

    /// Nominal stiffness used when linking neighbours.
    pub fn stiffness(&self) -> F {
        self.stiffness
    }

    /// Append a particle at the tail and link it to its new predecessor.
    pub fn add(&mut self, config: ParticleConfig<F, D>) -> Result<ParticleId, RibbonError> {
        let particle = Particle::new(config)?;
        let id = ParticleId(self.particles.len());
        self.particles.push(particle);
        self.springs.track(id);
        let node = self.order.push(id);
        self.reattach_springs(node);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn particle(&self, id: ParticleId) -> &Particle<F, D> {
        &self.particles[id.0]
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> &mut Particle<F, D> {
        &mut self.particles[id.0]
    }

    /// Window order of particle handles.
    pub fn order(&self) -> &RingList<ParticleId> {
        &self.order
    }

    /// Particle held by a ring node.
    pub fn particle_at(&self, node: NodeId) -> Option<&Particle<F, D>> {
        let id = *self.order.get(node)?;
        Some(&self.particles[id.0])
    }

    pub fn particle_at_mut(&mut self, node: NodeId) -> Option<&mut Particle<F, D>> {
        let id = *self.order.get(node)?;
        Some(&mut self.particles[id.0])
    }

    pub fn springs(&self) -> &SpringRegistry<F> {
        &self.springs
    }

    /// Springs touching `id`.
    pub fn springs_of(&self, id: ParticleId) -> impl Iterator<Item = &Spring<F>> + '_ {
        self.springs.incident(id)
    }

    pub fn spring_count(&self, id: ParticleId) -> usize {
        self.springs.degree(id)
    }

    /// Symmetric membership test: true whichever side created the spring.
    pub fn has_spring(&self, a: ParticleId, b: ParticleId) -> bool {
        self.springs.contains(a, b)
    }

    /// Link two particles unless already linked. The spring is evaluated
    /// from both endpoints every tick, so it carries half the nominal
    /// stiffness.
    pub fn add_spring(&mut self, a: ParticleId, b: ParticleId, stiffness: F) -> bool {
        if a == b || self.has_spring(a, b) {
            return false;
        }
        let spring = Spring::between(a, b, &self.particles, stiffness * F::half());
        self.springs.insert(spring)
    }

    /// Drop the spring between `a` and `b`. Self-edges are a no-op.
    pub fn remove_spring(&mut self, a: ParticleId, b: ParticleId) -> bool {
        self.springs.remove(a, b).is_some()
    }

    /// Detach `id` from every neighbour.
    pub fn remove_springs(&mut self, id: ParticleId) -> usize {
        self.springs.remove_all(id)
    }

    /// Rebuild the springs of the particle at `node` from its current ring
    /// neighbours: predecessor, successor, and a skip link between the two
    /// when both exist.
    pub fn reattach_springs(&mut self, node: NodeId) {
        let Some(&id) = self.order.get(node) else {
            debug_assert!(false, "reattach on stale ring node {:?}", node);
            return;
        };
        self.remove_springs(id);

        let prev = self.order.prev(node).and_then(|n| self.order.get(n).copied());
        let next = self.order.next(node).and_then(|n| self.order.get(n).copied());
        let stiffness = self.stiffness;

        if let Some(prev) = prev {
            self.add_spring(id, prev, stiffness);
        }
        if let Some(next) = next {
            self.add_spring(id, next, stiffness);
        }
        if let (Some(prev), Some(next)) = (prev, next) {
            self.add_spring(prev, next, stiffness);
        }
    }

    /// Ring relocation of the head to the tail. Springs are left untouched.
    pub fn move_head_to_tail(&mut self) -> Option<NodeId> {
        self.order.move_head_to_tail()
    }

    /// Ring relocation of the tail to the head. Springs are left untouched.
    pub fn move_tail_to_head(&mut self) -> Option<NodeId> {
        self.order.move_tail_to_head()
    }

    /// Broadcast an external force to every particle.
    pub fn apply_force(&mut self, force: &Vector2<F>) {
        for p in self.particles.iter_mut() {
            p.apply_force(force);
        }
    }

    /// Let every spring touching `id` push on its endpoints, then integrate `id`.
    pub fn update_particle(&mut self, id: ParticleId) {
        for spring in self.springs.incident(id) {
            spring.apply(&mut self.particles);
        }
        self.particles[id.0].integrate();
    }

    /// Advance every particle one tick, in window order.
    pub fn update(&mut self) {
        let mut cursor = self.order.head();
        while let Some(node) = cursor {
            cursor = self.order.next(node);
            if let Some(&id) = self.order.get(node) {
                self.update_particle(id);
            }
        }
    }

    /// Visit particles in window order with their ring neighbourhood.
    pub fn for_each<C>(&self, mut callback: C)
    where
        C: FnMut(&Particle<F, D>, usize, NodeRef<'_, ParticleId>),
    {
        let particles = &self.particles;
        self.order.for_each(|&id, index, node| callback(&particles[id.0], index, node));
    }

    /// Transform particles in window order into a new list of the same length.
    pub fn map<U, C>(&self, mut callback: C) -> RingList<U>
    where
        C: FnMut(&Particle<F, D>, usize, NodeRef<'_, ParticleId>) -> U,
    {
        let particles = &self.particles;
        self.order.map(|&id, index, node| callback(&particles[id.0], index, node))
    }

    /// Particles in window order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle<F, D>> + '_ {
        self.order.iter().map(move |id| &self.particles[id.0])
    }

    /// Total kinetic energy `Σ ½ m |v|²`.
    pub fn kinetic_energy(&self) -> F {
        self.particles
            .iter()
            .fold(F::zero(), |acc, p| acc + p.kinetic_energy())
    }
}

impl<F: Float, D> Default for ParticleSystem<F, D> {
    fn default() -> Self {
        ParticleSystem {
            particles: AllocVec::new(),
            order: RingList::new(),
            springs: SpringRegistry::new(),
            stiffness: F::from_f32(DEFAULT_STIFFNESS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn column(count: usize) -> ParticleSystem<f32> {
        let mut system = ParticleSystem::new(0.1).unwrap();
        for i in 0..count {
            system
                .add(ParticleConfig::at(Vector2::new(0.0, i as f32 * 100.0)))
                .unwrap();
        }
        system
    }

    fn ids(system: &ParticleSystem<f32>) -> AllocVec<ParticleId> {
        system.order().to_vec()
    }

    #[test]
    fn add_links_a_chain() {
        let system = column(4);
        let ids = ids(&system);
        assert!(system.has_spring(ids[0], ids[1]));
        assert!(system.has_spring(ids[1], ids[2]));
        assert!(system.has_spring(ids[2], ids[3]));
        assert!(!system.has_spring(ids[0], ids[2]));
        assert_eq!(system.spring_count(ids[0]), 1);
        assert_eq!(system.spring_count(ids[1]), 2);
        assert_eq!(system.spring_count(ids[3]), 1);
    }

    #[test]
    fn add_spring_halves_stiffness() {
        let system = column(2);
        let ids = ids(&system);
        let spring = system.springs().get(ids[0], ids[1]).unwrap();
        assert!((spring.stiffness - 0.05).abs() < 1e-7);
        assert!((spring.rest_length - 100.0).abs() < 1e-4);
    }

    #[test]
    fn reattach_interior_adds_skip_link() {
        let mut system = column(3);
        let middle = system.order().node_at(1).unwrap();
        system.reattach_springs(middle);
        let ids = ids(&system);
        assert!(system.has_spring(ids[1], ids[0]));
        assert!(system.has_spring(ids[1], ids[2]));
        assert!(system.has_spring(ids[0], ids[2]));
        assert_eq!(system.springs().len(), 3);
    }

    #[test]
    fn update_pulls_stretched_pair_together() {
        let mut system = column(2);
        let ids = ids(&system);
        system.particle_mut(ids[1]).move_to(Vector2::new(0.0, 120.0));
        system.update();
        assert!(system.particle(ids[0]).velocity.y() > 0.0);
        assert!(system.particle(ids[1]).velocity.y() < 0.0);
    }

    #[test]
    fn map_follows_window_order() {
        let mut system = column(3);
        system.move_head_to_tail();
        let ys = system.map(|p, _, _| p.position.y()).to_vec();
        assert_eq!(ys, vec![100.0, 200.0, 0.0]);
    }

    #[test]
    fn for_each_sees_neighbour_handles() {
        let system = column(3);
        let mut prevs = vec![];
        system.for_each(|_, _, node| prevs.push(node.prev().map(|n| *n.data())));
        let ids = ids(&system);
        assert_eq!(prevs, vec![None, Some(ids[0]), Some(ids[1])]);
    }

    #[test]
    fn rejects_invalid_particles() {
        let mut system: ParticleSystem<f32> = ParticleSystem::new(0.1).unwrap();
        let config = ParticleConfig::at(Vector2::zero()).with_mass(-1.0);
        assert_eq!(system.add(config), Err(RibbonError::InvalidMass));
        assert!(system.is_empty());
    }

    #[test]
    fn rejects_non_positive_stiffness() {
        assert_eq!(
            ParticleSystem::<f32>::new(0.0).err(),
            Some(RibbonError::InvalidStiffness)
        );
    }
}
