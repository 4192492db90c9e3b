//! Damped point masses integrated with semi-implicit Euler steps.

use crate::error::RibbonError;
use crate::float::Float;
use crate::vec::Vector2;

/// Stable handle to a particle in a [`ParticleSystem`](crate::system::ParticleSystem) arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub(crate) usize);

impl ParticleId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Construction parameters for a particle.
#[derive(Clone, Debug)]
pub struct ParticleConfig<F: Float, D> {
    pub position: Vector2<F>,
    pub velocity: Vector2<F>,
    /// Velocity retained per tick, in (0, 1].
    pub friction: F,
    pub mass: F,
    pub data: D,
}

impl<F: Float, D: Default> ParticleConfig<F, D> {
    pub fn at(position: Vector2<F>) -> Self {
        ParticleConfig {
            position,
            velocity: Vector2::zero(),
            friction: F::from_f32(crate::config::DEFAULT_FRICTION),
            mass: F::one(),
            data: D::default(),
        }
    }
}

impl<F: Float, D> ParticleConfig<F, D> {
    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector2<F>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_data<E>(self, data: E) -> ParticleConfig<F, E> {
        ParticleConfig {
            position: self.position,
            velocity: self.velocity,
            friction: self.friction,
            mass: self.mass,
            data,
        }
    }
}

/// A point mass with velocity damping and an opaque payload.
#[derive(Clone, Debug)]
pub struct Particle<F: Float, D = ()> {
    pub position: Vector2<F>,
    pub velocity: Vector2<F>,
    pub acceleration: Vector2<F>,
    friction: F,
    mass: F,
    pub data: D,
}

impl<F: Float, D> Particle<F, D> {
    pub fn new(config: ParticleConfig<F, D>) -> Result<Self, RibbonError> {
        if !(config.mass > F::zero()) || !config.mass.is_finite() {
            return Err(RibbonError::InvalidMass);
        }
        if !(config.friction > F::zero() && config.friction <= F::one()) {
            return Err(RibbonError::InvalidFriction);
        }
        Ok(Particle {
            position: config.position,
            velocity: config.velocity,
            acceleration: Vector2::zero(),
            friction: config.friction,
            mass: config.mass,
            data: config.data,
        })
    }

    pub fn friction(&self) -> F { self.friction }
    pub fn mass(&self) -> F { self.mass }

    /// Accumulate `force / mass` into this tick's acceleration.
    pub fn apply_force(&mut self, force: &Vector2<F>) {
        self.acceleration = self.acceleration.plus((force.x() / self.mass, force.y() / self.mass));
    }

    /// `v += a; v *= friction; p += v; a = 0`.
    pub fn integrate(&mut self) {
        self.velocity = self.velocity.plus(&self.acceleration).scale((self.friction, self.friction));
        self.position = self.position.plus(&self.velocity);
        self.acceleration = Vector2::zero();
    }

    /// Teleport without touching velocity or pending acceleration.
    pub fn move_to(&mut self, position: Vector2<F>) {
        self.position = position;
    }

    pub fn kinetic_energy(&self) -> F {
        F::half() * self.mass * self.velocity.length_sq()
    }
}
