//! Elastic scrolling ribbons built from a recycled particle-spring chain.
//!
//! `ribbon` simulates a zig-zag ribbon that scrolls forever through a fixed
//! viewport. A bounded window of particles, linked by rest-length springs,
//! is pushed around by scroll forces; particles leaving one edge are
//! relinked at the opposite edge with fresh springs, so the chain never
//! grows or tears.
//!
//! # Features
//!
//! - **Vector math**: `Vector2` with cached length and unit direction
//! - **Ring list**: arena-backed doubly linked list with O(1) end-to-end moves
//! - **Spring network**: particles in an arena, springs in one edge registry
//! - **Windowed ribbon**: deterministic recycling with a parity phase flag
//! - **Segment geometry**: quads and face selection for an external renderer
//! - **Observable**: Monitor ticks and recycles via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod ring;
pub mod particle;
pub mod spring;
pub mod system;
pub mod ribbon;
pub mod segment;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Operand, Vector2};
pub use ring::{NodeId, NodeRef, RingList};
pub use particle::{Particle, ParticleConfig, ParticleId};
pub use spring::{EdgeKey, Spring, SpringRegistry};
pub use system::ParticleSystem;
pub use ribbon::{Boundary, Ribbon, WrapEvent, WrapState};
pub use segment::{BackgroundMode, Face, Segment, SegmentSink, TintMode};
pub use config::{RibbonConfig, Viewport};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::RibbonError;
