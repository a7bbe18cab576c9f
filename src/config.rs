// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Configuration for containment classification and weighting.
//!
//! [`BindConfig`] gathers the ray direction strategy, how ambiguous rays are
//! treated, the falloff curve and the performance switches.
//!
//! # Presets
//!
//! - [`BindConfig::default()`] - single deterministic pass along `+X`
//! - [`BindConfig::fast()`] - adds the bounding-box early-out
//! - [`BindConfig::robust()`] - re-casts ambiguous vertices along perturbed directions
//! - [`BindConfig::strict()`] - fails on the first ambiguous vertex
//!
//! ```
//! use volbind::{BindConfig, FalloffConfig, RayStrategy};
//!
//! let config = BindConfig::robust()
//!     .with_ray(RayStrategy::Seeded { seed: 7 })
//!     .with_falloff(FalloffConfig::linear(0.5));
//! assert!(config.validate().is_ok());
//! ```

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{VolumeError, VolumeResult},
    geometry::{util::EPS, vector::VectorOps, vector_3::Vector3},
    weighting::falloff::FalloffConfig,
};

/// How the ray direction of a classification run is chosen. Every vertex of
/// a run uses the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RayStrategy {
    /// Caller-supplied direction; need not be unit length.
    Fixed(Vector3),
    /// One quasi-random unit direction drawn from a seeded RNG.
    Seeded { seed: u64 },
}

impl Default for RayStrategy {
    fn default() -> Self {
        RayStrategy::Fixed(Vector3::unit_x())
    }
}

impl RayStrategy {
    /// Unit direction for the run.
    pub fn resolve(&self) -> VolumeResult<Vector3> {
        match self {
            RayStrategy::Fixed(dir) => dir.normalized(),
            RayStrategy::Seeded { seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                Ok(random_unit_vector(&mut rng))
            }
        }
    }
}

/// Uniform direction on the unit sphere by rejection sampling in the cube.
pub(crate) fn random_unit_vector<R: Rng>(rng: &mut R) -> Vector3 {
    loop {
        let v = Vector3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        let n2 = v.norm_squared();
        if n2 > 1e-4 && n2 <= 1.0 {
            return v.scale(1.0 / n2.sqrt());
        }
    }
}

/// What to do with a vertex whose ray hit a known failure mode (edge graze,
/// coplanar face, origin on the surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmbiguityPolicy {
    /// Keep the single-pass result; the flag stays on the result.
    #[default]
    Resolve,
    /// Re-cast along up to `attempts` perturbed directions and keep the first
    /// unambiguous result.
    Retry { attempts: usize, seed: u64 },
    /// Abort the batch with `AmbiguousRay`.
    Strict,
}

/// Configuration for a classification and weighting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    pub ray: RayStrategy,
    pub ambiguity: AmbiguityPolicy,
    pub falloff: FalloffConfig,

    /// Tolerance for the intersection determinant, the ray parameter and
    /// hit merging.
    pub epsilon: f64,

    /// Whether to use parallel processing (via rayon).
    pub parallel: bool,
    /// Minimum number of target vertices before going parallel.
    pub parallel_threshold: usize,

    /// Query cage triangles through an AABB tree instead of testing all.
    pub accelerate: bool,
    /// Report vertices strictly outside the cage bounding box as outside
    /// without casting a ray (intersection count 0).
    pub bounds_cull: bool,

    /// Gaussian width used when blending several influences.
    pub blend_sigma: f64,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            ray: RayStrategy::default(),
            ambiguity: AmbiguityPolicy::default(),
            falloff: FalloffConfig::default(),
            epsilon: EPS,
            parallel: true,
            parallel_threshold: 256,
            accelerate: true,
            bounds_cull: false,
            blend_sigma: 0.5,
        }
    }
}

impl BindConfig {
    /// Default settings plus the bounding-box early-out.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            bounds_cull: true,
            ..Self::default()
        }
    }

    /// Retry ambiguous vertices along up to 8 perturbed directions.
    #[must_use]
    pub fn robust() -> Self {
        Self {
            ambiguity: AmbiguityPolicy::Retry {
                attempts: 8,
                seed: 0x5eed,
            },
            ..Self::default()
        }
    }

    /// Fail on any ambiguous vertex.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            ambiguity: AmbiguityPolicy::Strict,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ray(mut self, ray: RayStrategy) -> Self {
        self.ray = ray;
        self
    }

    #[must_use]
    pub fn with_direction(self, direction: Vector3) -> Self {
        self.with_ray(RayStrategy::Fixed(direction))
    }

    #[must_use]
    pub fn with_ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }

    #[must_use]
    pub fn with_falloff(mut self, falloff: FalloffConfig) -> Self {
        self.falloff = falloff;
        self
    }

    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_acceleration(mut self, accelerate: bool) -> Self {
        self.accelerate = accelerate;
        self
    }

    #[must_use]
    pub fn with_bounds_cull(mut self, bounds_cull: bool) -> Self {
        self.bounds_cull = bounds_cull;
        self
    }

    #[must_use]
    pub fn with_blend_sigma(mut self, sigma: f64) -> Self {
        self.blend_sigma = sigma;
        self
    }

    /// Checks every field that could otherwise fail midway through a batch.
    pub fn validate(&self) -> VolumeResult<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(VolumeError::InvalidConfig {
                details: format!("epsilon must be positive and finite, got {}", self.epsilon),
            });
        }
        if !(self.blend_sigma.is_finite() && self.blend_sigma > 0.0) {
            return Err(VolumeError::InvalidConfig {
                details: format!("blend_sigma must be positive and finite, got {}", self.blend_sigma),
            });
        }
        self.ray.resolve()?;
        self.falloff.validate()
    }
}
