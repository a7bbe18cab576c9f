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

//! Skin-weight assignment from closed cage volumes.
//!
//! Every vertex of a target mesh is classified as inside or outside a cage
//! mesh by ray parity, then given a weight: the configured maximum inside, and
//! zero or a distance falloff outside.
//!
//! ```
//! use volbind::{BindConfig, Mesh, compute_volume_weights};
//!
//! let cage = Mesh::from_coords(
//!     &[[0, 0, 0], [2, 0, 0], [0, 2, 0], [0, 0, 2]],
//!     vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
//! )
//! .unwrap();
//! let target = Mesh::from_coords(&[[0.3, 0.3, 0.3], [5.0, 5.0, 5.0]], vec![]).unwrap();
//!
//! let weights = compute_volume_weights(&cage, &target, &BindConfig::default()).unwrap();
//! assert_eq!(weights[0].weight, 1.0);
//! assert_eq!(weights[1].weight, 0.0);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod weighting;

pub use config::{AmbiguityPolicy, BindConfig, RayStrategy};
pub use error::{VolumeError, VolumeResult};
pub use geometry::Vector3;
pub use mesh::basic_types::{Ambiguity, ContainmentResult, InfluenceWeights, WeightedVertex};
pub use mesh::containment::{Classifier, classify, classify_all};
pub use mesh::mesh::Mesh;
pub use weighting::binding::{VolumeBinding, bind_by_volume, parse_volume_name};
pub use weighting::falloff::{Falloff, FalloffConfig};
pub use weighting::weights::compute_weights;

use tracing::info;

/// Classifies every `target` vertex against `cage` and weights it.
///
/// Returns one entry per target vertex, in vertex order. Fails on a malformed
/// mesh, an invalid configuration, or, under [`AmbiguityPolicy::Strict`], the
/// first ambiguous vertex.
pub fn compute_volume_weights(
    cage: &Mesh,
    target: &Mesh,
    config: &BindConfig,
) -> VolumeResult<Vec<WeightedVertex>> {
    let results = classify_all(target, cage, config)?;
    let parallel = config.parallel && results.len() > config.parallel_threshold;
    let weights = weighting::weights::weigh(target, cage, &results, &config.falloff, parallel)?;

    let inside = results.iter().filter(|r| r.inside).count();
    info!(vertices = weights.len(), inside, "Volume weights computed");
    Ok(weights)
}
