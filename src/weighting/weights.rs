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

use rayon::prelude::*;
use tracing::debug;

use crate::{
    error::{VolumeError, VolumeResult},
    mesh::{
        basic_types::{ContainmentResult, WeightedVertex},
        mesh::Mesh,
    },
    weighting::falloff::FalloffConfig,
};

/// Turns containment results into one weight per target vertex.
///
/// Inside vertices get `falloff.max_weight`. Outside vertices get `0.0`, or
/// the falloff curve evaluated at their distance to the nearest `cage` surface
/// point when one is configured. No ray casting happens here.
///
/// Fails with `MalformedMesh` when `cage` has an out-of-range index.
pub fn compute_weights(
    target: &Mesh,
    cage: &Mesh,
    results: &[ContainmentResult],
    falloff: &FalloffConfig,
) -> VolumeResult<Vec<WeightedVertex>> {
    weigh(target, cage, results, falloff, false)
}

pub(crate) fn weigh(
    target: &Mesh,
    cage: &Mesh,
    results: &[ContainmentResult],
    falloff: &FalloffConfig,
    parallel: bool,
) -> VolumeResult<Vec<WeightedVertex>> {
    falloff.validate()?;
    cage.validate()?;
    if results.len() != target.vertex_count() {
        return Err(VolumeError::ResultCountMismatch {
            expected: target.vertex_count(),
            actual: results.len(),
        });
    }

    debug!(
        vertices = results.len(),
        falloff = ?falloff.falloff,
        parallel,
        "Assigning weights"
    );

    let weight_of = |(index, result): (usize, &ContainmentResult)| {
        let weight = if result.inside {
            falloff.max_weight
        } else if falloff.needs_distance() {
            cage.distance_to_surface(&target.vertices[index])
                .map_or(0.0, |d| falloff.outside_weight(d))
        } else {
            0.0
        };
        WeightedVertex { index, weight }
    };

    let weights: Vec<WeightedVertex> = if parallel {
        results.par_iter().enumerate().map(weight_of).collect()
    } else {
        results.iter().enumerate().map(weight_of).collect()
    };
    Ok(weights)
}
