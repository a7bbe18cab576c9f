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

//! Skin-weight binding from several named cage volumes.
//!
//! Each volume is tied to one influence (a joint). A target vertex inside the
//! volumes of a single influence is bound fully to it; a vertex inside volumes
//! of several influences gets a Gaussian blend by its distance to each volume
//! center. Vertices inside no volume are left unbound.
//!
//! Volume names follow `BindVolume_For_Joint_<influence>_<n>`, e.g.
//! `BindVolume_For_Joint_left_arm_01` binds to `left_arm`.

use tracing::{info, warn};

use crate::{
    config::BindConfig,
    error::{VolumeError, VolumeResult},
    geometry::{util::DEGENERATE_EPS, vector_3::Vector3},
    mesh::{basic_types::InfluenceWeights, containment::Classifier, mesh::Mesh},
};

pub const VOLUME_PREFIX: &str = "BindVolume_For_Joint_";

/// Influence name encoded in a volume name.
pub fn parse_volume_name(name: &str) -> VolumeResult<String> {
    let invalid = || VolumeError::InvalidVolumeName {
        name: name.to_string(),
    };

    let rest = name.strip_prefix(VOLUME_PREFIX).ok_or_else(invalid)?;
    let (influence, suffix) = rest.rsplit_once('_').ok_or_else(invalid)?;
    if influence.is_empty() || suffix.is_empty() {
        return Err(invalid());
    }
    Ok(influence.to_string())
}

/// A cage volume and the influence it binds to.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeBinding {
    pub influence: String,
    pub cage: Mesh,
}

impl VolumeBinding {
    pub fn new(influence: impl Into<String>, cage: Mesh) -> Self {
        Self {
            influence: influence.into(),
            cage,
        }
    }

    /// Binding whose influence is parsed from `name`.
    pub fn from_name(name: &str, cage: Mesh) -> VolumeResult<Self> {
        Ok(Self::new(parse_volume_name(name)?, cage))
    }

    /// Average of the cage vertices.
    pub fn center(&self) -> Option<Vector3> {
        self.cage.centroid()
    }
}

/// Binds every target vertex to the influences of the volumes containing it.
///
/// Returns one entry per target vertex, in order. Fails with `NoVolumes` when
/// `volumes` is empty and with `MalformedMesh` when any mesh is invalid.
pub fn bind_by_volume(
    target: &Mesh,
    volumes: &[VolumeBinding],
    config: &BindConfig,
) -> VolumeResult<Vec<InfluenceWeights>> {
    if volumes.is_empty() {
        return Err(VolumeError::NoVolumes);
    }
    target.validate()?;

    info!(
        volumes = volumes.len(),
        vertices = target.vertex_count(),
        "Binding by volume"
    );

    // fail on a malformed cage before classifying anything
    let classifiers = volumes
        .iter()
        .map(|volume| Classifier::new(&volume.cage, config))
        .collect::<VolumeResult<Vec<_>>>()?;

    let mut containing: Vec<Vec<usize>> = vec![Vec::new(); target.vertex_count()];
    for (vi, classifier) in classifiers.iter().enumerate() {
        if volumes[vi].cage.triangle_count() == 0 {
            warn!(influence = %volumes[vi].influence, "Volume has no triangles; skipped");
            continue;
        }
        let results = classifier.classify_points(
            &target.vertices,
            config.parallel,
            config.parallel_threshold,
        )?;
        for (index, result) in results.iter().enumerate() {
            if result.inside {
                containing[index].push(vi);
            }
        }
    }

    let centers: Vec<Option<Vector3>> = volumes.iter().map(VolumeBinding::center).collect();

    let bound: Vec<InfluenceWeights> = containing
        .iter()
        .enumerate()
        .map(|(index, inside)| InfluenceWeights {
            index,
            weights: blend(
                &target.vertices[index],
                inside,
                volumes,
                &centers,
                config.blend_sigma,
            ),
        })
        .collect();

    let bound_count = bound.iter().filter(|w| w.is_bound()).count();
    let blended = bound.iter().filter(|w| w.weights.len() > 1).count();
    info!(bound = bound_count, blended, "Volume binding complete");

    Ok(bound)
}

/// Weights for a point inside the volumes listed in `inside`.
fn blend(
    p: &Vector3,
    inside: &[usize],
    volumes: &[VolumeBinding],
    centers: &[Option<Vector3>],
    sigma: f64,
) -> Vec<(String, f64)> {
    let mut influences: Vec<&str> = Vec::new();
    for &vi in inside {
        let name = volumes[vi].influence.as_str();
        if !influences.contains(&name) {
            influences.push(name);
        }
    }

    match influences.len() {
        0 => return Vec::new(),
        1 => return vec![(influences[0].to_string(), 1.0)],
        _ => {}
    }

    let distances: Vec<f64> = inside
        .iter()
        .map(|&vi| centers[vi].map_or(0.0, |c| c.distance_to(p)))
        .collect();
    let total: f64 = distances.iter().sum();

    let mut scores = vec![0.0; influences.len()];
    for (&vi, &d) in inside.iter().zip(&distances) {
        let normalized = if total > DEGENERATE_EPS { d / total } else { 0.0 };
        let score = (-(normalized * normalized) / (2.0 * sigma * sigma)).exp();
        // overlapping volumes of one influence add up
        if let Some(slot) = influences
            .iter()
            .position(|&name| name == volumes[vi].influence)
        {
            scores[slot] += score;
        }
    }

    let score_sum: f64 = scores.iter().sum();
    influences
        .into_iter()
        .zip(scores)
        .map(|(name, score)| (name.to_string(), score / score_sum))
        .collect()
}
