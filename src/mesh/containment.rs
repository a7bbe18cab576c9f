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

//! Point-in-volume classification by ray parity.
//!
//! A ray is cast from each target vertex along one direction shared by the
//! whole run; an odd number of surface crossings means inside. The cage must
//! be closed, free of self-intersections and consistently wound.
//!
//! Known limitations, kept rather than hidden:
//! - a ray running inside a face plane misses that face and can under-count;
//! - hits from triangles sharing an edge or vertex land at the same `t` and
//!   are merged into one crossing. A ray that only touches an edge from
//!   outside, without entering, is merged the same way and counts once, so an
//!   outside vertex reads as inside.
//!
//! Vertices that meet any of these conditions carry an [`Ambiguity`] flag;
//! [`AmbiguityPolicy`] decides what happens next.

use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    config::{AmbiguityPolicy, BindConfig, RayStrategy, random_unit_vector},
    error::{VolumeError, VolumeResult},
    geometry::{
        aabb::Aabb,
        aabb_tree::AabbTree,
        intersection::{RayTriangleCore, hit_from_core, ray_triangle_core},
        ray::Ray,
        vector::VectorOps,
        vector_3::Vector3,
    },
    mesh::{
        basic_types::{Ambiguity, ContainmentResult},
        mesh::Mesh,
    },
};

/// Classifies points against one cage mesh.
///
/// Holds the validated cage, the unit ray direction of the run and the
/// optional acceleration structures. Read-only once built, so it can be shared
/// across worker threads.
#[derive(Debug)]
pub struct Classifier<'a> {
    cage: &'a Mesh,
    direction: Vector3,
    epsilon: f64,
    policy: AmbiguityPolicy,
    tree: Option<AabbTree<usize>>,
    cull_bounds: Option<Aabb>,
}

impl<'a> Classifier<'a> {
    /// Validates `cage` and `config` and resolves the run's ray direction.
    pub fn new(cage: &'a Mesh, config: &BindConfig) -> VolumeResult<Self> {
        config.validate()?;
        cage.validate()?;

        let direction = config.ray.resolve()?;
        let bounds = cage.bounds();
        let extent = bounds.map_or(0.0, |b| {
            let axis = b.longest_axis();
            b.max[axis] - b.min[axis]
        });
        let tree = if config.accelerate {
            cage.build_tree(config.epsilon * (1.0 + extent))
        } else {
            None
        };

        let degenerate = cage.degenerate_triangles().len();

        debug!(
            ?direction,
            degenerate,
            accelerate = tree.is_some(),
            bounds_cull = config.bounds_cull,
            "Classifier ready"
        );

        Ok(Self {
            cage,
            direction,
            epsilon: config.epsilon,
            policy: config.ambiguity,
            tree,
            cull_bounds: if config.bounds_cull { bounds } else { None },
        })
    }

    /// Unit direction shared by every ray of the run.
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Single deterministic pass along the run direction.
    pub fn classify_point(&self, p: &Vector3) -> ContainmentResult {
        if let Some(bounds) = &self.cull_bounds {
            if !bounds.contains_strict(p) {
                return ContainmentResult::culled();
            }
        }
        self.cast(p, &self.direction)
    }

    /// Classifies target vertex `index` at `p`, applying the ambiguity policy.
    pub fn classify_vertex(&self, index: usize, p: &Vector3) -> VolumeResult<ContainmentResult> {
        let result = self.classify_point(p);
        let Some(ambiguity) = result.ambiguity else {
            return Ok(result);
        };

        match self.policy {
            AmbiguityPolicy::Resolve => Ok(result),
            AmbiguityPolicy::Strict => Err(VolumeError::AmbiguousRay {
                vertex: index,
                reason: ambiguity.to_string(),
            }),
            AmbiguityPolicy::Retry { attempts, seed } => {
                if let Some(retried) = self.retry(index, p, attempts, seed) {
                    return Ok(retried);
                }
                warn!(
                    vertex = index,
                    attempts,
                    %ambiguity,
                    "Ambiguous ray not resolved by retries; keeping first result"
                );
                Ok(result)
            }
        }
    }

    /// Re-casts along perturbed directions until one is unambiguous.
    fn retry(&self, index: usize, p: &Vector3, attempts: usize, seed: u64) -> Option<ContainmentResult> {
        // per-vertex seed keeps results independent of thread scheduling
        let mut rng = StdRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        for attempt in 0..attempts {
            let magnitude = 0.9 * (attempt + 1) as f64 / attempts as f64;
            let jitter = random_unit_vector(&mut rng).scale(magnitude);
            let Ok(direction) = (&self.direction + &jitter).normalized() else {
                continue;
            };
            let result = self.cast(p, &direction);
            if !result.is_ambiguous() {
                debug!(vertex = index, attempt, "Ambiguous ray resolved by retry");
                return Some(result);
            }
        }
        None
    }

    /// Casts one ray from `p` along the unit `direction` and counts crossings.
    pub fn cast(&self, p: &Vector3, direction: &Vector3) -> ContainmentResult {
        let ray = Ray::new(*p, *direction);
        let eps = self.epsilon;

        let mut faces: Vec<usize> = match &self.tree {
            Some(tree) => {
                let mut found = Vec::new();
                tree.query_ray(&ray, &mut found);
                found.into_iter().copied().collect()
            }
            None => (0..self.cage.triangle_count()).collect(),
        };
        // tree order depends on the split; keep the counting order stable
        faces.sort_unstable();

        let mut hits: Vec<f64> = Vec::new();
        let mut ambiguity: Option<Ambiguity> = None;

        for f in faces {
            let tri = self.cage.triangle(f);
            let core = ray_triangle_core(&ray, &tri, eps);

            if let Some(hit) = hit_from_core(&ray, &core, eps) {
                if hit.on_boundary(eps) {
                    ambiguity = ambiguity.max(Some(Ambiguity::EdgeGraze));
                }
                hits.push(hit.t);
                continue;
            }

            match core {
                RayTriangleCore::Skew { t, u, v } => {
                    let near = u >= -eps && v >= -eps && u + v <= 1.0 + eps;
                    if near && t.abs() <= eps {
                        ambiguity = ambiguity.max(Some(Ambiguity::OnSurface));
                    } else if near && t > eps {
                        ambiguity = ambiguity.max(Some(Ambiguity::EdgeGraze));
                    }
                }
                RayTriangleCore::Parallel { coplanar: true } => {
                    if tri.aabb().expanded(eps).ray_hits(&ray) {
                        ambiguity = ambiguity.max(Some(Ambiguity::Coplanar));
                    }
                }
                RayTriangleCore::Parallel { coplanar: false } | RayTriangleCore::Degenerate => {}
            }
        }

        let raw_hits = hits.len();
        let crossings = merge_hits(&mut hits, eps);
        if crossings < raw_hits {
            ambiguity = ambiguity.max(Some(Ambiguity::EdgeGraze));
        }

        ContainmentResult::from_count(crossings, raw_hits, ambiguity)
    }

    /// Classifies every point, in input order.
    ///
    /// Runs on the rayon pool when `parallel` is set and there are more than
    /// `parallel_threshold` points.
    pub fn classify_points(
        &self,
        points: &[Vector3],
        parallel: bool,
        parallel_threshold: usize,
    ) -> VolumeResult<Vec<ContainmentResult>> {
        info!(
            vertices = points.len(),
            triangles = self.cage.triangle_count(),
            "Starting containment classification"
        );

        let results = if parallel && points.len() > parallel_threshold {
            points
                .par_iter()
                .enumerate()
                .map(|(i, p)| self.classify_vertex(i, p))
                .collect::<VolumeResult<Vec<_>>>()?
        } else {
            points
                .iter()
                .enumerate()
                .map(|(i, p)| self.classify_vertex(i, p))
                .collect::<VolumeResult<Vec<_>>>()?
        };

        let inside = results.iter().filter(|r| r.inside).count();
        let ambiguous = results.iter().filter(|r| r.is_ambiguous()).count();
        info!(inside, ambiguous, "Containment classification complete");

        Ok(results)
    }
}

/// Sorts `hits` and counts them, treating values within `eps` of the previous
/// kept value as the same crossing.
fn merge_hits(hits: &mut [f64], eps: f64) -> usize {
    hits.sort_by(f64::total_cmp);

    let mut crossings = 0usize;
    let mut last_t: Option<f64> = None;
    for &t in hits.iter() {
        match last_t {
            Some(lt) if t - lt <= eps => {}
            _ => {
                crossings += 1;
                last_t = Some(t);
            }
        }
    }
    crossings
}

/// Classifies one point against `cage` with a single ray along `direction`.
///
/// Tests every cage triangle. Fails with `MalformedMesh` for a bad cage and
/// `DegenerateVector` for a zero direction.
pub fn classify(vertex: &Vector3, cage: &Mesh, direction: &Vector3) -> VolumeResult<ContainmentResult> {
    let config = BindConfig::default()
        .with_ray(RayStrategy::Fixed(*direction))
        .with_acceleration(false);
    let classifier = Classifier::new(cage, &config)?;
    Ok(classifier.classify_point(vertex))
}

/// Classifies every vertex of `target` against `cage`, in vertex order.
pub fn classify_all(
    target: &Mesh,
    cage: &Mesh,
    config: &BindConfig,
) -> VolumeResult<Vec<ContainmentResult>> {
    target.validate()?;
    let classifier = Classifier::new(cage, config)?;
    classifier.classify_points(&target.vertices, config.parallel, config.parallel_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_collapses_coincident_hits() {
        let mut hits = vec![0.5, 0.2, 0.5 + 1e-12, 0.9];
        assert_eq!(merge_hits(&mut hits, 1e-10), 3);
    }

    #[test]
    fn merge_keeps_distinct_hits() {
        let mut hits = vec![0.1, 0.2, 0.3];
        assert_eq!(merge_hits(&mut hits, 1e-10), 3);
        assert_eq!(merge_hits(&mut [], 1e-10), 0);
    }
}
