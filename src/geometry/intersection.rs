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

//! Möller–Trumbore ray/triangle intersection.
//!
//! Hits exactly on a triangle edge or vertex are accepted by every triangle
//! sharing that edge or vertex. Nothing here tries to arbitrate between them;
//! the containment classifier merges coincident hits and flags the vertex.

use crate::geometry::{
    ray::Ray,
    triangle::Triangle,
    util::{DEGENERATE_EPS, EPS},
    vector::VectorOps,
    vector_3::Vector3,
};

/// Raw outcome of the Möller–Trumbore solve, before any range test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayTriangleCore {
    /// The ray meets the triangle's plane at a unique `(t, u, v)`.
    Skew { t: f64, u: f64, v: f64 },
    /// Ray direction lies in the triangle plane; `coplanar` reports whether the
    /// origin lies in that plane as well.
    Parallel { coplanar: bool },
    /// The triangle's edges don't span a plane.
    Degenerate,
}

/// A ray/triangle hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter of the hit, always `> eps`.
    pub t: f64,
    pub point: Vector3,
    /// Barycentric weight of `b`.
    pub u: f64,
    /// Barycentric weight of `c`.
    pub v: f64,
}

impl RayHit {
    /// True when the hit lies within `eps` of an edge (or vertex) of the
    /// triangle, where neighbouring triangles report the same crossing.
    pub fn on_boundary(&self, eps: f64) -> bool {
        self.u <= eps || self.v <= eps || 1.0 - self.u - self.v <= eps
    }
}

pub fn ray_triangle_core(ray: &Ray, tri: &Triangle, eps: f64) -> RayTriangleCore {
    let edge1 = tri.b - tri.a;
    let edge2 = tri.c - tri.a;

    let normal = edge1.cross(&edge2);
    if normal.norm() < DEGENERATE_EPS {
        return RayTriangleCore::Degenerate;
    }

    let h = ray.direction.cross(&edge2);
    let det = edge1.dot(&h);
    if det.abs() < eps {
        let offset = ray.origin - tri.a;
        let plane_distance = normal.dot(&offset).abs() / normal.norm();
        return RayTriangleCore::Parallel {
            coplanar: plane_distance <= eps,
        };
    }

    let f = 1.0 / det;
    let s = ray.origin - tri.a;
    let u = f * s.dot(&h);
    let q = s.cross(&edge1);
    let v = f * ray.direction.dot(&q);
    let t = f * edge2.dot(&q);

    RayTriangleCore::Skew { t, u, v }
}

/// `intersect_with_tolerance` at the default [`EPS`].
pub fn intersect(ray: &Ray, tri: &Triangle) -> Option<RayHit> {
    intersect_with_tolerance(ray, tri, EPS)
}

/// Ray/triangle hit with `u, v >= 0`, `u + v <= 1` and `t > eps`.
///
/// Parallel rays and degenerate triangles report no hit rather than an error.
pub fn intersect_with_tolerance(ray: &Ray, tri: &Triangle, eps: f64) -> Option<RayHit> {
    hit_from_core(ray, &ray_triangle_core(ray, tri, eps), eps)
}

/// Applies the hit conditions to an already computed [`RayTriangleCore`].
pub fn hit_from_core(ray: &Ray, core: &RayTriangleCore, eps: f64) -> Option<RayHit> {
    match *core {
        RayTriangleCore::Skew { t, u, v } => {
            if !(0.0..=1.0).contains(&u) || v < 0.0 || u + v > 1.0 {
                return None;
            }
            if t <= eps {
                return None;
            }
            Some(RayHit {
                t,
                point: ray.at(t),
                u,
                v,
            })
        }
        RayTriangleCore::Parallel { .. } | RayTriangleCore::Degenerate => None,
    }
}
