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

use crate::error::VolumeResult;
use crate::geometry::{
    aabb::Aabb,
    util::closest_point_on_triangle,
    vector::VectorOps,
    vector_3::Vector3,
};

/// A triangle held by value.
///
/// Vertex order defines the winding; the normal follows the right-hand rule
/// over `a -> b -> c`. Cage meshes are expected to be consistently wound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vector3,
    pub b: Vector3,
    pub c: Vector3,
}

impl Triangle {
    pub fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [&Vector3; 3] {
        [&self.a, &self.b, &self.c]
    }

    /// Unnormalized normal `(b - a) x (c - a)`; its length is twice the area.
    pub fn normal(&self) -> Vector3 {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// Fails with `DegenerateVector` for zero-area triangles.
    pub fn unit_normal(&self) -> VolumeResult<Vector3> {
        self.normal().normalized()
    }

    pub fn area(&self) -> f64 {
        0.5 * self.normal().norm()
    }

    pub fn centroid(&self) -> Vector3 {
        (&(&self.a + &self.b) + &self.c).scale(1.0 / 3.0)
    }

    pub fn closest_point(&self, p: &Vector3) -> Vector3 {
        closest_point_on_triangle(p, &self.a, &self.b, &self.c)
    }

    pub fn distance_to(&self, p: &Vector3) -> f64 {
        self.closest_point(p).distance_to(p)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.a, &self.b).union(&Aabb::from_points(&self.c, &self.c))
    }
}
