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

use num_traits::ToPrimitive;
use tracing::warn;

use crate::{
    error::{VolumeError, VolumeResult},
    geometry::{
        aabb::Aabb, aabb_tree::AabbTree, triangle::Triangle, util::DEGENERATE_EPS,
        vector::VectorOps, vector_3::Vector3,
    },
};

/// Indexed triangle mesh: vertex positions plus index triples into them.
///
/// Used both for cage volumes and for the target meshes being weighted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vector3>,
    pub triangles: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Build a mesh and check it with [`Mesh::validate`].
    pub fn from_parts(vertices: Vec<Vector3>, triangles: Vec<[usize; 3]>) -> VolumeResult<Self> {
        let mesh = Self {
            vertices,
            triangles,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Build a mesh from positions in any primitive numeric type, as handed
    /// over by a loader (`f32` is common).
    pub fn from_coords<T: ToPrimitive>(
        positions: &[[T; 3]],
        triangles: Vec<[usize; 3]>,
    ) -> VolumeResult<Self> {
        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let coord = |c: &T| c.to_f64().ok_or(VolumeError::NonFiniteCoordinate { vertex: i });
                Ok(Vector3::new(coord(&p[0])?, coord(&p[1])?, coord(&p[2])?))
            })
            .collect::<VolumeResult<Vec<_>>>()?;
        Self::from_parts(vertices, triangles)
    }

    pub fn add_vertex(&mut self, position: Vector3) -> usize {
        let idx = self.vertices.len();
        self.vertices.push(position);
        idx
    }

    /// Adds a triangle face given three vertex indices (in CCW order).
    /// Indices are not checked here; see [`Mesh::validate`].
    pub fn add_triangle(&mut self, v0: usize, v1: usize, v2: usize) -> usize {
        let face_idx = self.triangles.len();
        self.triangles.push([v0, v1, v2]);
        face_idx
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Every index triple must reference an existing vertex and every vertex
    /// must be finite.
    pub fn validate(&self) -> VolumeResult<()> {
        let vertex_count = self.vertices.len();
        for (triangle, face) in self.triangles.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i >= vertex_count) {
                return Err(VolumeError::MalformedMesh {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        if let Some(vertex) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(VolumeError::NonFiniteCoordinate { vertex });
        }
        Ok(())
    }

    /// Triangle `f` by value. Panics if `f` or its indices are out of range;
    /// call [`Mesh::validate`] first on untrusted input.
    pub fn triangle(&self, f: usize) -> Triangle {
        let [a, b, c] = self.triangles[f];
        Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c])
    }

    pub fn iter_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangles.len()).map(move |f| self.triangle(f))
    }

    /// Indices of zero-area triangles. They never produce ray hits.
    pub fn degenerate_triangles(&self) -> Vec<usize> {
        let degenerate: Vec<usize> = self
            .iter_triangles()
            .enumerate()
            .filter(|(_, t)| t.normal().norm() < DEGENERATE_EPS)
            .map(|(f, _)| f)
            .collect();
        if !degenerate.is_empty() {
            warn!(count = degenerate.len(), "Mesh has degenerate triangles");
        }
        degenerate
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::enclosing(self.vertices.iter())
    }

    /// Average of the vertex positions.
    pub fn centroid(&self) -> Option<Vector3> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zero(), |acc, v| &acc + v);
        Some(sum.scale(1.0 / self.vertices.len() as f64))
    }

    /// Closest point on the surface, `None` for a mesh without triangles.
    pub fn closest_point(&self, p: &Vector3) -> Option<Vector3> {
        self.iter_triangles()
            .map(|t| t.closest_point(p))
            .min_by(|a, b| p.distance_squared_to(a).total_cmp(&p.distance_squared_to(b)))
    }

    pub fn distance_to_surface(&self, p: &Vector3) -> Option<f64> {
        self.closest_point(p).map(|c| c.distance_to(p))
    }

    /// AABB tree over triangle indices, each box grown by `pad`.
    pub fn build_tree(&self, pad: f64) -> Option<AabbTree<usize>> {
        let items = self
            .iter_triangles()
            .enumerate()
            .map(|(f, t)| (t.aabb().expanded(pad), f))
            .collect();
        AabbTree::build(items)
    }
}
