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

#![allow(dead_code)]

use volbind::{Mesh, Vector3};

pub fn unit_cube() -> Mesh {
    cube(Vector3::zero(), 1.0)
}

/// Axis-aligned cube with outward-facing triangles.
pub fn cube(min: Vector3, size: f64) -> Mesh {
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (x0 + size, y0 + size, z0 + size);
    let vertices = vec![
        Vector3::new(x0, y0, z0),
        Vector3::new(x1, y0, z0),
        Vector3::new(x1, y1, z0),
        Vector3::new(x0, y1, z0),
        Vector3::new(x0, y0, z1),
        Vector3::new(x1, y0, z1),
        Vector3::new(x1, y1, z1),
        Vector3::new(x0, y1, z1),
    ];
    let triangles = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [2, 3, 7],
        [2, 7, 6],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    Mesh { vertices, triangles }
}

/// Tetrahedron with its right-angle corner at the origin and legs of `size`.
pub fn tetrahedron(size: f64) -> Mesh {
    Mesh {
        vertices: vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(size, 0.0, 0.0),
            Vector3::new(0.0, size, 0.0),
            Vector3::new(0.0, 0.0, size),
        ],
        triangles: vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    }
}

/// Point cloud "target" without triangles.
pub fn points(coords: &[[f64; 3]]) -> Mesh {
    Mesh {
        vertices: coords.iter().map(|&c| Vector3::from(c)).collect(),
        triangles: Vec::new(),
    }
}

/// Regular `n x n x n` grid spanning `[lo, hi]` on every axis.
pub fn grid(n: usize, lo: f64, hi: f64) -> Mesh {
    let step = (hi - lo) / (n - 1) as f64;
    let mut coords = Vec::with_capacity(n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                coords.push([
                    lo + step * i as f64,
                    lo + step * j as f64,
                    lo + step * k as f64,
                ]);
            }
        }
    }
    points(&coords)
}
