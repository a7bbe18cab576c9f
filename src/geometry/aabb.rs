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

use crate::geometry::{ray::Ray, vector_3::Vector3};

/// An axis‐aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Aabb { min, max }
    }

    pub fn min(&self) -> &Vector3 {
        &self.min
    }

    /// Access the maximum corner.
    pub fn max(&self) -> &Vector3 {
        &self.max
    }

    /// Build the smallest AABB containing two points.
    pub fn from_points(a: &Vector3, b: &Vector3) -> Self {
        Aabb::new(a.min(b), a.max(b))
    }

    /// Smallest AABB containing every point, `None` for an empty iterator.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vector3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Aabb::from_points(first, first), |acc, p| {
            Aabb::new(acc.min.min(p), acc.max.max(p))
        }))
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    /// Grow every side by `pad`.
    pub fn expanded(&self, pad: f64) -> Aabb {
        let d = Vector3::new(pad, pad, pad);
        Aabb::new(&self.min - &d, &self.max + &d)
    }

    /// Strict containment: points on the box faces are outside.
    pub fn contains_strict(&self, p: &Vector3) -> bool {
        (0..3).all(|i| p[i] > self.min[i] && p[i] < self.max[i])
    }

    /// Center coordinate along axis `i`.
    pub fn center(&self, i: usize) -> f64 {
        0.5 * (self.min[i] + self.max[i])
    }

    /// Length along axis `i`.
    fn extent(&self, i: usize) -> f64 {
        (self.max[i] - self.min[i]).abs()
    }

    /// Return the axis index with largest extent.
    pub fn longest_axis(&self) -> usize {
        let mut best_i = 0usize;
        let mut best = self.extent(0);
        for i in 1..3 {
            let e = self.extent(i);
            if e > best {
                best_i = i;
                best = e;
            }
        }
        best_i
    }

    /// Slab test for the half-line `t >= 0` of `ray`.
    pub fn ray_hits(&self, ray: &Ray) -> bool {
        let mut t_min = 0.0_f64;
        let mut t_max = f64::INFINITY;

        for i in 0..3 {
            let o = ray.origin[i];
            let d = ray.direction[i];
            if d == 0.0 {
                if o < self.min[i] || o > self.max[i] {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (self.min[i] - o) * inv;
            let mut t1 = (self.max[i] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}
