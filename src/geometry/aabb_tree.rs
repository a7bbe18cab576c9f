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

use crate::geometry::{aabb::Aabb, ray::Ray};

/// A static AABB‐tree of generic data `D`, split at the median along the
/// longest axis.
#[derive(Debug, Clone)]
pub enum AabbTree<D> {
    Leaf {
        aabb: Aabb,
        data: D,
    },
    Node {
        aabb: Aabb,
        left: Box<AabbTree<D>>,
        right: Box<AabbTree<D>>,
        count: usize,
    },
}

impl<D> AabbTree<D> {
    /// Build an AABB‐tree over `(aabb, data)` pairs; `None` when `items` is empty.
    pub fn build(items: Vec<(Aabb, D)>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self::build_binary_tree(items))
    }

    fn build_binary_tree(mut items: Vec<(Aabb, D)>) -> Self {
        if items.len() == 1 {
            if let Some((aabb, data)) = items.pop() {
                return AabbTree::Leaf { aabb, data };
            }
        }

        let bounds = items
            .iter()
            .skip(1)
            .fold(items[0].0, |acc, (b, _)| acc.union(b));
        let axis = bounds.longest_axis();
        items.sort_by(|(a, _), (b, _)| a.center(axis).total_cmp(&b.center(axis)));

        let mid = items.len() / 2;
        let right_items = items.split_off(mid); // items = left half

        let left_child = Box::new(Self::build_binary_tree(items));
        let right_child = Box::new(Self::build_binary_tree(right_items));

        let node_aabb = left_child.aabb().union(right_child.aabb());
        let total_items = left_child.size() + right_child.size();

        AabbTree::Node {
            aabb: node_aabb,
            left: left_child,
            right: right_child,
            count: total_items,
        }
    }

    /// Get AABB of this node/leaf
    pub fn aabb(&self) -> &Aabb {
        match self {
            AabbTree::Leaf { aabb, .. } => aabb,
            AabbTree::Node { aabb, .. } => aabb,
        }
    }

    /// Number of leaves below this node.
    pub fn size(&self) -> usize {
        match self {
            AabbTree::Leaf { .. } => 1,
            AabbTree::Node { count, .. } => *count,
        }
    }

    /// Collect all `&D` whose AABB is crossed by `ray`.
    pub fn query_ray<'a>(&'a self, ray: &Ray, out: &mut Vec<&'a D>) {
        match self {
            AabbTree::Leaf { aabb, data } => {
                if aabb.ray_hits(ray) {
                    out.push(data);
                }
            }
            AabbTree::Node {
                aabb, left, right, ..
            } => {
                if aabb.ray_hits(ray) {
                    left.query_ray(ray, out);
                    right.query_ray(ray, out);
                }
            }
        }
    }
}
