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

use serde::{Deserialize, Serialize};

/// Why a ray could not be trusted to give the right parity.
///
/// Ordered by severity; a vertex keeps the most severe condition it met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ambiguity {
    /// The ray crossed the surface on a triangle edge or vertex.
    EdgeGraze,
    /// The ray runs inside the plane of a cage triangle.
    Coplanar,
    /// The ray origin lies on the cage surface.
    OnSurface,
}

impl std::fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EdgeGraze => write!(f, "ray grazes a triangle edge or vertex"),
            Self::Coplanar => write!(f, "ray runs inside a triangle plane"),
            Self::OnSurface => write!(f, "vertex lies on the cage surface"),
        }
    }
}

/// Inside/outside classification of one target vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainmentResult {
    pub inside: bool,
    /// Surface crossings after merging coincident hits; its parity is `inside`.
    pub intersection_count: usize,
    /// Triangle hits before merging.
    pub raw_hits: usize,
    /// Set when the ray met one of the known failure modes.
    pub ambiguity: Option<Ambiguity>,
}

impl ContainmentResult {
    pub fn from_count(intersection_count: usize, raw_hits: usize, ambiguity: Option<Ambiguity>) -> Self {
        Self {
            inside: intersection_count % 2 == 1,
            intersection_count,
            raw_hits,
            ambiguity,
        }
    }

    /// Result for a vertex rejected before any ray was cast.
    pub fn culled() -> Self {
        Self::from_count(0, 0, None)
    }

    pub fn is_ambiguous(&self) -> bool {
        self.ambiguity.is_some()
    }
}

/// Weight of one target vertex, `weight` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedVertex {
    pub index: usize,
    pub weight: f64,
}

/// Per-influence weights of one target vertex from multi-volume binding.
///
/// Empty when the vertex lies in no volume; otherwise the weights sum to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfluenceWeights {
    pub index: usize,
    pub weights: Vec<(String, f64)>,
}

impl InfluenceWeights {
    pub fn weight_of(&self, influence: &str) -> Option<f64> {
        self.weights
            .iter()
            .find(|(name, _)| name == influence)
            .map(|(_, w)| *w)
    }

    pub fn is_bound(&self) -> bool {
        !self.weights.is_empty()
    }
}
