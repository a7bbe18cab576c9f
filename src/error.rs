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

//! Error types for volume containment and weighting.

use thiserror::Error;

/// Errors that can occur while classifying or weighting vertices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VolumeError {
    /// A vector too short to normalize.
    #[error("degenerate vector: length {length:e} is below the normalization threshold")]
    DegenerateVector {
        /// Length of the rejected vector.
        length: f64,
    },

    /// A triangle references a vertex that does not exist.
    #[error(
        "malformed mesh: triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices"
    )]
    MalformedMesh {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A mesh vertex could not be represented as a finite `f64`.
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteCoordinate { vertex: usize },

    /// The ray cast from a vertex grazed an edge, ran inside a face plane, or
    /// started on the surface. Only reported in strict mode.
    #[error("ambiguous ray from target vertex {vertex}: {reason}")]
    AmbiguousRay { vertex: usize, reason: String },

    /// Weights were requested with a containment result list that doesn't
    /// match the target mesh.
    #[error("expected {expected} containment results, got {actual}")]
    ResultCountMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {details}")]
    InvalidConfig { details: String },

    /// A volume name that doesn't follow `BindVolume_For_Joint_<influence>_<n>`.
    #[error("volume name {name:?} does not follow BindVolume_For_Joint_<influence>_<n>")]
    InvalidVolumeName { name: String },

    #[error("no volumes to bind with")]
    NoVolumes,
}

/// Result type for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;
