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

mod common;

use approx::assert_relative_eq;
use common::{grid, points, unit_cube};
use volbind::{
    BindConfig, ContainmentResult, FalloffConfig, VolumeError, WeightedVertex, compute_volume_weights,
    compute_weights,
};

#[test]
fn test_binary_weights_without_falloff() {
    let target = points(&[[0.5, 0.5, 0.5], [2.0, 2.0, 2.0], [0.25, 0.4, 0.6]]);
    let weights = compute_volume_weights(&unit_cube(), &target, &BindConfig::default()).unwrap();

    assert_eq!(
        weights,
        vec![
            WeightedVertex { index: 0, weight: 1.0 },
            WeightedVertex { index: 1, weight: 0.0 },
            WeightedVertex { index: 2, weight: 1.0 },
        ]
    );
}

#[test]
fn test_linear_falloff() {
    let target = points(&[[0.5, 0.4, 0.6], [2.0, 0.4, 0.6], [4.0, 0.4, 0.6]]);
    let config = BindConfig::default().with_falloff(FalloffConfig::linear(2.0));
    let weights = compute_volume_weights(&unit_cube(), &target, &config).unwrap();

    assert_eq!(weights[0].weight, 1.0);
    assert_relative_eq!(weights[1].weight, 0.5, epsilon = 1e-12);
    assert_eq!(weights[2].weight, 0.0);
}

#[test]
fn test_inverse_distance_falloff() {
    let target = points(&[[0.4, 3.0, 0.6]]);
    let config = BindConfig::default().with_falloff(FalloffConfig::inverse_distance(1.0));
    let weights = compute_volume_weights(&unit_cube(), &target, &config).unwrap();

    // two units above the y = 1 face
    assert_relative_eq!(weights[0].weight, 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_gaussian_falloff_with_max_weight() {
    let target = points(&[[0.3, 0.4, 0.6], [0.3, 0.4, 2.0]]);
    let config = BindConfig::default()
        .with_falloff(FalloffConfig::gaussian(1.0).with_max_weight(0.8));
    let weights = compute_volume_weights(&unit_cube(), &target, &config).unwrap();

    assert_eq!(weights[0].weight, 0.8);
    assert_relative_eq!(weights[1].weight, 0.8 * (-0.5_f64).exp(), epsilon = 1e-12);
}

#[test]
fn test_weights_stay_in_range() {
    let target = grid(8, -1.0, 2.0);
    let config = BindConfig::default().with_falloff(FalloffConfig::gaussian(0.4));
    let weights = compute_volume_weights(&unit_cube(), &target, &config).unwrap();

    assert_eq!(weights.len(), target.vertex_count());
    for (i, w) in weights.iter().enumerate() {
        assert_eq!(w.index, i);
        assert!((0.0..=1.0).contains(&w.weight), "vertex {i}: {}", w.weight);
    }
}

#[test]
fn test_compute_weights_from_precomputed_results() {
    let target = points(&[[0.5, 0.5, 0.5], [3.0, 0.5, 0.5]]);
    let results = vec![
        ContainmentResult::from_count(1, 1, None),
        ContainmentResult::from_count(2, 2, None),
    ];

    let weights = compute_weights(&target, &unit_cube(), &results, &FalloffConfig::default()).unwrap();
    assert_eq!(weights[0].weight, 1.0);
    assert_eq!(weights[1].weight, 0.0);

    let linear = compute_weights(&target, &unit_cube(), &results, &FalloffConfig::linear(4.0)).unwrap();
    assert_relative_eq!(linear[1].weight, 0.5, epsilon = 1e-12);
}

#[test]
fn test_result_count_must_match_target() {
    let target = points(&[[0.5, 0.5, 0.5], [3.0, 0.5, 0.5]]);
    let results = vec![ContainmentResult::from_count(1, 1, None)];

    let err = compute_weights(&target, &unit_cube(), &results, &FalloffConfig::default()).unwrap_err();
    assert_eq!(
        err,
        VolumeError::ResultCountMismatch {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn test_invalid_falloff_rejected() {
    let target = points(&[[0.5, 0.5, 0.5]]);

    let too_heavy = BindConfig::default().with_falloff(FalloffConfig::default().with_max_weight(1.5));
    assert!(matches!(
        compute_volume_weights(&unit_cube(), &target, &too_heavy),
        Err(VolumeError::InvalidConfig { .. })
    ));

    let zero_radius = BindConfig::default().with_falloff(FalloffConfig::linear(0.0));
    assert!(matches!(
        compute_volume_weights(&unit_cube(), &target, &zero_radius),
        Err(VolumeError::InvalidConfig { .. })
    ));
}

#[test]
fn test_strict_mode_propagates() {
    let target = points(&[[0.5, 0.5, 0.5]]);
    assert!(matches!(
        compute_volume_weights(&unit_cube(), &target, &BindConfig::strict()),
        Err(VolumeError::AmbiguousRay { vertex: 0, .. })
    ));
}

#[test]
fn test_malformed_cage_rejected_by_compute_weights() {
    let target = points(&[[0.5, 0.5, 0.5], [3.0, 0.5, 0.5]]);
    let results = vec![
        ContainmentResult::from_count(1, 1, None),
        ContainmentResult::from_count(0, 0, None),
    ];
    let mut cage = unit_cube();
    cage.triangles.push([0, 1, 42]);

    let err = compute_weights(&target, &cage, &results, &FalloffConfig::linear(10.0)).unwrap_err();
    assert_eq!(
        err,
        VolumeError::MalformedMesh {
            triangle: 12,
            index: 42,
            vertex_count: 8
        }
    );
}

#[test]
fn test_surface_vertex_is_outside_at_full_falloff_weight() {
    let target = points(&[[1.0, 0.4, 0.6]]);
    let config = BindConfig::default().with_falloff(FalloffConfig::linear(1.0));

    let results = volbind::classify_all(&target, &unit_cube(), &config).unwrap();
    assert!(!results[0].inside);

    // full weight does not make it an inside vertex
    let weights = compute_volume_weights(&unit_cube(), &target, &config).unwrap();
    assert_relative_eq!(weights[0].weight, 1.0, epsilon = 1e-12);
}
