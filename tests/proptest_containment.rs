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

//! Property-based tests for containment and weighting.

mod common;

use common::{points, unit_cube};
use proptest::prelude::*;
use volbind::{BindConfig, FalloffConfig, Vector3, classify, compute_volume_weights};

fn arb_direction() -> impl Strategy<Value = Vector3> {
    prop::array::uniform3(-1.0..1.0f64)
        .prop_filter("direction too short", |[x, y, z]| x * x + y * y + z * z > 0.01)
        .prop_map(Vector3::from)
}

fn arb_interior_point() -> impl Strategy<Value = Vector3> {
    prop::array::uniform3(0.05..0.95f64).prop_map(Vector3::from)
}

/// A point at least one unit away from the unit cube on some axis.
fn arb_exterior_point() -> impl Strategy<Value = Vector3> {
    (prop::array::uniform3(-5.0..5.0f64), 0usize..3, prop::bool::ANY).prop_map(
        |(mut c, axis, high)| {
            c[axis] = if high { 2.0 + c[axis].abs() } else { -1.0 - c[axis].abs() };
            Vector3::from(c)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn interior_points_are_inside_for_any_direction(
        p in arb_interior_point(),
        dir in arb_direction(),
    ) {
        let result = classify(&p, &unit_cube(), &dir).unwrap();
        prop_assert!(result.inside, "{:?} along {:?}: {:?}", p, dir, result);
        prop_assert_eq!(result.intersection_count, 1);
    }

    #[test]
    fn exterior_points_are_outside_for_any_direction(
        p in arb_exterior_point(),
        dir in arb_direction(),
    ) {
        let result = classify(&p, &unit_cube(), &dir).unwrap();
        prop_assert!(!result.inside, "{:?} along {:?}: {:?}", p, dir, result);
        prop_assert_eq!(result.intersection_count % 2, 0);
    }

    #[test]
    fn classification_is_deterministic(
        p in prop::array::uniform3(-1.0..2.0f64),
        dir in arb_direction(),
    ) {
        let p = Vector3::from(p);
        let first = classify(&p, &unit_cube(), &dir).unwrap();
        let second = classify(&p, &unit_cube(), &dir).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn falloff_weights_stay_in_range(
        coords in prop::collection::vec(prop::array::uniform3(-3.0..4.0f64), 1..20),
        radius in 0.01..5.0f64,
        max_weight in 0.0..=1.0f64,
    ) {
        let target = points(&coords);
        let config = BindConfig::default()
            .with_falloff(FalloffConfig::linear(radius).with_max_weight(max_weight));
        let weights = compute_volume_weights(&unit_cube(), &target, &config).unwrap();

        prop_assert_eq!(weights.len(), coords.len());
        for w in &weights {
            prop_assert!(w.weight >= 0.0 && w.weight <= max_weight);
        }
    }
}
