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

//! Distance falloff for vertices outside the cage.

use serde::{Deserialize, Serialize};

use crate::error::{VolumeError, VolumeResult};

/// Shape of the weight curve outside the cage, as a function of the distance
/// `d` from the vertex to the nearest cage surface point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Falloff {
    /// Outside vertices get exactly `0.0`.
    #[default]
    None,
    /// `1 - d / radius`, reaching zero at `radius`.
    Linear { radius: f64 },
    /// `1 / (1 + d / scale)`.
    InverseDistance { scale: f64 },
    /// `exp(-d² / (2σ²))`.
    Gaussian { sigma: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FalloffConfig {
    /// Weight given to inside vertices and the ceiling of the falloff curve.
    pub max_weight: f64,
    pub falloff: Falloff,
}

impl Default for FalloffConfig {
    fn default() -> Self {
        Self {
            max_weight: 1.0,
            falloff: Falloff::None,
        }
    }
}

impl FalloffConfig {
    pub fn linear(radius: f64) -> Self {
        Self {
            falloff: Falloff::Linear { radius },
            ..Self::default()
        }
    }

    pub fn inverse_distance(scale: f64) -> Self {
        Self {
            falloff: Falloff::InverseDistance { scale },
            ..Self::default()
        }
    }

    pub fn gaussian(sigma: f64) -> Self {
        Self {
            falloff: Falloff::Gaussian { sigma },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = max_weight;
        self
    }

    pub fn needs_distance(&self) -> bool {
        !matches!(self.falloff, Falloff::None)
    }

    pub fn validate(&self) -> VolumeResult<()> {
        if !(0.0..=1.0).contains(&self.max_weight) {
            return Err(VolumeError::InvalidConfig {
                details: format!("max_weight {} is outside [0, 1]", self.max_weight),
            });
        }
        let (name, param) = match self.falloff {
            Falloff::None => return Ok(()),
            Falloff::Linear { radius } => ("radius", radius),
            Falloff::InverseDistance { scale } => ("scale", scale),
            Falloff::Gaussian { sigma } => ("sigma", sigma),
        };
        if !(param.is_finite() && param > 0.0) {
            return Err(VolumeError::InvalidConfig {
                details: format!("falloff {name} must be positive and finite, got {param}"),
            });
        }
        Ok(())
    }

    /// Weight of an outside vertex at `distance` from the cage surface,
    /// clamped to `[0, max_weight]`.
    pub fn outside_weight(&self, distance: f64) -> f64 {
        let d = distance.max(0.0);
        let shape = match self.falloff {
            Falloff::None => return 0.0,
            Falloff::Linear { radius } => 1.0 - d / radius,
            Falloff::InverseDistance { scale } => 1.0 / (1.0 + d / scale),
            Falloff::Gaussian { sigma } => (-(d * d) / (2.0 * sigma * sigma)).exp(),
        };
        (shape * self.max_weight).clamp(0.0, self.max_weight)
    }
}
