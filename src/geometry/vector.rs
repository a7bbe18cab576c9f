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

/// Linear-algebra operations shared by the vector types.
pub trait VectorOps: Sized {
    type Scalar;

    fn dot(&self, other: &Self) -> Self::Scalar;
    fn cross(&self, other: &Self) -> Self;
    fn norm(&self) -> Self::Scalar;
    fn norm_squared(&self) -> Self::Scalar;
    fn scale(&self, s: Self::Scalar) -> Self;

    /// Unit-length copy of `self`.
    ///
    /// Fails with [`VolumeError::DegenerateVector`](crate::error::VolumeError::DegenerateVector)
    /// instead of dividing by a near-zero length.
    fn normalized(&self) -> VolumeResult<Self>;
}
