// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String processing helpers.
//!
//! Only normalization lives here for now: it runs on both sides of every
//! comparison, so everything else in the crate depends on it.

pub mod normalize;
