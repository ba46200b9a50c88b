// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: the structures that make fast search possible.
//!
//! One index type, the trigram posting list, plus the clock that bounds how
//! long building it may take.

pub mod clock;
pub mod trigram;

pub use clock::{Clock, SystemClock};
pub use trigram::*;
