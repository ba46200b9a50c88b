// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search tiers and the chain that picks between them.
//!
//! `fast` needs a built index. `legacy` and `scan` work on any corpus, which is
//! what keeps search alive while an index is building or after a build failed.

pub mod fast;
pub mod legacy;
pub mod scan;
pub mod tiered;

pub use fast::fast_search;
pub use legacy::legacy_search;
pub use scan::full_scan;
pub use tiered::{passes_quality_gate, plan, tiered_search};
