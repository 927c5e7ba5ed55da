// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod graph;
mod hierarchy;
mod source;

#[cfg(test)]
mod tests;

pub use graph::RoleGraph;
pub use hierarchy::{HierarchyController, HierarchySnapshot, LoadingFlags, SelectOptionSets};
pub use source::{FetchError, LocationSource};
