// THEORY:
// This file is the main entry point for the `parapix` library crate. It
// follows the standard Rust convention of using `lib.rs` to define the public
// API exposed to external consumers (here, the `invert` and `oil` binaries).
//
// The primary surface is the `ImagePipeline` driver and its configuration;
// the building blocks (`core_modules`, the fork-join `parallel_pipeline`)
// stay public so the partitioning and transform layers remain individually
// usable and testable.

pub mod cli;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;
