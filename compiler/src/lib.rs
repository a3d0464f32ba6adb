// rillc — Rill compiler, canonicalization core
//
// Static validation of port boundary types and classification of loopback
// declarations. Each analysis is a module here; `effects` is the per-module
// entry point the canonicalization pass drives.

pub mod alias;
pub mod builtins;
pub mod decl;
pub mod diag;
pub mod effects;
pub mod id;
pub mod loopback;
pub mod pretty;
pub mod report;
pub mod types;
pub mod wire;
