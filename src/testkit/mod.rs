//! Test doubles for exercising the execution pipeline without a real
//! exchange. Compiled only with the `testkit` feature.

pub mod submitter;

pub use submitter::ScriptedSubmitter;
