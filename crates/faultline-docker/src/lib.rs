//! Container runtime for faultline
//!
//! Realizes OS mode faults by invoking a container CLI (docker by default)
//! as `<binary> [args..] <verb> -- <container>`.

pub mod runtime;

pub use runtime::DockerCli;
