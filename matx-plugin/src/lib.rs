//! Matx Plugin System
//!
//! Functions callable from expressions are plugins registered by name.
//! The registry is the evaluator's whitelist: a name that was never
//! registered cannot be called.

mod context;
mod registry;
mod traits;

pub use context::EvalContext;
pub use registry::FunctionRegistry;
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin, FunctionRegistry};
    pub use matx_core::prelude::*;
}
