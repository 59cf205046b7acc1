//! Matx Linalg - Matrix arithmetic and linear algebra
//!
//! Provides the operators and the function whitelist for Matx expressions:
//! - Elementwise arithmetic with scalar broadcasting (`+ - * /`)
//! - Matrix product (`@`)
//! - Functions: det, solve, cross
//!
//! All numeric work is f64; decompositions go through nalgebra.

mod helpers;
mod ops;
mod props;
mod solve;
mod vector_ops;

pub use helpers::extract_matrix;
pub use ops::{elementwise, matmul, negate, Elementwise};
pub use vector_ops::cross;

use matx_plugin::FunctionRegistry;

/// Load linear algebra functions into registry
pub fn load_linalg_library(registry: FunctionRegistry) -> FunctionRegistry {
    registry
        .with_function(props::DetFn)
        .with_function(solve::SolveFn)
        .with_function(vector_ops::CrossFn)
}

/// Registry holding exactly the whitelisted functions
pub fn standard_registry() -> FunctionRegistry {
    load_linalg_library(FunctionRegistry::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_loads() {
        let registry = standard_registry();
        let names: Vec<&str> = registry.list_functions().iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["cross", "det", "solve"]);
        assert!(registry.get_function("det").is_some());
        assert!(registry.get_function("inv").is_none());
    }
}
