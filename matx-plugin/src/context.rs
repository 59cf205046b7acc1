//! Evaluation Context

use crate::FunctionRegistry;
use matx_core::{RegisterStore, Value};

/// Read-only view handed to the evaluator and to plugins.
///
/// Register writes happen only after a successful evaluation, so the
/// context never needs mutable access to the store.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub registry: &'a FunctionRegistry,
    pub registers: &'a RegisterStore,
}

impl<'a> EvalContext<'a> {
    pub fn new(registry: &'a FunctionRegistry, registers: &'a RegisterStore) -> Self {
        Self { registry, registers }
    }

    /// Register value, or an error value for unknown and unset registers
    pub fn get_register(&self, name: char) -> Value {
        match self.registers.get(name) {
            Ok(v) => v.clone(),
            Err(e) => Value::Error(e),
        }
    }

    pub fn call_function(&self, name: &str, args: &[Value]) -> Value {
        self.registry.call_function(name, args, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matx_core::codes;

    #[test]
    fn test_get_register_errors_are_values() {
        let registry = FunctionRegistry::new();
        let mut store = RegisterStore::default();
        store.store('B', Value::Number(7.0)).unwrap();
        let ctx = EvalContext::new(&registry, &store);

        assert_eq!(ctx.get_register('B'), Value::Number(7.0));
        assert!(ctx.get_register('A').as_error().unwrap().is(codes::EMPTY_REGISTER));
        assert!(ctx.get_register('Q').as_error().unwrap().is(codes::INVALID_REGISTER));
    }
}
