//! Function Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use matx_core::{MatxError, Value};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Whitelist of callable functions, keyed by exact name
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, Arc<dyn FunctionPlugin>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self {
            functions: BTreeMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_string();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn call_function(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Value {
        match self.get_function(name) {
            Some(f) => f.call(args, ctx),
            None => {
                let similar = self.find_similar_functions(name);
                let mut err = MatxError::undefined_func(name);
                if !similar.is_empty() {
                    err = err.with_suggestion(format!("Did you mean: {}?", similar.join(", ")));
                }
                Value::Error(err)
            }
        }
    }

    /// Metadata for every registered function, sorted by name
    pub fn list_functions(&self) -> Vec<FunctionMeta> {
        self.functions.values().map(|f| f.meta()).collect()
    }

    /// Function names similar to the given name (for error suggestions)
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(&String, usize)> = self
            .functions
            .keys()
            .filter_map(|func_name| {
                let score = Self::similarity_score(&name_lower, func_name);
                (score > 0).then_some((func_name, score))
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        matches.into_iter().take(3).map(|(n, _)| n.clone()).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        if query == candidate {
            // Case-only difference
            return 200;
        }
        if candidate.starts_with(query) || query.starts_with(candidate) {
            return 100;
        }
        if candidate.contains(query) || query.contains(candidate) {
            return 50;
        }

        // Require most of the candidate's letters to appear in the query
        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        if common * 3 >= candidate_chars.len() * 2 {
            common * 2
        } else {
            0
        }
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
