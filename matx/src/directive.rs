//! Store directives
//!
//! Two surface forms ask the engine to keep a value in a register:
//! a matrix entry ending in the two tokens `reg X`, and an expression
//! followed by `reg<X>` (the split is on the substring alone).

use matx_core::{MatxError, RegisterStore};
use tracing::debug;

/// Keyword that introduces a store target
pub const DIRECTIVE_KEYWORD: &str = "reg";

/// Split an expression on the first `reg`.
///
/// Returns the expression part and the raw remainder, if any. The
/// remainder is not validated here.
pub fn split_expression_directive(input: &str) -> (&str, Option<&str>) {
    match input.split_once(DIRECTIVE_KEYWORD) {
        Some((expression, remainder)) => {
            debug!(expression, remainder, "store directive found");
            (expression, Some(remainder))
        }
        None => (input, None),
    }
}

/// Strip a trailing `reg X` from matrix entry tokens.
///
/// When there are no more tokens than `expected`, nothing is stripped.
/// Otherwise the last two tokens must be the keyword (any case) and a
/// storable register name, or the whole entry is rejected.
pub fn split_element_directive<'t, 's>(
    tokens: &'t [&'s str],
    expected: usize,
    registers: &RegisterStore,
) -> Result<(&'t [&'s str], Option<char>), MatxError> {
    if tokens.len() <= expected {
        return Ok((tokens, None));
    }

    let accepted = registers.register_set().storable();
    match tokens {
        [elements @ .., keyword, name] if keyword.eq_ignore_ascii_case(DIRECTIVE_KEYWORD) => {
            let target = registers.resolve_target(name)?;
            Ok((elements, Some(target)))
        }
        [.., keyword, name] => Err(MatxError::invalid_register(&format!("{} {}", keyword, name), accepted)),
        _ => Err(MatxError::invalid_register(&tokens.join(" "), accepted)),
    }
}
