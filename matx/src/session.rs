//! Interactive session
//!
//! Owns the register store, the notice queue and the clipboard handle.
//! A UI calls one method per user action with the raw field text, then
//! drains [`Session::next_message`] until it returns `None`.

use crate::clipboard::Clipboard;
use crate::directive::split_element_directive;
use crate::encode::{build_matrix, encode_matrix};
use crate::messages::{MessageQueue, Notice};
use crate::{display_value, Matx};
use matx_core::{parse_dimension, Matrix, MatxError, RegisterSet, RegisterStore, Value};
use tracing::{debug, info, warn};

pub struct Session {
    engine: Matx,
    registers: RegisterStore,
    clipboard: Option<Box<dyn Clipboard>>,
    messages: MessageQueue,
}

impl Session {
    /// Session with the standard function library and no clipboard
    pub fn new(set: RegisterSet) -> Self {
        Self {
            engine: Matx::with_standard_library(),
            registers: RegisterStore::new(set),
            clipboard: None,
            messages: MessageQueue::new(),
        }
    }

    pub fn with_engine(mut self, engine: Matx) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn engine(&self) -> &Matx {
        &self.engine
    }

    pub fn registers(&self) -> &RegisterStore {
        &self.registers
    }

    /// Oldest undelivered notice
    pub fn next_message(&mut self) -> Option<Notice> {
        self.messages.pop()
    }

    pub fn pending_messages(&self) -> usize {
        self.messages.len()
    }

    /// Build a matrix from the three entry fields.
    ///
    /// `elements_text` holds whitespace-separated cell tokens, optionally
    /// followed by `reg X`. On success the matrix is stored (when a target
    /// was given) and its encoding is copied or shown.
    pub fn generate_matrix(
        &mut self,
        rows_text: &str,
        cols_text: &str,
        elements_text: &str,
    ) -> Result<Matrix, MatxError> {
        let result = self.try_generate(rows_text, cols_text, elements_text);
        if let Err(e) = &result {
            debug!(error = %e, "matrix entry rejected");
            self.messages.push(Notice::error(e.to_string()));
        }
        result
    }

    fn try_generate(
        &mut self,
        rows_text: &str,
        cols_text: &str,
        elements_text: &str,
    ) -> Result<Matrix, MatxError> {
        let rows = parse_dimension(rows_text)?;
        let cols = parse_dimension(cols_text)?;
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| MatxError::dimension_error(format!("{}×{} is too large", rows, cols)))?;

        let tokens: Vec<&str> = elements_text.split_whitespace().collect();
        let (elements, target) = split_element_directive(&tokens, expected, &self.registers)?;
        let matrix = build_matrix(elements, rows, cols)?;

        if let Some(name) = target {
            self.registers.store(name, Value::Matrix(matrix.clone()))?;
            info!(register = %name, rows, cols, "matrix stored");
            self.messages.push(Notice::info(stored_message(name)));
        }

        let encoding = encode_matrix(&matrix);
        debug!(%encoding, "matrix encoded");
        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(&encoding) {
                Ok(()) => self
                    .messages
                    .push(Notice::info(format!("Matrix copied to clipboard:\n{}", encoding))),
                Err(reason) => {
                    warn!(%reason, "clipboard write failed");
                    self.messages
                        .push(Notice::error(format!("Could not copy to clipboard: {}", reason)));
                    self.messages
                        .push(Notice::info(format!("Matrix encoding:\n{}", encoding)));
                }
            },
            None => self
                .messages
                .push(Notice::info(format!("Matrix encoding:\n{}", encoding))),
        }

        Ok(matrix)
    }

    /// Evaluate an expression line, with an optional `reg<X>` suffix.
    pub fn evaluate_equation(&mut self, input: &str) -> Result<Value, MatxError> {
        let evaluation = self.engine.evaluate(input, &mut self.registers);

        if let Some(e) = &evaluation.directive_error {
            self.messages.push(Notice::error(e.to_string()));
        }

        match &evaluation.result {
            Ok(value) => {
                if let Some(name) = evaluation.stored {
                    self.messages.push(Notice::info(stored_message(name)));
                }
                self.messages
                    .push(Notice::info(format!("Result:\n{}", display_value(value))));
            }
            Err(e) => {
                debug!(error = %e, "evaluation failed");
                self.messages
                    .push(Notice::error(format!("Invalid Equation: {}", e)));
            }
        }

        evaluation.result
    }

    /// Fill the identity register with an n×n identity matrix.
    pub fn set_identity(&mut self, size_text: &str) -> Result<char, MatxError> {
        let size = match parse_dimension(size_text) {
            Ok(n) => n,
            Err(e) => {
                self.messages.push(Notice::error("Please enter a valid integer."));
                return Err(e.into());
            }
        };

        match self.registers.set_identity(size) {
            Ok(name) => {
                info!(register = %name, size, "identity register set");
                self.messages.push(Notice::info(stored_message(name)));
                Ok(name)
            }
            Err(e) => {
                self.messages.push(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Register text for insertion into an expression, only when it holds a value
    pub fn register_reference(&self, name: char) -> Option<String> {
        self.registers.is_set(name).then(|| name.to_string())
    }

    /// Display line for every register: `A = @MATX{{..}}` or `A = <unset>`
    pub fn register_listing(&self) -> Vec<String> {
        self.registers
            .iter()
            .map(|(name, value)| match value {
                Some(v) => format!("{} = {}", name, display_value(v)),
                None => format!("{} = <unset>", name),
            })
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RegisterSet::default())
    }
}

fn stored_message(name: char) -> String {
    format!("Matrix stored in register {}!", name)
}
