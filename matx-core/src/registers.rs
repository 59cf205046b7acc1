//! Named registers
//!
//! A fixed, configured set of single-letter slots. Storable registers take
//! user matrices and evaluation results; the optional identity register
//! only ever holds an n×n identity matrix written by [`RegisterStore::set_identity`].

use crate::{Matrix, MatxError, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Built-in register layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterProfile {
    /// A, B, C, D plus identity register I
    #[default]
    Full,
    /// A, B, C without an identity register
    Basic,
}

impl RegisterProfile {
    pub fn register_set(self) -> RegisterSet {
        match self {
            RegisterProfile::Full => RegisterSet {
                names: vec!['A', 'B', 'C', 'D'],
                identity: Some('I'),
            },
            RegisterProfile::Basic => RegisterSet {
                names: vec!['A', 'B', 'C'],
                identity: None,
            },
        }
    }
}

impl FromStr for RegisterProfile {
    type Err = MatxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(RegisterProfile::Full),
            "basic" => Ok(RegisterProfile::Basic),
            other => Err(MatxError::new(
                crate::codes::PARSE_ERROR,
                format!("unknown register profile '{}'", other),
            )
            .with_suggestion("Use 'full' or 'basic'")),
        }
    }
}

impl fmt::Display for RegisterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterProfile::Full => write!(f, "full"),
            RegisterProfile::Basic => write!(f, "basic"),
        }
    }
}

/// Raw, unvalidated form used for deserialization
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRegisterSet {
    names: Vec<char>,
    #[serde(default)]
    identity: Option<char>,
}

/// Validated set of register names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRegisterSet", into = "RawRegisterSet")]
pub struct RegisterSet {
    names: Vec<char>,
    identity: Option<char>,
}

impl RegisterSet {
    pub fn new(names: Vec<char>, identity: Option<char>) -> Result<Self, MatxError> {
        if names.is_empty() {
            return Err(MatxError::domain_error("register set needs at least one storable register"));
        }
        let mut seen = Vec::with_capacity(names.len() + 1);
        for &name in names.iter().chain(identity.iter()) {
            if !name.is_ascii_uppercase() {
                return Err(MatxError::domain_error(format!(
                    "register name '{}' must be a single uppercase letter",
                    name
                )));
            }
            if seen.contains(&name) {
                return Err(MatxError::domain_error(format!("register '{}' declared twice", name)));
            }
            seen.push(name);
        }
        Ok(Self { names, identity })
    }

    /// Registers that accept stored values, in configured order
    pub fn storable(&self) -> &[char] {
        &self.names
    }

    pub fn identity(&self) -> Option<char> {
        self.identity
    }

    /// Every readable register: storable ones, then the identity register
    pub fn all(&self) -> impl Iterator<Item = char> + '_ {
        self.names.iter().copied().chain(self.identity)
    }

    pub fn contains(&self, name: char) -> bool {
        self.names.contains(&name) || self.identity == Some(name)
    }

    pub fn is_storable(&self, name: char) -> bool {
        self.names.contains(&name)
    }
}

impl Default for RegisterSet {
    fn default() -> Self {
        RegisterProfile::default().register_set()
    }
}

impl TryFrom<RawRegisterSet> for RegisterSet {
    type Error = MatxError;

    fn try_from(raw: RawRegisterSet) -> Result<Self, Self::Error> {
        RegisterSet::new(raw.names, raw.identity)
    }
}

impl From<RegisterSet> for RawRegisterSet {
    fn from(set: RegisterSet) -> Self {
        RawRegisterSet {
            names: set.names,
            identity: set.identity,
        }
    }
}

/// Register contents for the lifetime of a session
#[derive(Debug, Clone)]
pub struct RegisterStore {
    set: RegisterSet,
    slots: BTreeMap<char, Value>,
}

impl RegisterStore {
    pub fn new(set: RegisterSet) -> Self {
        Self {
            set,
            slots: BTreeMap::new(),
        }
    }

    pub fn register_set(&self) -> &RegisterSet {
        &self.set
    }

    pub fn contains(&self, name: char) -> bool {
        self.set.contains(name)
    }

    /// Current value, `None` while unset or for unknown names
    pub fn lookup(&self, name: char) -> Option<&Value> {
        self.slots.get(&name)
    }

    pub fn is_set(&self, name: char) -> bool {
        self.slots.contains_key(&name)
    }

    /// Read a register, failing for unknown or unset names.
    pub fn get(&self, name: char) -> Result<&Value, MatxError> {
        if !self.set.contains(name) {
            return Err(MatxError::invalid_register(&name.to_string(), self.set.storable()));
        }
        self.slots.get(&name).ok_or_else(|| MatxError::empty_register(name))
    }

    /// Overwrite a storable register.
    pub fn store(&mut self, name: char, value: Value) -> Result<(), MatxError> {
        if !self.set.is_storable(name) {
            return Err(MatxError::invalid_register(&name.to_string(), self.set.storable()));
        }
        if let Value::Error(e) = value {
            return Err(MatxError::internal(format!("refusing to store an error in {}: {}", name, e)));
        }
        self.slots.insert(name, value);
        Ok(())
    }

    /// Resolve directive text such as `"b"` or `"C"` to a storable register.
    ///
    /// The identity register is never a target: it only ever holds the
    /// n×n identity written by [`RegisterStore::set_identity`].
    pub fn resolve_target(&self, candidate: &str) -> Result<char, MatxError> {
        let normalized: String = candidate
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        let mut chars = normalized.chars();
        match (chars.next(), chars.next()) {
            (Some(name), None) if self.set.is_storable(name) => Ok(name),
            _ => Err(MatxError::invalid_register(&normalized, self.set.storable())),
        }
    }

    /// Write an n×n identity matrix into the identity register.
    pub fn set_identity(&mut self, size: usize) -> Result<char, MatxError> {
        let name = self.set.identity().ok_or_else(|| {
            MatxError::new(crate::codes::INVALID_REGISTER, "this profile has no identity register")
        })?;
        let identity = Matrix::identity(size)?;
        self.slots.insert(name, Value::Matrix(identity));
        Ok(name)
    }

    /// All registers in configured order with their current contents
    pub fn iter(&self) -> impl Iterator<Item = (char, Option<&Value>)> + '_ {
        self.set.all().map(move |name| (name, self.slots.get(&name)))
    }
}

impl Default for RegisterStore {
    fn default() -> Self {
        Self::new(RegisterSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    #[test]
    fn test_profiles() {
        let full = RegisterProfile::Full.register_set();
        assert_eq!(full.storable(), &['A', 'B', 'C', 'D']);
        assert_eq!(full.identity(), Some('I'));
        assert!(full.contains('I'));
        assert!(!full.is_storable('I'));

        let basic: RegisterProfile = "Basic".parse().unwrap();
        let basic = basic.register_set();
        assert_eq!(basic.all().collect::<Vec<_>>(), vec!['A', 'B', 'C']);
        assert!(!basic.contains('D'));
        assert!("weird".parse::<RegisterProfile>().is_err());
    }

    #[test]
    fn test_register_set_validation() {
        assert!(RegisterSet::new(vec!['A', 'a'], None).is_err());
        assert!(RegisterSet::new(vec!['A', 'A'], None).is_err());
        assert!(RegisterSet::new(vec!['A'], Some('A')).is_err());
        assert!(RegisterSet::new(vec![], Some('I')).is_err());
        assert!(RegisterSet::new(vec!['X', 'Y'], Some('Z')).is_ok());
    }

    #[test]
    fn test_store_and_get() {
        let mut store = RegisterStore::default();
        assert!(!store.is_set('A'));
        assert!(store.get('A').unwrap_err().is(codes::EMPTY_REGISTER));

        store.store('A', Value::Number(3.0)).unwrap();
        assert_eq!(store.get('A').unwrap(), &Value::Number(3.0));
        assert!(store.is_set('A'));
    }

    #[test]
    fn test_unknown_names_rejected() {
        let mut store = RegisterStore::new(RegisterProfile::Basic.register_set());
        assert!(store.get('D').unwrap_err().is(codes::INVALID_REGISTER));
        assert!(store.store('D', Value::Number(1.0)).unwrap_err().is(codes::INVALID_REGISTER));
        assert!(store.lookup('D').is_none());
    }

    #[test]
    fn test_identity_register_not_storable() {
        let mut store = RegisterStore::default();
        let err = store.store('I', Value::Number(1.0)).unwrap_err();
        assert!(err.is(codes::INVALID_REGISTER));
        assert!(!store.is_set('I'));
    }

    #[test]
    fn test_set_identity() {
        let mut store = RegisterStore::default();
        assert_eq!(store.set_identity(3).unwrap(), 'I');
        let m = store.get('I').unwrap().as_matrix().unwrap();
        assert_eq!(m.shape(), (3, 3));

        let mut basic = RegisterStore::new(RegisterProfile::Basic.register_set());
        assert!(basic.set_identity(2).is_err());
    }

    #[test]
    fn test_oversized_identity_leaves_register_unset() {
        let mut store = RegisterStore::default();
        let err = store.set_identity(100_000).unwrap_err();
        assert!(err.is(codes::DIMENSION_ERROR));
        assert!(!store.is_set('I'));
    }

    #[test]
    fn test_resolve_target() {
        let store = RegisterStore::default();
        assert_eq!(store.resolve_target(" b "), Ok('B'));
        assert_eq!(store.resolve_target("D"), Ok('D'));
        assert!(store.resolve_target("Z").is_err());
        assert!(store.resolve_target("I").is_err());
        assert!(store.resolve_target("AB").is_err());
        assert!(store.resolve_target("").is_err());
    }

    #[test]
    fn test_store_rejects_error_values() {
        let mut store = RegisterStore::default();
        let err = store.store('A', Value::Error(MatxError::div_zero())).unwrap_err();
        assert!(err.is(codes::INTERNAL));
        assert!(!store.is_set('A'));
    }

    #[test]
    fn test_iter_in_configured_order() {
        let mut store = RegisterStore::default();
        store.store('C', Value::Number(1.0)).unwrap();
        let listed: Vec<(char, bool)> = store.iter().map(|(n, v)| (n, v.is_some())).collect();
        assert_eq!(
            listed,
            vec![('A', false), ('B', false), ('C', true), ('D', false), ('I', false)]
        );
    }

    #[test]
    fn test_register_set_deserialize_validates() {
        let ok: RegisterSet = serde_json::from_str(r#"{"names":["A","B"],"identity":"I"}"#).unwrap();
        assert_eq!(ok.identity(), Some('I'));
        let bad = serde_json::from_str::<RegisterSet>(r#"{"names":["A","A"]}"#);
        assert!(bad.is_err());
    }
}
