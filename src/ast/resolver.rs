use crate::ast::Value;
use crate::error::{EvalError, Result};
use crate::functions::FunctionNamespace;
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;

/// Variable bindings for a single evaluation call.
pub type Bindings = HashMap<String, Value>;

/// Identifiers starting with this prefix are implementation-internal.
pub const RESERVED_PREFIX: &str = "_";

/// Where identifiers missing from the bindings may be looked up.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ResolutionPolicy {
    /// Bindings, then the function namespace.
    #[default]
    WithNamespace,
    /// Bindings only.
    VariablesOnly,
}

impl ResolutionPolicy {
    pub fn from_flag(allow_function_namespace: bool) -> Self {
        if allow_function_namespace {
            ResolutionPolicy::WithNamespace
        } else {
            ResolutionPolicy::VariablesOnly
        }
    }
}

/// Resolves identifiers against a binding set and, depending on the policy,
/// a trusted function namespace.
#[derive(Debug, Clone)]
pub struct NameResolver {
    policy: ResolutionPolicy,
    namespace: Arc<FunctionNamespace>,
}

impl NameResolver {
    pub fn new(policy: ResolutionPolicy, namespace: Arc<FunctionNamespace>) -> Self {
        Self { policy, namespace }
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    pub fn namespace(&self) -> &FunctionNamespace {
        &self.namespace
    }

    pub fn resolve(&self, name: &str, bindings: &Bindings) -> Result<Value> {
        if let Some(value) = bindings.get(name) {
            trace!("Resolved '{}' from bindings", name);
            return Ok(value.clone());
        }

        match self.policy {
            ResolutionPolicy::WithNamespace => {
                if let Some(value) = self.namespace.lookup(name) {
                    trace!("Resolved '{}' from namespace", name);
                    return Ok(value);
                }
                Err(EvalError::NameNotFound(name.to_string()))
            }
            ResolutionPolicy::VariablesOnly if name.starts_with(RESERVED_PREFIX) => {
                Err(EvalError::ReservedName(name.to_string()))
            }
            ResolutionPolicy::VariablesOnly => Err(EvalError::NameNotFound(name.to_string())),
        }
    }
}
