//! Policy evaluation engine.

use crate::decision::PolicyDecision;
use crate::error::Result;
use crate::parser::{self, PolicyFormat};
use crate::policy::{default_policies, PolicyRule, PolicyStore};
use crate::types::{ResourceAttributes, UserAttributes};
use std::path::PathBuf;
use tracing::{debug, info, trace, warn};

/// A source of rules applied while building a [`PolicyEvaluator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    /// Literal rules.
    Rules(Vec<PolicyRule>),
    /// The built-in default rules.
    Defaults,
    /// A policy document on disk.
    File(PathBuf),
    /// An in-memory policy document.
    Document { content: String, format: PolicyFormat },
}

impl PolicySource {
    fn kind(&self) -> &'static str {
        match self {
            PolicySource::Rules(_) => "rules",
            PolicySource::Defaults => "defaults",
            PolicySource::File(_) => "file",
            PolicySource::Document { .. } => "document",
        }
    }

    fn load(self) -> Result<Vec<PolicyRule>> {
        match self {
            PolicySource::Rules(rules) => Ok(rules),
            PolicySource::Defaults => Ok(default_policies()),
            PolicySource::File(path) => parser::load_rules_from_file(&path).map_err(|e| {
                warn!(path = %path.display(), error = %e, "failed to load policies file");
                e
            }),
            PolicySource::Document { content, format } => {
                parser::parse_rules_with_format(&content, format)
            }
        }
    }
}

/// Builder for a [`PolicyEvaluator`].
///
/// Sources are applied in the order they were added; rules from later
/// sources are appended after earlier ones.
#[derive(Debug, Clone, Default)]
pub struct PolicyEvaluatorBuilder {
    sources: Vec<PolicySource>,
}

impl PolicyEvaluatorBuilder {
    /// Creates a builder with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends literal rules.
    pub fn with_policies(mut self, rules: impl IntoIterator<Item = PolicyRule>) -> Self {
        self.sources
            .push(PolicySource::Rules(rules.into_iter().collect()));
        self
    }

    /// Appends the built-in default rules.
    pub fn with_default_policies(mut self) -> Self {
        self.sources.push(PolicySource::Defaults);
        self
    }

    /// Appends rules loaded from a policy file when the evaluator is built.
    pub fn with_policies_from_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(PolicySource::File(path.into()));
        self
    }

    /// Appends rules parsed from an in-memory document when the evaluator is
    /// built.
    pub fn with_policies_from_str(mut self, content: impl Into<String>, format: PolicyFormat) -> Self {
        self.sources.push(PolicySource::Document {
            content: content.into(),
            format,
        });
        self
    }

    /// Appends an arbitrary source.
    pub fn with_source(mut self, source: PolicySource) -> Self {
        self.sources.push(source);
        self
    }

    /// Returns the sources added so far.
    pub fn sources(&self) -> &[PolicySource] {
        &self.sources
    }

    /// Applies every source in order and builds the evaluator.
    ///
    /// Fails on the first source that cannot be loaded; no evaluator is
    /// produced from a partial rule set.
    pub fn build(self) -> Result<PolicyEvaluator> {
        let mut rules = Vec::new();

        for source in self.sources {
            let kind = source.kind();
            let loaded = source.load()?;
            debug!(source = kind, rules = loaded.len(), "applied policy source");
            rules.extend(loaded);
        }

        let evaluator = PolicyEvaluator::new(rules);
        info!(
            rules = evaluator.store.len(),
            fingerprint = %evaluator.store.fingerprint(),
            "policy store built"
        );
        Ok(evaluator)
    }
}

/// The policy evaluator.
///
/// Holds an immutable [`PolicyStore`]. Evaluation only reads the store, so a
/// single evaluator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct PolicyEvaluator {
    store: PolicyStore,
}

impl PolicyEvaluator {
    /// Creates an evaluator from a literal list of rules.
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self {
            store: PolicyStore::new(rules),
        }
    }

    /// Starts building an evaluator from ordered sources.
    pub fn builder() -> PolicyEvaluatorBuilder {
        PolicyEvaluatorBuilder::new()
    }

    /// Returns the rule store.
    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    /// Checks if any rule allows the request.
    ///
    /// Returns `false` when the store is empty or no rule matches.
    pub fn evaluate(&self, user: &UserAttributes, resource: &ResourceAttributes) -> bool {
        self.store.iter().any(|rule| rule.matches(user, resource))
    }

    /// Evaluates the request and reports which rule allowed it.
    pub fn decide(&self, user: &UserAttributes, resource: &ResourceAttributes) -> PolicyDecision {
        match self.store.first_match(user, resource) {
            Some((index, _)) => {
                trace!(user = %user.user_id, resource = %resource.resource, rule = index, "request allowed");
                PolicyDecision::allow(index)
            }
            None => {
                trace!(user = %user.user_id, resource = %resource.resource, "request denied");
                PolicyDecision::default_deny()
            }
        }
    }
}

impl From<PolicyStore> for PolicyEvaluator {
    fn from(store: PolicyStore) -> Self {
        Self { store }
    }
}
