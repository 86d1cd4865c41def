//! Policy decision types.

use serde::{Deserialize, Serialize};

/// The final decision from policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Deny,
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// A policy decision with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    /// The final decision.
    pub decision: Decision,

    /// Reason for the decision.
    pub reason: String,

    /// Store index of the first matching rule (if any).
    pub rule_index: Option<usize>,

    /// Whether this is a default decision (no matching rules).
    pub is_default: bool,
}

impl PolicyDecision {
    /// Creates an allow decision for the rule at `rule_index`.
    pub fn allow(rule_index: usize) -> Self {
        Self {
            decision: Decision::Allow,
            reason: format!("Rule #{} matched", rule_index),
            rule_index: Some(rule_index),
            is_default: false,
        }
    }

    /// Creates a default deny decision.
    pub fn default_deny() -> Self {
        Self {
            decision: Decision::Deny,
            reason: "No matching rules - default deny".to_string(),
            rule_index: None,
            is_default: true,
        }
    }

    /// Returns true if the decision is allow.
    pub fn is_allowed(&self) -> bool {
        matches!(self.decision, Decision::Allow)
    }

    /// Returns true if the decision is deny.
    pub fn is_denied(&self) -> bool {
        matches!(self.decision, Decision::Deny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_decision() {
        let decision = PolicyDecision::allow(3);
        assert!(decision.is_allowed());
        assert!(!decision.is_denied());
        assert_eq!(decision.rule_index, Some(3));
        assert!(!decision.is_default);
    }

    #[test]
    fn test_default_deny() {
        let deny = PolicyDecision::default_deny();
        assert!(deny.is_denied());
        assert!(deny.is_default);
        assert_eq!(deny.rule_index, None);
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(Decision::from(true), Decision::Allow);
        assert_eq!(Decision::from(false), Decision::Deny);
        assert_eq!(serde_json::to_string(&Decision::Deny).unwrap(), r#""deny""#);
    }
}
