//! Policy rule definition and the immutable rule store.

use crate::error::Result;
use crate::hash;
use crate::matcher::{matches_any, matches_value, WILDCARD};
use crate::types::{ResourceAttributes, UserAttributes};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single declarative allow rule.
///
/// Every string field is a pattern: `"*"` or the empty string matches any
/// value, anything else must match exactly. `read_only` has no wildcard.
///
/// Document keys are matched case-insensitively (`"Role"`, `"readOnly"` and
/// `"NONRESOURCEPATH"` all name a field), the last occurrence of a repeated
/// key wins, `null` leaves a field untouched and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PolicyRule {
    /// Role of the user making the request.
    pub role: String,

    /// User-id this rule applies to.
    pub user: String,

    /// Group-id this rule applies to.
    pub group: String,

    /// Name of a resource.
    pub resource: String,

    /// Name of a namespace.
    pub namespace: String,

    /// Matches read-only requests when true, write requests when false.
    #[serde(rename = "readonly")]
    pub read_only: bool,

    /// Non-resource request path.
    ///
    /// Compared against the request's resource name. Only exact equality and
    /// the wildcard are honored; `"/foo/*"` does not match subpaths of
    /// `/foo`.
    #[serde(rename = "nonResourcePath")]
    pub non_resource_path: String,
}

/// A rule field as named in policy documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleField {
    Role,
    User,
    Group,
    Resource,
    Namespace,
    ReadOnly,
    NonResourcePath,
}

impl RuleField {
    const NAMES: [(&'static str, RuleField); 7] = [
        ("role", RuleField::Role),
        ("user", RuleField::User),
        ("group", RuleField::Group),
        ("resource", RuleField::Resource),
        ("namespace", RuleField::Namespace),
        ("readonly", RuleField::ReadOnly),
        ("nonResourcePath", RuleField::NonResourcePath),
    ];

    fn from_key(key: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, field)| *field)
    }
}

struct PolicyRuleVisitor;

impl<'de> Visitor<'de> for PolicyRuleVisitor {
    type Value = PolicyRule;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a policy rule object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<PolicyRule, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut rule = PolicyRule::default();

        while let Some(key) = map.next_key::<String>()? {
            let target = match RuleField::from_key(&key) {
                Some(RuleField::ReadOnly) => {
                    if let Some(read_only) = map.next_value::<Option<bool>>()? {
                        rule.read_only = read_only;
                    }
                    continue;
                }
                Some(RuleField::Role) => &mut rule.role,
                Some(RuleField::User) => &mut rule.user,
                Some(RuleField::Group) => &mut rule.group,
                Some(RuleField::Resource) => &mut rule.resource,
                Some(RuleField::Namespace) => &mut rule.namespace,
                Some(RuleField::NonResourcePath) => &mut rule.non_resource_path,
                None => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            if let Some(value) = map.next_value::<Option<String>>()? {
                *target = value;
            }
        }

        Ok(rule)
    }
}

impl<'de> Deserialize<'de> for PolicyRule {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PolicyRuleVisitor)
    }
}

impl PolicyRule {
    /// Creates a rule with every pattern empty (wildcard) that matches write
    /// requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the role pattern.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the user pattern.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the group pattern.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets the resource pattern.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Sets the namespace pattern.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the non-resource path pattern.
    pub fn with_non_resource_path(mut self, path: impl Into<String>) -> Self {
        self.non_resource_path = path.into();
        self
    }

    /// Sets the read-only flag.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Checks whether this rule matches the request.
    ///
    /// All seven field checks must hold. The non-resource path pattern is
    /// compared against the resource name.
    pub fn matches(&self, user: &UserAttributes, resource: &ResourceAttributes) -> bool {
        self.read_only == resource.read_only
            && matches_any(&self.role, &user.roles)
            && matches_value(&self.user, &user.user_id)
            && matches_value(&self.group, &user.group_id)
            && matches_value(&self.resource, &resource.resource)
            && matches_value(&self.namespace, &resource.namespace)
            && matches_value(&self.non_resource_path, &resource.resource)
    }

    fn wildcard(role: &str, read_only: bool) -> Self {
        Self {
            role: role.to_string(),
            user: WILDCARD.to_string(),
            group: WILDCARD.to_string(),
            resource: WILDCARD.to_string(),
            namespace: WILDCARD.to_string(),
            read_only,
            non_resource_path: WILDCARD.to_string(),
        }
    }
}

/// Returns the built-in default rules.
///
/// 1. Anyone may perform read-only requests.
/// 2. Role `admin` may perform any write request.
pub fn default_policies() -> Vec<PolicyRule> {
    vec![
        PolicyRule::wildcard(WILDCARD, true),
        PolicyRule::wildcard("admin", false),
    ]
}

/// An ordered, immutable collection of policy rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyStore {
    rules: Vec<PolicyRule>,
}

impl PolicyStore {
    /// Creates a store holding `rules` in the given order.
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in store order.
    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    /// Iterates over the rules in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, PolicyRule> {
        self.rules.iter()
    }

    /// Number of rules in the store.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the store holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the index and rule of the first rule matching the request.
    pub fn first_match(
        &self,
        user: &UserAttributes,
        resource: &ResourceAttributes,
    ) -> Option<(usize, &PolicyRule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(user, resource))
    }

    /// Serializes the rules as a JSON array in the external document format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rules)?)
    }

    /// Computes a fingerprint identifying this exact rule list.
    pub fn fingerprint(&self) -> String {
        hash::compute_fingerprint(&self.rules)
    }
}

impl From<Vec<PolicyRule>> for PolicyStore {
    fn from(rules: Vec<PolicyRule>) -> Self {
        Self::new(rules)
    }
}

impl<'a> IntoIterator for &'a PolicyStore {
    type Item = &'a PolicyRule;
    type IntoIter = std::slice::Iter<'a, PolicyRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
