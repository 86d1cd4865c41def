//! WASM bindings for the policy evaluator.

#![cfg(feature = "wasm")]

use crate::evaluator::PolicyEvaluator;
use crate::parser::PolicyFormat;
use crate::types::{ResourceAttributes, UserAttributes};
use wasm_bindgen::prelude::*;

/// WASM-compatible policy evaluator wrapper.
#[wasm_bindgen]
pub struct WasmPolicyEngine {
    evaluator: PolicyEvaluator,
}

#[wasm_bindgen]
impl WasmPolicyEngine {
    /// Creates an engine from a JSON rule document, optionally preceded by
    /// the default rules.
    #[wasm_bindgen(constructor)]
    pub fn new(policies_json: &str, with_defaults: bool) -> Result<WasmPolicyEngine, JsValue> {
        let mut builder = PolicyEvaluator::builder();
        if with_defaults {
            builder = builder.with_default_policies();
        }
        let evaluator = builder
            .with_policies_from_str(policies_json, PolicyFormat::Json)
            .build()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { evaluator })
    }

    /// Evaluates a request given user and resource attributes as JSON.
    #[wasm_bindgen]
    pub fn evaluate(&self, user_json: &str, resource_json: &str) -> Result<bool, JsValue> {
        let user: UserAttributes = serde_json::from_str(user_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid user attributes: {}", e)))?;
        let resource: ResourceAttributes = serde_json::from_str(resource_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid resource attributes: {}", e)))?;

        Ok(self.evaluator.evaluate(&user, &resource))
    }

    /// Evaluates a request and returns the decision as a JSON string.
    #[wasm_bindgen]
    pub fn decide(&self, user_json: &str, resource_json: &str) -> Result<String, JsValue> {
        let user: UserAttributes = serde_json::from_str(user_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid user attributes: {}", e)))?;
        let resource: ResourceAttributes = serde_json::from_str(resource_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid resource attributes: {}", e)))?;

        serde_json::to_string(&self.evaluator.decide(&user, &resource))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns the number of loaded rules.
    #[wasm_bindgen]
    pub fn policy_count(&self) -> usize {
        self.evaluator.store().len()
    }

    /// Returns the fingerprint of the loaded rules.
    #[wasm_bindgen]
    pub fn fingerprint(&self) -> String {
        self.evaluator.store().fingerprint()
    }
}

/// Returns the version of the policy evaluator.
#[wasm_bindgen]
pub fn version() -> String {
    crate::VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_engine() {
        let engine = WasmPolicyEngine::new(r#"[{"group": "ops"}]"#, true).unwrap();
        assert_eq!(engine.policy_count(), 3);

        let allowed = engine
            .evaluate(
                r#"{"userID": "u1", "groupID": "ops", "roles": []}"#,
                r#"{"resource": "deploys", "namespace": "prod", "readOnly": false}"#,
            )
            .unwrap();
        assert!(allowed);
    }
}
