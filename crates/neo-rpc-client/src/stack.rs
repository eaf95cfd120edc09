//! Invocation results and VM stack items

use serde::{Deserialize, Serialize};

/// VM state reported after a successful test invocation
pub const VM_STATE_HALT: &str = "HALT";

/// Result of `invokefunction`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResult {
    #[serde(default)]
    pub script: String,
    pub state: String,
    #[serde(default)]
    pub gasconsumed: String,
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub stack: Vec<StackItem>,
}

impl InvokeResult {
    pub fn is_halt(&self) -> bool {
        self.state == VM_STATE_HALT
    }
}

/// A VM stack item, kept loosely typed so unexpected shapes can be reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl StackItem {
    /// Integer value as a decimal string
    pub fn as_integer(&self) -> Option<String> {
        if self.item_type != "Integer" {
            return None;
        }
        match &self.value {
            serde_json::Value::String(s) if is_integer_literal(s) => Some(s.clone()),
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            _ => None,
        }
    }

    /// Child items of an `Array` or `Struct`
    pub fn as_array(&self) -> Option<Vec<StackItem>> {
        if self.item_type != "Array" && self.item_type != "Struct" {
            return None;
        }
        serde_json::from_value(self.value.clone()).ok()
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reserves_result() {
        let raw = serde_json::json!({
            "script": "DBQ=",
            "state": "HALT",
            "gasconsumed": "1234567",
            "exception": null,
            "stack": [{
                "type": "Array",
                "value": [
                    {"type": "Integer", "value": "1500000000000"},
                    {"type": "Integer", "value": "42000000000"}
                ]
            }]
        });
        let result: InvokeResult = serde_json::from_value(raw).unwrap();
        assert!(result.is_halt());

        let pair = result.stack[0].as_array().unwrap();
        assert_eq!(pair[0].as_integer().as_deref(), Some("1500000000000"));
        assert_eq!(pair[1].as_integer().as_deref(), Some("42000000000"));
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let item = StackItem {
            item_type: "ByteString".to_string(),
            value: serde_json::json!("AQID"),
        };
        assert!(item.as_integer().is_none());
        assert!(item.as_array().is_none());

        let bogus = StackItem {
            item_type: "Integer".to_string(),
            value: serde_json::json!("12a"),
        };
        assert!(bogus.as_integer().is_none());
    }

    #[test]
    fn test_fault_state() {
        let raw = serde_json::json!({
            "state": "FAULT",
            "exception": "Pair not found",
            "stack": []
        });
        let result: InvokeResult = serde_json::from_value(raw).unwrap();
        assert!(!result.is_halt());
        assert_eq!(result.exception.as_deref(), Some("Pair not found"));
    }
}
