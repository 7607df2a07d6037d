use super::{Number, TreeNode};
use serde::ser::{SerializeMap, SerializeSeq};

impl TreeNode {
    /// Parses JSON text into a tree. Object key order is preserved.
    pub fn parse(text: &str) -> crate::Result<TreeNode> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(TreeNode::from(value))
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<serde_json::Value> for TreeNode {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => TreeNode::Null,
            Json::Bool(v) => TreeNode::Bool(v),
            Json::Number(n) => {
                if let Some(v) = n.as_i64() {
                    TreeNode::Number(Number::I64(v))
                } else if let Some(v) = n.as_u64() {
                    TreeNode::Number(Number::U64(v))
                } else {
                    TreeNode::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Json::String(v) => TreeNode::String(v),
            Json::Array(items) => TreeNode::List(items.into_iter().map(TreeNode::from).collect()),
            Json::Object(map) => TreeNode::Map(
                map.into_iter()
                    .map(|(k, v)| (k, TreeNode::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<TreeNode> for serde_json::Value {
    fn from(node: TreeNode) -> Self {
        use serde_json::Value as Json;

        match node {
            TreeNode::Null => Json::Null,
            TreeNode::Bool(v) => Json::Bool(v),
            TreeNode::Number(Number::I64(v)) => Json::from(v),
            TreeNode::Number(Number::U64(v)) => Json::from(v),
            // Non-finite floats have no JSON representation.
            TreeNode::Number(Number::F64(v)) => serde_json::Number::from_f64(v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            TreeNode::String(v) => Json::String(v),
            TreeNode::List(items) => Json::Array(items.into_iter().map(Json::from).collect()),
            TreeNode::Map(map) => Json::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Json::from(v)))
                    .collect(),
            ),
        }
    }
}

impl serde::Serialize for TreeNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeNode::Null => serializer.serialize_unit(),
            TreeNode::Bool(v) => serializer.serialize_bool(*v),
            TreeNode::Number(Number::I64(v)) => serializer.serialize_i64(*v),
            TreeNode::Number(Number::U64(v)) => serializer.serialize_u64(*v),
            TreeNode::Number(Number::F64(v)) if v.is_finite() => serializer.serialize_f64(*v),
            TreeNode::Number(Number::F64(_)) => serializer.serialize_unit(),
            TreeNode::String(v) => serializer.serialize_str(v),
            TreeNode::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TreeNode::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> serde::Deserialize<'de> for TreeNode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <serde_json::Value as serde::Deserialize>::deserialize(deserializer).map(TreeNode::from)
    }
}

impl core::fmt::Display for TreeNode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| core::fmt::Error)?;
        f.write_str(&text)
    }
}

impl core::str::FromStr for TreeNode {
    type Err = crate::Error;

    fn from_str(text: &str) -> crate::Result<TreeNode> {
        TreeNode::parse(text)
    }
}
