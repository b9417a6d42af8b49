//! 宽松的反序列化辅助函数
//!
//! 服务端对 ID、价格、数量等字段时而返回字符串、时而返回数字，
//! 这里统一归一化为 `String`。

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::UInt(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

/// 接受 JSON 字符串或数字，统一转换为 `String`
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

/// 缺失或 `null` 的文本字段按空字符串处理
pub fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
    }

    #[test]
    fn test_normalizes_ids() {
        let rows: Vec<Row> = serde_json::from_value(json!([
            { "id": "abc" },
            { "id": 7 },
            { "id": -3 },
        ]))
        .unwrap();
        let ids: Vec<_> = rows.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["abc", "7", "-3"]);
    }

    #[test]
    fn test_rejects_non_scalar_id() {
        let result = serde_json::from_value::<Row>(json!({ "id": { "nested": true } }));
        assert!(result.is_err());
    }
}
