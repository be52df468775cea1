//! Appwrite query encoding
//!
//! Appwrite 1.5+ takes each query as a JSON object passed in a repeated
//! `queries[]` parameter, e.g.
//! `{"method":"equal","attribute":"creator","values":["johndoe"]}`.

use bridge_traits::Query;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct WireQuery<'a> {
    method: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<&'a str>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<Value>,
}

impl<'a> From<&'a Query> for WireQuery<'a> {
    fn from(query: &'a Query) -> Self {
        match query {
            Query::Equal { attribute, values } => WireQuery {
                method: "equal",
                attribute: Some(attribute.as_str()),
                values: values.clone(),
            },
            Query::Search { attribute, value } => WireQuery {
                method: "search",
                attribute: Some(attribute.as_str()),
                values: vec![Value::String(value.clone())],
            },
            Query::OrderAsc(attribute) => WireQuery {
                method: "orderAsc",
                attribute: Some(attribute.as_str()),
                values: Vec::new(),
            },
            Query::OrderDesc(attribute) => WireQuery {
                method: "orderDesc",
                attribute: Some(attribute.as_str()),
                values: Vec::new(),
            },
            Query::Limit(limit) => WireQuery {
                method: "limit",
                attribute: None,
                values: vec![Value::from(*limit)],
            },
        }
    }
}

/// Serialize a single query to its JSON wire form.
pub fn encode_query(query: &Query) -> String {
    // Strings, numbers and arrays of them always serialize.
    serde_json::to_string(&WireQuery::from(query)).unwrap_or_default()
}

/// Build the query string (without leading `?`) for a list request.
pub fn query_string(queries: &[Query]) -> String {
    queries
        .iter()
        .map(|query| format!("queries[]={}", urlencoding::encode(&encode_query(query))))
        .collect::<Vec<_>>()
        .join("&")
}
