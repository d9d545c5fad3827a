use crate::error::RetrievalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cache key holding the whole collection
pub const TODOS_CACHE_KEY: &str = "todos";

/// Prefix for single-record cache keys, followed by the id as requested
pub const TODO_CACHE_KEY_PREFIX: &str = "todo:";

/// Lifetime of every cache entry written by the service
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// A todo as served by the upstream collection.
///
/// Field names on the wire follow the upstream (`userId`), and the same
/// encoding is used for cache payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// A todo id that has been checked to be an integer.
///
/// The original text is kept as-is: it is what goes into the cache key and
/// the upstream URL, so `007` and `7` are distinct keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoId(String);

impl TodoId {
    pub fn parse(raw: &str) -> Result<Self, RetrievalError> {
        raw.parse::<i64>()
            .map(|_| Self(raw.to_string()))
            .map_err(|_| RetrievalError::InvalidId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn cache_key(&self) -> String {
        format!("{}{}", TODO_CACHE_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub mod response {
    #[derive(Clone, Debug)]
    pub struct GetResponse<V> {
        pub found: bool,
        pub message: V,
    }

    impl<V> GetResponse<V> {
        pub fn new(found: bool, message: V) -> Self {
            Self { found, message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_todos() -> Vec<Todo> {
        vec![
            Todo {
                user_id: 1,
                id: 1,
                title: "delectus aut autem".to_string(),
                completed: false,
            },
            Todo {
                user_id: 1,
                id: 2,
                title: "quis ut nam facilis".to_string(),
                completed: true,
            },
            Todo {
                user_id: 2,
                id: 21,
                title: "".to_string(),
                completed: false,
            },
        ]
    }

    #[test]
    fn test_todo_wire_shape_uses_upstream_field_names() {
        let todo = &sample_todos()[0];
        let value = serde_json::to_value(todo).unwrap();

        assert_eq!(value["userId"], 1);
        assert_eq!(value["id"], 1);
        assert_eq!(value["title"], "delectus aut autem");
        assert_eq!(value["completed"], false);
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn test_todo_decodes_upstream_payload() {
        let body = r#"{"userId": 3, "id": 42, "title": "ut cupiditate", "completed": true}"#;
        let todo: Todo = serde_json::from_str(body).unwrap();

        assert_eq!(
            todo,
            Todo {
                user_id: 3,
                id: 42,
                title: "ut cupiditate".to_string(),
                completed: true,
            }
        );
    }

    #[test]
    fn test_collection_payload_preserves_order_and_fields() {
        let todos = sample_todos();
        let payload = serde_json::to_vec(&todos).unwrap();
        let decoded: Vec<Todo> = serde_json::from_slice(&payload).unwrap();

        assert_eq!(decoded, todos);
    }

    #[test]
    fn test_todo_id_keeps_original_text_in_cache_key() {
        assert_eq!(TodoId::parse("5").unwrap().cache_key(), "todo:5");
        assert_eq!(TodoId::parse("007").unwrap().cache_key(), "todo:007");
        assert_eq!(TodoId::parse("-3").unwrap().as_str(), "-3");
    }

    #[test]
    fn test_todo_id_rejects_non_integers() {
        for raw in ["abc", "", "1.5", "12a", " 7", "99999999999999999999"] {
            let err = TodoId::parse(raw).unwrap_err();
            assert!(
                matches!(err, RetrievalError::InvalidId(ref id) if id == raw),
                "expected InvalidId for {:?}",
                raw
            );
        }
    }
}
