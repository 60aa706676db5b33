//! Request payload builders.
//!
//! Builders never validate values. Tests need to send payloads the service
//! must reject, so a tag list can just as well be a bare string.

use serde_json::{json, Map, Value};

/// Fields the modification endpoint accepts
pub const MODIFIABLE_FIELDS: [&str; 6] = ["title", "tags", "date", "done", "id", "username"];

/// Body for `POST /users` and `POST /authenticate`
#[must_use]
pub fn auth_params(username: &str, password: &str) -> Value {
    json!({ "username": username, "password": password })
}

/// Body for `PUT /`; `tags` is left out when empty
#[must_use]
pub fn task_creation_params<T: AsRef<str>>(title: &str, tags: &[T]) -> Value {
    let mut params = Map::new();
    let _ = params.insert("title".into(), Value::from(title));
    if !tags.is_empty() {
        let tags = tags.iter().map(|t| Value::from(t.as_ref())).collect();
        let _ = params.insert("tags".into(), Value::Array(tags));
    }
    Value::Object(params)
}

/// Body for `PATCH /{id}`, keeping only [`MODIFIABLE_FIELDS`]
#[must_use]
pub fn task_modification_params<I, K>(fields: I) -> Value
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let params: Map<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k.into(), v))
        .filter(|(k, _)| MODIFIABLE_FIELDS.contains(&k.as_str()))
        .collect();
    Value::Object(params)
}
