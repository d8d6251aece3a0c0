//! Pagination and response-shape normalization

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PingeraError, PingeraResult};

/// Upper bound on a page size accepted by the API
pub const MAX_PAGE_SIZE: u32 = 100;

/// Decode-time schema checks beyond what serde enforces
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Models that carry the fields they do not know about
///
/// Explicit `null`s in a payload land here when the matching typed field
/// would otherwise drop them, so re-serializing reproduces the payload.
pub trait ExtraFields {
    fn extra_mut(&mut self) -> &mut Map<String, Value>;
}

/// Require a non-empty string field
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("field `{}` must not be empty", field))
    } else {
        Ok(())
    }
}

/// Page request: 1-based page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

impl PageRequest {
    /// Build a validated request. Zero values are rejected; oversize pages are clamped.
    pub fn new(page: u32, per_page: u32) -> PingeraResult<Self> {
        if page == 0 {
            return Err(PingeraError::InvalidRequest(
                "page must be a positive integer".to_string(),
            ));
        }
        if per_page == 0 {
            return Err(PingeraError::InvalidRequest(
                "per_page must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            page,
            per_page: per_page.min(MAX_PAGE_SIZE),
        })
    }

    fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }
}

/// One page of a collection plus its pagination metadata
///
/// Invariant: `items.len() <= per_page`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: request.page,
            per_page: request.per_page,
        }
    }

    /// Re-key the collection for output, e.g. `{"pages": [...], "total": ..}`
    pub fn to_json(&self, key: &str) -> Value
    where
        T: Serialize,
    {
        let items = serde_json::to_value(&self.items).unwrap_or(Value::Null);
        serde_json::json!({
            key: items,
            "total": self.total,
            "page": self.page,
            "per_page": self.per_page,
        })
    }
}

/// A keyed collection: usually an array, sometimes a lone object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Items {
    Many(Vec<Value>),
    One(Map<String, Value>),
}

impl Items {
    fn into_vec(self) -> Vec<Value> {
        match self {
            Items::Many(values) => values,
            Items::One(object) => vec![Value::Object(object)],
        }
    }
}

/// Accepted list payload shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<Value>),
    Keyed {
        #[serde(
            alias = "pages",
            alias = "checks",
            alias = "heartbeats",
            alias = "results",
            alias = "components",
            alias = "incidents",
            alias = "jobs",
            alias = "logs",
            alias = "data"
        )]
        items: Items,
        total: Option<u64>,
        page: Option<u32>,
        #[serde(alias = "page_size")]
        per_page: Option<u32>,
    },
    /// A single entity where a list was expected
    Single(Map<String, Value>),
}

impl ListBody {
    fn parse(body: &[u8]) -> PingeraResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| PingeraError::InvalidResponse(format!("Failed to parse list: {}", e)))
    }
}

/// Decode a list payload into a validated page of `T`
///
/// Bare arrays (and lone objects) are treated as the whole collection and
/// sliced to the requested page. Keyed payloads are trusted for their
/// metadata but must not hold more items than the page size.
pub(crate) fn decode_list<T>(body: &[u8], request: PageRequest) -> PingeraResult<Paginated<T>>
where
    T: DeserializeOwned + Validate + ExtraFields,
{
    match ListBody::parse(body)? {
        ListBody::Bare(values) => slice_locally(values, request),
        ListBody::Single(object) => slice_locally(vec![Value::Object(object)], request),
        ListBody::Keyed {
            items,
            total,
            page,
            per_page,
        } => {
            let items = items.into_vec();
            let per_page = per_page.filter(|n| *n > 0).unwrap_or(request.per_page);
            if items.len() > per_page as usize {
                return Err(PingeraError::InvalidResponse(format!(
                    "received {} items for a page size of {}",
                    items.len(),
                    per_page
                )));
            }
            let page = page.filter(|n| *n > 0).unwrap_or(request.page);
            let items = items
                .into_iter()
                .map(decode_value)
                .collect::<PingeraResult<Vec<T>>>()?;
            let seen = (page as u64 - 1) * per_page as u64 + items.len() as u64;
            Ok(Paginated {
                total: total.unwrap_or(seen).max(seen),
                items,
                page,
                per_page,
            })
        }
    }
}

fn slice_locally<T>(values: Vec<Value>, request: PageRequest) -> PingeraResult<Paginated<T>>
where
    T: DeserializeOwned + Validate + ExtraFields,
{
    let total = values.len() as u64;
    let items = values
        .into_iter()
        .skip(request.offset())
        .take(request.per_page as usize)
        .map(decode_value)
        .collect::<PingeraResult<Vec<T>>>()?;
    Ok(Paginated {
        items,
        total,
        page: request.page,
        per_page: request.per_page,
    })
}

/// Decode an unpaged collection, bare or keyed
pub(crate) fn decode_all<T>(body: &[u8]) -> PingeraResult<Vec<T>>
where
    T: DeserializeOwned + Validate + ExtraFields,
{
    let values = match ListBody::parse(body)? {
        ListBody::Bare(values) => values,
        ListBody::Keyed { items, .. } => items.into_vec(),
        ListBody::Single(object) => vec![Value::Object(object)],
    };
    values.into_iter().map(decode_value).collect()
}

/// Decode a single entity, unwrapping a `{"data": {...}}` wrapper if present
pub(crate) fn decode_entity<T>(body: &[u8]) -> PingeraResult<T>
where
    T: DeserializeOwned + Validate + ExtraFields,
{
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PingeraError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
    let value = match value {
        Value::Object(mut obj) if is_data_wrapper(&obj) => obj
            .remove("data")
            .unwrap_or(Value::Null),
        other => other,
    };
    decode_value(value)
}

fn is_data_wrapper(obj: &Map<String, Value>) -> bool {
    matches!(obj.get("data"), Some(Value::Object(_))) && !obj.contains_key("id")
}

fn decode_value<T>(value: Value) -> PingeraResult<T>
where
    T: DeserializeOwned + Validate + ExtraFields,
{
    let nulls: Vec<String> = match &value {
        Value::Object(object) => object
            .iter()
            .filter(|(_, v)| v.is_null())
            .map(|(k, _)| k.clone())
            .collect(),
        _ => Vec::new(),
    };
    let mut entity: T = serde_json::from_value(value)
        .map_err(|e| PingeraError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
    entity.validate().map_err(PingeraError::InvalidResponse)?;

    // Typed `Option` fields swallow explicit nulls
    let extra = entity.extra_mut();
    for key in nulls {
        extra.entry(key).or_insert(Value::Null);
    }
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Item {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    }

    impl Item {
        fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                label: None,
                extra: Map::new(),
            }
        }
    }

    impl Validate for Item {
        fn validate(&self) -> Result<(), String> {
            require_non_empty("id", &self.id)
        }
    }

    impl ExtraFields for Item {
        fn extra_mut(&mut self) -> &mut Map<String, Value> {
            &mut self.extra
        }
    }

    fn items(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({"id": format!("item-{i}")})).collect()
    }

    fn bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_page_request_rejects_zero() {
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
    }

    #[test]
    fn test_page_request_clamps_page_size() {
        let request = PageRequest::new(2, 500).unwrap();
        assert_eq!(request.per_page, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_bare_array_is_sliced_to_requested_page() {
        let request = PageRequest::new(2, 10).unwrap();
        let list: Paginated<Item> = decode_list(&bytes(json!(items(25))), request).unwrap();

        assert_eq!(list.items.len(), 10);
        assert_eq!(list.items[0].id, "item-10");
        assert_eq!(list.total, 25);
        assert_eq!(list.page, 2);
        assert_eq!(list.per_page, 10);
    }

    #[test]
    fn test_bare_array_last_page_is_partial() {
        let request = PageRequest::new(3, 10).unwrap();
        let list: Paginated<Item> = decode_list(&bytes(json!(items(25))), request).unwrap();
        assert_eq!(list.items.len(), 5);
    }

    #[test]
    fn test_length_never_exceeds_page_size() {
        for per_page in 1..=12u32 {
            for page in 1..=4u32 {
                let request = PageRequest::new(page, per_page).unwrap();
                let list: Paginated<Item> =
                    decode_list(&bytes(json!(items(30))), request).unwrap();
                assert!(list.items.len() <= list.per_page as usize);
                let covered = list.page as u64 * list.per_page as u64;
                let start = (list.page as u64 - 1) * list.per_page as u64;
                assert!(start + list.items.len() as u64 <= covered);
                assert!(start + list.items.len() as u64 <= list.total);
            }
        }
    }

    #[test]
    fn test_keyed_payload_uses_remote_metadata() {
        let body = json!({"pages": items(3), "total": 43, "page": 5, "per_page": 10});
        let list: Paginated<Item> =
            decode_list(&bytes(body), PageRequest::default()).unwrap();
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.total, 43);
        assert_eq!(list.page, 5);
        assert_eq!(list.per_page, 10);
    }

    #[test]
    fn test_data_key_and_page_size_alias() {
        let body = json!({"data": items(2), "page_size": 2});
        let list: Paginated<Item> =
            decode_list(&bytes(body), PageRequest::default()).unwrap();
        assert_eq!(list.per_page, 2);
        assert_eq!(list.total, 2);
    }

    #[test]
    fn test_keyed_payload_larger_than_page_is_rejected() {
        let body = json!({"pages": items(11), "per_page": 10});
        let err = decode_list::<Item>(&bytes(body), PageRequest::default()).unwrap_err();
        assert!(matches!(err, PingeraError::InvalidResponse(_)));
    }

    #[test]
    fn test_invalid_item_fails_whole_list() {
        let body = json!([{"id": "ok"}, {"id": ""}]);
        let err = decode_list::<Item>(&bytes(body), PageRequest::default()).unwrap_err();
        assert!(matches!(err, PingeraError::InvalidResponse(_)));
    }

    #[test]
    fn test_decode_all_keeps_everything() {
        let all: Vec<Item> = decode_all(&bytes(json!({"components": items(150)}))).unwrap();
        assert_eq!(all.len(), 150);
        let all: Vec<Item> = decode_all(&bytes(json!(items(3)))).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_decode_entity_unwraps_data() {
        let item: Item = decode_entity(&bytes(json!({"data": {"id": "abc"}}))).unwrap();
        assert_eq!(item.id, "abc");
    }

    #[test]
    fn test_lone_object_is_a_one_item_list() {
        let list: Paginated<Item> =
            decode_list(&bytes(json!({"id": "only"})), PageRequest::default()).unwrap();
        assert_eq!(list.items, vec![Item::new("only")]);
        assert_eq!(list.total, 1);

        let list: Paginated<Item> =
            decode_list(&bytes(json!({"data": {"id": "only"}})), PageRequest::default()).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.total, 1);

        let all: Vec<Item> = decode_all(&bytes(json!({"pages": {"id": "only"}}))).unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_lone_invalid_object_is_invalid_response() {
        let err = decode_list::<Item>(&bytes(json!({"error": "nope"})), PageRequest::default())
            .unwrap_err();
        assert!(matches!(err, PingeraError::InvalidResponse(_)));
    }

    #[test]
    fn test_explicit_nulls_survive_decoding() {
        let fixture = json!({"id": "1", "label": null, "note": null});
        let item: Item = decode_entity(&bytes(fixture.clone())).unwrap();
        assert_eq!(item.label, None);
        assert_eq!(serde_json::to_value(&item).unwrap(), fixture);

        let list: Paginated<Item> =
            decode_list(&bytes(json!([fixture.clone()])), PageRequest::default()).unwrap();
        assert_eq!(serde_json::to_value(&list.items[0]).unwrap(), fixture);
    }

    #[test]
    fn test_decode_entity_rejects_garbage() {
        let err = decode_entity::<Item>(b"not json").unwrap_err();
        assert!(matches!(err, PingeraError::InvalidResponse(_)));
    }

    #[test]
    fn test_to_json_rekeys_items() {
        let list = Paginated {
            items: vec![Item::new("a")],
            total: 1,
            page: 1,
            per_page: 10,
        };
        assert_eq!(
            list.to_json("pages"),
            json!({"pages": [{"id": "a"}], "total": 1, "page": 1, "per_page": 10})
        );
    }
}
