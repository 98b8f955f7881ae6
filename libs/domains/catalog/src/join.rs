//! Embedded relation handling.
//!
//! A one-to-one relation embedded in a store response may come back as a
//! single object or as an array holding at most one object. Both shapes
//! deserialize into [`Embedded`] and collapse through [`normalize`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Embedded<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Embedded<T> {
    /// The related record, if any
    pub fn into_single(self) -> Option<T> {
        match self {
            Embedded::One(record) => Some(record),
            Embedded::Many(records) => records.into_iter().next(),
        }
    }
}

impl<T> From<T> for Embedded<T> {
    fn from(record: T) -> Self {
        Embedded::One(record)
    }
}

/// Collapse an optional embedded relation to at most one record.
///
/// Absent, null and empty-array fields all yield `None`.
pub fn normalize<T>(field: Option<Embedded<T>>) -> Option<T> {
    field.and_then(Embedded::into_single)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SellerRef;
    use serde_json::json;
    use uuid::Uuid;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default)]
        seller: Option<Embedded<SellerRef>>,
    }

    fn seller() -> SellerRef {
        SellerRef {
            id: Uuid::new_v4(),
            store_name: Some("Corner Shoes".to_string()),
            logo: None,
        }
    }

    #[test]
    fn test_object_and_singleton_array_agree() {
        let record = seller();
        assert_eq!(
            normalize(Some(Embedded::One(record.clone()))),
            normalize(Some(Embedded::Many(vec![record.clone()])))
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(Some(Embedded::Many(vec![seller()])));
        let twice = normalize(once.clone().map(Embedded::from));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_shapes_yield_none() {
        assert_eq!(normalize::<SellerRef>(None), None);
        assert_eq!(normalize::<SellerRef>(Some(Embedded::Many(vec![]))), None);
    }

    #[test]
    fn test_deserializes_both_wire_shapes() {
        let id = Uuid::new_v4();
        let object: Row = serde_json::from_value(json!({
            "seller": {"id": id, "store_name": "A", "logo": "a.png"}
        }))
        .unwrap();
        let array: Row = serde_json::from_value(json!({
            "seller": [{"id": id, "store_name": "A", "logo": "a.png"}]
        }))
        .unwrap();

        assert_eq!(normalize(object.seller), normalize(array.seller));
    }

    #[test]
    fn test_deserializes_absent_null_and_empty() {
        for value in [json!({}), json!({"seller": null}), json!({"seller": []})] {
            let row: Row = serde_json::from_value(value).unwrap();
            assert_eq!(normalize(row.seller), None);
        }
    }
}
