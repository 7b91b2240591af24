//! Primitive duality
//!
//! A primitive's value and its metadata (`id`, `extension`) travel in two
//! sibling wire fields, `name` and `_name`. Either, both or neither may be
//! present. For repeating primitives the two arrays are positionally aligned,
//! with `null` standing in for an absent side at a given index.

use ferrum_element::field::PrimitiveList;

/// What a repeating primitive contributes to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ListPresence {
    /// Length of both arrays: one past the last non-empty item.
    pub len: usize,
    /// Some item has a value, so the `name` array is written.
    pub values: bool,
    /// Some item has metadata, so the `_name` array is written.
    pub metadata: bool,
}

pub(crate) fn list_presence(list: &dyn PrimitiveList) -> ListPresence {
    let mut presence = ListPresence::default();
    for index in 0..list.len() {
        let Some(item) = list.item(index) else {
            continue;
        };
        presence.values |= item.has_value();
        presence.metadata |= item.has_metadata();
        if !item.is_empty() {
            presence.len = index + 1;
        }
    }
    presence
}

pub(crate) fn metadata_key(name: &str) -> String {
    format!("_{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_element::{Extension, FhirBoolean, FhirString};

    fn flagged() -> Extension {
        Extension::new("http://example.org/flag", FhirBoolean::new(true))
    }

    #[test]
    fn value_only_list() {
        let list = vec![FhirString::new("a"), FhirString::new("b")];
        assert_eq!(
            list_presence(&list),
            ListPresence {
                len: 2,
                values: true,
                metadata: false
            }
        );
    }

    #[test]
    fn sparse_metadata_keeps_full_length() {
        let list = vec![
            FhirString::new("a").with_extension(flagged()),
            FhirString::new("b"),
            FhirString::new("c").with_extension(flagged()),
        ];
        let presence = list_presence(&list);
        assert_eq!(presence.len, 3);
        assert!(presence.values && presence.metadata);
    }

    #[test]
    fn metadata_only_list() {
        let list = vec![FhirString::from_extension(vec![flagged()])];
        let presence = list_presence(&list);
        assert_eq!(presence.len, 1);
        assert!(!presence.values);
        assert!(presence.metadata);
    }

    #[test]
    fn trailing_empty_items_are_not_written() {
        let list = vec![
            FhirString::new("a"),
            FhirString::default(),
            FhirString::default(),
        ];
        assert_eq!(list_presence(&list).len, 1);
        assert_eq!(list_presence(&Vec::<FhirString>::new()).len, 0);
    }

    #[test]
    fn metadata_key_prefixes_underscore() {
        assert_eq!(metadata_key("birthDate"), "_birthDate");
    }
}
