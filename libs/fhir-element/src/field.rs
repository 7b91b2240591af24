//! Field tables and slot capabilities
//!
//! Every composite type exposes its fields as a closed set of borrowed slots.
//! A [`FieldRef`] / [`FieldMut`] pairs a [`FieldKind`] with an object-safe
//! capability over the concrete storage (`Option<E>`, `Vec<Primitive<K>>`,
//! `Option<SomeChoice>`, ...), so the tree walk and the codecs never need to
//! know the concrete field type.

use crate::choice::ChoiceSlot;
use crate::descriptor::FieldKind;
use crate::element::{Child, Composite, Element};
use crate::primitive::{Primitive, PrimitiveElement, PrimitiveType};
use crate::resource::ResourceSlot;

/// Getter pair for one field of `T`, indexed like the descriptor table.
pub struct Accessor<T> {
    pub get: fn(&T) -> FieldRef<'_>,
    pub get_mut: fn(&mut T) -> FieldMut<'_>,
}

pub enum FieldRef<'a> {
    Attribute(&'a Option<String>),
    Element(&'a dyn ElementSlot),
    List(&'a dyn ElementList),
    Primitive(&'a dyn PrimitiveSlot),
    PrimitiveList(&'a dyn PrimitiveList),
    Choice(&'a dyn ChoiceSlot),
    Contained(&'a dyn ResourceSlot),
    Resource(&'a dyn ResourceSlot),
}

pub enum FieldMut<'a> {
    Attribute(&'a mut Option<String>),
    Element(&'a mut dyn ElementSlot),
    List(&'a mut dyn ElementList),
    Primitive(&'a mut dyn PrimitiveSlot),
    PrimitiveList(&'a mut dyn PrimitiveList),
    Choice(&'a mut dyn ChoiceSlot),
    Contained(&'a mut dyn ResourceSlot),
    Resource(&'a mut dyn ResourceSlot),
}

impl<'a> FieldRef<'a> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldRef::Attribute(_) => FieldKind::Attribute,
            FieldRef::Element(_) => FieldKind::Element,
            FieldRef::List(_) => FieldKind::List,
            FieldRef::Primitive(_) => FieldKind::Primitive,
            FieldRef::PrimitiveList(_) => FieldKind::PrimitiveList,
            FieldRef::Choice(_) => FieldKind::Choice,
            FieldRef::Contained(_) => FieldKind::Contained,
            FieldRef::Resource(_) => FieldKind::Resource,
        }
    }

    /// Whether the field contributes anything to a wire or to `children()`.
    pub fn is_present(&self) -> bool {
        match self {
            FieldRef::Attribute(value) => value.is_some(),
            FieldRef::Element(slot) => slot.get().is_some(),
            FieldRef::List(list) => !list.is_empty(),
            FieldRef::Primitive(slot) => slot.get().is_some(),
            FieldRef::PrimitiveList(list) => {
                (0..list.len()).any(|index| list.item(index).is_some_and(|item| !item.is_empty()))
            }
            FieldRef::Choice(slot) => slot.selected().is_some(),
            FieldRef::Contained(slot) | FieldRef::Resource(slot) => !slot.resources().is_empty(),
        }
    }

    pub(crate) fn collect_children(&self, name: &'static str, out: &mut Vec<Child<'a>>) {
        let mut push = |element: &'a dyn Element| out.push(Child { name, element });
        match *self {
            FieldRef::Attribute(value) => {
                if let Some(value) = value {
                    push(value as &dyn Element);
                }
            }
            FieldRef::Element(slot) => {
                if let Some(element) = slot.get() {
                    push(element.as_element());
                }
            }
            FieldRef::List(list) => {
                for index in 0..list.len() {
                    if let Some(element) = list.item(index) {
                        push(element.as_element());
                    }
                }
            }
            FieldRef::Primitive(slot) => {
                if let Some(primitive) = slot.get() {
                    push(primitive.as_element());
                }
            }
            FieldRef::PrimitiveList(list) => {
                for index in 0..list.len() {
                    if let Some(primitive) = list.item(index).filter(|item| !item.is_empty()) {
                        push(primitive.as_element());
                    }
                }
            }
            FieldRef::Choice(slot) => {
                if let Some(selected) = slot.selected() {
                    push(selected.as_element());
                }
            }
            FieldRef::Contained(slot) | FieldRef::Resource(slot) => {
                for resource in slot.resources() {
                    push(resource.as_composite().as_element());
                }
            }
        }
    }
}

impl FieldMut<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldMut::Attribute(_) => FieldKind::Attribute,
            FieldMut::Element(_) => FieldKind::Element,
            FieldMut::List(_) => FieldKind::List,
            FieldMut::Primitive(_) => FieldKind::Primitive,
            FieldMut::PrimitiveList(_) => FieldKind::PrimitiveList,
            FieldMut::Choice(_) => FieldKind::Choice,
            FieldMut::Contained(_) => FieldKind::Contained,
            FieldMut::Resource(_) => FieldKind::Resource,
        }
    }
}

/// A single optional composite child.
pub trait ElementSlot {
    fn get(&self) -> Option<&dyn Composite>;

    /// Existing value, or a freshly defaulted one.
    fn ensure(&mut self) -> &mut dyn Composite;
}

impl<E: Composite + Default> ElementSlot for Option<E> {
    fn get(&self) -> Option<&dyn Composite> {
        self.as_ref().map(|element| element as &dyn Composite)
    }

    fn ensure(&mut self) -> &mut dyn Composite {
        self.get_or_insert_with(E::default)
    }
}

/// A repeating composite child.
pub trait ElementList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn item(&self, index: usize) -> Option<&dyn Composite>;

    /// Append a defaulted item and return it for population.
    fn push_default(&mut self) -> &mut dyn Composite;
}

impl<E: Composite + Default> ElementList for Vec<E> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<&dyn Composite> {
        self.as_slice()
            .get(index)
            .map(|element| element as &dyn Composite)
    }

    fn push_default(&mut self) -> &mut dyn Composite {
        self.push(E::default());
        let last = Vec::len(self) - 1;
        &mut self[last]
    }
}

/// A single optional primitive. An empty primitive reads as absent.
pub trait PrimitiveSlot {
    fn get(&self) -> Option<&dyn PrimitiveElement>;

    fn ensure(&mut self) -> &mut dyn PrimitiveElement;
}

impl<K: PrimitiveType> PrimitiveSlot for Option<Primitive<K>> {
    fn get(&self) -> Option<&dyn PrimitiveElement> {
        self.as_ref()
            .filter(|primitive| !PrimitiveElement::is_empty(*primitive))
            .map(|primitive| primitive as &dyn PrimitiveElement)
    }

    fn ensure(&mut self) -> &mut dyn PrimitiveElement {
        self.get_or_insert_with(Primitive::default)
    }
}

/// A repeating primitive. Items may be empty placeholders that keep the
/// `name` / `_name` arrays aligned.
pub trait PrimitiveList {
    fn len(&self) -> usize;

    fn item(&self, index: usize) -> Option<&dyn PrimitiveElement>;

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn PrimitiveElement>;

    /// Grow (never shrink) to at least `len` items.
    fn ensure_len(&mut self, len: usize);

    /// Drop trailing empty items left over from alignment.
    fn trim_empty(&mut self);
}

impl<K: PrimitiveType> PrimitiveList for Vec<Primitive<K>> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<&dyn PrimitiveElement> {
        self.as_slice()
            .get(index)
            .map(|primitive| primitive as &dyn PrimitiveElement)
    }

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn PrimitiveElement> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|primitive| primitive as &mut dyn PrimitiveElement)
    }

    fn ensure_len(&mut self, len: usize) {
        if Vec::len(self) < len {
            self.resize_with(len, Primitive::default);
        }
    }

    fn trim_empty(&mut self) {
        while self
            .last()
            .is_some_and(|primitive| PrimitiveElement::is_empty(primitive))
        {
            self.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FhirString, HumanName};

    #[test]
    fn empty_primitive_slot_reads_absent() {
        let mut slot: Option<FhirString> = Some(FhirString::default());
        assert!(PrimitiveSlot::get(&slot).is_none());

        PrimitiveSlot::ensure(&mut slot).set_id(Some("x".to_owned()));
        assert_eq!(PrimitiveSlot::get(&slot).and_then(|p| p.id()), Some("x"));
    }

    #[test]
    fn primitive_list_grows_for_alignment() {
        let mut given: Vec<FhirString> = vec![FhirString::new("a")];
        given.ensure_len(3);
        assert_eq!(given.len(), 3);
        assert!(PrimitiveList::item(&given, 2).unwrap().is_empty());

        given.ensure_len(2);
        assert_eq!(given.len(), 3);

        given.trim_empty();
        assert_eq!(given.len(), 1);
    }

    #[test]
    fn field_presence_follows_kind() {
        let name = HumanName {
            given: vec![FhirString::default(), FhirString::default()],
            ..Default::default()
        };
        let (index, _) = name.type_descriptor().child("given").unwrap();
        let field = name.field(index);
        assert_eq!(field.kind(), FieldKind::PrimitiveList);
        assert!(!field.is_present());
    }
}
