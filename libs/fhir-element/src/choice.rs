//! Choice fields (`value[x]`, `effective[x]`, ...)
//!
//! Each choice field is a closed enum declared with [`choice_type!`]: one
//! variant per allowed type, at most one populated. The [`ChoiceSlot`]
//! capability lets the codecs select a variant by its type name and reach the
//! chosen value without knowing the enum.

use std::fmt;

use crate::element::{Composite, Element, TypeName};
use crate::primitive::{Primitive, PrimitiveElement, PrimitiveType};

/// Borrowed view of the populated variant.
#[derive(Clone, Copy)]
pub enum ChoiceRef<'a> {
    Primitive(&'a dyn PrimitiveElement),
    Element(&'a dyn Composite),
}

pub enum ChoiceMut<'a> {
    Primitive(&'a mut dyn PrimitiveElement),
    Element(&'a mut dyn Composite),
}

impl<'a> ChoiceRef<'a> {
    pub fn as_element(self) -> &'a dyn Element {
        match self {
            ChoiceRef::Primitive(primitive) => primitive.as_element(),
            ChoiceRef::Element(element) => element.as_element(),
        }
    }

    pub fn is_empty(self) -> bool {
        match self {
            ChoiceRef::Primitive(primitive) => primitive.is_empty(),
            ChoiceRef::Element(_) => false,
        }
    }
}

impl fmt::Debug for ChoiceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceRef::Primitive(primitive) => f.debug_tuple("Primitive").field(primitive).finish(),
            ChoiceRef::Element(element) => f.debug_tuple("Element").field(element).finish(),
        }
    }
}

/// A type that may appear as a choice variant.
pub trait ChoiceValue: Element + TypeName {
    fn as_choice_ref(&self) -> ChoiceRef<'_>;

    fn as_choice_mut(&mut self) -> ChoiceMut<'_>;
}

impl<K: PrimitiveType> ChoiceValue for Primitive<K> {
    fn as_choice_ref(&self) -> ChoiceRef<'_> {
        ChoiceRef::Primitive(self)
    }

    fn as_choice_mut(&mut self) -> ChoiceMut<'_> {
        ChoiceMut::Primitive(self)
    }
}

/// A closed sum type over the allowed types of one choice field.
pub trait Choice: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// FHIR type names of every variant, in declaration order.
    const TYPE_NAMES: &'static [&'static str];

    fn type_name(&self) -> &'static str;

    fn value(&self) -> ChoiceRef<'_>;

    fn value_mut(&mut self) -> ChoiceMut<'_>;

    /// A defaulted variant for `type_name`, if it is allowed.
    fn from_type_name(type_name: &str) -> Option<Self>;
}

/// Object-safe access to an `Option<C: Choice>` field.
pub trait ChoiceSlot {
    fn type_names(&self) -> &'static [&'static str];

    /// The populated variant, ignoring an empty primitive.
    fn selected(&self) -> Option<ChoiceRef<'_>>;

    /// Type name of the stored variant, even while it is still empty.
    fn selected_type(&self) -> Option<&'static str>;

    /// Select `type_name`, keeping the current value if it already is that
    /// variant and replacing it otherwise. `None` if the type is not allowed.
    fn select(&mut self, type_name: &str) -> Option<ChoiceMut<'_>>;
}

impl<C: Choice> ChoiceSlot for Option<C> {
    fn type_names(&self) -> &'static [&'static str] {
        C::TYPE_NAMES
    }

    fn selected(&self) -> Option<ChoiceRef<'_>> {
        self.as_ref()
            .map(Choice::value)
            .filter(|value| !value.is_empty())
    }

    fn selected_type(&self) -> Option<&'static str> {
        self.as_ref().map(Choice::type_name)
    }

    fn select(&mut self, type_name: &str) -> Option<ChoiceMut<'_>> {
        let keep = self
            .as_ref()
            .is_some_and(|current| current.type_name() == type_name);
        if !keep {
            *self = Some(C::from_type_name(type_name)?);
        }
        self.as_mut().map(Choice::value_mut)
    }
}

/// Declare a choice enum and its [`Choice`] implementation.
///
/// ```rust
/// use ferrum_element::{choice_type, Choice, FhirBoolean, FhirDateTime};
///
/// choice_type! {
///     pub enum Deceased {
///         Boolean(FhirBoolean),
///         DateTime(FhirDateTime),
///     }
/// }
///
/// assert_eq!(Deceased::TYPE_NAMES, &["boolean", "dateTime"]);
/// let value = Deceased::from(FhirBoolean::new(true));
/// assert_eq!(value.type_name(), "boolean");
/// ```
#[macro_export]
macro_rules! choice_type {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $($variant($ty)),+
        }

        impl $crate::choice::Choice for $name {
            const TYPE_NAMES: &'static [&'static str] =
                &[$(<$ty as $crate::element::TypeName>::TYPE_NAME),+];

            fn type_name(&self) -> &'static str {
                match self {
                    $($name::$variant(_) => <$ty as $crate::element::TypeName>::TYPE_NAME),+
                }
            }

            fn value(&self) -> $crate::choice::ChoiceRef<'_> {
                match self {
                    $($name::$variant(value) => $crate::choice::ChoiceValue::as_choice_ref(value)),+
                }
            }

            fn value_mut(&mut self) -> $crate::choice::ChoiceMut<'_> {
                match self {
                    $($name::$variant(value) => $crate::choice::ChoiceValue::as_choice_mut(value)),+
                }
            }

            fn from_type_name(type_name: &str) -> ::std::option::Option<Self> {
                $(
                    if type_name == <$ty as $crate::element::TypeName>::TYPE_NAME {
                        return ::std::option::Option::Some(
                            $name::$variant(<$ty as ::std::default::Default>::default()),
                        );
                    }
                )+
                ::std::option::Option::None
            }
        }

        $(
            impl ::std::convert::From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    $name::$variant(value)
                }
            }
        )+
    };
}
