//! The `element_schema!` declaration macro
//!
//! One declaration per type yields the struct, its static [`TypeDescriptor`]
//! and the accessor table behind [`Composite`]. The descriptor and accessors
//! are generated from the same field list, so index `i` always refers to the
//! same field in both.
//!
//! Field syntax is `rust_name "wireName": kind Type`, where `kind` is one of
//! `attribute`, `element`, `list`, `primitive`, `primitives`, `choice`,
//! `contained` or `resource`.
//!
//! [`TypeDescriptor`]: crate::descriptor::TypeDescriptor
//! [`Composite`]: crate::element::Composite

#[macro_export]
macro_rules! element_schema {
    (@storage attribute $fty:ty) => { ::std::option::Option<$fty> };
    (@storage element $fty:ty) => { ::std::option::Option<$fty> };
    (@storage list $fty:ty) => { ::std::vec::Vec<$fty> };
    (@storage primitive $fty:ty) => { ::std::option::Option<$fty> };
    (@storage primitives $fty:ty) => { ::std::vec::Vec<$fty> };
    (@storage choice $fty:ty) => { ::std::option::Option<$fty> };
    (@storage contained $fty:ty) => { ::std::vec::Vec<$fty> };
    (@storage resource $fty:ty) => { ::std::option::Option<$fty> };

    (@kind complex) => { $crate::descriptor::TypeKind::ComplexType };
    (@kind backbone) => { $crate::descriptor::TypeKind::BackboneElement };
    (@kind resource) => { $crate::descriptor::TypeKind::Resource };

    (@child $wire:literal attribute $fty:ty) => {
        $crate::element_schema!(@describe $wire Attribute false &["System.String"])
    };
    (@child $wire:literal element $fty:ty) => {
        $crate::element_schema!(@describe $wire Element false
            &[<$fty as $crate::element::TypeName>::TYPE_NAME])
    };
    (@child $wire:literal list $fty:ty) => {
        $crate::element_schema!(@describe $wire List true
            &[<$fty as $crate::element::TypeName>::TYPE_NAME])
    };
    (@child $wire:literal primitive $fty:ty) => {
        $crate::element_schema!(@describe $wire Primitive false
            &[<$fty as $crate::element::TypeName>::TYPE_NAME])
    };
    (@child $wire:literal primitives $fty:ty) => {
        $crate::element_schema!(@describe $wire PrimitiveList true
            &[<$fty as $crate::element::TypeName>::TYPE_NAME])
    };
    (@child $wire:literal choice $fty:ty) => {
        $crate::element_schema!(@describe $wire Choice false
            <$fty as $crate::choice::Choice>::TYPE_NAMES)
    };
    (@child $wire:literal contained $fty:ty) => {
        $crate::element_schema!(@describe $wire Contained true &["Resource"])
    };
    (@child $wire:literal resource $fty:ty) => {
        $crate::element_schema!(@describe $wire Resource false &["Resource"])
    };
    (@describe $wire:literal $kind:ident $list:literal $types:expr) => {
        $crate::descriptor::ChildDescriptor {
            name: $wire,
            kind: $crate::descriptor::FieldKind::$kind,
            types: $types,
            is_list: $list,
        }
    };

    (@accessor $ty:ident $field:ident attribute) => { $crate::element_schema!(@access $ty $field Attribute) };
    (@accessor $ty:ident $field:ident element) => { $crate::element_schema!(@access $ty $field Element) };
    (@accessor $ty:ident $field:ident list) => { $crate::element_schema!(@access $ty $field List) };
    (@accessor $ty:ident $field:ident primitive) => { $crate::element_schema!(@access $ty $field Primitive) };
    (@accessor $ty:ident $field:ident primitives) => { $crate::element_schema!(@access $ty $field PrimitiveList) };
    (@accessor $ty:ident $field:ident choice) => { $crate::element_schema!(@access $ty $field Choice) };
    (@accessor $ty:ident $field:ident contained) => { $crate::element_schema!(@access $ty $field Contained) };
    (@accessor $ty:ident $field:ident resource) => { $crate::element_schema!(@access $ty $field Resource) };
    (@access $ty:ident $field:ident $variant:ident) => {{
        fn get(value: &$ty) -> $crate::field::FieldRef<'_> {
            $crate::field::FieldRef::$variant(&value.$field)
        }
        fn get_mut(value: &mut $ty) -> $crate::field::FieldMut<'_> {
            $crate::field::FieldMut::$variant(&mut value.$field)
        }
        $crate::field::Accessor::<$ty> { get, get_mut }
    }};

    (@resource resource $ty:ident) => {
        impl $crate::resource::Resource for $ty {
            fn as_composite(&self) -> &dyn $crate::element::Composite {
                self
            }

            fn as_composite_mut(&mut self) -> &mut dyn $crate::element::Composite {
                self
            }

            fn clone_resource(&self) -> ::std::boxed::Box<dyn $crate::resource::Resource> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn eq_resource(&self, other: &dyn $crate::resource::Resource) -> bool {
                $crate::element::Element::as_any(other)
                    .downcast_ref::<$ty>()
                    .map_or(false, |other| self == other)
            }
        }
    };
    (@resource $form:ident $ty:ident) => {};

    (
        $(#[$meta:meta])*
        $form:ident $ty:ident $name:literal extends $base:literal {
            $(
                $(#[$fmeta:meta])*
                $field:ident $wire:literal : $kind:ident $fty:ty
            ),* $(,)?
        }
        $(impl Element { $($extra:tt)* })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $ty {
            $(
                $(#[$fmeta])*
                pub $field: $crate::element_schema!(@storage $kind $fty),
            )*
        }

        impl $crate::element::TypeName for $ty {
            const TYPE_NAME: &'static str = $name;
        }

        const _: () = {
            static DESCRIPTOR: $crate::descriptor::TypeDescriptor = $crate::descriptor::TypeDescriptor {
                name: $name,
                namespace: $crate::descriptor::TypeNamespace::Fhir,
                base: ::std::option::Option::Some($base),
                kind: $crate::element_schema!(@kind $form),
                elements: &[$($crate::element_schema!(@child $wire $kind $fty)),*],
            };

            static ACCESSORS: &[$crate::field::Accessor<$ty>] = &[
                $($crate::element_schema!(@accessor $ty $field $kind)),*
            ];

            impl $crate::element::Element for $ty {
                fn type_descriptor(&self) -> &'static $crate::descriptor::TypeDescriptor {
                    &DESCRIPTOR
                }

                fn children(
                    &self,
                    names: ::std::option::Option<&[&str]>,
                ) -> ::std::vec::Vec<$crate::element::Child<'_>> {
                    $crate::tree::children(self, names)
                }

                fn equal(&self, other: &dyn $crate::element::Element) -> bool {
                    $crate::equality::equal(self, other)
                }

                fn equivalent(&self, other: &dyn $crate::element::Element) -> bool {
                    $crate::equality::equivalent(self, other)
                }

                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                    self
                }

                $($($extra)*)?
            }

            impl $crate::element::Composite for $ty {
                fn field(&self, index: usize) -> $crate::field::FieldRef<'_> {
                    (ACCESSORS[index].get)(self)
                }

                fn field_mut(&mut self, index: usize) -> $crate::field::FieldMut<'_> {
                    (ACCESSORS[index].get_mut)(self)
                }

                fn as_element(&self) -> &dyn $crate::element::Element {
                    self
                }
            }

            impl $crate::choice::ChoiceValue for $ty {
                fn as_choice_ref(&self) -> $crate::choice::ChoiceRef<'_> {
                    $crate::choice::ChoiceRef::Element(self)
                }

                fn as_choice_mut(&mut self) -> $crate::choice::ChoiceMut<'_> {
                    $crate::choice::ChoiceMut::Element(self)
                }
            }

            $crate::element_schema!(@resource $form $ty);
        };
    };
}
