//! Structural equality over element trees
//!
//! Both relations compare leaf scalars first and then the two `children()`
//! sequences pairwise, in order. When either sequence is empty the comparison
//! is vacuously true. That short-circuit is long-standing observable
//! behaviour and is kept as is: an element without children compares equal to
//! any element whose scalar matches.

use rust_decimal::Decimal;

use crate::descriptor::TypeNamespace;
use crate::element::{Child, Element};
use crate::primitive::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Equal,
    Equivalent,
}

pub fn equal(left: &dyn Element, right: &dyn Element) -> bool {
    compare(left, right, Mode::Equal)
}

/// Like [`equal`], but ignores element ids, compares strings without regard
/// to case or whitespace runs, and compares decimals at the lower precision.
pub fn equivalent(left: &dyn Element, right: &dyn Element) -> bool {
    compare(left, right, Mode::Equivalent)
}

fn compare(left: &dyn Element, right: &dyn Element, mode: Mode) -> bool {
    match (left.scalar(), right.scalar()) {
        (Some(a), Some(b)) => {
            if !scalars_match(&a, &b, mode) {
                return false;
            }
        }
        (None, None) => {}
        _ => return false,
    }

    let left_children = comparable_children(left, mode);
    let right_children = comparable_children(right, mode);
    if left_children.is_empty() || right_children.is_empty() {
        return true;
    }
    if left_children.len() != right_children.len() {
        return false;
    }

    left_children
        .iter()
        .zip(&right_children)
        .all(|(a, b)| a.name == b.name && compare(a.element, b.element, mode))
}

fn comparable_children(element: &dyn Element, mode: Mode) -> Vec<Child<'_>> {
    let mut children = element.children(None);
    if mode == Mode::Equivalent {
        children.retain(|child| !is_element_id(child));
    }
    children
}

fn is_element_id(child: &Child<'_>) -> bool {
    child.name == "id" && child.element.type_descriptor().namespace == TypeNamespace::System
}

fn scalars_match(a: &Scalar, b: &Scalar, mode: Mode) -> bool {
    match (a, b) {
        (Scalar::String(a), Scalar::String(b)) => match mode {
            Mode::Equal => a == b,
            Mode::Equivalent => normalize(a) == normalize(b),
        },
        (Scalar::Decimal(a), Scalar::Decimal(b)) => decimals_match(*a, *b, mode),
        (Scalar::Integer(a), Scalar::Decimal(b)) => decimals_match(Decimal::from(*a), *b, mode),
        (Scalar::Decimal(a), Scalar::Integer(b)) => decimals_match(*a, Decimal::from(*b), mode),
        _ => a == b,
    }
}

fn decimals_match(a: Decimal, b: Decimal, mode: Mode) -> bool {
    match mode {
        Mode::Equal => a == b,
        Mode::Equivalent => {
            let scale = a.scale().min(b.scale());
            a.round_dp(scale) == b.round_dp(scale)
        }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
