//! Iterable rules
//!
//! An iterable val checks two things separately: that the input is a list
//! or map at all, and that every element satisfies an [`ElementRule`].
//! A non-iterable input produces exactly one message and no element
//! messages; otherwise each bad element produces its own message naming
//! its position.

use super::Rule;
use crate::configuration::ValKind;
use crate::Input;

/// Per-element check used by [`IterableRule`].
pub trait ElementRule {
    /// Kind of the iterable val built on this element rule
    const KIND: ValKind;

    /// What an element must be, for messages (e.g. "an int")
    const EXPECTED: &'static str;

    /// Typed element
    type Element: Clone;

    /// Convert an element, or `None` if it does not satisfy the rule.
    fn element(&self, input: &Input) -> Option<Self::Element>;
}

/// Any element is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyElement;

impl ElementRule for AnyElement {
    const KIND: ValKind = ValKind::Iterable;
    const EXPECTED: &'static str = "any value";
    type Element = Input;

    fn element(&self, input: &Input) -> Option<Input> {
        Some(input.clone())
    }
}

/// Elements must be ints.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntElement;

impl ElementRule for IntElement {
    const KIND: ValKind = ValKind::IterableInt;
    const EXPECTED: &'static str = "an int";
    type Element = i64;

    fn element(&self, input: &Input) -> Option<i64> {
        match input {
            Input::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// Elements must be scalars that coerce to a string.
///
/// Strings, ints, floats and bools qualify. Objects do not, even when they
/// render as text. Elements are kept as they were.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringElement;

impl ElementRule for StringElement {
    const KIND: ValKind = ValKind::IterableString;
    const EXPECTED: &'static str = "a string-coercible scalar";
    type Element = Input;

    fn element(&self, input: &Input) -> Option<Input> {
        input.coerce_text().map(|_| input.clone())
    }
}

/// Elements must be strings or objects that render as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringableElement;

impl ElementRule for StringableElement {
    const KIND: ValKind = ValKind::IterableStringable;
    const EXPECTED: &'static str = "a string or an object with a text representation";
    type Element = String;

    fn element(&self, input: &Input) -> Option<String> {
        input.to_text()
    }
}

/// Input must be iterable and every element must satisfy `E`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IterableRule<E> {
    elements: E,
}

impl<E: ElementRule> IterableRule<E> {
    /// Rule with the given element rule.
    pub fn new(elements: E) -> Self {
        Self { elements }
    }
}

impl<E: ElementRule> Rule for IterableRule<E> {
    const KIND: ValKind = E::KIND;
    type Output = Vec<E::Element>;

    fn check(&self, input: &Input, messages: &mut Vec<String>) {
        let Some(items) = input.elements() else {
            messages.push(format!("expected an iterable, got {}", input.kind_name()));
            return;
        };

        for (idx, item) in items.enumerate() {
            if self.elements.element(item).is_none() {
                messages.push(format!(
                    "element {} must be {}, got {}",
                    idx,
                    E::EXPECTED,
                    item.kind_name()
                ));
            }
        }
    }

    fn coerce(&self, input: &Input) -> Option<Vec<E::Element>> {
        input
            .elements()?
            .map(|item| self.elements.element(item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Input, IterableIntVal, IterableStringVal, IterableStringableVal, IterableVal, Object,
        TypedVal, Val,
    };

    #[derive(Debug)]
    struct Label;

    impl Object for Label {
        fn type_name(&self) -> &'static str {
            "Label"
        }

        fn to_text(&self) -> Option<String> {
            Some("success".to_string())
        }
    }

    #[test]
    fn test_empty_string_iterable_passes() {
        let val = IterableStringVal::new(Vec::<Input>::new());
        assert!(val.success());
        assert_eq!(val.value(), Some(vec![]));
    }

    #[test]
    fn test_mixed_scalars_pass_unchanged() {
        let raw = vec![
            Input::from("two"),
            Input::from(1),
            Input::from(true),
            Input::from(234.23),
        ];
        let val = IterableStringVal::new(raw.clone());
        assert!(val.success());
        assert_eq!(val.value(), Some(raw));
    }

    #[test]
    fn test_object_with_text_is_not_a_string_element() {
        let val = IterableStringVal::new(vec![Input::object(Label)]);
        assert!(!val.success());
        assert_eq!(val.value(), None);
        assert_eq!(
            val.pull_error_messages(),
            vec!["element 0 must be a string-coercible scalar, got Label"]
        );
    }

    #[test]
    fn test_object_with_text_is_stringable() {
        let val = IterableStringableVal::new(vec![Input::object(Label), Input::from("x")]);
        assert!(val.success());
        assert_eq!(
            val.value(),
            Some(vec!["success".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_not_iterable_is_reported_once() {
        let val = IterableIntVal::new("1,2,3");
        assert!(!val.success());
        assert_eq!(
            val.pull_error_messages(),
            vec!["expected an iterable, got string"]
        );
    }

    #[test]
    fn test_each_bad_element_is_reported() {
        let val = IterableIntVal::new(vec![Input::from(1), Input::from("2"), Input::from(3.0)]);
        assert_eq!(
            val.pull_error_messages(),
            vec![
                "element 1 must be an int, got string",
                "element 2 must be an int, got float",
            ]
        );
    }

    #[test]
    fn test_int_iterable_value() {
        let val = IterableIntVal::with_default(vec![4, 5], vec![]);
        assert_eq!(val.value(), Some(vec![4, 5]));
    }

    #[test]
    fn test_plain_iterable_accepts_anything_inside() {
        let val = IterableVal::new(vec![Input::Null, Input::object(Label)]);
        assert!(val.success());
        assert_eq!(val.value().map(|v| v.len()), Some(2));
        assert!(!IterableVal::new(7).success());
    }
}
