//! Scalar rules

use super::Rule;
use crate::configuration::ValKind;
use crate::Input;

/// Input must be a bool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolRule;

impl Rule for BoolRule {
    const KIND: ValKind = ValKind::Bool;
    type Output = bool;

    fn check(&self, input: &Input, messages: &mut Vec<String>) {
        if !matches!(input, Input::Bool(_)) {
            messages.push(format!("expected a bool, got {}", input.kind_name()));
        }
    }

    fn coerce(&self, input: &Input) -> Option<bool> {
        match input {
            Input::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Input must be an int.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntRule;

impl Rule for IntRule {
    const KIND: ValKind = ValKind::Int;
    type Output = i64;

    fn check(&self, input: &Input, messages: &mut Vec<String>) {
        if !matches!(input, Input::Int(_)) {
            messages.push(format!("expected an int, got {}", input.kind_name()));
        }
    }

    fn coerce(&self, input: &Input) -> Option<i64> {
        match input {
            Input::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// Input must be a float. Ints are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatRule;

impl Rule for FloatRule {
    const KIND: ValKind = ValKind::Float;
    type Output = f64;

    fn check(&self, input: &Input, messages: &mut Vec<String>) {
        if !matches!(input, Input::Float(_)) {
            messages.push(format!("expected a float, got {}", input.kind_name()));
        }
    }

    fn coerce(&self, input: &Input) -> Option<f64> {
        match input {
            Input::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Input must be a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringRule;

impl Rule for StringRule {
    const KIND: ValKind = ValKind::String;
    type Output = String;

    fn check(&self, input: &Input, messages: &mut Vec<String>) {
        if !matches!(input, Input::Str(_)) {
            messages.push(format!("expected a string, got {}", input.kind_name()));
        }
    }

    fn coerce(&self, input: &Input) -> Option<String> {
        match input {
            Input::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Input must be a string or an object that renders as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringableRule;

impl Rule for StringableRule {
    const KIND: ValKind = ValKind::Stringable;
    type Output = String;

    fn check(&self, input: &Input, messages: &mut Vec<String>) {
        if input.to_text().is_none() {
            messages.push(format!(
                "expected a string or an object with a text representation, got {}",
                input.kind_name()
            ));
        }
    }

    fn coerce(&self, input: &Input) -> Option<String> {
        input.to_text()
    }
}
