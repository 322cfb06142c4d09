//! Type-identity rule

use super::{Checked, Rule};
use crate::configuration::ValKind;
use crate::Input;

/// Input must be an instance of a named type.
///
/// Objects answer through [`Object::is_a`](crate::Object::is_a). Any other
/// input matches when its [`kind_name`](Input::kind_name) equals the target,
/// so `"int"` or `"list"` work as targets too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceOfRule {
    type_name: String,
}

impl InstanceOfRule {
    /// Rule for the given type identity.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    /// The target type identity.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl Rule for InstanceOfRule {
    const KIND: ValKind = ValKind::InstanceOf;
    type Output = Input;

    fn check(&self, input: &Input, messages: &mut Vec<String>) {
        let matches = match input {
            Input::Object(object) => object.is_a(&self.type_name),
            other => other.kind_name() == self.type_name,
        };
        if !matches {
            messages.push(format!(
                "expected an instance of {}, got {}",
                self.type_name,
                input.kind_name()
            ));
        }
    }

    fn coerce(&self, input: &Input) -> Option<Input> {
        Some(input.clone())
    }
}

impl Checked<InstanceOfRule> {
    /// Create a val with no default.
    pub fn new(input: impl Into<Input>, type_name: impl Into<String>) -> Self {
        Self::from_rule(input, InstanceOfRule::new(type_name), None)
    }

    /// Create a val that falls back to `default` on failure.
    ///
    /// A null `default` means the val has none.
    pub fn with_default(
        input: impl Into<Input>,
        type_name: impl Into<String>,
        default: impl Into<Input>,
    ) -> Self {
        let default = Some(default.into()).filter(|d| !d.is_null());
        Self::from_rule(input, InstanceOfRule::new(type_name), default)
    }
}

#[cfg(test)]
mod tests {
    use crate::{InstanceOfVal, Input, Object, TypedVal, Val};

    #[derive(Debug)]
    struct Admin;

    impl Object for Admin {
        fn type_name(&self) -> &'static str {
            "Admin"
        }

        fn is_a(&self, type_name: &str) -> bool {
            matches!(type_name, "Admin" | "User")
        }
    }

    #[test]
    fn test_matches_own_type_and_parent() {
        assert!(InstanceOfVal::new(Input::object(Admin), "Admin").success());
        assert!(InstanceOfVal::new(Input::object(Admin), "User").success());
    }

    #[test]
    fn test_rejects_unrelated_type() {
        let val = InstanceOfVal::new(Input::object(Admin), "Invoice");
        assert!(!val.success());
        assert_eq!(
            val.pull_error_messages(),
            vec!["expected an instance of Invoice, got Admin"]
        );
        assert_eq!(val.value(), None);
    }

    #[test]
    fn test_primitive_targets() {
        assert!(InstanceOfVal::new(vec![1], "list").success());
        assert!(!InstanceOfVal::new(1, "float").success());
    }

    #[test]
    fn test_default_on_failure() {
        let val = InstanceOfVal::with_default("admin", "Admin", "guest");
        assert_eq!(val.value(), Some(Input::from("guest")));
    }

    #[test]
    fn test_null_default_is_no_default() {
        let val = InstanceOfVal::with_default("admin", "Admin", Input::Null);
        assert!(!val.success());
        assert_eq!(val.default_value(), None);
        assert_eq!(val.value(), None);
    }
}
