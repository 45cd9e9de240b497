//! Built-in management commands.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait.

pub mod check;
pub mod diffsettings;
pub mod showstorage;

pub use check::CheckCommand;
pub use diffsettings::DiffsettingsCommand;
pub use showstorage::ShowstorageCommand;

use serde_json::Value;

use crate::command::CommandRegistry;

/// Printed in place of a secret value.
pub const MASK: &str = "********";

/// Setting names whose values are never printed verbatim.
const SECRET_KEYS: [&str; 4] = [
    "secret_key",
    "secret_access_key",
    "password",
    "AWS_SECRET_ACCESS_KEY",
];

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(DiffsettingsCommand));
    registry.register(Box::new(ShowstorageCommand));
}

/// Replaces every non-empty secret string inside `value` with [`MASK`].
pub fn mask_secrets(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map.iter_mut() {
                let is_secret = SECRET_KEYS.contains(&key.as_str())
                    && inner.as_str().is_some_and(|s| !s.is_empty());
                if is_secret {
                    *inner = Value::String(MASK.to_string());
                } else {
                    mask_secrets(inner);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(mask_secrets),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mask_secrets_nested() {
        let mut value = json!({
            "secret_key": "abc",
            "databases": {"default": {"password": "pw", "user": "portal"}},
            "object_storage": {"secret_access_key": ""},
        });
        mask_secrets(&mut value);
        assert_eq!(value["secret_key"], MASK);
        assert_eq!(value["databases"]["default"]["password"], MASK);
        assert_eq!(value["databases"]["default"]["user"], "portal");
        // Empty secrets stay empty so a missing value remains visible.
        assert_eq!(value["object_storage"]["secret_access_key"], "");
    }

    #[test]
    fn test_register_builtin_commands() {
        let mut registry = CommandRegistry::new();
        register_builtin_commands(&mut registry);
        assert_eq!(
            registry.list_commands(),
            vec!["check", "diffsettings", "showstorage"]
        );
    }
}
