use serde_json::Value;

/// Deep-merge `patch` into `target`.
///
/// Objects merge key by key; every other value (arrays, scalars, null)
/// replaces what was there. A `null` on an optional field therefore clears it
/// once the record is deserialized again.
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => {
            *target = patch.clone();
        }
    }
}
