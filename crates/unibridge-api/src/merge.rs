// Fetch-merge-write support for Integration resources.
//
// The controller's PUT endpoints replace the whole object, so partial updates
// read the current representation as an ordered map of raw JSON values, drop
// the fields the server rejects on write, overlay the change, and send every
// other value back exactly as it was received.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::value::RawValue;

use crate::error::Error;

/// Fields every Integration resource rejects in a PUT body.
pub const READ_ONLY_FIELDS: &[&str] = &["id", "metadata"];

/// Ordered JSON object whose values are kept as their original text.
pub type FieldMap = IndexMap<String, Box<RawValue>>;

/// Remove server-managed fields, keeping the order of the rest.
pub fn strip_read_only(fields: &mut FieldMap) {
    fields.retain(|key, _| !READ_ONLY_FIELDS.contains(&key.as_str()));
}

/// Build a PUT body from the current representation and a set of changes.
///
/// Keys present in `current` keep their position; new keys from `changes`
/// are appended. Read-only fields are stripped even when `changes` sets them.
pub fn merged(mut current: FieldMap, changes: FieldMap) -> FieldMap {
    for (key, value) in changes {
        current.insert(key, value);
    }
    strip_read_only(&mut current);
    current
}

/// Serialize a change set into raw fields. Anything but an object is rejected.
pub fn changes<T: Serialize + ?Sized>(value: &T) -> Result<FieldMap, Error> {
    let text = serde_json::to_string(value).map_err(Error::Encode)?;
    serde_json::from_str(&text)
        .map_err(|_| Error::Validation("change set must be a JSON object".into()))
}

/// Single-field change set for boolean toggles.
pub fn enabled(value: bool) -> Result<FieldMap, Error> {
    changes(&serde_json::json!({ "enabled": value }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn fields(text: &str) -> FieldMap {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn toggle_keeps_unknown_fields_in_order() {
        let current = fields(
            r#"{"id":"bc-1","name":"HomeWiFi","type":"STANDARD","enabled":true,"securityConfiguration":{"type":"WPA2_PERSONAL","passphrase":"hunter2"},"metadata":{"origin":"USER_DEFINED"},"broadcastingFrequenciesGHz":[2.4,5],"hideName":false}"#,
        );

        let body = merged(current, enabled(false).unwrap());

        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"name":"HomeWiFi","type":"STANDARD","enabled":false,"securityConfiguration":{"type":"WPA2_PERSONAL","passphrase":"hunter2"},"broadcastingFrequenciesGHz":[2.4,5],"hideName":false}"#
        );
    }

    #[test]
    fn untouched_numbers_keep_their_spelling() {
        let current = fields(
            r#"{"id":"bc-1","name":"HomeWiFi","enabled":true,"big":18446744073709551616,"rate":1.10,"exp":1e2}"#,
        );

        let body = merged(current, enabled(false).unwrap());

        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"name":"HomeWiFi","enabled":false,"big":18446744073709551616,"rate":1.10,"exp":1e2}"#
        );
    }

    #[test]
    fn changes_cannot_reintroduce_read_only_fields() {
        let current = fields(r#"{"id":"z-1","name":"LAN"}"#);
        let update = changes(&json!({"id": "other", "metadata": {}, "name": "Guest"})).unwrap();

        assert_eq!(
            serde_json::to_string(&merged(current, update)).unwrap(),
            r#"{"name":"Guest"}"#
        );
    }

    #[test]
    fn missing_toggle_field_is_appended() {
        let current = fields(r#"{"id":"p-1","name":"Block IoT"}"#);

        let body = merged(current, enabled(true).unwrap());

        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"name":"Block IoT","enabled":true}"#
        );
    }

    #[test]
    fn non_object_change_set_is_rejected() {
        let err = changes(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
