use serde_json::{Map, Value};

use crate::database::models::{PhoneNumber, PracticeInformationFields};
use crate::error::FieldErrors;

const REQUIRED: &str = "is required";
const NON_EMPTY_STRING: &str = "must be a non-empty string";

/// Validate an update payload (camelCase wire names) into storage fields.
///
/// All violations are collected; nothing is returned unless the whole payload is valid.
pub fn validate_update_payload(payload: &Value) -> Result<PracticeInformationFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let Some(object) = payload.as_object() else {
        errors.insert("body".to_string(), "must be a JSON object".to_string());
        return Err(errors);
    };

    let practice_name = non_empty_string(object, "practiceName", &mut errors);
    let practice_email = non_empty_string(object, "practiceEmail", &mut errors);
    let time_zone = non_empty_string(object, "timeZone", &mut errors);
    let practice_logo = optional_string(object, "practiceLogo", &mut errors);
    let phone_numbers = phone_numbers(object, &mut errors);
    let tele_health = match object.get("teleHealth") {
        None | Some(Value::Null) => {
            errors.insert("teleHealth".to_string(), REQUIRED.to_string());
            None
        }
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.insert("teleHealth".to_string(), "must be a boolean".to_string());
            None
        }
    };

    match (practice_name, practice_email, time_zone, phone_numbers, tele_health) {
        (Some(practice_name), Some(practice_email), Some(time_zone), Some(phone_numbers), Some(tele_health))
            if errors.is_empty() =>
        {
            Ok(PracticeInformationFields {
                practice_name,
                practice_email,
                time_zone,
                practice_logo,
                phone_numbers,
                tele_health,
            })
        }
        _ => Err(errors),
    }
}

fn non_empty_string(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => {
            errors.insert(field.to_string(), REQUIRED.to_string());
            None
        }
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(_) => {
            errors.insert(field.to_string(), NON_EMPTY_STRING.to_string());
            None
        }
    }
}

fn optional_string(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.insert(field.to_string(), "must be a string".to_string());
            None
        }
    }
}

fn phone_numbers(object: &Map<String, Value>, errors: &mut FieldErrors) -> Option<Vec<PhoneNumber>> {
    let items = match object.get("phoneNumbers") {
        None | Some(Value::Null) => {
            errors.insert("phoneNumbers".to_string(), REQUIRED.to_string());
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.insert("phoneNumbers".to_string(), "must be an array".to_string());
            return None;
        }
    };

    let mut numbers = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(entry) = item.as_object() else {
            errors.insert(
                format!("phoneNumbers[{}]", i),
                "must be an object with number and type".to_string(),
            );
            continue;
        };

        let number = entry.get("number").and_then(Value::as_str);
        let kind = entry.get("type").and_then(Value::as_str);
        if number.is_none() {
            errors.insert(format!("phoneNumbers[{}].number", i), "must be a string".to_string());
        }
        if kind.is_none() {
            errors.insert(format!("phoneNumbers[{}].type", i), "must be a string".to_string());
        }
        if let (Some(number), Some(kind)) = (number, kind) {
            numbers.push(PhoneNumber::new(number, kind));
        }
    }

    Some(numbers)
}
