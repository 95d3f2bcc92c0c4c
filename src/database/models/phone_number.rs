use serde::{Deserialize, Serialize};

/// A single contact number on a practice, e.g. `{"number": "555-0100", "type": "main"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl PhoneNumber {
    pub fn new(number: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            kind: kind.into(),
        }
    }
}

/// Serialize phone numbers into the text column form.
///
/// `decode(&encode(xs)?)? == xs` for every sequence.
pub fn encode(numbers: &[PhoneNumber]) -> Result<String, serde_json::Error> {
    serde_json::to_string(numbers)
}

/// Materialize the text column form back into phone numbers.
pub fn decode(stored: &str) -> Result<Vec<PhoneNumber>, serde_json::Error> {
    serde_json::from_str(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_order_and_values() {
        let numbers = vec![
            PhoneNumber::new("123-456-7890", "main"),
            PhoneNumber::new("987-654-3210", "fax"),
            PhoneNumber::new("", "other"),
            PhoneNumber::new("+44 20 7946 0958", "mobile \"uk\""),
        ];

        let stored = encode(&numbers).unwrap();
        assert_eq!(decode(&stored).unwrap(), numbers);
    }

    #[test]
    fn empty_sequence_round_trips() {
        let stored = encode(&[]).unwrap();
        assert_eq!(stored, "[]");
        assert!(decode(&stored).unwrap().is_empty());
    }

    #[test]
    fn stored_form_uses_type_key() {
        let stored = encode(&[PhoneNumber::new("222-333-4444", "main")]).unwrap();
        assert_eq!(stored, r#"[{"number":"222-333-4444","type":"main"}]"#);
    }

    #[test]
    fn malformed_text_fails_to_decode() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"[{"number": 5}]"#).is_err());
    }
}
