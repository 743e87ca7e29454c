//! Parsed statement data model.

use serde::{Deserialize, Serialize};

/// Sentinel for a field that could not be extracted. Never `null`/absent.
pub const NOT_FOUND: &str = "N/A";

/// Sentinel for an undetected issuer.
pub const UNKNOWN_ISSUER: &str = "Unknown";

/// Canonical extraction targets. Every parsed statement carries all four,
/// matched or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    CardholderName,
    PaymentDueDate,
    TotalDue,
    Gstin,
}

impl FieldKey {
    pub const ALL: [FieldKey; 4] = [
        FieldKey::CardholderName,
        FieldKey::PaymentDueDate,
        FieldKey::TotalDue,
        FieldKey::Gstin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::CardholderName => "cardholder_name",
            FieldKey::PaymentDueDate => "payment_due_date",
            FieldKey::TotalDue => "total_due",
            FieldKey::Gstin => "gstin",
        }
    }
}

/// Normalized record extracted from one statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub issuer: String,
    pub cardholder_name: String,
    pub payment_due_date: String,
    pub total_due: String,
    pub gstin: String,
}

impl ParsedStatement {
    /// A record for the given issuer with every field at the sentinel.
    pub fn unmatched(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            cardholder_name: NOT_FOUND.to_string(),
            payment_due_date: NOT_FOUND.to_string(),
            total_due: NOT_FOUND.to_string(),
            gstin: NOT_FOUND.to_string(),
        }
    }

    pub fn set(&mut self, key: FieldKey, value: String) {
        match key {
            FieldKey::CardholderName => self.cardholder_name = value,
            FieldKey::PaymentDueDate => self.payment_due_date = value,
            FieldKey::TotalDue => self.total_due = value,
            FieldKey::Gstin => self.gstin = value,
        }
    }

    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::CardholderName => &self.cardholder_name,
            FieldKey::PaymentDueDate => &self.payment_due_date,
            FieldKey::TotalDue => &self.total_due,
            FieldKey::Gstin => &self.gstin,
        }
    }

    /// `(display key, value)` pairs in stable render order, issuer first.
    pub fn display_fields(&self) -> Vec<(String, &str)> {
        let mut fields = vec![("Issuer".to_string(), self.issuer.as_str())];
        for key in FieldKey::ALL {
            fields.push((title_case(key.as_str()), self.get(key)));
        }
        fields
    }
}

/// `payment_due_date` -> `Payment Due Date`.
fn title_case(key: &str) -> String {
    key.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_present_in_json() {
        let record = ParsedStatement::unmatched(UNKNOWN_ISSUER);
        let json = serde_json::to_value(&record).unwrap();
        for key in FieldKey::ALL {
            assert_eq!(json[key.as_str()], NOT_FOUND);
        }
        assert_eq!(json["issuer"], UNKNOWN_ISSUER);
    }

    #[test]
    fn test_display_fields_title_case() {
        let mut record = ParsedStatement::unmatched("HDFC");
        record.set(FieldKey::TotalDue, "1234.56".to_string());
        let fields = record.display_fields();
        assert_eq!(fields[0], ("Issuer".to_string(), "HDFC"));
        assert_eq!(fields[1].0, "Cardholder Name");
        assert_eq!(fields[2].0, "Payment Due Date");
        assert_eq!(fields[3], ("Total Due".to_string(), "1234.56"));
        assert_eq!(fields[4].0, "Gstin");
    }
}
