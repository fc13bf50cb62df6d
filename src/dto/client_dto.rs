use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClientPayload {
    #[validate(length(min = 1))]
    pub legal_name: String,
    #[validate(length(min = 1))]
    pub tax_id: String,
    pub municipal_registration: String,
    pub tax_regime: String,
    pub legal_nature: String,
    pub company_size: String,
    pub responsible_name: String,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub departure_date: Option<String>,
}

/// Patch payload: only the fields present in the request body overwrite the
/// stored record.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateClientPayload {
    #[validate(length(min = 1))]
    pub legal_name: Option<String>,
    #[validate(length(min = 1))]
    pub tax_id: Option<String>,
    pub municipal_registration: Option<String>,
    pub tax_regime: Option<String>,
    pub legal_nature: Option<String>,
    pub company_size: Option<String>,
    pub responsible_name: Option<String>,
    pub phones: Option<Vec<String>>,
    pub emails: Option<Vec<String>>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub departure_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_patch_fields_deserialize_to_none() {
        let patch: UpdateClientPayload =
            serde_json::from_str(r#"{"emails":["billing@acme.com"]}"#).unwrap();
        assert_eq!(patch.emails.as_deref(), Some(&["billing@acme.com".to_string()][..]));
        assert!(patch.legal_name.is_none());
        assert!(patch.status.is_none());
        assert!(patch.departure_date.is_none());
    }
}
