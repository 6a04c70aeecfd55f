use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Each field is independently optional; at least one must be present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_request_uses_camel_case_fields() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"firstName":"Jane","lastName":"Doe","email":"jane@x.com","password":"secret123"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Jane");
        assert_eq!(req.last_name, "Doe");
    }

    #[test]
    fn update_profile_fields_are_independently_optional() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"email":"new@x.com"}"#).unwrap();
        assert!(req.first_name.is_none());
        assert!(req.last_name.is_none());
        assert_eq!(req.email.as_deref(), Some("new@x.com"));

        let empty: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.first_name.is_none() && empty.last_name.is_none() && empty.email.is_none());
    }
}
