//! Session profile returned by the remote authentication service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// Attributes of a signed-in user.
///
/// Deserialized from the `data` object of a successful sign-in response.
/// Unknown fields are ignored.
///
/// - Tokens, `account`, `name`, `student_id` and `grade` must be present and non-null.
/// - The descriptive attributes (`nickname`, `gender`, `major`, `minor`,
///   `phone_number`) must be present but may be `null`.
/// - `kakao_account` may be absent or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    pub access_token: String,
    pub refresh_token: String,
    pub account: String,
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub nickname: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub gender: Option<String>,
    /// Any JSON number; strings are rejected.
    pub grade: Number,
    #[serde(deserialize_with = "nullable")]
    pub major: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub minor: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub phone_number: Option<String>,
    pub student_id: String,
    #[serde(default)]
    pub kakao_account: Option<String>,
}

// With `deserialize_with` the key stays mandatory; only `null` maps to `None`.
fn nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// Decimal form of a grade. Integral floats drop the fraction, so `3.0` becomes `"3"`.
pub fn grade_text(grade: &Number) -> String {
    match grade.as_f64() {
        Some(value) if grade.is_f64() && value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", value as i64)
        }
        _ => grade.to_string(),
    }
}

/// Envelope of a successful `POST /auth/sign-in` response.
#[derive(Debug, Deserialize)]
pub struct SignInResponse {
    pub data: SessionProfile,
}

/// Storage key of one session profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    AccessToken,
    RefreshToken,
    Name,
    Account,
    Gender,
    Grade,
    KakaoAccount,
    Major,
    Minor,
    Nickname,
    PhoneNumber,
    StudentId,
}

impl SessionKey {
    /// All keys, in write order.
    pub const ALL: [SessionKey; 12] = [
        SessionKey::AccessToken,
        SessionKey::RefreshToken,
        SessionKey::Name,
        SessionKey::Account,
        SessionKey::Gender,
        SessionKey::Grade,
        SessionKey::KakaoAccount,
        SessionKey::Major,
        SessionKey::Minor,
        SessionKey::Nickname,
        SessionKey::PhoneNumber,
        SessionKey::StudentId,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionKey::AccessToken => "accessToken",
            SessionKey::RefreshToken => "refreshToken",
            SessionKey::Name => "name",
            SessionKey::Account => "account",
            SessionKey::Gender => "gender",
            SessionKey::Grade => "grade",
            SessionKey::KakaoAccount => "kakaoAccount",
            SessionKey::Major => "major",
            SessionKey::Minor => "minor",
            SessionKey::Nickname => "nickname",
            SessionKey::PhoneNumber => "phoneNumber",
            SessionKey::StudentId => "studentId",
        }
    }
}

impl SessionProfile {
    /// Returns the string value stored under `key`.
    ///
    /// `grade` is rendered by [`grade_text`]. `None` for a null or missing
    /// optional attribute, whose key is then left out of storage.
    pub fn value_of(&self, key: SessionKey) -> Option<String> {
        match key {
            SessionKey::AccessToken => Some(self.access_token.clone()),
            SessionKey::RefreshToken => Some(self.refresh_token.clone()),
            SessionKey::Name => Some(self.name.clone()),
            SessionKey::Account => Some(self.account.clone()),
            SessionKey::Gender => self.gender.clone(),
            SessionKey::Grade => Some(grade_text(&self.grade)),
            SessionKey::KakaoAccount => self.kakao_account.clone(),
            SessionKey::Major => self.major.clone(),
            SessionKey::Minor => self.minor.clone(),
            SessionKey::Nickname => self.nickname.clone(),
            SessionKey::PhoneNumber => self.phone_number.clone(),
            SessionKey::StudentId => Some(self.student_id.clone()),
        }
    }

    /// Rebuilds a profile from stored values.
    ///
    /// Returns `None` if a required key is absent or `grade` is not a number.
    pub fn from_stored(mut lookup: impl FnMut(SessionKey) -> Option<String>) -> Option<Self> {
        Some(Self {
            access_token: lookup(SessionKey::AccessToken)?,
            refresh_token: lookup(SessionKey::RefreshToken)?,
            account: lookup(SessionKey::Account)?,
            name: lookup(SessionKey::Name)?,
            nickname: lookup(SessionKey::Nickname),
            gender: lookup(SessionKey::Gender),
            grade: lookup(SessionKey::Grade)?.parse().ok()?,
            major: lookup(SessionKey::Major),
            minor: lookup(SessionKey::Minor),
            phone_number: lookup(SessionKey::PhoneNumber),
            student_id: lookup(SessionKey::StudentId)?,
            kakao_account: lookup(SessionKey::KakaoAccount),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn payload() -> serde_json::Value {
        json!({
            "data": {
                "accessToken": "access-1",
                "refreshToken": "refresh-1",
                "account": "student01",
                "gender": "F",
                "grade": 3,
                "kakaoAccount": "kakao-77",
                "major": "Computer Science",
                "minor": "Mathematics",
                "name": "Kim Minji",
                "nickname": "minji",
                "phoneNumber": "010-1234-5678",
                "studentId": "20231234",
                "role": "STUDENT"
            }
        })
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let response: SignInResponse = serde_json::from_value(payload()).unwrap();

        assert_eq!(response.data.account, "student01");
        assert_eq!(response.data.grade, Number::from(3));
        assert_eq!(response.data.kakao_account.as_deref(), Some("kakao-77"));
    }

    #[test]
    fn test_deserialize_without_kakao_account() {
        let mut value = payload();
        value["data"].as_object_mut().unwrap().remove("kakaoAccount");

        let response: SignInResponse = serde_json::from_value(value).unwrap();

        assert!(response.data.kakao_account.is_none());
    }

    #[test]
    fn test_deserialize_rejects_missing_required_field() {
        let mut value = payload();
        value["data"].as_object_mut().unwrap().remove("studentId");

        assert!(serde_json::from_value::<SignInResponse>(value).is_err());
    }

    #[test]
    fn test_null_minor_is_accepted_and_not_stored() {
        let mut value = payload();
        value["data"]["minor"] = serde_json::Value::Null;

        let response: SignInResponse = serde_json::from_value(value).unwrap();

        assert!(response.data.minor.is_none());
        assert_eq!(response.data.value_of(SessionKey::Minor), None);
        assert_eq!(response.data.major.as_deref(), Some("Computer Science"));
    }

    #[test]
    fn test_descriptive_fields_accept_null() {
        let mut value = payload();
        for field in ["nickname", "gender", "major", "minor", "phoneNumber"] {
            value["data"][field] = serde_json::Value::Null;
        }

        let response: SignInResponse = serde_json::from_value(value).unwrap();

        assert!(response.data.nickname.is_none());
        assert!(response.data.phone_number.is_none());
    }

    #[test]
    fn test_missing_nullable_field_is_rejected() {
        let mut value = payload();
        value["data"].as_object_mut().unwrap().remove("minor");

        assert!(serde_json::from_value::<SignInResponse>(value).is_err());
    }

    #[test]
    fn test_null_required_field_is_rejected() {
        for field in ["accessToken", "refreshToken", "account", "grade"] {
            let mut value = payload();
            value["data"][field] = serde_json::Value::Null;

            assert!(
                serde_json::from_value::<SignInResponse>(value).is_err(),
                "{field} accepted null"
            );
        }
    }

    #[test]
    fn test_fractional_grade_values() {
        let mut value = payload();
        value["data"]["grade"] = json!(3.0);
        let response: SignInResponse = serde_json::from_value(value).unwrap();
        assert_eq!(
            response.data.value_of(SessionKey::Grade).as_deref(),
            Some("3")
        );

        let mut value = payload();
        value["data"]["grade"] = json!(2.5);
        let response: SignInResponse = serde_json::from_value(value).unwrap();
        assert_eq!(
            response.data.value_of(SessionKey::Grade).as_deref(),
            Some("2.5")
        );
    }

    #[test]
    fn test_string_grade_is_rejected() {
        let mut value = payload();
        value["data"]["grade"] = json!("3");

        assert!(serde_json::from_value::<SignInResponse>(value).is_err());
    }

    #[test]
    fn test_grade_is_written_as_decimal_string() {
        let response: SignInResponse = serde_json::from_value(payload()).unwrap();

        assert_eq!(
            response.data.value_of(SessionKey::Grade).as_deref(),
            Some("3")
        );
    }

    #[test]
    fn test_stored_values_rebuild_profile() {
        let profile: SignInResponse = serde_json::from_value(payload()).unwrap();
        let stored: HashMap<SessionKey, String> = SessionKey::ALL
            .iter()
            .filter_map(|key| profile.data.value_of(*key).map(|v| (*key, v)))
            .collect();

        let rebuilt = SessionProfile::from_stored(|key| stored.get(&key).cloned());

        assert_eq!(rebuilt, Some(profile.data));
    }

    #[test]
    fn test_non_numeric_grade_is_rejected() {
        let rebuilt = SessionProfile::from_stored(|key| match key {
            SessionKey::Grade => Some("third".to_string()),
            other => Some(other.as_str().to_string()),
        });

        assert!(rebuilt.is_none());
    }

    #[test]
    fn test_key_names_are_unique() {
        let mut names: Vec<_> = SessionKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), 12);
    }
}
