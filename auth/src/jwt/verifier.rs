use std::collections::HashSet;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::TokenIdentity;
use super::errors::JwtError;
use crate::secret::SecretProvider;

/// HMAC-SHA2 family accepted for signatures.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Only the header field needed for the algorithm check.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Claims as presented, before the identity is checked.
#[derive(Deserialize)]
struct PresentedClaims {
    #[serde(default)]
    user_id: Option<serde_json::Value>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    exp: Option<serde_json::Value>,
}

/// Validates presented tokens and extracts the bound identity.
///
/// Checks run in a fixed order: structure, algorithm family, signature, expiry, identity.
/// The algorithm is read from the raw header before any signature work so that `none`
/// and asymmetric algorithms can never reach the MAC comparison.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &SecretProvider) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.key()),
            validation,
        }
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `MalformedToken` - Not three base64url segments, or header/payload is not valid JSON
    /// * `UnexpectedAlgorithm` - Header names anything outside HS256/HS384/HS512
    /// * `BadSignature` - Signature does not match this process's key
    /// * `Expired` - `exp` is present and at or before the current time
    /// * `MissingIdentity` - `user_id` is absent or not numeric
    pub fn verify(&self, token: &str) -> Result<TokenIdentity, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenIdentity, JwtError> {
        let (algorithm, claims) = Self::parse(token)?;
        if !ACCEPTED_ALGORITHMS.contains(&algorithm) {
            return Err(JwtError::UnexpectedAlgorithm(format!("{:?}", algorithm)));
        }

        decode::<serde_json::Value>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::BadSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    JwtError::UnexpectedAlgorithm(e.to_string())
                }
                _ => JwtError::MalformedToken(e.to_string()),
            },
        )?;

        // No `exp` means the token never expires.
        if let Some(value) = &claims.exp {
            let exp = truncated_integer(value).ok_or_else(|| {
                JwtError::MalformedToken(format!("exp is not a number: {}", value))
            })?;
            // A token stops being valid at the second named by `exp`.
            if exp <= now.timestamp() {
                return Err(JwtError::Expired);
            }
        }

        let user_id = claims
            .user_id
            .as_ref()
            .and_then(truncated_integer)
            .ok_or(JwtError::MissingIdentity)?;

        Ok(TokenIdentity {
            user_id,
            email: claims.email.unwrap_or_default(),
        })
    }

    /// Decode header and payload without touching the signature.
    fn parse(token: &str) -> Result<(Algorithm, PresentedClaims), JwtError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(_), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(JwtError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ));
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|e| JwtError::MalformedToken(format!("header is not base64url: {}", e)))?;
        let header: RawHeader = serde_json::from_slice(&bytes)
            .map_err(|e| JwtError::MalformedToken(format!("header is not valid JSON: {}", e)))?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| JwtError::MalformedToken(format!("payload is not base64url: {}", e)))?;
        let claims: PresentedClaims = serde_json::from_slice(&bytes)
            .map_err(|e| JwtError::MalformedToken(format!("payload is not valid JSON: {}", e)))?;

        let algorithm = Algorithm::from_str(&header.alg)
            .map_err(|_| JwtError::UnexpectedAlgorithm(header.alg))?;

        Ok((algorithm, claims))
    }
}

/// JSON numbers are accepted whether they arrive as integers or floats.
fn truncated_integer(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|id| id.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::encode;
    use jsonwebtoken::EncodingKey;
    use jsonwebtoken::Header;
    use serde_json::json;

    use super::*;
    use crate::jwt::TokenIssuer;

    const SECRET: &str = "verifier_test_secret";

    fn secret() -> SecretProvider {
        SecretProvider::new(SECRET)
    }

    fn sign(header: Header, payload: &serde_json::Value) -> String {
        encode(&header, payload, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }

    fn future_exp() -> i64 {
        (Utc::now() + Duration::hours(1)).timestamp()
    }

    fn replace_header(token: &str, header_json: &str) -> String {
        let rest = token.split_once('.').map(|(_, rest)| rest).unwrap();
        format!("{}.{}", URL_SAFE_NO_PAD.encode(header_json), rest)
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let issuer = TokenIssuer::new(&secret());
        let verifier = TokenVerifier::new(&secret());

        let token = issuer.issue(42, "a@x.com").unwrap();
        let identity = verifier.verify(&token).expect("Token should verify");

        assert_eq!(
            identity,
            TokenIdentity {
                user_id: 42,
                email: "a@x.com".to_string()
            }
        );
    }

    #[test]
    fn test_verify_just_before_expiry() {
        let issuer = TokenIssuer::new(&secret());
        let verifier = TokenVerifier::new(&secret());
        let now = Utc::now();

        let token = issuer.issue_at(3, "a@x.com", now).unwrap();
        let almost = now + Duration::hours(24) - Duration::seconds(1);

        assert!(verifier.verify_at(&token, almost).is_ok());
        assert_eq!(
            verifier.verify_at(&token, now + Duration::hours(24)),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_wrong_key_is_bad_signature() {
        let issuer = TokenIssuer::new(&SecretProvider::new("key_one"));
        let verifier = TokenVerifier::new(&SecretProvider::new("key_two"));

        let token = issuer.issue(1, "a@x.com").unwrap();

        assert_eq!(verifier.verify(&token), Err(JwtError::BadSignature));
    }

    #[test]
    fn test_asymmetric_algorithm_is_rejected() {
        let issuer = TokenIssuer::new(&secret());
        let verifier = TokenVerifier::new(&secret());

        let token = issuer.issue(1, "a@x.com").unwrap();
        let forged = replace_header(&token, r#"{"alg":"RS256","typ":"JWT"}"#);

        assert!(matches!(
            verifier.verify(&forged),
            Err(JwtError::UnexpectedAlgorithm(_))
        ));
    }

    #[test]
    fn test_none_algorithm_is_rejected() {
        let issuer = TokenIssuer::new(&secret());
        let verifier = TokenVerifier::new(&secret());

        let token = issuer.issue(1, "a@x.com").unwrap();
        let forged = replace_header(&token, r#"{"alg":"none","typ":"JWT"}"#);
        let unsigned = format!("{}.", forged.rsplit_once('.').unwrap().0);

        assert_eq!(
            verifier.verify(&unsigned),
            Err(JwtError::UnexpectedAlgorithm("none".to_string()))
        );
    }

    #[test]
    fn test_other_hmac_variants_are_accepted() {
        let verifier = TokenVerifier::new(&secret());
        let token = sign(
            Header::new(Algorithm::HS512),
            &json!({"user_id": 9, "email": "a@x.com", "exp": future_exp()}),
        );

        assert_eq!(verifier.verify(&token).unwrap().user_id, 9);
    }

    #[test]
    fn test_past_exp_is_expired() {
        let issuer = TokenIssuer::new(&secret());
        let verifier = TokenVerifier::new(&secret());

        let token = issuer
            .issue_at(1, "a@x.com", Utc::now() - Duration::hours(25))
            .unwrap();

        assert_eq!(verifier.verify(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_malformed_tokens() {
        let verifier = TokenVerifier::new(&secret());

        for token in ["", "invalid.token.here", "only.two", "a.b.c.d"] {
            assert!(
                matches!(verifier.verify(token), Err(JwtError::MalformedToken(_))),
                "expected MalformedToken for {:?}",
                token
            );
        }
    }

    #[test]
    fn test_missing_exp_never_expires() {
        let verifier = TokenVerifier::new(&secret());
        let token = sign(Header::default(), &json!({"user_id": 5, "email": "a@x.com"}));

        assert_eq!(verifier.verify(&token).unwrap().user_id, 5);
    }

    #[test]
    fn test_float_exp_is_accepted() {
        let verifier = TokenVerifier::new(&secret());
        let exp = future_exp() as f64 + 0.5;
        let token = sign(
            Header::default(),
            &json!({"user_id": 5, "email": "a@x.com", "exp": exp}),
        );

        assert_eq!(verifier.verify(&token).unwrap().user_id, 5);

        let past = sign(
            Header::default(),
            &json!({"user_id": 5, "email": "a@x.com", "exp": 1000.5}),
        );
        assert_eq!(verifier.verify(&past), Err(JwtError::Expired));
    }

    #[test]
    fn test_non_numeric_exp_is_malformed() {
        let verifier = TokenVerifier::new(&secret());
        let token = sign(
            Header::default(),
            &json!({"user_id": 5, "email": "a@x.com", "exp": "tomorrow"}),
        );

        assert!(matches!(
            verifier.verify(&token),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_broken_payload_is_malformed_before_signature() {
        let issuer = TokenIssuer::new(&SecretProvider::new("someone_else"));
        let verifier = TokenVerifier::new(&secret());

        let token = issuer.issue(1, "a@x.com").unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let garbage = format!("{}.!!!notbase64.{}", parts[0], parts[2]);
        assert!(matches!(
            verifier.verify(&garbage),
            Err(JwtError::MalformedToken(_))
        ));

        let not_json = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode("not json"),
            parts[2]
        );
        assert!(matches!(
            verifier.verify(&not_json),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_missing_user_id() {
        let verifier = TokenVerifier::new(&secret());
        let token = sign(
            Header::default(),
            &json!({"email": "a@x.com", "exp": future_exp()}),
        );

        assert_eq!(verifier.verify(&token), Err(JwtError::MissingIdentity));
    }

    #[test]
    fn test_non_numeric_user_id() {
        let verifier = TokenVerifier::new(&secret());
        let token = sign(
            Header::default(),
            &json!({"user_id": "42", "email": "a@x.com", "exp": future_exp()}),
        );

        assert_eq!(verifier.verify(&token), Err(JwtError::MissingIdentity));
    }

    #[test]
    fn test_float_user_id_is_truncated() {
        let verifier = TokenVerifier::new(&secret());
        let token = sign(
            Header::default(),
            &json!({"user_id": 12.0, "email": "a@x.com", "exp": future_exp()}),
        );

        assert_eq!(verifier.verify(&token).unwrap().user_id, 12);
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let issuer = TokenIssuer::new(&secret());
        let verifier = TokenVerifier::new(&secret());

        let token = issuer.issue(1, "a@x.com").unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let payload = URL_SAFE_NO_PAD.encode(
            json!({"user_id": 2, "email": "a@x.com", "exp": future_exp()}).to_string(),
        );
        let tampered = format!("{}.{}.{}", parts[0], payload, parts[2]);

        assert_eq!(verifier.verify(&tampered), Err(JwtError::BadSignature));
    }
}
