//! Issues and checks the bearer tokens that clients send with each request.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, UserID};

/// How long a newly issued token stays valid unless configured otherwise.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::days(7);

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Claims {
    /// The ID of the user the token was issued to.
    sub: String,
    /// When the token was issued, as a unix timestamp.
    iat: i64,
    /// When the token expires, as a unix timestamp.
    exp: i64,
}

/// The keys for signing and verifying tokens, derived from one secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenKeys {
    /// Create the signing and verifying keys from `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Issue a token for `user_id` that expires after `duration`.
///
/// # Errors
/// Returns [Error::TokenCreation] if the token could not be signed.
pub fn create_token(
    user_id: UserID,
    duration: Duration,
    keys: &TokenKeys,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.unix_timestamp(),
        exp: (now + duration).unix_timestamp(),
    };

    encode(&Header::default(), &claims, &keys.encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Check the signature and expiry of `token` and return the user it was issued to.
///
/// # Errors
/// Returns [Error::InvalidToken] if the token is malformed, was signed with
/// another key, or has expired.
pub fn decode_token(token: &str, keys: &TokenKeys) -> Result<UserID, Error> {
    let token_data = decode::<Claims>(token, &keys.decoding_key, &Validation::default())
        .map_err(|error| {
            tracing::debug!("Rejected token: {error}");
            Error::InvalidToken
        })?;

    token_data
        .claims
        .sub
        .parse()
        .map(UserID::new)
        .map_err(|_| Error::InvalidToken)
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use crate::{
        Error, UserID,
        auth::token::{DEFAULT_TOKEN_DURATION, TokenKeys, create_token, decode_token},
    };

    #[test]
    fn decode_gives_user_id_from_create() {
        let keys = TokenKeys::new("foobar");
        let user_id = UserID::new(7);

        let token = create_token(user_id, DEFAULT_TOKEN_DURATION, &keys).unwrap();

        assert_eq!(decode_token(&token, &keys), Ok(user_id));
    }

    #[test]
    fn decode_fails_for_expired_token() {
        let keys = TokenKeys::new("foobar");
        let token = create_token(UserID::new(7), Duration::hours(-2), &keys).unwrap();

        assert_eq!(decode_token(&token, &keys), Err(Error::InvalidToken));
    }

    #[test]
    fn decode_fails_for_token_signed_with_other_secret() {
        let token = create_token(
            UserID::new(7),
            DEFAULT_TOKEN_DURATION,
            &TokenKeys::new("foobar"),
        )
        .unwrap();

        assert_eq!(
            decode_token(&token, &TokenKeys::new("bazqux")),
            Err(Error::InvalidToken)
        );
    }

    #[test]
    fn decode_fails_for_garbage() {
        let keys = TokenKeys::new("foobar");

        assert_eq!(decode_token("FOOBAR", &keys), Err(Error::InvalidToken));
    }
}
