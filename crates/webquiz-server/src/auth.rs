use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use webquiz_core::AppError;

/// Login tokens expire two hours after issuance.
const TOKEN_TTL_HOURS: i64 = 2;

/// bcrypt cost factor for password hashing.
pub const BCRYPT_COST: u32 = 10;

/// Claims embedded in a login token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: i32,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies login tokens with a server-held HMAC secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
        }
    }

    /// Issue a signed bearer token embedding the user's id and email.
    pub fn issue(&self, user_id: i32, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            id: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Token(e.to_string()))
    }

    /// Decode and validate a token, returning its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Token(e.to_string()))
    }
}
