use std::path::Path;

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;

use super::{Claims, IdentityError, IdentityVerifier, VerifiedIdentity};
use crate::config::IdentityConfig;

/// Issuer prefix of provider ID tokens; the project id completes it.
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Credentials file contents: the provider project and its token signing key.
#[derive(Debug, Deserialize)]
struct Credentials {
    project_id: Option<String>,
    /// PEM-encoded RSA public key.
    public_key: String,
}

/// Verifies ID tokens locally with `jsonwebtoken`.
///
/// HS256 with a shared secret when one is configured, RS256 with the public
/// key from the credentials file otherwise. Expiry is always checked; with a
/// project id the audience and issuer must match it too.
pub struct JwtIdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn from_config(config: &IdentityConfig) -> Result<Self, IdentityError> {
        match config.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Ok(Self::hs256(secret, config.project_id.as_deref())),
            None => Self::from_credentials_file(&config.credentials_file, config.project_id.as_deref()),
        }
    }

    pub fn hs256(secret: &str, project_id: Option<&str>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Self::validation(Algorithm::HS256, project_id),
        }
    }

    pub fn from_credentials_file(path: &Path, project_id: Option<&str>) -> Result<Self, IdentityError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            IdentityError::Configuration(format!("cannot read credentials file {}: {}", path.display(), e))
        })?;
        let credentials: Credentials = serde_json::from_str(&raw)
            .map_err(|e| IdentityError::Configuration(format!("invalid credentials file: {}", e)))?;
        let key = DecodingKey::from_rsa_pem(credentials.public_key.as_bytes())
            .map_err(|e| IdentityError::Configuration(format!("invalid public key: {}", e)))?;

        let project_id = project_id.or(credentials.project_id.as_deref());
        Ok(Self {
            key,
            validation: Self::validation(Algorithm::RS256, project_id),
        })
    }

    fn validation(algorithm: Algorithm, project_id: Option<&str>) -> Validation {
        let mut validation = Validation::new(algorithm);
        match project_id.filter(|p| !p.is_empty()) {
            Some(project) => {
                validation.set_audience(&[project]);
                validation.set_issuer(&[format!("{}{}", ISSUER_PREFIX, project)]);
            }
            None => validation.validate_aud = false,
        }
        validation
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;
        let uid = data.claims.uid().ok_or(IdentityError::MissingSubject)?.to_string();
        Ok(VerifiedIdentity {
            uid,
            email: data.claims.email,
        })
    }
}

/// Signs `claims` with HS256. Development and test tokens only.
pub fn sign_hs256(claims: &Claims, secret: &str) -> Result<String, IdentityError> {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| IdentityError::Configuration(format!("JWT generation error: {}", e)))
}
