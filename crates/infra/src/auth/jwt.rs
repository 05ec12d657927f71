//! RS256 JWT minting for keypair authentication.

use chrono::{DateTime, Utc};
use coldline_domain::{ClientConfig, ClientError, Fingerprint, Result};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

#[derive(Serialize)]
struct Claims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
}

/// Mint a fresh JWT for `config`, valid from now until `config.jwt_ttl_secs`
/// later.
pub fn mint(config: &ClientConfig, fingerprint: &Fingerprint) -> Result<(String, i64)> {
    mint_at(config, fingerprint, Utc::now())
}

/// [`mint`] with an explicit "now", so tests can pin `iat`/`exp` and assert
/// token rotation deterministically.
pub fn mint_at(config: &ClientConfig, fingerprint: &Fingerprint, now: DateTime<Utc>) -> Result<(String, i64)> {
    let org = config.organization().to_ascii_uppercase();
    let account = config.account().to_ascii_uppercase();
    let sub = format!("{org}-{account}.{}", config.user());
    let iss = format!("{sub}.{fingerprint}");

    let iat = now.timestamp();
    #[allow(clippy::cast_possible_wrap)]
    let exp = iat + config.jwt_ttl_secs() as i64;
    let claims = Claims { iss, sub, iat, exp };

    let encoding_key = EncodingKey::from_rsa_pem(config.private_key_pem().as_bytes())
        .map_err(|e| ClientError::Config(format!("unparseable private key PEM: {e}")))?;

    let token = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?;
    Ok((token, exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY_PEM: &str = include_str!("../../tests/fixtures/test_key.pem");

    fn sample_config() -> ClientConfig {
        ClientConfig::builder(
            "https://example.snowflakecomputing.com",
            TEST_KEY_PEM,
            "org",
            "acct",
            "user",
            "wh",
        )
        .build()
        .unwrap()
    }

    #[test]
    fn claims_use_upper_cased_org_and_account() {
        let config = sample_config();
        let fingerprint = Fingerprint::new("SHA256:abc");
        let now = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap().with_timezone(&Utc);
        let (token, exp) = mint_at(&config, &fingerprint, now).unwrap();

        assert_eq!(exp, now.timestamp() + config.jwt_ttl_secs() as i64);

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
    }
}
