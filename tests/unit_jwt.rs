use chrono::{Duration, Utc};
use fitrec_auth::{Claims, create_access_token, create_identity, sign_claims, verify_token};
use fitrec_config::JwtConfig;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let result = create_access_token(user_id, 1, &jwt_config);

    assert!(result.is_ok());
    let token = result.unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_verify_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, 2, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.rol, 2);
    assert_eq!(claims.exp - claims.iat, 3600);
    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = get_test_jwt_config();

    let result = verify_token("invalid.token.here", &jwt_config);

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().status.as_u16(), 401);
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(Uuid::new_v4(), 0, &jwt_config).unwrap();

    let other_config = JwtConfig {
        secret: "different_secret".to_string(),
        ..get_test_jwt_config()
    };

    assert!(verify_token(&token, &other_config).is_err());
}

#[test]
fn test_verify_expired_token() {
    let jwt_config = get_test_jwt_config();
    let issued = Utc::now() - Duration::days(3);
    let claims = Claims::new(Uuid::new_v4(), 0, issued, Duration::days(1));
    let token = sign_claims(&claims, &jwt_config).unwrap();

    let err = verify_token(&token, &jwt_config).unwrap_err();
    assert_eq!(err.status.as_u16(), 401);
    assert_eq!(err.client_message(), "Invalid or expired token");
}

#[test]
fn test_identity_lasts_one_day() {
    let now = Utc::now();
    let claims = create_identity(Uuid::new_v4(), 5, now);

    assert_eq!(claims.iat, now.timestamp());
    assert_eq!(claims.exp, (now + Duration::days(1)).timestamp());

    let jwt_config = get_test_jwt_config();
    let token = sign_claims(&claims, &jwt_config).unwrap();
    assert_eq!(verify_token(&token, &jwt_config).unwrap(), claims);
}
