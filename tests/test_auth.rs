use chrono::Utc;
use uuid::Uuid;

use katha_vault_be::auth::{AuthClaims, generate_jwt};
use katha_vault_be::models::{User, user::Role};

fn test_user(role: Role) -> User {
    User {
        id: Uuid::new_v4(),
        username: "mira".into(),
        display_name: Some("Mira".into()),
        role,
        created_at: Utc::now(),
    }
}

#[test]
fn test_token_round_trip() {
    // The secret is read lazily on first use.
    unsafe { std::env::set_var("JWT_SECRET", "test-secret") };

    let user = test_user(Role::Admin);
    let token = generate_jwt(&user).expect("token should be minted");

    let claims = AuthClaims::from_token(&token).expect("token should verify");
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.role(), Role::Admin);
    assert!(claims.require_admin().is_ok());

    let reader = test_user(Role::Reader);
    let token = generate_jwt(&reader).unwrap();
    let claims = AuthClaims::from_token(&token).unwrap();
    assert_eq!(claims.role(), Role::Reader);
    assert!(claims.require_admin().is_err());
}

#[test]
fn test_garbage_token_rejected() {
    unsafe { std::env::set_var("JWT_SECRET", "test-secret") };

    assert!(AuthClaims::from_token("not-a-token").is_err());
    assert!(AuthClaims::from_token("").is_err());
}
