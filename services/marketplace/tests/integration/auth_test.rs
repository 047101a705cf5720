use estate_auth_types::identity::JwtSecret;
use estate_auth_types::token::validate_access_token;
use estate_domain::property::PropertyType;
use estate_domain::user::{Preferences, PriceRange};
use estate_marketplace::error::MarketplaceError;
use estate_marketplace::usecase::account::UpdatePreferencesUseCase;
use estate_marketplace::usecase::auth::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};

use crate::helpers::InMemoryStore;

const SECRET: &str = "integration-test-secret";

fn register(store: &InMemoryStore) -> RegisterUseCase<InMemoryStore> {
    RegisterUseCase {
        users: store.clone(),
        jwt_secret: JwtSecret::new(SECRET),
    }
}

fn input(name: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        name: Some(name.to_owned()),
        email: Some(email.to_owned()),
        password: Some(password.to_owned()),
    }
}

#[tokio::test]
async fn should_register_then_login_with_same_identity() {
    let store = InMemoryStore::default();
    let registered = register(&store)
        .execute(input("Meera", "meera@example.com", "s3cret!"))
        .await
        .unwrap();

    let session = LoginUseCase {
        users: store.clone(),
        jwt_secret: JwtSecret::new(SECRET),
    }
    .execute(LoginInput {
        email: Some(" MEERA@example.com".to_owned()),
        password: Some("s3cret!".to_owned()),
    })
    .await
    .unwrap();

    assert_eq!(session.user.id, registered.user.id);
    let claims = validate_access_token(&session.token, SECRET).unwrap();
    assert_eq!(claims.user_id, registered.user.id);
}

#[tokio::test]
async fn should_reject_second_registration_with_same_email() {
    let store = InMemoryStore::default();
    register(&store)
        .execute(input("Meera", "meera@example.com", "s3cret!"))
        .await
        .unwrap();

    let err = register(&store)
        .execute(input("Imposter", "Meera@Example.com", "another"))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::EmailAlreadyInUse));
    assert_eq!(store.tables.lock().unwrap().users.len(), 1);
}

#[tokio::test]
async fn should_persist_preferences_and_reject_inverted_range() {
    let store = InMemoryStore::default();
    let user = register(&store)
        .execute(input("Meera", "meera@example.com", "s3cret!"))
        .await
        .unwrap()
        .user;
    let usecase = UpdatePreferencesUseCase {
        users: store.clone(),
        favorites: store.clone(),
    };

    let preferences = Preferences {
        property_types: vec![PropertyType::Villa],
        locations: vec!["Goa".to_owned()],
        price_range: Some(PriceRange {
            min: Some(100.0),
            max: Some(500.0),
        }),
        amenities: vec![],
    };
    let profile = usecase
        .execute(user.clone(), preferences.clone())
        .await
        .unwrap();
    assert_eq!(profile.user.preferences, preferences);
    assert_eq!(store.tables.lock().unwrap().users[0].preferences, preferences);

    let err = usecase
        .execute(
            user,
            Preferences {
                price_range: Some(PriceRange {
                    min: Some(600.0),
                    max: Some(500.0),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));
    assert_eq!(store.tables.lock().unwrap().users[0].preferences, preferences);
}
