use estate_domain::pagination::PageRequest;
use estate_marketplace::domain::types::PropertyFilter;
use estate_marketplace::error::MarketplaceError;
use estate_marketplace::usecase::auth::GetProfileUseCase;
use estate_marketplace::usecase::favorite::ToggleFavoriteUseCase;
use estate_marketplace::usecase::property::{
    CreatePropertyUseCase, GetPropertyUseCase, ListPropertiesUseCase,
};
use uuid::Uuid;

use crate::helpers::{FakeMedia, InMemoryStore, listing_input, test_user};

async fn property(store: &InMemoryStore, title: &str) -> Uuid {
    let owner = test_user("Owner");
    store.add_user(owner.clone());
    CreatePropertyUseCase {
        properties: store.clone(),
        media: FakeMedia::default(),
    }
    .execute(&owner, listing_input(title, 100.0))
    .await
    .unwrap()
    .listing
    .property
    .id
}

fn toggle_uc(store: &InMemoryStore) -> ToggleFavoriteUseCase<InMemoryStore> {
    ToggleFavoriteUseCase {
        favorites: store.clone(),
    }
}

#[tokio::test]
async fn should_follow_toggle_parity_over_many_toggles() {
    let store = InMemoryStore::default();
    let id = property(&store, "Loft").await;
    let user = test_user("Fan");
    store.add_user(user.clone());
    let usecase = toggle_uc(&store);
    let profile_uc = GetProfileUseCase {
        favorites: store.clone(),
    };

    for n in 1..=7u32 {
        let state = usecase.execute(user.id, id).await.unwrap();
        let expected = n % 2 == 1;
        assert_eq!(state.is_favorited, expected, "after {n} toggles");
        assert_eq!(state.favorites_count, u32::from(expected));
        assert_eq!(store.property(id).unwrap().favorites_count, u32::from(expected));

        let favorited_by = store
            .tables
            .lock()
            .unwrap()
            .favorites
            .iter()
            .filter(|(_, pid)| *pid == id)
            .count();
        assert_eq!(favorited_by, state.favorites_count as usize, "after {n} toggles");

        let profile = profile_uc.execute(user.clone()).await.unwrap();
        let listed = profile.favorites.iter().any(|l| l.property.id == id);
        assert_eq!(listed, expected, "after {n} toggles");
        assert_eq!(profile.favorites.len(), favorited_by, "after {n} toggles");
    }
}

#[tokio::test]
async fn should_count_each_user_once() {
    let store = InMemoryStore::default();
    let id = property(&store, "Loft").await;
    let usecase = toggle_uc(&store);
    let users: Vec<_> = (0..3).map(|i| test_user(&format!("Fan{i}"))).collect();

    for user in &users {
        usecase.execute(user.id, id).await.unwrap();
    }
    assert_eq!(store.property(id).unwrap().favorites_count, 3);

    let state = usecase.execute(users[1].id, id).await.unwrap();
    assert!(!state.is_favorited);
    assert_eq!(state.favorites_count, 2);
}

#[tokio::test]
async fn should_annotate_listing_and_detail_for_signed_in_viewer() {
    let store = InMemoryStore::default();
    let liked = property(&store, "Liked").await;
    let other = property(&store, "Other").await;
    let viewer = test_user("Viewer");
    toggle_uc(&store).execute(viewer.id, liked).await.unwrap();

    let page = ListPropertiesUseCase {
        properties: store.clone(),
        favorites: store.clone(),
    }
    .execute(Some(viewer.id), PropertyFilter::default(), PageRequest::default())
    .await
    .unwrap();
    for item in &page.items {
        let expected = item.item.property.id == liked;
        assert_eq!(item.is_favorited, Some(expected));
    }

    let get = GetPropertyUseCase {
        properties: store.clone(),
        favorites: store.clone(),
    };
    assert_eq!(get.execute(Some(viewer.id), other).await.unwrap().is_favorited, Some(false));
    assert_eq!(get.execute(Some(viewer.id), liked).await.unwrap().is_favorited, Some(true));
    assert_eq!(get.execute(None, liked).await.unwrap().is_favorited, None);
}

#[tokio::test]
async fn should_list_favorites_on_profile_newest_first() {
    let store = InMemoryStore::default();
    let first = property(&store, "First").await;
    let second = property(&store, "Second").await;
    let user = test_user("Fan");
    store.add_user(user.clone());
    let usecase = toggle_uc(&store);
    usecase.execute(user.id, first).await.unwrap();
    usecase.execute(user.id, second).await.unwrap();

    let profile = GetProfileUseCase {
        favorites: store.clone(),
    }
    .execute(user)
    .await
    .unwrap();
    let ids: Vec<Uuid> = profile.favorites.iter().map(|l| l.property.id).collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn should_return_not_found_when_toggling_missing_property() {
    let store = InMemoryStore::default();
    let err = toggle_uc(&store)
        .execute(Uuid::now_v7(), Uuid::now_v7())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::PropertyNotFound));
}
