use estate_domain::pagination::{PageRequest, Sort};
use estate_domain::property::{PropertySortBy, PropertyType};
use estate_marketplace::domain::types::PropertyFilter;
use estate_marketplace::error::MarketplaceError;
use estate_marketplace::usecase::property::{
    CreatePropertyUseCase, DeletePropertyUseCase, ListPropertiesUseCase, PropertyInput,
    UpdatePropertyUseCase,
};

use crate::helpers::{FakeMedia, InMemoryStore, listing_input, test_user};

async fn seed(store: &InMemoryStore, media: &FakeMedia, prices: &[f64]) -> Vec<uuid::Uuid> {
    let owner = test_user("Owner");
    store.add_user(owner.clone());
    let usecase = CreatePropertyUseCase {
        properties: store.clone(),
        media: media.clone(),
    };
    let mut ids = Vec::new();
    for (i, price) in prices.iter().enumerate() {
        let detail = usecase
            .execute(&owner, listing_input(&format!("Flat {i}"), *price))
            .await
            .unwrap();
        ids.push(detail.listing.property.id);
    }
    ids
}

fn list_uc(store: &InMemoryStore) -> ListPropertiesUseCase<InMemoryStore, InMemoryStore> {
    ListPropertiesUseCase {
        properties: store.clone(),
        favorites: store.clone(),
    }
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_second_page_of_sorted_results() {
    let store = InMemoryStore::default();
    let media = FakeMedia::default();
    let prices: Vec<f64> = (1..=25).map(|n| f64::from(n) * 1000.0).collect();
    seed(&store, &media, &prices).await;

    let filter = PropertyFilter {
        sort_by: PropertySortBy::Price(Sort::Asc),
        ..Default::default()
    };
    let page = list_uc(&store)
        .execute(None, filter, PageRequest { page: 2, limit: 12 })
        .await
        .unwrap();

    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.page, 2);
    let got: Vec<f64> = page.items.iter().map(|v| v.item.property.price).collect();
    let expected: Vec<f64> = (13..=24).map(|n| f64::from(n) * 1000.0).collect();
    assert_eq!(got, expected);
    assert!(page.items.iter().all(|v| v.is_favorited.is_none()));
}

#[tokio::test]
async fn should_apply_price_range_and_other_filters_together() {
    let store = InMemoryStore::default();
    let media = FakeMedia::default();
    seed(&store, &media, &[50.0, 100.0, 150.0, 200.0, 250.0]).await;

    let filter = PropertyFilter {
        min_price: Some(100.0),
        max_price: Some(200.0),
        property_type: Some(PropertyType::Apartment),
        sort_by: PropertySortBy::Price(Sort::Desc),
        ..Default::default()
    };
    let page = list_uc(&store)
        .execute(None, filter, PageRequest::default())
        .await
        .unwrap();

    let got: Vec<f64> = page.items.iter().map(|v| v.item.property.price).collect();
    assert_eq!(got, vec![200.0, 150.0, 100.0]);
    assert_eq!(page.total, 3);

    let filter = PropertyFilter {
        min_price: Some(100.0),
        property_type: Some(PropertyType::Villa),
        ..Default::default()
    };
    let page = list_uc(&store)
        .execute(None, filter, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages(), 0);
}

#[tokio::test]
async fn should_search_title_description_and_location() {
    let store = InMemoryStore::default();
    let media = FakeMedia::default();
    seed(&store, &media, &[100.0, 200.0]).await;

    for term in ["flat 1", "METRO", "koregaon"] {
        let filter = PropertyFilter {
            search: Some(term.to_owned()),
            ..Default::default()
        };
        let page = list_uc(&store)
            .execute(None, filter, PageRequest::default())
            .await
            .unwrap();
        assert!(page.total >= 1, "{term} should match");
    }
}

// ── Ownership ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_non_owner_update_without_side_effects() {
    let store = InMemoryStore::default();
    let media = FakeMedia::default();
    let id = seed(&store, &media, &[100.0]).await[0];
    let intruder = test_user("Intruder");
    store.add_user(intruder.clone());

    let before = store.property(id).unwrap();
    let err = UpdatePropertyUseCase {
        properties: store.clone(),
        media: media.clone(),
    }
    .execute(
        &intruder,
        id,
        PropertyInput {
            title: Some("Hijacked".to_owned()),
            images: vec!["data:image/png;base64,AAA".to_owned()],
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MarketplaceError::NotPropertyOwner));
    let after = store.property(id).unwrap();
    assert_eq!(after.title, before.title);
    assert_eq!(after.updated_at, before.updated_at);
    assert!(media.uploaded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_non_owner_delete() {
    let store = InMemoryStore::default();
    let media = FakeMedia::default();
    let id = seed(&store, &media, &[100.0]).await[0];
    let intruder = test_user("Intruder");

    let err = DeletePropertyUseCase {
        properties: store.clone(),
        media: media.clone(),
    }
    .execute(&intruder, id)
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::NotPropertyOwner));
    assert!(store.property(id).is_some());
}

// ── Update / delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_append_images_and_keep_untouched_fields() {
    let store = InMemoryStore::default();
    let media = FakeMedia::default();
    let owner = test_user("Owner");
    store.add_user(owner.clone());
    let created = CreatePropertyUseCase {
        properties: store.clone(),
        media: media.clone(),
    }
    .execute(
        &owner,
        PropertyInput {
            images: vec!["data:image/png;base64,AAA".to_owned()],
            ..listing_input("Loft", 100.0)
        },
    )
    .await
    .unwrap();
    let id = created.listing.property.id;

    let updated = UpdatePropertyUseCase {
        properties: store.clone(),
        media: media.clone(),
    }
    .execute(
        &owner,
        id,
        PropertyInput {
            price: Some(90.0),
            location: Some("18.5204, 73.8567".to_owned()),
            images: vec!["data:image/png;base64,BBB".to_owned()],
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let p = &updated.listing.property;
    assert_eq!(p.price, 90.0);
    assert_eq!(p.title, "Loft");
    assert_eq!(p.bedrooms, Some(2));
    let coordinates = p.coordinates.unwrap();
    assert!((coordinates.latitude - 18.5204).abs() < 1e-9);
    let urls: Vec<&str> = updated
        .listing
        .images
        .iter()
        .map(|i| i.url.as_str())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://images.test/properties/0.jpg",
            "https://images.test/properties/1.jpg"
        ]
    );
}

#[tokio::test]
async fn should_delete_property_and_destroy_its_images() {
    let store = InMemoryStore::default();
    let media = FakeMedia::default();
    let owner = test_user("Owner");
    store.add_user(owner.clone());
    let created = CreatePropertyUseCase {
        properties: store.clone(),
        media: media.clone(),
    }
    .execute(
        &owner,
        PropertyInput {
            images: vec![
                "data:image/png;base64,AAA".to_owned(),
                "data:image/png;base64,BBB".to_owned(),
            ],
            ..listing_input("Loft", 100.0)
        },
    )
    .await
    .unwrap();
    let id = created.listing.property.id;

    DeletePropertyUseCase {
        properties: store.clone(),
        media: media.clone(),
    }
    .execute(&owner, id)
    .await
    .unwrap();

    assert!(store.property(id).is_none());
    assert!(store.tables.lock().unwrap().images.is_empty());
    assert_eq!(
        *media.destroyed.lock().unwrap(),
        vec!["properties/0".to_owned(), "properties/1".to_owned()]
    );
}

#[tokio::test]
async fn should_not_persist_property_when_an_upload_fails() {
    let store = InMemoryStore::default();
    let media = FakeMedia::default();
    let owner = test_user("Owner");

    let err = CreatePropertyUseCase {
        properties: store.clone(),
        media: media.clone(),
    }
    .execute(
        &owner,
        PropertyInput {
            images: vec![
                "data:image/png;base64,AAA".to_owned(),
                "data:image/png;base64,fail".to_owned(),
            ],
            ..listing_input("Loft", 100.0)
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MarketplaceError::Media(_)));
    assert!(store.tables.lock().unwrap().properties.is_empty());
}
