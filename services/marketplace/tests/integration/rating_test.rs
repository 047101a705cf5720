use estate_domain::activity::NotificationKind;
use estate_marketplace::error::MarketplaceError;
use estate_marketplace::usecase::account::{ListNotificationsUseCase, MarkNotificationReadUseCase};
use estate_marketplace::usecase::property::CreatePropertyUseCase;
use estate_marketplace::usecase::rating::{AddRatingUseCase, RatingInput};
use uuid::Uuid;

use crate::helpers::{FakeMedia, InMemoryStore, listing_input, test_user};

fn rating_uc(
    store: &InMemoryStore,
) -> AddRatingUseCase<InMemoryStore, InMemoryStore, InMemoryStore> {
    AddRatingUseCase {
        reviews: store.clone(),
        properties: store.clone(),
        notifications: store.clone(),
    }
}

fn rate(rating: f64, comment: &str) -> RatingInput {
    RatingInput {
        rating: Some(rating),
        comment: Some(comment.to_owned()),
    }
}

#[tokio::test]
async fn should_keep_overall_equal_to_mean_of_all_ratings() {
    let store = InMemoryStore::default();
    let owner = test_user("Owner");
    store.add_user(owner.clone());
    let id = CreatePropertyUseCase {
        properties: store.clone(),
        media: FakeMedia::default(),
    }
    .execute(&owner, listing_input("Loft", 100.0))
    .await
    .unwrap()
    .listing
    .property
    .id;

    let ratings = [5.0, 4.0, 4.5, 1.0, 3.0, 2.5, 5.0];
    let usecase = rating_uc(&store);
    for (i, rating) in ratings.iter().enumerate() {
        let reviewer = test_user(&format!("Reviewer{i}"));
        store.add_user(reviewer.clone());
        let detail = usecase
            .execute(reviewer.id, id, rate(*rating, "ok"))
            .await
            .unwrap();

        let seen = &ratings[..=i];
        let mean = seen.iter().sum::<f64>() / seen.len() as f64;
        let p = &detail.listing.property;
        assert!((p.rating_overall - mean).abs() < 1e-9);
        assert_eq!(p.rating_count as usize, seen.len());
        assert_eq!(detail.reviews.len(), seen.len());
        assert_eq!(detail.reviews[i].user.name, reviewer.name);
    }
}

#[tokio::test]
async fn should_notify_owner_and_let_them_mark_it_read() {
    let store = InMemoryStore::default();
    let owner = test_user("Owner");
    let reviewer = test_user("Reviewer");
    store.add_user(owner.clone());
    store.add_user(reviewer.clone());
    let id = CreatePropertyUseCase {
        properties: store.clone(),
        media: FakeMedia::default(),
    }
    .execute(&owner, listing_input("Garden Villa", 100.0))
    .await
    .unwrap()
    .listing
    .property
    .id;

    rating_uc(&store)
        .execute(reviewer.id, id, rate(4.0, "Lovely garden"))
        .await
        .unwrap();

    let list = ListNotificationsUseCase {
        notifications: store.clone(),
    };
    let notifications = list.execute(owner.id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    let notification = &notifications[0];
    assert_eq!(notification.kind, NotificationKind::Review);
    assert!(notification.message.contains("Garden Villa"));
    assert!(!notification.read);
    assert!(list.execute(reviewer.id).await.unwrap().is_empty());

    let mark = MarkNotificationReadUseCase {
        notifications: store.clone(),
    };
    let err = mark.execute(reviewer.id, notification.id).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::NotificationNotFound));

    let read = mark.execute(owner.id, notification.id).await.unwrap();
    assert!(read.read);
    assert!(list.execute(owner.id).await.unwrap()[0].read);
}

#[tokio::test]
async fn should_reject_out_of_range_rating_without_writing() {
    let store = InMemoryStore::default();
    let owner = test_user("Owner");
    store.add_user(owner.clone());
    let id = CreatePropertyUseCase {
        properties: store.clone(),
        media: FakeMedia::default(),
    }
    .execute(&owner, listing_input("Loft", 100.0))
    .await
    .unwrap()
    .listing
    .property
    .id;

    for bad in [0.0, 5.5, f64::NAN] {
        let err = rating_uc(&store)
            .execute(Uuid::now_v7(), id, rate(bad, "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
    }
    let tables = store.tables.lock().unwrap();
    assert!(tables.reviews.is_empty());
    assert!(tables.notifications.is_empty());
}
