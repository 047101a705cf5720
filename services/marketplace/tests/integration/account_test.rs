use estate_domain::activity::{DocumentKind, DocumentStatus};
use estate_marketplace::error::MarketplaceError;
use estate_marketplace::usecase::account::{
    DocumentInput, StatusInput, UpdateVerificationStatusUseCase, UploadVerificationDocumentUseCase,
};
use uuid::Uuid;

use crate::helpers::{FakeMedia, InMemoryStore, test_admin, test_user};

fn document(kind: &str) -> DocumentInput {
    DocumentInput {
        kind: Some(kind.to_owned()),
        document: Some("data:application/pdf;base64,JVBERi0x".to_owned()),
    }
}

fn review(user_id: Uuid, document_id: Uuid, status: &str) -> StatusInput {
    StatusInput {
        user_id: Some(user_id.to_string()),
        document_id: Some(document_id.to_string()),
        status: Some(status.to_owned()),
        remarks: Some("Checked against original".to_owned()),
    }
}

#[tokio::test]
async fn should_upload_document_and_let_admin_verify_it() {
    let store = InMemoryStore::default();
    let media = FakeMedia::default();
    let user = test_user("Meera");
    let admin = test_admin("Admin");
    store.add_user(user.clone());
    store.add_user(admin.clone());

    let status = UploadVerificationDocumentUseCase {
        documents: store.clone(),
        media: media.clone(),
    }
    .execute(&user, document("id"))
    .await
    .unwrap();
    assert_eq!(status.documents.len(), 1);
    let uploaded = &status.documents[0];
    assert_eq!(uploaded.kind, DocumentKind::Id);
    assert_eq!(uploaded.status, DocumentStatus::Pending);
    assert_eq!(uploaded.public_id.as_deref(), Some("verification_docs/0"));

    let reviewed = UpdateVerificationStatusUseCase {
        documents: store.clone(),
        users: store.clone(),
    }
    .execute(&admin, review(user.id, uploaded.id, "verified"))
    .await
    .unwrap();
    assert_eq!(reviewed.documents[0].status, DocumentStatus::Verified);
    assert_eq!(
        reviewed.documents[0].remarks.as_deref(),
        Some("Checked against original")
    );
}

#[tokio::test]
async fn should_forbid_non_admin_review() {
    let store = InMemoryStore::default();
    let user = test_user("Meera");
    store.add_user(user.clone());
    let status = UploadVerificationDocumentUseCase {
        documents: store.clone(),
        media: FakeMedia::default(),
    }
    .execute(&user, document("Address"))
    .await
    .unwrap();

    let err = UpdateVerificationStatusUseCase {
        documents: store.clone(),
        users: store.clone(),
    }
    .execute(&user, review(user.id, status.documents[0].id, "Verified"))
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Forbidden));
    assert_eq!(
        store.tables.lock().unwrap().documents[0].status,
        DocumentStatus::Pending
    );
}

#[tokio::test]
async fn should_not_review_document_of_another_user() {
    let store = InMemoryStore::default();
    let owner = test_user("Meera");
    let other = test_user("Ravi");
    let admin = test_admin("Admin");
    for u in [&owner, &other, &admin] {
        store.add_user(u.clone());
    }
    let status = UploadVerificationDocumentUseCase {
        documents: store.clone(),
        media: FakeMedia::default(),
    }
    .execute(&owner, document("Income"))
    .await
    .unwrap();

    let err = UpdateVerificationStatusUseCase {
        documents: store.clone(),
        users: store.clone(),
    }
    .execute(&admin, review(other.id, status.documents[0].id, "Rejected"))
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::DocumentNotFound));
}
