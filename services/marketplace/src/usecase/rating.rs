use chrono::Utc;
use uuid::Uuid;

use estate_domain::activity::NotificationKind;

use crate::domain::repository::{NotificationRepository, PropertyRepository, ReviewRepository};
use crate::domain::types::{NewReview, Notification, PropertyDetail};
use crate::error::MarketplaceError;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

pub struct RatingInput {
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

pub struct AddRatingUseCase<R, P, N>
where
    R: ReviewRepository,
    P: PropertyRepository,
    N: NotificationRepository,
{
    pub reviews: R,
    pub properties: P,
    pub notifications: N,
}

impl<R, P, N> AddRatingUseCase<R, P, N>
where
    R: ReviewRepository,
    P: PropertyRepository,
    N: NotificationRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        property_id: Uuid,
        input: RatingInput,
    ) -> Result<PropertyDetail, MarketplaceError> {
        let rating = input
            .rating
            .filter(|r| r.is_finite() && (MIN_RATING..=MAX_RATING).contains(r))
            .ok_or_else(|| MarketplaceError::validation("rating must be between 1 and 5"))?;
        let comment = input
            .comment
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty());

        let review = NewReview {
            id: Uuid::now_v7(),
            property_id,
            user_id,
            rating,
            comment,
            created_at: Utc::now(),
        };
        let summary = self
            .reviews
            .add(&review)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)?;
        tracing::info!(
            %property_id,
            %user_id,
            overall = summary.overall,
            count = summary.count,
            "review added"
        );

        let detail = self
            .properties
            .find_detail(property_id)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)?;

        self.notify_owner(&detail, rating).await;
        Ok(detail)
    }

    async fn notify_owner(&self, detail: &PropertyDetail, rating: f64) {
        let property = &detail.listing.property;
        let notification = Notification {
            id: Uuid::now_v7(),
            user_id: property.owner_id,
            kind: NotificationKind::Review,
            message: format!(
                "New {rating}-star review on your property \"{}\"",
                property.title
            ),
            read: false,
            created_at: Utc::now(),
        };
        if let Err(e) = self.notifications.create(&notification).await {
            tracing::warn!(
                error = %e,
                property_id = %property.id,
                owner_id = %property.owner_id,
                "review notification failed"
            );
        }
    }
}
