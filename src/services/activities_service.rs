use tracing::{error, info, warn};

use crate::database::{ActivityStore, StoreError};
use crate::models::{ActivityListing, MessageResponse};

/// Hard cap on how many activities a listing returns.
pub const LIST_LIMIT: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Participant not found in this activity")]
    ParticipantNotFound,
    #[error("Student already signed up")]
    AlreadySignedUp,
    #[error("Activity is full")]
    ActivityFull,
    #[error("Failed to sign up")]
    SignupFailed,
    #[error("Failed to unregister participant")]
    UnregisterFailed,
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Internal,
}

impl DirectoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ActivityNotFound | Self::ParticipantNotFound => ErrorKind::NotFound,
            Self::AlreadySignedUp | Self::ActivityFull => ErrorKind::Conflict,
            Self::SignupFailed | Self::UnregisterFailed | Self::Store(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SignupRules {
    /// Reject signups once `participants` reaches `max_participants`.
    pub enforce_capacity: bool,
}

pub async fn list_activities(store: &dyn ActivityStore) -> Result<ActivityListing, DirectoryError> {
    let activities = store.list(LIST_LIMIT).await.map_err(|e| {
        error!("Listing activities failed: {}", e);
        e
    })?;
    Ok(ActivityListing::new(activities))
}

pub async fn signup_for_activity(
    store: &dyn ActivityStore,
    rules: SignupRules,
    activity_name: &str,
    email: &str,
) -> Result<MessageResponse, DirectoryError> {
    let Some(activity) = store.find_by_name(activity_name).await? else {
        warn!("Signup for unknown activity '{}'", activity_name);
        return Err(DirectoryError::ActivityNotFound);
    };

    if activity.has_participant(email) {
        warn!("{} is already signed up for '{}'", email, activity_name);
        return Err(DirectoryError::AlreadySignedUp);
    }

    if rules.enforce_capacity && activity.is_full() {
        warn!(
            "'{}' is full ({}/{})",
            activity_name,
            activity.participants.len(),
            activity.max_participants
        );
        return Err(DirectoryError::ActivityFull);
    }

    let modified = store.push_participant(activity_name, email).await?;
    if modified == 0 {
        error!(
            "Signup of {} for '{}' modified no records",
            email, activity_name
        );
        return Err(DirectoryError::SignupFailed);
    }

    info!("Signed up {} for '{}'", email, activity_name);
    Ok(MessageResponse {
        message: format!("Signed up {} for {}", email, activity_name),
    })
}

pub async fn unregister_from_activity(
    store: &dyn ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<MessageResponse, DirectoryError> {
    let Some(activity) = store.find_by_name(activity_name).await? else {
        warn!("Unregister from unknown activity '{}'", activity_name);
        return Err(DirectoryError::ActivityNotFound);
    };

    if !activity.has_participant(email) {
        warn!("{} is not signed up for '{}'", email, activity_name);
        return Err(DirectoryError::ParticipantNotFound);
    }

    let modified = store.pull_participant(activity_name, email).await?;
    if modified == 0 {
        error!(
            "Unregister of {} from '{}' modified no records",
            email, activity_name
        );
        return Err(DirectoryError::UnregisterFailed);
    }

    info!("Unregistered {} from '{}'", email, activity_name);
    Ok(MessageResponse {
        message: format!("Unregistered {} from {}", email, activity_name),
    })
}
