//! Well-known notification type constants.
//!
//! These must match the values stored in the `notifications.notification_type`
//! column and are rendered by the admin panel's notification bell.

/// An onboarding process was created for the recipient.
pub const NOTIFY_ONBOARDING_STARTED: &str = "onboarding_started";
/// An onboarding process changed status.
pub const NOTIFY_ONBOARDING_STATUS_CHANGED: &str = "onboarding_status_changed";
/// The recipient's onboarding submission was approved.
pub const NOTIFY_ONBOARDING_APPROVED: &str = "onboarding_approved";
/// The recipient's onboarding submission needs revision.
pub const NOTIFY_ONBOARDING_REVISION_REQUESTED: &str = "onboarding_revision_requested";

/// An offboarding process was opened (sent to HR admins).
pub const NOTIFY_OFFBOARDING_INITIATED: &str = "offboarding_initiated";
/// An offboarding process changed status.
pub const NOTIFY_OFFBOARDING_STATUS_CHANGED: &str = "offboarding_status_changed";
