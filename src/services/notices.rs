// src/services/notices.rs
//
// Shared tail of every service operation: log, notify, refresh

use crate::domain::Record;
use crate::engine::RefreshCoordinator;
use crate::error::AppError;
use crate::integrations::{NoticeKind, NotificationSink};

/// Log a failed operation, tell the user, and hand the error back
pub(crate) fn report_failure(notifier: &dyn NotificationSink, action: &str, error: AppError) -> AppError {
    log::error!("{} failed: {}", action, error);
    notifier.notify(&format!("{} failed: {}", action, error), NoticeKind::Error);
    error
}

pub(crate) fn report_success(notifier: &dyn NotificationSink, message: &str) {
    log::info!("{}", message);
    notifier.notify(message, NoticeKind::Success);
}

/// Full refetch after a successful mutation.
///
/// The mutation already happened, so a failed refetch is reported but not
/// returned; the store keeps its previous contents until the next reload.
pub(crate) async fn refresh_after_mutation<R: Record>(
    refresh: &RefreshCoordinator<R>,
    notifier: &dyn NotificationSink,
) {
    if let Err(e) = refresh.request_reload().await {
        notifier.notify(
            &format!("Could not refresh {}: {}", R::COLLECTION, e),
            NoticeKind::Error,
        );
    }
}
