// src/integrations/mod.rs
//
// External collaborators other than the document collection:
// identity (sign-in), media host (image upload), notification sink

pub mod identity;
pub mod media;
pub mod notifications;

pub use identity::{AuthProvider, Credentials, PasswordAuthClient, Session, SessionHandle};
pub use media::{DisabledMediaUploader, HttpMediaUploader, MediaBlob, MediaUploader};
pub use notifications::{LogNotifier, Notice, NoticeKind, NotificationSink, QueuedNotifier};
