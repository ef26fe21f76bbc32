pub mod client;

pub use client::{upload_all, DisabledMediaUploader, HttpMediaUploader, MediaBlob, MediaUploader};
