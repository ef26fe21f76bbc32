pub mod client;

pub use client::{
    current_token, new_session_handle, AuthProvider, Credentials, PasswordAuthClient, Session,
    SessionHandle,
};
