// src/main.rs
//
// Loads the public listings once and prints the filtered view as JSON.
//
// Usage: listinghub [CITY] [MIN_PRICE] [MAX_PRICE] [ROOMS]
// Blank or missing arguments leave that filter unset.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use listinghub::application::commands::{apply_listing_filter, load_listings};
use listinghub::application::{Collaborators, FilterForm, SessionContext};
use listinghub::config::AppConfig;
use listinghub::integrations::identity::new_session_handle;
use listinghub::integrations::{
    DisabledMediaUploader, HttpMediaUploader, LogNotifier, MediaUploader, PasswordAuthClient,
};
use listinghub::repositories::{DocumentCollection, RestDocumentCollection};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. LOGGING (also forwards `log` records)
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    // 2. CONFIG
    let config = AppConfig::from_env().context("reading LISTINGHUB_* configuration")?;

    // 3. COLLABORATORS
    let session = new_session_handle();

    let collection: Arc<dyn DocumentCollection> = Arc::new(
        RestDocumentCollection::new(&config.documents_url, config.api_key.clone(), &config.http)?
            .with_session(session.clone()),
    );
    let auth = Arc::new(PasswordAuthClient::new(
        &config.identity_url,
        config.api_key.clone(),
        &config.http,
    )?);
    let uploader: Arc<dyn MediaUploader> = match &config.media_upload_url {
        Some(url) => Arc::new(HttpMediaUploader::new(url, &config.media_upload_preset, &config.http)?),
        None => Arc::new(DisabledMediaUploader),
    };

    // 4. SESSION CONTEXT
    let ctx = SessionContext::new(Collaborators {
        collection,
        auth,
        uploader,
        notifier: Arc::new(LogNotifier),
        session,
    });

    // 5. INITIAL LOAD + FILTER
    let mut args = std::env::args().skip(1);
    let mut next = || args.next().unwrap_or_default();
    let form = FilterForm {
        city: next(),
        min_price: next(),
        max_price: next(),
        rooms: next(),
    };

    load_listings(&ctx)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", e.message, e.details.unwrap_or_default()))?;
    let listings = apply_listing_filter(&ctx, form)
        .await
        .map_err(|e| anyhow::anyhow!(e.message))?;

    log::info!("{} listings match", listings.len());
    println!("{}", serde_json::to_string_pretty(&listings)?);

    ctx.close();
    Ok(())
}
