//! Credential liveness check
//!
//! Requests a known public post as a light SVG. Any 2xx answer means the
//! key is accepted.

use tracing::info;
use tweetshot_application::build_request;
use tweetshot_application::ports::{Transport, TransportError};
use tweetshot_domain::{CredentialRef, ScreenshotFormat, ScreenshotRequestOptions, Theme};

/// Post rendered by the liveness check.
pub const SAMPLE_STATUS_ID: &str = "1617979122625712128";

/// Checks that `credential` is accepted by the rendering API.
///
/// # Errors
///
/// Returns the transport error when the check request fails, e.g.
/// [`TransportError::Status`] with 401 for a rejected key.
pub async fn verify_credential<T>(
    transport: &T,
    credential: &CredentialRef,
) -> Result<(), TransportError>
where
    T: Transport + ?Sized,
{
    let options = ScreenshotRequestOptions::new(SAMPLE_STATUS_ID)
        .map_err(|e| TransportError::Other(e.to_string()))?
        .with_format(ScreenshotFormat::Svg)
        .with_theme(Theme::Light);

    let response = transport.execute(&build_request(&options), credential).await?;
    info!(credential = %credential, status = %response.status, "credential verified");
    Ok(())
}
