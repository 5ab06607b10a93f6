//! OTP Dispatch Handler

use std::sync::Arc;

use salvo::{
    oapi::{extract::JsonBody, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use glacier_app::gateways::SmsError;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OtpRequest {
    /// Destination phone number
    pub phone: String,

    /// Message body carrying the one-time code
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OtpResponse {
    pub sent: bool,
}

pub(crate) fn into_status_error(error: SmsError) -> StatusError {
    match error {
        SmsError::InvalidPhone => StatusError::bad_request().brief("Phone number is not usable"),
        SmsError::Http(source) => {
            error!("sms gateway request failed: {source}");

            StatusError::bad_gateway().brief("SMS provider is unavailable")
        }
        SmsError::UnexpectedResponse(detail) => {
            error!("sms gateway returned an unexpected response: {detail}");

            StatusError::bad_gateway().brief("SMS provider is unavailable")
        }
    }
}

/// OTP Dispatch Handler
///
/// Sends a one-time code by SMS. The code itself is generated and
/// verified by the caller; this endpoint only delivers it.
#[endpoint(
    tags("otp"),
    summary = "Send OTP",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    body: JsonBody<OtpRequest>,
    depot: &mut Depot,
) -> Result<Json<OtpResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = body.into_inner();

    state
        .sms
        .send(&request.phone, &request.message)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OtpResponse { sent: true }))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{customer_service, Mocks};

    use super::*;

    #[tokio::test]
    async fn test_unusable_phone_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/otp")
            .json(&OtpRequest {
                phone: "not-a-number".to_owned(),
                message: "code 123456".to_owned(),
            })
            .send(&customer_service(
                Mocks::default(),
                Router::with_path("otp").post(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
