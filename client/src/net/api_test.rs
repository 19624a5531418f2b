use super::*;

#[test]
fn me_success_statuses_mean_authenticated() {
    assert_eq!(classify_me_status(200), MeStatus::Authenticated);
    assert_eq!(classify_me_status(204), MeStatus::Authenticated);
}

#[test]
fn me_unauthorized_means_anonymous() {
    assert_eq!(classify_me_status(401), MeStatus::Anonymous);
    assert_eq!(classify_me_status(403), MeStatus::Anonymous);
}

#[test]
fn me_other_statuses_are_failures() {
    assert_eq!(classify_me_status(500), MeStatus::Failed(500));
    assert_eq!(classify_me_status(404), MeStatus::Failed(404));
}

#[test]
fn expect_success_accepts_2xx_only() {
    assert_eq!(expect_success(204), Ok(()));
    assert_eq!(expect_success(302), Err(ApiError::Status(302)));
    assert_eq!(expect_success(401), Err(ApiError::Status(401)));
}

#[test]
fn api_error_messages() {
    assert_eq!(ApiError::Status(500).to_string(), "unexpected status 500");
    assert_eq!(ApiError::Request("offline".to_owned()).to_string(), "request failed: offline");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn calls_outside_browser_are_unavailable() {
    assert_eq!(futures::executor::block_on(fetch_current_user()), Err(ApiError::Unavailable));
    assert_eq!(futures::executor::block_on(logout()), Err(ApiError::Unavailable));
    assert_eq!(futures::executor::block_on(close_app()), Err(ApiError::Unavailable));
}
