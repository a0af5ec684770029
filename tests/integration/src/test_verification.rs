//! Verification round-trip, tampering and freshness tests.

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use urlguard_auth::{
        AuthError, Credential, SIGNATURE_MARKER, UrlAuthenticator, sign_url, verify_signed_url,
    };

    use crate::{clock_at, init_tracing, no_params, shared_credential};

    const WINDOW_SECS: i64 = 60 * 60;

    fn window() -> Duration {
        Duration::seconds(WINDOW_SECS)
    }

    fn reference_url() -> String {
        sign_url(
            "http://example.com/foo/bar?userId=123",
            no_params(),
            &shared_credential(),
            &clock_at(0),
        )
        .unwrap()
    }

    fn verify_at(signed: &str, offset_secs: i64) -> bool {
        verify_signed_url(signed, &shared_credential(), &clock_at(offset_secs), window()).unwrap()
    }

    #[test]
    fn test_should_verify_reference_scenario_at_signing_instant() {
        init_tracing();
        assert!(verify_at(&reference_url(), 0));
    }

    #[test]
    fn test_should_reject_reference_scenario_after_61_minutes() {
        init_tracing();
        assert!(!verify_at(&reference_url(), 61 * 60));
    }

    #[test]
    fn test_should_apply_freshness_boundary() {
        init_tracing();
        let signed = reference_url();
        assert!(verify_at(&signed, WINDOW_SECS - 1));
        assert!(!verify_at(&signed, WINDOW_SECS + 1));
    }

    #[test]
    fn test_should_round_trip_various_urls() {
        init_tracing();

        let urls = [
            "http://www.example.com",
            "https://example.com:8443/a/b/c",
            "http://example.com/path%20with%20space?q=hello%20world",
            "ftp://files.example.com/pub?x=1&x=2&y=",
            "http://user@Example.COM/Mixed/Case",
        ];
        for url in urls {
            let signed = sign_url(
                url,
                [("redirect", "https://elsewhere.example/?a=b&c=d")],
                &shared_credential(),
                &clock_at(0),
            )
            .unwrap();
            assert!(signed.starts_with("https://"), "{signed}");
            assert!(verify_at(&signed, 0), "{signed}");
        }
    }

    #[test]
    fn test_should_detect_tampered_parameter() {
        init_tracing();
        let tampered = reference_url().replace("userId=123", "userId=124");
        assert!(!verify_at(&tampered, 0));
    }

    #[test]
    fn test_should_detect_appended_parameter_before_signature() {
        init_tracing();
        let tampered = reference_url().replacen(SIGNATURE_MARKER, "&admin=true&signature=", 1);
        assert!(!verify_at(&tampered, 0));
    }

    #[test]
    fn test_should_detect_swapped_signature() {
        init_tracing();
        let first = reference_url();
        let second = reference_url();
        let (unsigned_first, _) = first.split_once(SIGNATURE_MARKER).unwrap();
        let (_, signature_second) = second.split_once(SIGNATURE_MARKER).unwrap();

        let forged = format!("{unsigned_first}{SIGNATURE_MARKER}{signature_second}");
        assert!(!verify_at(&forged, 0));
    }

    #[test]
    fn test_should_not_distinguish_expired_from_tampered() {
        init_tracing();
        let signed = reference_url();
        let expired = verify_signed_url(&signed, &shared_credential(), &clock_at(7200), window());
        let tampered = verify_signed_url(
            &signed.replace("userId=123", "userId=999"),
            &shared_credential(),
            &clock_at(0),
            window(),
        );
        assert!(matches!(expired, Ok(false)));
        assert!(matches!(tampered, Ok(false)));
    }

    #[test]
    fn test_should_reject_other_secret() {
        init_tracing();
        let other = Credential::new("abc", "not-the-secret");
        let result = verify_signed_url(&reference_url(), &other, &clock_at(0), window()).unwrap();
        assert!(!result);
    }

    #[test]
    fn test_should_error_when_signature_marker_missing() {
        init_tracing();
        let signed = reference_url();
        let stripped = signed.split_once(SIGNATURE_MARKER).unwrap().0;
        let result = verify_signed_url(stripped, &shared_credential(), &clock_at(0), window());
        assert!(matches!(result, Err(AuthError::MalformedSignedUrl)));
    }

    #[test]
    fn test_should_verify_across_separate_authenticators() {
        init_tracing();
        let client = UrlAuthenticator::new(shared_credential()).with_clock(clock_at(0));
        let server = UrlAuthenticator::new(shared_credential()).with_clock(clock_at(30));

        let signed = client
            .sign("http://www.example.com/foo/bar", [("userId", "123")])
            .unwrap();
        assert!(server.verify(&signed).unwrap());
    }
}
