//! Signed URL shape tests.

#[cfg(test)]
mod tests {
    use urlguard_auth::{AuthError, QueryParams, SIGNATURE_MARKER, SignedUrl, sign_url};

    use crate::{clock_at, init_tracing, no_params, shared_credential, t0};

    fn split(signed: &str) -> (&str, QueryParams, &str) {
        let (unsigned, signature) = signed.split_once(SIGNATURE_MARKER).unwrap();
        let (base, query) = unsigned.split_once('?').unwrap();
        (base, QueryParams::parse(query).unwrap(), signature)
    }

    #[test]
    fn test_should_produce_expected_shape_for_reference_scenario() {
        init_tracing();

        let signed = sign_url(
            "http://example.com/foo/bar?userId=123",
            no_params(),
            &shared_credential(),
            &clock_at(0),
        )
        .unwrap();

        let (base, params, signature) = split(&signed);
        assert_eq!(base, "https://example.com/foo/bar");

        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], ("userId", "123"));
        assert_eq!(pairs[1], ("key", "abc"));
        assert_eq!(pairs[2].0, "nonce");
        assert_eq!(pairs[2].1.len(), 32);
        assert!(pairs[2].1.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        assert_eq!(pairs[3], ("timestamp", t0().timestamp().to_string().as_str()));

        assert_eq!(signature.len(), 43);
        assert!(
            signature
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        );
    }

    #[test]
    fn test_should_inject_exactly_one_of_each_parameter() {
        init_tracing();

        let signed = sign_url(
            "http://example.com/api/offers/cashback",
            [("userId", "123"), ("sort", "desc")],
            &shared_credential(),
            &clock_at(0),
        )
        .unwrap();

        let (_, params, _) = split(&signed);
        assert_eq!(params.get_all("key").count(), 1);
        assert_eq!(params.get_all("nonce").count(), 1);
        assert_eq!(params.get_all("timestamp").count(), 1);
        assert_eq!(params.get("userId"), Some("123"));
        assert_eq!(params.get("sort"), Some("desc"));
    }

    #[test]
    fn test_should_keep_caller_duplicates_before_injected_parameters() {
        init_tracing();

        let signed = sign_url(
            "http://example.com/?key=mine&timestamp=1",
            [("nonce", "n1"), ("nonce", "n2")],
            &shared_credential(),
            &clock_at(0),
        )
        .unwrap();

        let (_, params, _) = split(&signed);
        let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["key", "timestamp", "nonce", "nonce", "key", "nonce", "timestamp"]
        );

        let parts = SignedUrl::split(&signed).unwrap();
        assert_eq!(parts.key_id().as_deref(), Some("abc"));
        assert_eq!(parts.timestamp(), Some(t0().timestamp()));
    }

    #[test]
    fn test_should_reject_relative_urls() {
        init_tracing();

        for url in ["/foo/bar", "/userId=123", "foo/bar", ""] {
            let result = sign_url(url, no_params(), &shared_credential(), &clock_at(0));
            assert!(matches!(result, Err(AuthError::InvalidUrl(_))), "{url}");
        }
    }

    #[test]
    fn test_should_reject_malformed_existing_query() {
        init_tracing();

        let result = sign_url(
            "http://example.com/?a=1&flag",
            no_params(),
            &shared_credential(),
            &clock_at(0),
        );
        assert!(matches!(result, Err(AuthError::MalformedQuery(_))));
    }

    #[test]
    fn test_should_sign_concurrently_from_many_threads() {
        init_tracing();

        let credential = shared_credential();
        let nonces: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let signed = sign_url(
                            "http://example.com/",
                            no_params(),
                            &credential,
                            &clock_at(0),
                        )
                        .unwrap();
                        SignedUrl::split(&signed).unwrap().nonce().unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut unique = nonces.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), nonces.len());
    }
}
