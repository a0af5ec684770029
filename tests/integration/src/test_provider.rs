//! Server-side verification with credential lookup.

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use urlguard_auth::{Credential, StaticCredentialProvider, sign_url, verify_with_provider};

    use crate::{clock_at, init_tracing, no_params};

    fn provider() -> StaticCredentialProvider {
        StaticCredentialProvider::new(vec![
            ("alpha".to_owned(), "alpha-secret".to_owned()),
            ("beta".to_owned(), "beta-secret".to_owned()),
        ])
    }

    #[test]
    fn test_should_resolve_each_client_by_key() {
        init_tracing();
        let provider = provider();

        for (key_id, secret) in [("alpha", "alpha-secret"), ("beta", "beta-secret")] {
            let signed = sign_url(
                "http://api.example.com/orders",
                no_params(),
                &Credential::new(key_id, secret),
                &clock_at(0),
            )
            .unwrap();
            let valid =
                verify_with_provider(&signed, &provider, &clock_at(10), Duration::minutes(60))
                    .unwrap();
            assert!(valid, "{key_id}");
        }
    }

    #[test]
    fn test_should_reject_key_signed_with_wrong_secret() {
        init_tracing();
        let signed = sign_url(
            "http://api.example.com/orders",
            no_params(),
            &Credential::new("alpha", "beta-secret"),
            &clock_at(0),
        )
        .unwrap();

        let valid =
            verify_with_provider(&signed, &provider(), &clock_at(0), Duration::minutes(60)).unwrap();
        assert!(!valid);
    }

    #[test]
    fn test_should_reject_unknown_key() {
        init_tracing();
        let signed = sign_url(
            "http://api.example.com/orders",
            no_params(),
            &Credential::new("gamma", "gamma-secret"),
            &clock_at(0),
        )
        .unwrap();

        let valid =
            verify_with_provider(&signed, &provider(), &clock_at(0), Duration::minutes(60)).unwrap();
        assert!(!valid);
    }

    #[test]
    fn test_should_resolve_percent_encoded_key() {
        init_tracing();
        let mut provider = provider();
        provider.insert(Credential::new("team/ops", "ops-secret"));

        let signed = sign_url(
            "http://api.example.com/orders",
            no_params(),
            &Credential::new("team/ops", "ops-secret"),
            &clock_at(0),
        )
        .unwrap();
        assert!(signed.contains("key=team%2Fops"));

        let valid =
            verify_with_provider(&signed, &provider, &clock_at(0), Duration::minutes(60)).unwrap();
        assert!(valid);
    }
}
