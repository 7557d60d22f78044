//! Property tests for the token round trip and tamper detection.

include!("common/proptest_prelude.rs");

mod support;

use std::time::{Duration, SystemTime};

use claims_session::auth::jwt::{sign_claims, verify_claims};
use claims_session::{verify_with, Payload, SessionError, Shape};
use proptest::prelude::*;
use support::auth::test_security;
use support::records::{User, UserV2};

fn arb_user() -> impl Strategy<Value = User> {
    ("\\PC{0,24}", "\\PC{0,24}", any::<i64>()).prop_map(|(id, name, age)| User { id, name, age })
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    /// Property: a record reconciled from its own token equals the original.
    #[test]
    fn prop_record_round_trip(user in arb_user()) {
        let security = test_security();
        let now = SystemTime::now();
        let token = sign_claims(&user, now, &security).unwrap();

        let verified = verify_with(&token, Shape::<User>::Record, now, &security).unwrap();
        prop_assert_eq!(verified, Payload::Typed(user));
    }

    /// Property: a destination with an extra field reconciles the shared
    /// fields and leaves the extra one empty.
    #[test]
    fn prop_extra_destination_field_is_zero(user in arb_user()) {
        let security = test_security();
        let now = SystemTime::now();
        let token = sign_claims(&user, now, &security).unwrap();

        let upgraded = verify_with(&token, Shape::<UserV2>::Record, now, &security)
            .unwrap()
            .into_typed()
            .unwrap();
        prop_assert_eq!(upgraded.id, user.id);
        prop_assert_eq!(upgraded.name, user.name);
        prop_assert_eq!(upgraded.age, user.age);
        prop_assert!(upgraded.email.is_empty());
    }

    /// Property: replacing any single character of a valid token is
    /// reported as a bad signature, never as expiry or success.
    #[test]
    fn prop_tampering_is_invalid_signature(
        user in arb_user(),
        index in any::<prop::sample::Index>(),
    ) {
        let security = test_security();
        let now = SystemTime::now();
        let token = sign_claims(&user, now, &security).unwrap();

        let at = index.index(token.len());
        let mut bytes = token.into_bytes();
        bytes[at] = if bytes[at] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let result = verify_claims(&tampered, now, &security);
        prop_assert!(
            matches!(result, Err(SessionError::InvalidSignature)),
            "tampered at {} gave {:?}", at, result
        );
    }

    /// Property: the same token is valid before its lifetime ends and
    /// expired after.
    #[test]
    fn prop_expiry_boundary(lifetime in 2u64..100_000, epsilon in 1u64..3600) {
        let security = test_security().with_token_lifetime(Duration::from_secs(lifetime));
        let issued = SystemTime::now();
        let token = sign_claims(&serde_json::json!({"id": "u1"}), issued, &security).unwrap();

        let before = issued + Duration::from_secs(lifetime - 1);
        prop_assert!(verify_claims(&token, before, &security).is_ok());

        let after = issued + Duration::from_secs(lifetime + epsilon);
        let err = verify_claims(&token, after, &security).unwrap_err();
        prop_assert!(err.is_expired());
    }
}
