//! Property-based laws for the pure, input-shrinkable components: framing
//! and the keyed block permutation.

use proptest::prelude::*;

proptest! {
    #[test]
    fn frame_roundtrip_holds_for_any_payload(payload in proptest::collection::vec(any::<u8>(), 1..900)) {
        let framed = imprint::frame::encode_frame(&payload);
        let decoded = imprint::frame::decode_frame(&framed, 1000).unwrap();
        prop_assert_eq!(decoded, payload);
    }

    #[test]
    fn frame_survives_trailing_garbage(
        payload in proptest::collection::vec(any::<u8>(), 1..200),
        garbage in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut framed = imprint::frame::encode_frame(&payload);
        framed.extend_from_slice(&garbage);
        let decoded = imprint::frame::decode_frame(&framed, 1000).unwrap();
        prop_assert_eq!(decoded, payload);
    }

    #[test]
    fn permutation_is_deterministic_for_same_secret(
        secret in "[a-zA-Z0-9]{1,32}",
        n in 1usize..2000,
    ) {
        let a = imprint::permute::keyed_permutation(&secret, n);
        let b = imprint::permute::keyed_permutation(&secret, n);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn permutation_is_always_a_bijection(
        secret in "[a-zA-Z0-9]{1,32}",
        n in 1usize..2000,
    ) {
        let mut perm = imprint::permute::keyed_permutation(&secret, n);
        perm.sort_unstable();
        prop_assert_eq!(perm, (0..n).collect::<Vec<_>>());
    }
}
