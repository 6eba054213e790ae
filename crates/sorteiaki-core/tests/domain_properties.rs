use proptest::prelude::*;
use sorteiaki_core::{canonical, ClockPort, FixedClock, SystemClock};

proptest! {
    #[test]
    fn sha256_hex_is_deterministic(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(canonical::sha256_hex(&payload), canonical::sha256_hex(&payload));
    }

    #[test]
    fn canonical_bytes_ignore_insertion_order(
        a in "[a-z_]{1,16}",
        b in "[a-z_]{1,16}",
        av in any::<u32>(),
        bv in any::<u32>()
    ) {
        prop_assume!(a != b);
        let mut left = serde_json::Map::new();
        left.insert(a.clone(), av.into());
        left.insert(b.clone(), bv.into());
        let mut right = serde_json::Map::new();
        right.insert(b, bv.into());
        right.insert(a, av.into());
        let lb = canonical::canonical_json_bytes(&serde_json::Value::Object(left)).expect("left");
        let rb = canonical::canonical_json_bytes(&serde_json::Value::Object(right)).expect("right");
        prop_assert_eq!(lb, rb);
    }

    #[test]
    fn fixed_clock_reports_its_instant(ms in any::<i64>()) {
        prop_assert_eq!(FixedClock(ms).now_millis().expect("now"), ms);
    }
}

#[test]
fn system_clock_is_after_2020() {
    let now = SystemClock.now_millis().expect("now");
    assert!(now > 1_577_836_800_000);
}
