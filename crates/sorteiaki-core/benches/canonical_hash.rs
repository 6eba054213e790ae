use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use sorteiaki_core::canonical;

fn bench_result_digest(c: &mut Criterion) {
    let winners: Vec<_> = (0..25)
        .map(|i| json!({"id": format!("ig-user-{i}"), "username": format!("perfil_sortudo_{i}")}))
        .collect();
    let payload = json!({
        "id": "res-1700000000000-0a1b2c3d",
        "timestamp": 1_700_000_000_000_i64,
        "settings": {
            "winners_count": 25,
            "engagement_type": "COMMENTS",
            "min_mentions": 2,
            "required_keyword": "quero",
            "allow_duplicates": false
        },
        "winners": winners,
        "verification_hash": "SAK-0A1B2C3D"
    });

    c.bench_function("canonical_digest_hex/result_record", |b| {
        b.iter(|| canonical::canonical_digest_hex(black_box(&payload)).expect("digest"))
    });
}

criterion_group!(benches, bench_result_digest);
criterion_main!(benches);
