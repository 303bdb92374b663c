//! Benchmarks for the token service set up by the auth initializer
//!
//! Run with: cargo bench -p christmas-core --bench auth_service

use christmas_core::service::auth::{JwtService, TokenType};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const PRIVATE_PEM: &[u8] = include_bytes!("../tests/fixtures/jwt_private.pem");
const PUBLIC_PEM: &[u8] = include_bytes!("../tests/fixtures/jwt_public.pem");

fn jwt_service() -> JwtService {
    JwtService::new(PRIVATE_PEM, PUBLIC_PEM).expect("Failed to create JwtService")
}

fn bench_jwt_sign(c: &mut Criterion) {
    let jwt_service = jwt_service();

    c.bench_function("jwt_sign_access_token", |b| {
        b.iter(|| {
            let token = jwt_service
                .sign_token(black_box("bench_user_001"), TokenType::Access)
                .expect("sign failed");
            black_box(token);
        })
    });
}

fn bench_jwt_verify(c: &mut Criterion) {
    let jwt_service = jwt_service();
    let token = jwt_service
        .sign_token("bench_user_001", TokenType::Access)
        .expect("sign failed");

    c.bench_function("jwt_verify_access_token", |b| {
        b.iter(|| {
            let claims = jwt_service
                .verify_access_token(black_box(&token))
                .expect("verify failed");
            black_box(claims);
        })
    });
}

criterion_group!(benches, bench_jwt_sign, bench_jwt_verify);
criterion_main!(benches);
