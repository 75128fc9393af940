use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use ridegate::auth::{
    authorize_protected, authorize_public, MemoryStore, Role, RouteRequirement, Session,
    SessionKeys, SessionResolver,
};
use ridegate::RouteTable;

fn bench_guards(c: &mut Criterion) {
    let student = Session::new(Some("t1".to_string()), Some(Role::Student));
    let college_only = RouteRequirement::roles([Role::College]);

    c.bench_function("authorize_protected_allow", |b| {
        b.iter(|| authorize_protected(black_box(&student), black_box(&RouteRequirement::any_role())))
    });

    c.bench_function("authorize_protected_redirect", |b| {
        b.iter(|| authorize_protected(black_box(&student), black_box(&college_only)))
    });

    c.bench_function("authorize_public", |b| {
        b.iter(|| authorize_public(black_box(&student)))
    });
}

fn bench_route_table(c: &mut Criterion) {
    let table = RouteTable::portal();
    let driver = Session::new(Some("d1".to_string()), Some(Role::Driver));

    c.bench_function("route_table_build", |b| b.iter(RouteTable::portal));

    c.bench_function("navigate_literal", |b| {
        b.iter(|| table.navigate(black_box("/driver/earnings"), black_box(&driver)))
    });

    c.bench_function("navigate_param", |b| {
        b.iter(|| table.navigate(black_box("/driver/ride/66b0f1"), black_box(&driver)))
    });

    c.bench_function("navigate_fallback", |b| {
        b.iter(|| table.navigate(black_box("/no/such/page"), black_box(&driver)))
    });
}

fn bench_resolver(c: &mut Criterion) {
    let resolver = SessionResolver::new(
        MemoryStore::with_entries([("user", r#"{"token":"t1","role":"student","name":"Asha"}"#)]),
        SessionKeys::default(),
    );
    let corrupt = SessionResolver::new(
        MemoryStore::with_entries([("user", "{\"token\":")]),
        SessionKeys::default(),
    );

    c.bench_function("resolve_session", |b| b.iter(|| resolver.resolve()));
    c.bench_function("resolve_corrupt_session", |b| b.iter(|| corrupt.resolve()));
}

criterion_group!(benches, bench_guards, bench_route_table, bench_resolver);
criterion_main!(benches);
