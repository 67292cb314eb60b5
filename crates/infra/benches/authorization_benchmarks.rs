use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::Utc;

use atrium_auth::Role;
use atrium_core::{EmailAddress, IdentityId};
use atrium_engine::ops::{
    AddMembers, CreateReply, CreateSpace, CreateTopic, GetSpace, NewMember, add_members,
    create_reply, create_space, create_topic, get_space,
};
use atrium_infra::InMemoryRepository;
use atrium_spaces::{Identity, SpaceKind, SpaceMetadata};

fn internal_identity(email: &str) -> Identity {
    Identity {
        id: IdentityId::new(),
        email: EmailAddress::new(email).unwrap(),
        display_name: email.split('@').next().unwrap().to_string(),
        is_internal: true,
    }
}

/// A repository holding one space with `member_count` internal members.
fn seeded_space(member_count: usize) -> (InMemoryRepository, Identity, atrium_core::SpaceId) {
    let repo = InMemoryRepository::new();
    let owner = internal_identity("owner@corp.test");
    repo.insert_identity(owner.clone());

    let mut members = Vec::with_capacity(member_count);
    for index in 0..member_count {
        let email = format!("member{index}@corp.test");
        repo.insert_identity(internal_identity(&email));
        members.push(NewMember {
            email,
            role: Role::Contributor,
        });
    }

    let created = create_space(
        &repo,
        CreateSpace {
            requester: owner.id,
            name: "Benchmark".to_string(),
            description: None,
            kind: SpaceKind::Internal,
            members,
            metadata: SpaceMetadata::default(),
            now: Utc::now(),
        },
    )
    .unwrap();

    (repo, owner, created.id)
}

fn bench_create_space(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_space");
    for member_count in [1usize, 10, 100] {
        group.throughput(Throughput::Elements(member_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(member_count),
            &member_count,
            |b, &member_count| {
                b.iter(|| {
                    let repo = InMemoryRepository::new();
                    let owner = internal_identity("owner@corp.test");
                    repo.insert_identity(owner.clone());
                    let members: Vec<NewMember> = (0..member_count)
                        .map(|index| NewMember {
                            email: format!("member{index}@partner.io"),
                            role: Role::Contributor,
                        })
                        .collect();
                    let created = create_space(
                        &repo,
                        CreateSpace {
                            requester: owner.id,
                            name: "Benchmark".to_string(),
                            description: None,
                            kind: SpaceKind::External,
                            members,
                            metadata: SpaceMetadata::default(),
                            now: Utc::now(),
                        },
                    )
                    .unwrap();
                    black_box(created)
                });
            },
        );
    }
    group.finish();
}

fn bench_get_space(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_space");
    for member_count in [10usize, 100] {
        let (repo, owner, space_id) = seeded_space(member_count);
        group.throughput(Throughput::Elements(member_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(member_count),
            &member_count,
            |b, _| {
                b.iter(|| {
                    let view = get_space(
                        &repo,
                        GetSpace {
                            requester: owner.id,
                            space_id,
                        },
                    )
                    .unwrap();
                    black_box(view)
                });
            },
        );
    }
    group.finish();
}

fn bench_reply_pipeline(c: &mut Criterion) {
    let (repo, owner, space_id) = seeded_space(10);
    let topic = create_topic(
        &repo,
        CreateTopic {
            requester: owner.id,
            space_id,
            title: "Benchmark thread".to_string(),
            description: None,
            now: Utc::now(),
        },
    )
    .unwrap();

    c.bench_function("create_reply", |b| {
        b.iter(|| {
            let reply = create_reply(
                &repo,
                CreateReply {
                    requester: owner.id,
                    space_id,
                    topic_id: topic.id,
                    content: "benchmark reply".to_string(),
                    is_voice: false,
                    now: Utc::now(),
                },
            )
            .unwrap();
            black_box(reply)
        });
    });
}

fn bench_idempotent_add(c: &mut Criterion) {
    let (repo, owner, space_id) = seeded_space(100);
    let members: Vec<NewMember> = (0..100)
        .map(|index| NewMember {
            email: format!("member{index}@corp.test"),
            role: Role::Contributor,
        })
        .collect();

    c.bench_function("add_members_noop_100", |b| {
        b.iter(|| {
            let result = add_members(
                &repo,
                AddMembers {
                    requester: owner.id,
                    space_id,
                    members: members.clone(),
                },
            )
            .unwrap();
            black_box(result)
        });
    });
}

criterion_group!(
    benches,
    bench_create_space,
    bench_get_space,
    bench_reply_pipeline,
    bench_idempotent_add
);
criterion_main!(benches);
