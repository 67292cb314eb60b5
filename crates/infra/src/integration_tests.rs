//! End-to-end scenarios: operation entry points against the in-memory
//! repository.

use chrono::Utc;

use atrium_auth::Role;
use atrium_core::{EmailAddress, IdentityId, RejectionKind, SpaceId, TopicId};
use atrium_engine::ops::*;
use atrium_engine::views::{ReplyView, TopicView};
use atrium_spaces::{Identity, SpaceKind, SpaceMetadata, SpaceStatus, TopicStatus};

use crate::memory::InMemoryRepository;

fn identity(email: &str, is_internal: bool) -> Identity {
    Identity {
        id: IdentityId::new(),
        email: EmailAddress::new(email).unwrap(),
        display_name: email.split('@').next().unwrap().to_string(),
        is_internal,
    }
}

/// A space with the four canonical roles, all internal identities.
struct Fixture {
    repo: InMemoryRepository,
    owner: Identity,
    admin: Identity,
    contributor: Identity,
    listener: Identity,
    space_id: SpaceId,
}

fn fixture(kind: SpaceKind) -> Fixture {
    atrium_observability::init_pretty();

    let repo = InMemoryRepository::new();
    let owner = identity("owner@corp.test", true);
    let admin = identity("admin@corp.test", true);
    let contributor = identity("contrib@corp.test", true);
    let listener = identity("listener@corp.test", true);
    for member in [&owner, &admin, &contributor, &listener] {
        repo.insert_identity(member.clone());
    }

    let created = create_space(
        &repo,
        CreateSpace {
            requester: owner.id,
            name: "Launch Week".to_string(),
            description: Some("cross-team launch coordination".to_string()),
            kind,
            members: vec![
                NewMember {
                    email: "admin@corp.test".to_string(),
                    role: Role::Admin,
                },
                NewMember {
                    email: "contrib@corp.test".to_string(),
                    role: Role::Contributor,
                },
                NewMember {
                    email: "listener@corp.test".to_string(),
                    role: Role::Listener,
                },
            ],
            metadata: SpaceMetadata::default(),
            now: Utc::now(),
        },
    )
    .unwrap();

    Fixture {
        repo,
        owner,
        admin,
        contributor,
        listener,
        space_id: created.id,
    }
}

fn post_topic(fx: &Fixture, author: IdentityId) -> TopicView {
    create_topic(
        &fx.repo,
        CreateTopic {
            requester: author,
            space_id: fx.space_id,
            title: "Rollout checklist".to_string(),
            description: None,
            now: Utc::now(),
        },
    )
    .unwrap()
}

fn post_reply(fx: &Fixture, author: IdentityId, topic_id: TopicId, is_voice: bool) -> ReplyView {
    create_reply(
        &fx.repo,
        CreateReply {
            requester: author,
            space_id: fx.space_id,
            topic_id,
            content: "first pass done".to_string(),
            is_voice,
            now: Utc::now(),
        },
    )
    .unwrap()
}

fn archive(fx: &Fixture) {
    archive_space(
        &fx.repo,
        ArchiveSpace {
            requester: fx.owner.id,
            space_id: fx.space_id,
            now: Utc::now(),
        },
    )
    .unwrap();
}

// ── creation ────────────────────────────────────────────────────────────

#[test]
fn external_space_with_unknown_admin_and_internal_owner() {
    let repo = InMemoryRepository::new();
    let owner = identity("owner@corp.test", true);
    repo.insert_identity(owner.clone());

    let created = create_space(
        &repo,
        CreateSpace {
            requester: owner.id,
            name: "Partner Sync".to_string(),
            description: None,
            kind: SpaceKind::External,
            members: vec![NewMember {
                email: "a@ext.com".to_string(),
                role: Role::Admin,
            }],
            metadata: SpaceMetadata::default(),
            now: Utc::now(),
        },
    )
    .unwrap();

    // Final members = owner(OWNER) + a@ext.com(ADMIN); the internal-member
    // rule is satisfied by the owner.
    assert_eq!(created.member_count, 2);

    let view = get_space(
        &repo,
        GetSpace {
            requester: owner.id,
            space_id: created.id,
        },
    )
    .unwrap();
    let roles: Vec<(String, Role)> = view
        .members
        .iter()
        .map(|m| (m.email.as_str().to_string(), m.role))
        .collect();
    assert!(roles.contains(&("owner@corp.test".to_string(), Role::Owner)));
    assert!(roles.contains(&("a@ext.com".to_string(), Role::Admin)));
}

#[test]
fn internal_space_rejects_existing_external_member() {
    let repo = InMemoryRepository::new();
    let owner = identity("owner@corp.test", true);
    let guest = identity("guest@partner.io", false);
    repo.insert_identity(owner.clone());
    repo.insert_identity(guest);

    let err = create_space(
        &repo,
        CreateSpace {
            requester: owner.id,
            name: "Internal Only".to_string(),
            description: None,
            kind: SpaceKind::Internal,
            members: vec![NewMember {
                email: "guest@partner.io".to_string(),
                role: Role::Contributor,
            }],
            metadata: SpaceMetadata::default(),
            now: Utc::now(),
        },
    )
    .unwrap_err();

    assert_eq!(err.kind, RejectionKind::InvariantViolation);
    assert!(err.message.contains("internal space"));
}

#[test]
fn creation_always_yields_exactly_one_owner() {
    let fx = fixture(SpaceKind::Internal);
    let view = get_space(
        &fx.repo,
        GetSpace {
            requester: fx.owner.id,
            space_id: fx.space_id,
        },
    )
    .unwrap();

    let owners = view.members.iter().filter(|m| m.role == Role::Owner).count();
    assert_eq!(owners, 1);
    assert_eq!(view.member_count, 4);
}

#[test]
fn creator_listed_with_non_owner_role_is_rejected() {
    let repo = InMemoryRepository::new();
    let owner = identity("owner@corp.test", true);
    repo.insert_identity(owner.clone());

    let err = create_space(
        &repo,
        CreateSpace {
            requester: owner.id,
            name: "Misconfigured".to_string(),
            description: None,
            kind: SpaceKind::Internal,
            members: vec![NewMember {
                email: "owner@corp.test".to_string(),
                role: Role::Admin,
            }],
            metadata: SpaceMetadata::default(),
            now: Utc::now(),
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::InvariantViolation);
}

#[test]
fn second_owner_entry_is_rejected() {
    let repo = InMemoryRepository::new();
    let owner = identity("owner@corp.test", true);
    let other = identity("other@corp.test", true);
    repo.insert_identity(owner.clone());
    repo.insert_identity(other);

    let err = create_space(
        &repo,
        CreateSpace {
            requester: owner.id,
            name: "Two Crowns".to_string(),
            description: None,
            kind: SpaceKind::Internal,
            members: vec![NewMember {
                email: "other@corp.test".to_string(),
                role: Role::Owner,
            }],
            metadata: SpaceMetadata::default(),
            now: Utc::now(),
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::InvariantViolation);
    assert!(err.message.contains("exactly one OWNER"));
}

#[test]
fn creation_requires_a_known_internal_creator() {
    let repo = InMemoryRepository::new();
    let guest = identity("guest@partner.io", false);
    repo.insert_identity(guest.clone());

    let input = |requester| CreateSpace {
        requester,
        name: "Nope".to_string(),
        description: None,
        kind: SpaceKind::External,
        members: vec![],
        metadata: SpaceMetadata::default(),
        now: Utc::now(),
    };

    let err = create_space(&repo, input(guest.id)).unwrap_err();
    assert_eq!(err.kind, RejectionKind::NotFound);

    let err = create_space(&repo, input(IdentityId::new())).unwrap_err();
    assert_eq!(err.kind, RejectionKind::NotFound);
}

// ── membership ──────────────────────────────────────────────────────────

#[test]
fn re_adding_an_existing_member_is_a_noop() {
    let fx = fixture(SpaceKind::Internal);

    let result = add_members(
        &fx.repo,
        AddMembers {
            requester: fx.admin.id,
            space_id: fx.space_id,
            members: vec![NewMember {
                email: "contrib@corp.test".to_string(),
                role: Role::Listener,
            }],
        },
    )
    .unwrap();

    assert_eq!(result.added_count, 0);
    let view = get_space(
        &fx.repo,
        GetSpace {
            requester: fx.owner.id,
            space_id: fx.space_id,
        },
    )
    .unwrap();
    assert_eq!(view.member_count, 4);
    // The existing role is untouched.
    let contrib = view
        .members
        .iter()
        .find(|m| m.id == fx.contributor.id)
        .unwrap();
    assert_eq!(contrib.role, Role::Contributor);
}

#[test]
fn unknown_email_rejected_for_internal_allowed_for_external() {
    let fx = fixture(SpaceKind::Internal);
    let err = add_members(
        &fx.repo,
        AddMembers {
            requester: fx.owner.id,
            space_id: fx.space_id,
            members: vec![NewMember {
                email: "stranger@partner.io".to_string(),
                role: Role::Listener,
            }],
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Conflict);

    let fx = fixture(SpaceKind::External);
    let result = add_members(
        &fx.repo,
        AddMembers {
            requester: fx.owner.id,
            space_id: fx.space_id,
            members: vec![NewMember {
                email: "stranger@partner.io".to_string(),
                role: Role::Listener,
            }],
        },
    )
    .unwrap();
    assert_eq!(result.added_count, 1);
}

#[test]
fn contributor_may_not_manage_members() {
    let fx = fixture(SpaceKind::Internal);
    let err = add_members(
        &fx.repo,
        AddMembers {
            requester: fx.contributor.id,
            space_id: fx.space_id,
            members: vec![NewMember {
                email: "admin@corp.test".to_string(),
                role: Role::Listener,
            }],
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Forbidden);
}

#[test]
fn admin_cannot_remove_the_owner() {
    let fx = fixture(SpaceKind::Internal);
    let err = remove_members(
        &fx.repo,
        RemoveMembers {
            requester: fx.admin.id,
            space_id: fx.space_id,
            member_ids: vec![fx.owner.id],
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Forbidden);
    assert!(err.message.contains("OWNER"));
}

#[test]
fn requester_cannot_remove_self() {
    let fx = fixture(SpaceKind::Internal);
    let err = remove_members(
        &fx.repo,
        RemoveMembers {
            requester: fx.admin.id,
            space_id: fx.space_id,
            member_ids: vec![fx.admin.id],
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Forbidden);
    assert!(err.message.contains("yourself"));
}

#[test]
fn removal_targets_must_all_be_members() {
    let fx = fixture(SpaceKind::Internal);
    let err = remove_members(
        &fx.repo,
        RemoveMembers {
            requester: fx.owner.id,
            space_id: fx.space_id,
            member_ids: vec![fx.listener.id, IdentityId::new()],
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Conflict);

    // Nothing was removed.
    let view = get_space(
        &fx.repo,
        GetSpace {
            requester: fx.owner.id,
            space_id: fx.space_id,
        },
    )
    .unwrap();
    assert_eq!(view.member_count, 4);
}

#[test]
fn owner_removes_a_listener() {
    let fx = fixture(SpaceKind::Internal);
    let result = remove_members(
        &fx.repo,
        RemoveMembers {
            requester: fx.owner.id,
            space_id: fx.space_id,
            member_ids: vec![fx.listener.id],
        },
    )
    .unwrap();
    assert_eq!(result.removed_count, 1);
}

#[test]
fn owner_cannot_change_own_role() {
    let fx = fixture(SpaceKind::Internal);
    let err = update_member_role(
        &fx.repo,
        UpdateMemberRole {
            requester: fx.owner.id,
            space_id: fx.space_id,
            member_id: fx.owner.id,
            role: Role::Admin,
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Forbidden);
    assert!(err.message.contains("own role"));
}

#[test]
fn role_change_is_owner_only_despite_admin_managing_members() {
    let fx = fixture(SpaceKind::Internal);

    // ADMIN can add members but must not pass the role-change row.
    let err = update_member_role(
        &fx.repo,
        UpdateMemberRole {
            requester: fx.admin.id,
            space_id: fx.space_id,
            member_id: fx.listener.id,
            role: Role::Contributor,
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Forbidden);

    let updated = update_member_role(
        &fx.repo,
        UpdateMemberRole {
            requester: fx.owner.id,
            space_id: fx.space_id,
            member_id: fx.listener.id,
            role: Role::Contributor,
        },
    )
    .unwrap();
    assert_eq!(updated.role, Role::Contributor);

    let view = get_space(
        &fx.repo,
        GetSpace {
            requester: fx.owner.id,
            space_id: fx.space_id,
        },
    )
    .unwrap();
    let listener = view.members.iter().find(|m| m.id == fx.listener.id).unwrap();
    assert_eq!(listener.role, Role::Contributor);
}

#[test]
fn owner_role_is_not_grantable_through_role_change() {
    let fx = fixture(SpaceKind::Internal);
    let err = update_member_role(
        &fx.repo,
        UpdateMemberRole {
            requester: fx.owner.id,
            space_id: fx.space_id,
            member_id: fx.admin.id,
            role: Role::Owner,
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Forbidden);
}

// ── information hiding ──────────────────────────────────────────────────

#[test]
fn non_membership_and_absence_are_indistinguishable() {
    let fx = fixture(SpaceKind::Internal);
    let outsider = identity("outsider@corp.test", true);
    fx.repo.insert_identity(outsider.clone());

    let not_member = get_space(
        &fx.repo,
        GetSpace {
            requester: outsider.id,
            space_id: fx.space_id,
        },
    )
    .unwrap_err();
    let no_space = get_space(
        &fx.repo,
        GetSpace {
            requester: outsider.id,
            space_id: SpaceId::new(),
        },
    )
    .unwrap_err();

    assert_eq!(not_member, no_space);
    assert_eq!(not_member.kind, RejectionKind::NotFound);
}

// ── topics & replies ────────────────────────────────────────────────────

#[test]
fn contributor_creates_topics_listener_cannot() {
    let fx = fixture(SpaceKind::Internal);

    let topic = post_topic(&fx, fx.contributor.id);
    assert_eq!(topic.status, TopicStatus::Open);
    assert_eq!(topic.author.id, fx.contributor.id);

    let err = create_topic(
        &fx.repo,
        CreateTopic {
            requester: fx.listener.id,
            space_id: fx.space_id,
            title: "Listener topic".to_string(),
            description: None,
            now: Utc::now(),
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Forbidden);
}

#[test]
fn topic_status_updates_stamp_and_clear_closed_at() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);

    let resolved = update_topic(
        &fx.repo,
        UpdateTopic {
            requester: fx.contributor.id,
            space_id: fx.space_id,
            topic_id: topic.id,
            title: None,
            description: None,
            status: Some(TopicStatus::Resolved),
            now: Utc::now(),
        },
    )
    .unwrap();
    assert!(resolved.closed_at.is_some());

    let reopened = update_topic(
        &fx.repo,
        UpdateTopic {
            requester: fx.contributor.id,
            space_id: fx.space_id,
            topic_id: topic.id,
            title: None,
            description: None,
            status: Some(TopicStatus::Open),
            now: Utc::now(),
        },
    )
    .unwrap();
    assert!(reopened.closed_at.is_none());
}

#[test]
fn topic_modification_is_author_or_manager() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);

    // Another non-manager member may not touch it.
    let other = identity("other@corp.test", true);
    fx.repo.insert_identity(other.clone());
    add_members(
        &fx.repo,
        AddMembers {
            requester: fx.owner.id,
            space_id: fx.space_id,
            members: vec![NewMember {
                email: "other@corp.test".to_string(),
                role: Role::Contributor,
            }],
        },
    )
    .unwrap();

    let err = delete_topic(
        &fx.repo,
        DeleteTopic {
            requester: other.id,
            space_id: fx.space_id,
            topic_id: topic.id,
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Forbidden);

    // ADMIN may, without authorship.
    delete_topic(
        &fx.repo,
        DeleteTopic {
            requester: fx.admin.id,
            space_id: fx.space_id,
            topic_id: topic.id,
        },
    )
    .unwrap();
}

#[test]
fn deleting_a_topic_cascades_to_its_replies() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);
    post_reply(&fx, fx.admin.id, topic.id, false);
    post_reply(&fx, fx.contributor.id, topic.id, true);

    delete_topic(
        &fx.repo,
        DeleteTopic {
            requester: fx.contributor.id,
            space_id: fx.space_id,
            topic_id: topic.id,
        },
    )
    .unwrap();

    use atrium_engine::repository::SpaceRepository;
    assert_eq!(fx.repo.count_replies(topic.id).unwrap(), 0);
}

#[test]
fn replies_list_oldest_first_and_count_on_topics() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);

    // Explicit timestamps so the ordering assertion cannot tie.
    let t0 = Utc::now();
    let first = create_reply(
        &fx.repo,
        CreateReply {
            requester: fx.contributor.id,
            space_id: fx.space_id,
            topic_id: topic.id,
            content: "first".to_string(),
            is_voice: false,
            now: t0,
        },
    )
    .unwrap();
    let second = create_reply(
        &fx.repo,
        CreateReply {
            requester: fx.admin.id,
            space_id: fx.space_id,
            topic_id: topic.id,
            content: "second".to_string(),
            is_voice: false,
            now: t0 + chrono::Duration::seconds(1),
        },
    )
    .unwrap();

    let replies = list_replies(
        &fx.repo,
        ListReplies {
            requester: fx.listener.id,
            space_id: fx.space_id,
            topic_id: topic.id,
        },
    )
    .unwrap();
    assert_eq!(replies.len(), 2);
    assert!(replies[0].created_at <= replies[1].created_at);
    assert_eq!(replies[0].id, first.id);
    assert_eq!(replies[1].id, second.id);

    let topics = list_topics(
        &fx.repo,
        ListTopics {
            requester: fx.listener.id,
            space_id: fx.space_id,
        },
    )
    .unwrap();
    assert_eq!(topics[0].reply_count, 2);
}

#[test]
fn listener_may_read_but_not_reply() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);

    let err = create_reply(
        &fx.repo,
        CreateReply {
            requester: fx.listener.id,
            space_id: fx.space_id,
            topic_id: topic.id,
            content: "me too".to_string(),
            is_voice: false,
            now: Utc::now(),
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::Forbidden);

    assert!(
        get_topic(
            &fx.repo,
            GetTopic {
                requester: fx.listener.id,
                space_id: fx.space_id,
                topic_id: topic.id,
            },
        )
        .is_ok()
    );
}

#[test]
fn voice_replies_reject_content_edits_for_every_role() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);
    let reply = post_reply(&fx, fx.contributor.id, topic.id, true);

    for requester in [fx.owner.id, fx.admin.id, fx.contributor.id] {
        let err = update_reply(
            &fx.repo,
            UpdateReply {
                requester,
                space_id: fx.space_id,
                topic_id: topic.id,
                reply_id: reply.id,
                content: "redacted".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, RejectionKind::Forbidden);
        assert!(err.message.contains("voice"));
    }

    // Deletion is still permitted to authorized actors.
    delete_reply(
        &fx.repo,
        DeleteReply {
            requester: fx.owner.id,
            space_id: fx.space_id,
            topic_id: topic.id,
            reply_id: reply.id,
        },
    )
    .unwrap();
}

#[test]
fn author_edits_own_text_reply() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);
    let reply = post_reply(&fx, fx.contributor.id, topic.id, false);

    let updated = update_reply(
        &fx.repo,
        UpdateReply {
            requester: fx.contributor.id,
            space_id: fx.space_id,
            topic_id: topic.id,
            reply_id: reply.id,
            content: "second pass done".to_string(),
        },
    )
    .unwrap();
    assert_eq!(updated.content.as_str(), "second pass done");
}

// ── lifecycle gating ────────────────────────────────────────────────────

#[test]
fn author_edit_in_archived_space_is_invalid_state() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);
    let reply = post_reply(&fx, fx.contributor.id, topic.id, false);
    archive(&fx);

    // Authorship does not matter; the lifecycle gate comes first.
    let err = update_reply(
        &fx.repo,
        UpdateReply {
            requester: fx.contributor.id,
            space_id: fx.space_id,
            topic_id: topic.id,
            reply_id: reply.id,
            content: "too late".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err.kind, RejectionKind::InvalidState);
}

#[test]
fn every_mutating_operation_is_rejected_in_an_archived_space() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);
    let reply = post_reply(&fx, fx.contributor.id, topic.id, false);
    archive(&fx);

    let now = Utc::now();
    let results: Vec<(&str, RejectionKind)> = vec![
        (
            "update_space",
            update_space(
                &fx.repo,
                UpdateSpace {
                    requester: fx.owner.id,
                    space_id: fx.space_id,
                    name: Some("renamed".to_string()),
                    description: None,
                    status: None,
                    metadata: None,
                    now,
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "archive_space",
            archive_space(
                &fx.repo,
                ArchiveSpace {
                    requester: fx.owner.id,
                    space_id: fx.space_id,
                    now,
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "add_members",
            add_members(
                &fx.repo,
                AddMembers {
                    requester: fx.owner.id,
                    space_id: fx.space_id,
                    members: vec![NewMember {
                        email: "admin@corp.test".to_string(),
                        role: Role::Listener,
                    }],
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "remove_members",
            remove_members(
                &fx.repo,
                RemoveMembers {
                    requester: fx.owner.id,
                    space_id: fx.space_id,
                    member_ids: vec![fx.listener.id],
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "update_member_role",
            update_member_role(
                &fx.repo,
                UpdateMemberRole {
                    requester: fx.owner.id,
                    space_id: fx.space_id,
                    member_id: fx.listener.id,
                    role: Role::Contributor,
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "create_topic",
            create_topic(
                &fx.repo,
                CreateTopic {
                    requester: fx.contributor.id,
                    space_id: fx.space_id,
                    title: "late".to_string(),
                    description: None,
                    now,
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "update_topic",
            update_topic(
                &fx.repo,
                UpdateTopic {
                    requester: fx.contributor.id,
                    space_id: fx.space_id,
                    topic_id: topic.id,
                    title: Some("late".to_string()),
                    description: None,
                    status: None,
                    now,
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "delete_topic",
            delete_topic(
                &fx.repo,
                DeleteTopic {
                    requester: fx.owner.id,
                    space_id: fx.space_id,
                    topic_id: topic.id,
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "create_reply",
            create_reply(
                &fx.repo,
                CreateReply {
                    requester: fx.contributor.id,
                    space_id: fx.space_id,
                    topic_id: topic.id,
                    content: "late".to_string(),
                    is_voice: false,
                    now,
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "update_reply",
            update_reply(
                &fx.repo,
                UpdateReply {
                    requester: fx.contributor.id,
                    space_id: fx.space_id,
                    topic_id: topic.id,
                    reply_id: reply.id,
                    content: "late".to_string(),
                },
            )
            .unwrap_err()
            .kind,
        ),
        (
            "delete_reply",
            delete_reply(
                &fx.repo,
                DeleteReply {
                    requester: fx.owner.id,
                    space_id: fx.space_id,
                    topic_id: topic.id,
                    reply_id: reply.id,
                },
            )
            .unwrap_err()
            .kind,
        ),
    ];

    for (operation, kind) in results {
        assert_eq!(kind, RejectionKind::InvalidState, "{operation}");
    }
}

#[test]
fn reads_remain_allowed_in_an_archived_space() {
    let fx = fixture(SpaceKind::Internal);
    let topic = post_topic(&fx, fx.contributor.id);
    let reply = post_reply(&fx, fx.contributor.id, topic.id, false);
    archive(&fx);

    let view = get_space(
        &fx.repo,
        GetSpace {
            requester: fx.listener.id,
            space_id: fx.space_id,
        },
    )
    .unwrap();
    assert_eq!(view.status, SpaceStatus::Archived);
    assert!(view.archived_at.is_some());

    assert!(
        list_topics(
            &fx.repo,
            ListTopics {
                requester: fx.listener.id,
                space_id: fx.space_id,
            },
        )
        .is_ok()
    );
    assert!(
        get_reply(
            &fx.repo,
            GetReply {
                requester: fx.listener.id,
                space_id: fx.space_id,
                topic_id: topic.id,
                reply_id: reply.id,
            },
        )
        .is_ok()
    );
}

// ── listing ─────────────────────────────────────────────────────────────

#[test]
fn space_listing_shows_only_memberships_with_their_roles() {
    let fx = fixture(SpaceKind::Internal);

    // A second space the listener does not belong to.
    create_space(
        &fx.repo,
        CreateSpace {
            requester: fx.owner.id,
            name: "Owners Only".to_string(),
            description: None,
            kind: SpaceKind::Internal,
            members: vec![],
            metadata: SpaceMetadata::default(),
            now: Utc::now(),
        },
    )
    .unwrap();

    let listener_spaces = list_spaces(
        &fx.repo,
        ListSpaces {
            requester: fx.listener.id,
        },
    )
    .unwrap();
    assert_eq!(listener_spaces.len(), 1);
    assert_eq!(listener_spaces[0].current_user_role, Role::Listener);
    assert_eq!(listener_spaces[0].member_count, 4);

    let owner_spaces = list_spaces(
        &fx.repo,
        ListSpaces {
            requester: fx.owner.id,
        },
    )
    .unwrap();
    assert_eq!(owner_spaces.len(), 2);
    // Newest first.
    assert!(owner_spaces[0].created_at >= owner_spaces[1].created_at);
}
