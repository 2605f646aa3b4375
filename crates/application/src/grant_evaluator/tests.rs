use proptest::prelude::*;
use sebserver_core::{AppError, InstitutionId, UserId, UserIdentity, UserRole};
use sebserver_domain::{EntitySnapshot, EntityType, PrivilegeLevel};

use super::GrantEvaluator;
use crate::{GrantError, GrantRegistry, GrantRules, GrantTable};

const INSTITUTION: InstitutionId = InstitutionId::new(1);
const OTHER_INSTITUTION: InstitutionId = InstitutionId::new(2);

const REQUESTABLE: [PrivilegeLevel; 3] = [
    PrivilegeLevel::ReadOnly,
    PrivilegeLevel::Modify,
    PrivilegeLevel::Write,
];

fn user(roles: &[UserRole]) -> UserIdentity {
    UserIdentity::new(UserId::new(), "tester", INSTITUTION, roles.iter().copied())
}

fn evaluator(table: GrantTable) -> GrantEvaluator {
    GrantEvaluator::new(GrantRegistry::from_table(table), GrantRules::new())
}

fn single_row(
    entity_type: EntityType,
    role: UserRole,
    base: PrivilegeLevel,
    institutional: PrivilegeLevel,
    owner: PrivilegeLevel,
) -> GrantEvaluator {
    evaluator(GrantTable::new().register(entity_type, role, base, institutional, owner))
}

fn standard() -> GrantEvaluator {
    let Ok(evaluator) = GrantEvaluator::standard() else {
        panic!("standard evaluator should build");
    };
    evaluator
}

#[test]
fn unregistered_role_is_denied_every_level() {
    let evaluator = single_row(
        EntityType::Exam,
        UserRole::ExamAdmin,
        PrivilegeLevel::Write,
        PrivilegeLevel::Write,
        PrivilegeLevel::Write,
    );
    let teacher = user(&[UserRole::Teacher]);
    let exam = EntitySnapshot::new(EntityType::Exam, INSTITUTION).with_owner(teacher.user_id());

    for requested in REQUESTABLE {
        assert!(!evaluator.has_grant(&exam, requested, &teacher));
        assert!(!evaluator.has_base_grant(EntityType::Exam, requested, &teacher));
    }
}

#[test]
fn base_write_grants_everything_everywhere() {
    let evaluator = single_row(
        EntityType::Institution,
        UserRole::SebServerAdmin,
        PrivilegeLevel::Write,
        PrivilegeLevel::None,
        PrivilegeLevel::None,
    );
    let admin = user(&[UserRole::SebServerAdmin]);
    let foreign =
        EntitySnapshot::new(EntityType::Institution, OTHER_INSTITUTION).with_owner(UserId::new());

    for requested in REQUESTABLE {
        assert!(evaluator.has_grant(&foreign, requested, &admin));
        assert!(evaluator.has_base_grant(EntityType::Institution, requested, &admin));
    }
}

#[test]
fn none_request_is_denied_despite_base_write() {
    let evaluator = single_row(
        EntityType::Institution,
        UserRole::SebServerAdmin,
        PrivilegeLevel::Write,
        PrivilegeLevel::Write,
        PrivilegeLevel::Write,
    );
    let admin = user(&[UserRole::SebServerAdmin]);
    let own = EntitySnapshot::new(EntityType::Institution, INSTITUTION).with_owner(admin.user_id());

    assert!(!evaluator.has_grant(&own, PrivilegeLevel::None, &admin));
    assert!(!evaluator.has_base_grant(EntityType::Institution, PrivilegeLevel::None, &admin));
    assert!(matches!(
        evaluator.check_grant_for_type(EntityType::Institution, PrivilegeLevel::None, &admin),
        Err(GrantError::PermissionDenied { .. })
    ));
}

#[test]
fn none_request_is_denied_to_exam_supporters() {
    let evaluator = standard();
    let supporter = user(&[UserRole::ExamSupporter]);
    let exam = EntitySnapshot::new(EntityType::Exam, INSTITUTION)
        .with_owner(supporter.user_id())
        .with_supporters([supporter.user_id()]);

    assert!(!evaluator.has_grant(&exam, PrivilegeLevel::None, &supporter));
}

#[test]
fn institutional_modify_requires_matching_institution() {
    let evaluator = single_row(
        EntityType::Institution,
        UserRole::InstitutionalAdmin,
        PrivilegeLevel::None,
        PrivilegeLevel::Modify,
        PrivilegeLevel::None,
    );
    let admin = user(&[UserRole::InstitutionalAdmin]);
    let own = EntitySnapshot::new(EntityType::Institution, INSTITUTION);
    let foreign = EntitySnapshot::new(EntityType::Institution, OTHER_INSTITUTION);

    assert!(evaluator.has_grant(&own, PrivilegeLevel::ReadOnly, &admin));
    assert!(evaluator.has_grant(&own, PrivilegeLevel::Modify, &admin));
    assert!(!evaluator.has_grant(&own, PrivilegeLevel::Write, &admin));
    for requested in REQUESTABLE {
        assert!(!evaluator.has_grant(&foreign, requested, &admin));
    }
}

#[test]
fn owner_write_requires_matching_owner() {
    let evaluator = single_row(
        EntityType::User,
        UserRole::ExamAdmin,
        PrivilegeLevel::None,
        PrivilegeLevel::None,
        PrivilegeLevel::Write,
    );
    let exam_admin = user(&[UserRole::ExamAdmin]);
    let own_account =
        EntitySnapshot::new(EntityType::User, INSTITUTION).with_owner(exam_admin.user_id());
    let other_account =
        EntitySnapshot::new(EntityType::User, INSTITUTION).with_owner(UserId::new());
    let unowned = EntitySnapshot::new(EntityType::User, INSTITUTION);

    assert!(evaluator.has_grant(&own_account, PrivilegeLevel::Write, &exam_admin));
    assert!(!evaluator.has_grant(&other_account, PrivilegeLevel::ReadOnly, &exam_admin));
    assert!(!evaluator.has_grant(&unowned, PrivilegeLevel::ReadOnly, &exam_admin));
}

#[test]
fn roles_are_combined_by_union() {
    let evaluator = evaluator(
        GrantTable::new()
            .register(
                EntityType::LmsSetup,
                UserRole::ExamSupporter,
                PrivilegeLevel::None,
                PrivilegeLevel::None,
                PrivilegeLevel::None,
            )
            .register(
                EntityType::LmsSetup,
                UserRole::SebServerAdmin,
                PrivilegeLevel::Write,
                PrivilegeLevel::None,
                PrivilegeLevel::None,
            ),
    );
    let both = user(&[UserRole::ExamSupporter, UserRole::SebServerAdmin]);
    let setup = EntitySnapshot::new(EntityType::LmsSetup, OTHER_INSTITUTION);

    assert!(evaluator.has_grant(&setup, PrivilegeLevel::Write, &both));
}

#[test]
fn user_without_roles_is_denied() {
    let evaluator = standard();
    let nobody = user(&[]);
    let institution = EntitySnapshot::new(EntityType::Institution, INSTITUTION);

    assert!(!evaluator.has_grant(&institution, PrivilegeLevel::ReadOnly, &nobody));
    assert!(!evaluator.has_base_grant(EntityType::Institution, PrivilegeLevel::ReadOnly, &nobody));
}

#[test]
fn exam_supporter_scenario() {
    let evaluator = standard();
    let supporter = user(&[UserRole::ExamSupporter]);
    let unowned = EntitySnapshot::new(EntityType::Exam, INSTITUTION);
    let owned = EntitySnapshot::new(EntityType::Exam, INSTITUTION).with_owner(supporter.user_id());

    assert!(!evaluator.has_grant(&unowned, PrivilegeLevel::Modify, &supporter));
    assert!(evaluator.has_grant(&owned, PrivilegeLevel::ReadOnly, &supporter));
    assert!(evaluator.has_grant(&owned, PrivilegeLevel::Modify, &supporter));
    assert!(!evaluator.has_grant(&owned, PrivilegeLevel::Write, &supporter));
}

#[test]
fn exam_supporter_listed_as_supporter_gets_owner_privileges() {
    let evaluator = standard();
    let supporter = user(&[UserRole::ExamSupporter]);
    let exam = EntitySnapshot::new(EntityType::Exam, INSTITUTION)
        .with_owner(UserId::new())
        .with_supporters([supporter.user_id()]);

    assert!(evaluator.has_grant(&exam, PrivilegeLevel::Modify, &supporter));
    assert!(!evaluator.has_grant(&exam, PrivilegeLevel::Write, &supporter));
}

#[test]
fn custom_rule_replaces_default_evaluation() {
    let registry = GrantRegistry::from_table(GrantTable::new().register(
        EntityType::Exam,
        UserRole::SebServerAdmin,
        PrivilegeLevel::Write,
        PrivilegeLevel::None,
        PrivilegeLevel::None,
    ));
    let Ok(rules) = GrantRules::new().with_rule_fn(EntityType::Exam, |_, _, _| Ok(false)) else {
        panic!("rule should register");
    };
    let evaluator = GrantEvaluator::new(registry, rules);
    let admin = user(&[UserRole::SebServerAdmin]);
    let exam = EntitySnapshot::new(EntityType::Exam, INSTITUTION);

    assert!(!evaluator.has_grant(&exam, PrivilegeLevel::ReadOnly, &admin));
    // Type-level checks have no instance and ignore custom rules.
    assert!(evaluator.has_base_grant(EntityType::Exam, PrivilegeLevel::Write, &admin));
}

#[test]
fn failing_custom_rule_denies() {
    let registry = GrantRegistry::from_table(GrantTable::new().register(
        EntityType::Exam,
        UserRole::SebServerAdmin,
        PrivilegeLevel::Write,
        PrivilegeLevel::None,
        PrivilegeLevel::None,
    ));
    let Ok(rules) = GrantRules::new().with_rule_fn(EntityType::Exam, |_, _, _| {
        Err(AppError::Internal("supporter lookup failed".to_owned()))
    }) else {
        panic!("rule should register");
    };
    let evaluator = GrantEvaluator::new(registry, rules);
    let exam = EntitySnapshot::new(EntityType::Exam, INSTITUTION);

    assert!(!evaluator.has_grant(
        &exam,
        PrivilegeLevel::ReadOnly,
        &user(&[UserRole::SebServerAdmin])
    ));
}

#[test]
fn institutional_type_check_uses_own_institution() {
    let evaluator = standard();
    let exam_admin = user(&[UserRole::ExamAdmin]);
    let supporter = user(&[UserRole::ExamSupporter]);

    assert!(!evaluator.has_base_grant(EntityType::Exam, PrivilegeLevel::Write, &exam_admin));
    assert!(evaluator.has_institutional_grant_for_type(
        EntityType::Exam,
        PrivilegeLevel::Write,
        &exam_admin
    ));
    assert!(!evaluator.has_institutional_grant_for_type(
        EntityType::Exam,
        PrivilegeLevel::ReadOnly,
        &supporter
    ));
}

#[test]
fn check_grant_returns_subject_or_denial() {
    let evaluator = standard();
    let admin = user(&[UserRole::InstitutionalAdmin]);
    let own = EntitySnapshot::new(EntityType::LmsSetup, INSTITUTION);
    let foreign = EntitySnapshot::new(EntityType::LmsSetup, OTHER_INSTITUTION);

    assert!(matches!(
        evaluator.check_grant(&own, PrivilegeLevel::Write, &admin),
        Ok(checked) if *checked == own
    ));
    assert_eq!(
        evaluator.check_grant(&foreign, PrivilegeLevel::ReadOnly, &admin),
        Err(GrantError::PermissionDenied {
            entity_type: EntityType::LmsSetup,
            requested: PrivilegeLevel::ReadOnly,
            user_id: admin.user_id(),
        })
    );
}

#[test]
fn check_grant_for_type_uses_base_tier_only() {
    let evaluator = standard();
    let server_admin = user(&[UserRole::SebServerAdmin]);
    let institutional_admin = user(&[UserRole::InstitutionalAdmin]);

    assert_eq!(
        evaluator.check_grant_for_type(
            EntityType::Institution,
            PrivilegeLevel::Write,
            &server_admin
        ),
        Ok(EntityType::Institution)
    );
    assert!(matches!(
        evaluator.check_grant_for_type(
            EntityType::Institution,
            PrivilegeLevel::ReadOnly,
            &institutional_admin
        ),
        Err(GrantError::PermissionDenied { .. })
    ));
}

#[test]
fn grant_filter_keeps_granted_entities_in_order() {
    let evaluator = standard();
    let supporter = user(&[UserRole::ExamSupporter]);
    let exams = vec![
        EntitySnapshot::new(EntityType::Exam, INSTITUTION).with_owner(supporter.user_id()),
        EntitySnapshot::new(EntityType::Exam, INSTITUTION),
        EntitySnapshot::new(EntityType::Exam, OTHER_INSTITUTION).with_owner(supporter.user_id()),
        EntitySnapshot::new(EntityType::Exam, INSTITUTION).with_supporters([supporter.user_id()]),
        EntitySnapshot::new(EntityType::Exam, INSTITUTION).with_owner(UserId::new()),
    ];
    let expected: Vec<EntitySnapshot> = exams
        .iter()
        .filter(|exam| evaluator.has_grant(*exam, PrivilegeLevel::ReadOnly, &supporter))
        .cloned()
        .collect();

    let filter = evaluator.grant_filter(EntityType::Exam, PrivilegeLevel::ReadOnly, &supporter);
    let filtered = filter.filter(exams.clone());

    assert_eq!(filtered, expected);
    assert_eq!(filtered, vec![exams[0].clone(), exams[2].clone(), exams[3].clone()]);
}

#[test]
fn grant_filter_evaluates_foreign_types_fully() {
    let evaluator = standard();
    let admin = user(&[UserRole::InstitutionalAdmin]);
    let filter = evaluator.grant_filter(EntityType::Exam, PrivilegeLevel::Write, &admin);
    let own_setup = EntitySnapshot::new(EntityType::LmsSetup, INSTITUTION);

    assert!(filter.matches(&own_setup));
}

fn entity_type() -> impl Strategy<Value = EntityType> {
    prop::sample::select(EntityType::all().to_vec())
}

fn role() -> impl Strategy<Value = UserRole> {
    prop::sample::select(UserRole::all().to_vec())
}

fn level() -> impl Strategy<Value = PrivilegeLevel> {
    prop::sample::select(PrivilegeLevel::all().to_vec())
}

prop_compose! {
    fn snapshot(actor: UserId)(
        kind in entity_type(),
        institution in 1_u64..=2,
        owned_by_actor in any::<bool>(),
        has_owner in any::<bool>(),
        supported_by_actor in any::<bool>(),
    ) -> EntitySnapshot {
        let mut snapshot = EntitySnapshot::new(kind, InstitutionId::new(institution));
        if owned_by_actor {
            snapshot = snapshot.with_owner(actor);
        } else if has_owner {
            snapshot = snapshot.with_owner(UserId::new());
        }
        if supported_by_actor {
            snapshot = snapshot.with_supporters([actor]);
        }
        snapshot
    }
}

proptest! {
    /// The filter never diverges from per-entity evaluation.
    #[test]
    fn grant_filter_matches_has_grant(
        roles in prop::collection::vec(role(), 0..3),
        filter_type in entity_type(),
        requested in level(),
        entities in prop::collection::vec(snapshot(UserId::from_uuid(uuid_for_tests())), 0..8),
    ) {
        let evaluator = standard();
        let actor = UserIdentity::new(
            UserId::from_uuid(uuid_for_tests()),
            "prop",
            INSTITUTION,
            roles,
        );
        let filter = evaluator.grant_filter(filter_type, requested, &actor);

        for entity in &entities {
            prop_assert_eq!(filter.matches(entity), evaluator.has_grant(entity, requested, &actor));
        }
    }

    /// A `None` request is never satisfied.
    #[test]
    fn none_request_is_never_granted(
        roles in prop::collection::vec(role(), 0..3),
        kind in entity_type(),
    ) {
        let evaluator = standard();
        let actor = user(&roles);
        let entity = EntitySnapshot::new(kind, INSTITUTION).with_owner(actor.user_id());

        prop_assert!(!evaluator.has_grant(&entity, PrivilegeLevel::None, &actor));
    }
}

fn uuid_for_tests() -> uuid::Uuid {
    uuid::Uuid::from_u128(0x5eb_5e7e_7000_4000_8000_0000_0000_0001)
}
