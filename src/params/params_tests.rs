//! Scenario tests for the parameter runtime
//!
//! These exercise entities end to end through the shipped catalog schemas.

use super::*;
use crate::catalog::build_features::{auto_merge, vcs_labeling};
use crate::catalog::project_features::bugzilla;
use crate::catalog::pull_requests;
use crate::catalog::triggers::retry_build;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn properties(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ValidationError::property).collect()
}

#[test]
fn test_bugzilla_mandatory_fields() {
    let mut tracker = Entity::new(&bugzilla::SCHEMA);
    tracker.set(&bugzilla::HOST, "https://bugzilla.example.com");
    assert_eq!(
        properties(&tracker.validate()),
        vec!["displayName", "issueIdPattern"]
    );

    tracker.set(&bugzilla::ISSUE_ID_PATTERN, "#(\\d+)");
    assert_eq!(properties(&tracker.validate()), vec!["displayName"]);

    // Presence is what counts, not the value
    tracker.set(&bugzilla::DISPLAY_NAME, "");
    assert!(tracker.is_valid());
}

#[test]
fn test_bool_with_empty_false_literal() {
    let mut trigger = Entity::new(&retry_build::SCHEMA);
    trigger.set(&retry_build::RETRY_WITH_THE_SAME_REVISIONS, true);
    assert_eq!(
        trigger.params().get("reRunBuildWithTheSameRevisions"),
        Some("true")
    );
    assert_eq!(trigger.get(&retry_build::RETRY_WITH_THE_SAME_REVISIONS).unwrap(), Some(true));

    trigger.set(&retry_build::RETRY_WITH_THE_SAME_REVISIONS, false);
    assert!(!trigger.has_param("reRunBuildWithTheSameRevisions"));
}

#[test]
fn test_bool_unknown_literal() {
    let mut trigger = Entity::new(&retry_build::SCHEMA);
    trigger.param("moveToTheQueueTop", "yes");
    assert!(matches!(
        trigger.get(&retry_build::MOVE_TO_THE_QUEUE_TOP),
        Err(ParamError::Malformed { .. })
    ));
}

#[test]
fn test_enum_round_trip_and_unknown_token() {
    let mut feature = Entity::new(&auto_merge::SCHEMA);
    feature.set(&auto_merge::MERGE_POLICY, auto_merge::MergePolicy::FastForward);
    assert_eq!(feature.params().get("teamcity.merge.policy"), Some("fastForward"));

    feature.param("teamcity.merge.policy", "rebase");
    assert_eq!(
        feature.get(&auto_merge::MERGE_POLICY).unwrap_err(),
        ParamError::UnknownEnumToken {
            key: "teamcity.merge.policy".to_string(),
            value: "rebase".to_string(),
        }
    );
    assert_eq!(feature.decode_all().len(), 1);
}

#[test]
fn test_unset_removes_key() {
    let mut tracker = Entity::new(&bugzilla::SCHEMA);
    tracker.set(&bugzilla::USER_NAME, "ci");
    assert!(tracker.has_param("username"));
    tracker.unset(&bugzilla::USER_NAME);
    assert!(!tracker.has_param("username"));
    assert_eq!(tracker.get(&bugzilla::USER_NAME).unwrap(), None);
}

#[test]
fn test_deprecated_alias_satisfies_canonical_field() {
    let labeling = Entity::new(&vcs_labeling::SCHEMA);
    let errors = labeling.validate();
    assert_eq!(properties(&errors), vec!["vcsRootId"]);

    let labeling = labeling.configure(|l| l.set(&vcs_labeling::VCS_ROOT_EXT_ID, "Root"));
    assert!(labeling.is_valid());
}

const CLIENT_ID: StringField = Field::string("clientId").mandatory();
const LEGACY_CLIENT_ID: StringField = Field::string("oauthClientId")
    .with_key("googleClientId")
    .deprecated_for("clientId");

static RENAMED_KEY_SCHEMA: EntitySchema = EntitySchema {
    kind: "RenamedKeyConnection",
    category: Category::ProjectFeature,
    version: ApiVersion::Latest,
    type_id: "OAuthProvider",
    seeds: &[("providerType", "renamed")],
    fields: &[CLIENT_ID.spec(), LEGACY_CLIENT_ID.spec()],
    summary: "Connection whose client id moved to a new key",
};

#[test]
fn test_alias_on_its_own_key_satisfies_canonical_field() {
    let connection = Entity::new(&RENAMED_KEY_SCHEMA);
    assert_eq!(properties(&connection.validate()), vec!["clientId"]);

    let connection = connection.configure(|c| c.set(&LEGACY_CLIENT_ID, "abc"));
    assert_eq!(connection.params().get("googleClientId"), Some("abc"));
    assert!(!connection.has_param("clientId"));
    assert!(connection.validate().is_empty());
}

#[test]
fn test_v10_entities_skip_mandatory_checks() {
    let trigger = Entity::new(&retry_build::SCHEMA);
    assert_eq!(trigger.version(), ApiVersion::V10);
    assert!(trigger.is_valid());
}

#[test]
fn test_variant_switch_through_entity() {
    let mut feature = Entity::new(&pull_requests::SCHEMA);
    let gitlab = pull_requests::gitlab().configure(|p| {
        p.set(&pull_requests::SERVER_URL, "https://gitlab.example.com");
        p.set(&pull_requests::FILTER_SOURCE_BRANCH, "+:*");
    });
    feature.set_compound(&pull_requests::PROVIDER, Some(gitlab)).unwrap();

    feature
        .set_compound(&pull_requests::PROVIDER, Some(pull_requests::bitbucket_cloud()))
        .unwrap();
    assert!(!feature.has_param("serverUrl"));
    assert!(!feature.has_param("filterSourceBranch"));
    assert_eq!(
        feature.compound(&pull_requests::PROVIDER).unwrap().map(|p| p.token()),
        Some("bitbucketCloud")
    );
}

#[test]
fn test_foreign_variant_not_written() {
    let mut feature = Entity::new(&pull_requests::SCHEMA);
    let err = feature
        .set_compound(&pull_requests::PROVIDER, Some(pull_requests::vcs_root()))
        .unwrap_err();
    assert!(matches!(err, ParamError::ForeignVariant { .. }));
    assert!(!feature.has_param("providerType"));
}

#[test]
fn test_unknown_variant_on_read() {
    let mut feature = Entity::new(&pull_requests::SCHEMA);
    feature.param("providerType", "gitea");
    assert_eq!(
        feature.compound(&pull_requests::PROVIDER).unwrap_err(),
        ParamError::UnknownVariant {
            key: "providerType".to_string(),
            token: "gitea".to_string(),
        }
    );
    assert_eq!(feature.decode_all().len(), 1);
}

#[test]
fn test_from_params_keeps_seeds_first() {
    let stored = crate::params! { "host" => "h", "type" => "bugzilla" };
    let tracker = Entity::from_params(&bugzilla::SCHEMA, Some("Tracker".into()), stored);
    let keys: Vec<_> = tracker.params().keys().collect();
    assert_eq!(keys, vec!["type", "host"]);
    assert_eq!(tracker.id(), Some("Tracker"));
}

#[test]
fn test_seed_parameters_stay_fixed() {
    let stored = crate::params! { "type" => "jira", "host" => "h" };
    let mut tracker = Entity::from_params(&bugzilla::SCHEMA, None, stored);
    assert_eq!(tracker.params().get("type"), Some("bugzilla"));

    tracker.param("type", "youtrack");
    tracker.param("host", "https://bugs");
    assert_eq!(tracker.params().get("type"), Some("bugzilla"));
    assert_eq!(tracker.params().get("host"), Some("https://bugs"));

    let catalog = crate::catalog::Catalog::standard();
    let resolved = catalog
        .identify(
            Category::ProjectFeature,
            ApiVersion::Latest,
            tracker.type_id(),
            tracker.params(),
        )
        .unwrap();
    assert_eq!(resolved.kind, "BugzillaIssueTracker");
}

#[test]
fn test_entity_serializes_as_document_entry() {
    let tracker = Entity::new(&bugzilla::SCHEMA)
        .with_id("Bugs")
        .configure(|t| t.set(&bugzilla::HOST, "https://bugs"));
    let json = serde_json::to_value(&tracker).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "Bugs",
            "type": "IssueTracker",
            "params": { "type": "bugzilla", "host": "https://bugs" }
        })
    );
}

proptest! {
    #[test]
    fn prop_copy_from_base_is_independent(
        base_value in "[a-z]{0,12}",
        copy_value in "[a-z]{0,12}",
    ) {
        let base = Entity::new(&bugzilla::SCHEMA)
            .configure(|t| t.set(&bugzilla::HOST, base_value.as_str()));
        let mut copy = Entity::from_base(&base);
        prop_assert_eq!(&copy, &base);

        copy.set(&bugzilla::HOST, copy_value.as_str());
        copy.set(&bugzilla::USER_NAME, "ci");
        prop_assert_eq!(base.params().get("host"), Some(base_value.as_str()));
        prop_assert!(!base.has_param("username"));
    }

    #[test]
    fn prop_presence_decides_mandatory(value in ".{0,8}") {
        let tracker = Entity::new(&bugzilla::SCHEMA).configure(|t| {
            t.set(&bugzilla::DISPLAY_NAME, value.as_str());
            t.set(&bugzilla::HOST, value.as_str());
            t.set(&bugzilla::ISSUE_ID_PATTERN, value.as_str());
        });
        prop_assert!(tracker.is_valid());
    }
}
