//! Build feature schemas

/// VCS labeling: labels the VCS roots of a build after it finishes
pub mod vcs_labeling {
    use crate::params::{
        ApiVersion, BoolCodec, BoolField, Category, EntitySchema, Field, StringField,
    };

    /// Deprecated external id of the labeled VCS root
    pub const VCS_ROOT_EXT_ID: StringField = Field::string("vcsRootExtId")
        .with_key("vcsRootId")
        .deprecated_for("vcsRootId");
    /// Id of the VCS root to label
    pub const VCS_ROOT_ID: StringField = Field::string("vcsRootId").mandatory();
    /// Label pattern, may reference build parameters
    pub const LABELING_PATTERN: StringField = Field::string("labelingPattern");
    /// Label successful builds only
    pub const SUCCESSFUL_ONLY: BoolField =
        Field::boolean_with("successfulOnly", BoolCodec::TRUE_OR_EMPTY);
    /// Branches whose builds are labeled
    pub const BRANCH_FILTER: StringField = Field::string("branchFilter");

    /// Current schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "VcsLabeling",
        category: Category::BuildFeature,
        version: ApiVersion::Latest,
        type_id: "VcsLabeling",
        seeds: &[],
        fields: &[
            VCS_ROOT_EXT_ID.spec(),
            VCS_ROOT_ID.spec(),
            LABELING_PATTERN.spec(),
            SUCCESSFUL_ONLY.spec(),
            BRANCH_FILTER.spec(),
        ],
        summary: "Labels the sources of a build in the version control system",
    };
}

/// SSH agent: loads an uploaded SSH key into an agent for the build
pub mod ssh_agent {
    use crate::params::{ApiVersion, Category, EntitySchema, Field, StringField};

    /// Name of the uploaded SSH key
    pub const TEAMCITY_SSH_KEY: StringField = Field::string("teamcitySshKey").mandatory();
    /// Key passphrase
    pub const PASSPHRASE: StringField = Field::string("passphrase").with_key("secure:passphrase");

    /// 2018.1 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "SshAgent",
        category: Category::BuildFeature,
        version: ApiVersion::V2018_1,
        type_id: "ssh-agent-build-feature",
        seeds: &[],
        fields: &[TEAMCITY_SSH_KEY.spec(), PASSPHRASE.spec()],
        summary: "Runs an SSH agent with the selected uploaded key",
    };
}

/// Automatic merge of a branch after a successful build
pub mod auto_merge {
    use crate::params::{ApiVersion, Category, EntitySchema, EnumField, Field, StringField};

    crate::param_enum! {
        /// How the merge is performed
        pub enum MergePolicy {
            /// Fast-forward when possible
            FastForward => "fastForward",
            /// Always create a merge commit
            AlwaysMerge => "alwaysCreateMergeCommit",
        }
    }

    crate::param_enum! {
        /// Build status that allows the merge
        pub enum MergeCondition {
            /// Build succeeded
            SuccessfulBuild => "successful",
            /// Build has no new failed tests
            NoNewFailedTests => "noNewTests",
        }
    }

    crate::param_enum! {
        /// When the merge runs relative to the build
        pub enum RunPolicy {
            /// Merge before the build finishes
            BeforeBuildFinish => "runBeforeBuildFinish",
            /// Merge after the build finishes
            AfterBuildFinish => "runAfterBuildFinish",
        }
    }

    /// Branches to merge from
    pub const BRANCH_FILTER: StringField = Field::string("branchFilter")
        .with_key("teamcity.automerge.srcBranchFilter")
        .mandatory();
    /// Branch to merge into
    pub const DESTINATION_BRANCH: StringField =
        Field::string("destinationBranch").with_key("teamcity.automerge.dstBranch");
    /// Merge commit message
    pub const COMMIT_MESSAGE: StringField =
        Field::string("commitMessage").with_key("teamcity.automerge.message");
    /// Merge policy
    pub const MERGE_POLICY: EnumField<MergePolicy> =
        Field::enumeration("mergePolicy").with_key("teamcity.merge.policy");
    /// Raw merge condition, one of [`MergeCondition`]'s tokens
    pub const MERGE_CONDITION: StringField =
        Field::string("mergeCondition").with_key("teamcity.automerge.buildStatusCondition");
    /// Run policy
    pub const RUN_POLICY: EnumField<RunPolicy> =
        Field::enumeration("runPolicy").with_key("teamcity.automerge.run.policy");

    /// 2018.1 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "AutoMerge",
        category: Category::BuildFeature,
        version: ApiVersion::V2018_1,
        type_id: "AutoMergeFeature",
        seeds: &[],
        fields: &[
            BRANCH_FILTER.spec(),
            DESTINATION_BRANCH.spec(),
            COMMIT_MESSAGE.spec(),
            MERGE_POLICY.spec(),
            MERGE_CONDITION.spec(),
            RUN_POLICY.spec(),
        ],
        summary: "Merges a branch into another one when a build succeeds",
    };
}

/// Free disk space check before the build starts
pub mod free_disk_space {
    use crate::params::{
        ApiVersion, BoolCodec, BoolField, Category, EntitySchema, Field, StringField,
    };

    /// Required free space, e.g. `3gb`
    pub const REQUIRED_SPACE: StringField =
        Field::string("requiredSpace").with_key("free-space-work");
    /// Fail the build when space cannot be freed
    pub const FAIL_BUILD: BoolField =
        Field::boolean_with("failBuild", BoolCodec::TRUE_OR_EMPTY).with_key("free-space-fail-start");

    /// 2018.2 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "FreeDiskSpace",
        category: Category::BuildFeature,
        version: ApiVersion::V2018_2,
        type_id: "jetbrains.agent.free.space",
        seeds: &[],
        fields: &[REQUIRED_SPACE.spec(), FAIL_BUILD.spec()],
        summary: "Ensures the agent has enough free disk space before the build",
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Entity, Parametrized, Validate};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vcs_labeling_alias_shares_key() {
        let mut feature = Entity::new(&vcs_labeling::SCHEMA);
        feature.set(&vcs_labeling::VCS_ROOT_EXT_ID, "Project_Git");
        assert_eq!(
            feature.get(&vcs_labeling::VCS_ROOT_ID).unwrap().as_deref(),
            Some("Project_Git")
        );
        assert!(feature.validate().is_empty());
    }

    #[test]
    fn test_vcs_labeling_missing_root() {
        let errors = Entity::new(&vcs_labeling::SCHEMA).validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property(), "vcsRootId");
    }

    #[test]
    fn test_auto_merge_enum_tokens() {
        use auto_merge::{MergePolicy, RunPolicy};

        let feature = Entity::new(&auto_merge::SCHEMA).configure(|f| {
            f.set(&auto_merge::BRANCH_FILTER, "+:feature/*");
            f.set(&auto_merge::MERGE_POLICY, MergePolicy::AlwaysMerge);
            f.set(&auto_merge::RUN_POLICY, RunPolicy::AfterBuildFinish);
        });
        assert_eq!(
            feature.params().get("teamcity.merge.policy"),
            Some("alwaysCreateMergeCommit")
        );
        assert_eq!(
            feature.params().get("teamcity.automerge.run.policy"),
            Some("runAfterBuildFinish")
        );
        assert_eq!(
            feature.get(&auto_merge::MERGE_POLICY).unwrap(),
            Some(MergePolicy::AlwaysMerge)
        );
        assert!(feature.is_valid());
    }

    #[test]
    fn test_free_disk_space_flag() {
        let mut feature = Entity::new(&free_disk_space::SCHEMA);
        feature.set(&free_disk_space::FAIL_BUILD, true);
        assert_eq!(feature.params().get("free-space-fail-start"), Some("true"));
        feature.set(&free_disk_space::FAIL_BUILD, false);
        assert!(!feature.has_param("free-space-fail-start"));
        assert_eq!(feature.get(&free_disk_space::FAIL_BUILD).unwrap(), None);
    }
}
