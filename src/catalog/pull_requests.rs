//! Pull request build feature
//!
//! The provider is a compound parameter stored under `providerType`. Each
//! provider carries its own filters and a nested authentication compound;
//! authentication variants are shared between providers that accept them.

use crate::params::{
    ApiVersion, BoolField, Category, CompoundSpec, EntitySchema, EnumField, Field, FieldSpec,
    StringField, Variant, VariantSpec,
};

crate::param_enum! {
    /// Pull request authors whose requests are built
    pub enum GitHubRoleFilter {
        /// Organization members
        Member => "MEMBER",
        /// Members and outside collaborators
        MemberOrCollaborator => "MEMBER_OR_COLLABORATOR",
        /// Everybody
        Everybody => "EVERYBODY",
    }
}

/// Deprecated external id of the VCS root to watch
pub const VCS_ROOT_EXT_ID: StringField = Field::string("vcsRootExtId").with_key("vcsRootId");

/// Server URL (GitHub, GitLab, Bitbucket Server)
pub const SERVER_URL: StringField = Field::string("serverUrl");
/// Project URL (Azure DevOps)
pub const PROJECT_URL: StringField = Field::string("projectUrl");
/// Source branch filter
pub const FILTER_SOURCE_BRANCH: StringField = Field::string("filterSourceBranch");
/// Target branch filter
pub const FILTER_TARGET_BRANCH: StringField = Field::string("filterTargetBranch");
/// GitHub author role filter
pub const FILTER_AUTHOR_ROLE: EnumField<GitHubRoleFilter> = Field::enumeration("filterAuthorRole");
/// Build pull request branches instead of merge branches (Bitbucket Server)
pub const USE_PULL_REQUEST_BRANCHES: BoolField =
    Field::boolean("usePullRequestBranches").with_key("useRequestBranches");

/// Access token
pub const TOKEN: StringField = Field::string("token")
    .with_key("secure:accessToken")
    .mandatory();
/// Login user
pub const USERNAME: StringField = Field::string("username").mandatory();
/// Login password
pub const PASSWORD: StringField = Field::string("password")
    .with_key("secure:password")
    .mandatory();
/// JetBrains Space connection id
pub const CONNECTION_ID: StringField = Field::string("connectionId")
    .with_key("spaceConnectionId")
    .mandatory();

/// Use the credentials of the VCS root
pub static VCS_ROOT_AUTH: VariantSpec = VariantSpec {
    token: "vcsRoot",
    fields: &[],
};
/// Access token authentication
pub static TOKEN_AUTH: VariantSpec = VariantSpec {
    token: "token",
    fields: &[TOKEN.spec()],
};
/// Username and password authentication
pub static PASSWORD_AUTH: VariantSpec = VariantSpec {
    token: "password",
    fields: &[USERNAME.spec(), PASSWORD.spec()],
};
/// JetBrains Space connection authentication
pub static SPACE_CONNECTION_AUTH: VariantSpec = VariantSpec {
    token: "spaceCredentialsConnection",
    fields: &[CONNECTION_ID.spec()],
};

const AUTH_KEY: &str = "authenticationType";

/// GitHub and GitLab authentication
pub static TOKEN_OR_VCS_ROOT_AUTH_TYPE: CompoundSpec = CompoundSpec {
    key: AUTH_KEY,
    variants: &[&VCS_ROOT_AUTH, &TOKEN_AUTH],
};
/// Bitbucket Server authentication
pub static BITBUCKET_SERVER_AUTH_TYPE: CompoundSpec = CompoundSpec {
    key: AUTH_KEY,
    variants: &[&VCS_ROOT_AUTH, &PASSWORD_AUTH, &TOKEN_AUTH],
};
/// Bitbucket Cloud authentication
pub static BITBUCKET_CLOUD_AUTH_TYPE: CompoundSpec = CompoundSpec {
    key: AUTH_KEY,
    variants: &[&VCS_ROOT_AUTH, &PASSWORD_AUTH],
};
/// Azure DevOps authentication
pub static AZURE_DEVOPS_AUTH_TYPE: CompoundSpec = CompoundSpec {
    key: AUTH_KEY,
    variants: &[&TOKEN_AUTH],
};
/// JetBrains Space authentication
pub static SPACE_AUTH_TYPE: CompoundSpec = CompoundSpec {
    key: "spaceCredentialsType",
    variants: &[&SPACE_CONNECTION_AUTH],
};

/// GitHub provider
pub static GITHUB: VariantSpec = VariantSpec {
    token: "github",
    fields: &[
        SERVER_URL.spec(),
        FieldSpec::compound("authType", &TOKEN_OR_VCS_ROOT_AUTH_TYPE),
        FILTER_SOURCE_BRANCH.spec(),
        FILTER_TARGET_BRANCH.spec(),
        FILTER_AUTHOR_ROLE.spec(),
    ],
};
/// GitLab provider
pub static GITLAB: VariantSpec = VariantSpec {
    token: "gitlab",
    fields: &[
        SERVER_URL.spec(),
        FieldSpec::compound("authType", &TOKEN_OR_VCS_ROOT_AUTH_TYPE),
        FILTER_SOURCE_BRANCH.spec(),
        FILTER_TARGET_BRANCH.spec(),
    ],
};
/// Bitbucket Server provider
pub static BITBUCKET_SERVER: VariantSpec = VariantSpec {
    token: "bitbucketServer",
    fields: &[
        SERVER_URL.spec(),
        FieldSpec::compound("authType", &BITBUCKET_SERVER_AUTH_TYPE),
        FILTER_SOURCE_BRANCH.spec(),
        FILTER_TARGET_BRANCH.spec(),
        USE_PULL_REQUEST_BRANCHES.spec(),
    ],
};
/// Bitbucket Cloud provider
pub static BITBUCKET_CLOUD: VariantSpec = VariantSpec {
    token: "bitbucketCloud",
    fields: &[
        FieldSpec::compound("authType", &BITBUCKET_CLOUD_AUTH_TYPE),
        FILTER_TARGET_BRANCH.spec(),
    ],
};
/// Azure DevOps provider
pub static AZURE_DEVOPS: VariantSpec = VariantSpec {
    token: "azureDevOps",
    fields: &[
        PROJECT_URL.spec(),
        FieldSpec::compound("authType", &AZURE_DEVOPS_AUTH_TYPE),
        FILTER_SOURCE_BRANCH.spec(),
        FILTER_TARGET_BRANCH.spec(),
    ],
};
/// JetBrains Space provider
pub static JETBRAINS_SPACE: VariantSpec = VariantSpec {
    token: "jetbrainsSpace",
    fields: &[
        FILTER_TARGET_BRANCH.spec(),
        FieldSpec::compound("authType", &SPACE_AUTH_TYPE),
    ],
};

/// Provider compound
pub static PROVIDER: CompoundSpec = CompoundSpec {
    key: "providerType",
    variants: &[
        &GITHUB,
        &GITLAB,
        &BITBUCKET_SERVER,
        &BITBUCKET_CLOUD,
        &AZURE_DEVOPS,
        &JETBRAINS_SPACE,
    ],
};

/// 2018.2 schema
pub static SCHEMA: EntitySchema = EntitySchema {
    kind: "PullRequests",
    category: Category::BuildFeature,
    version: ApiVersion::V2018_2,
    type_id: "pullRequests",
    seeds: &[],
    fields: &[
        VCS_ROOT_EXT_ID.spec(),
        FieldSpec::compound("provider", &PROVIDER).mandatory(),
    ],
    summary: "Builds pull requests opened against the VCS root",
};

/// Empty GitHub provider
#[must_use]
pub fn github() -> Variant {
    Variant::new(&GITHUB)
}

/// Empty GitLab provider
#[must_use]
pub fn gitlab() -> Variant {
    Variant::new(&GITLAB)
}

/// Empty Bitbucket Server provider
#[must_use]
pub fn bitbucket_server() -> Variant {
    Variant::new(&BITBUCKET_SERVER)
}

/// Empty Bitbucket Cloud provider
#[must_use]
pub fn bitbucket_cloud() -> Variant {
    Variant::new(&BITBUCKET_CLOUD)
}

/// Empty Azure DevOps provider
#[must_use]
pub fn azure_devops() -> Variant {
    Variant::new(&AZURE_DEVOPS)
}

/// Empty JetBrains Space provider
#[must_use]
pub fn jetbrains_space() -> Variant {
    Variant::new(&JETBRAINS_SPACE)
}

/// VCS root credentials
#[must_use]
pub fn vcs_root() -> Variant {
    Variant::new(&VCS_ROOT_AUTH)
}

/// Access token credentials
#[must_use]
pub fn token(value: &str) -> Variant {
    Variant::new(&TOKEN_AUTH).configure(|v| {
        use crate::params::Parametrized;
        v.set(&TOKEN, value);
    })
}

/// Username and password credentials
#[must_use]
pub fn password(username: &str, password: &str) -> Variant {
    Variant::new(&PASSWORD_AUTH).configure(|v| {
        use crate::params::Parametrized;
        v.set(&USERNAME, username);
        v.set(&PASSWORD, password);
    })
}

/// Space connection credentials
#[must_use]
pub fn space_connection(connection_id: &str) -> Variant {
    Variant::new(&SPACE_CONNECTION_AUTH).configure(|v| {
        use crate::params::Parametrized;
        v.set(&CONNECTION_ID, connection_id);
    })
}

/// Authentication compound of `provider`, if it has one
#[must_use]
pub fn auth_type_of(provider: &Variant) -> Option<&'static CompoundSpec> {
    provider
        .spec()
        .fields
        .iter()
        .find(|f| f.name == "authType")
        .and_then(FieldSpec::as_compound)
}
