//! Project feature schemas: connections, report tabs and issue trackers

/// Azure DevOps personal access token connection
pub mod azure_devops_connection {
    use crate::params::{ApiVersion, Category, EntitySchema, Field, StringField};

    /// Connection name shown in the UI
    pub const DISPLAY_NAME: StringField = Field::string("displayName").mandatory();
    /// Server URL
    pub const SERVER_URL: StringField = Field::string("serverUrl").mandatory();
    /// Personal access token
    pub const ACCESS_TOKEN: StringField = Field::string("accessToken")
        .with_key("secure:accessToken")
        .mandatory();

    /// 2017.2 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "AzureDevopsConnection",
        category: Category::ProjectFeature,
        version: ApiVersion::V2017_2,
        type_id: "OAuthProvider",
        seeds: &[("providerType", "tfs"), ("type", "token")],
        fields: &[DISPLAY_NAME.spec(), SERVER_URL.spec(), ACCESS_TOKEN.spec()],
        summary: "Stores an Azure DevOps personal access token",
    };
}

/// Custom build report tab
pub mod build_report_tab {
    use crate::params::{ApiVersion, Category, EntitySchema, Field, StringField};

    /// Tab title
    pub const TITLE: StringField = Field::string("title").mandatory();
    /// Relative path of the start page inside build artifacts
    pub const START_PAGE: StringField = Field::string("startPage");

    /// 2017.2 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "BuildReportTab",
        category: Category::ProjectFeature,
        version: ApiVersion::V2017_2,
        type_id: "ReportTab",
        seeds: &[("type", "BuildReportTab")],
        fields: &[TITLE.spec(), START_PAGE.spec()],
        summary: "Shows an artifact page as a tab on the build results page",
    };
}

/// Google OAuth connection as of 10.0, without validation
pub mod google_connection_v10 {
    use crate::params::{ApiVersion, Category, EntitySchema, Field, StringField};

    /// Connection name
    pub const DISPLAY_NAME: StringField = Field::string("displayName");
    /// OAuth client id
    pub const CLIENT_ID: StringField = Field::string("clientId").with_key("googleClientId");
    /// OAuth client secret
    pub const CLIENT_SECRET: StringField =
        Field::string("clientSecret").with_key("secure:googleClientSecret");

    /// 10.0 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "GoogleConnection",
        category: Category::ProjectFeature,
        version: ApiVersion::V10,
        type_id: "OAuthProvider",
        seeds: &[("providerType", "Google")],
        fields: &[DISPLAY_NAME.spec(), CLIENT_ID.spec(), CLIENT_SECRET.spec()],
        summary: "Stores Google OAuth client credentials",
    };
}

/// Google OAuth connection
pub mod google_connection {
    use crate::params::{ApiVersion, Category, EntitySchema, Field, StringField};

    /// Connection name
    pub const DISPLAY_NAME: StringField = Field::string("displayName").mandatory();
    /// OAuth client id
    pub const CLIENT_ID: StringField = Field::string("clientId")
        .with_key("googleClientId")
        .mandatory();
    /// OAuth client secret
    pub const CLIENT_SECRET: StringField = Field::string("clientSecret")
        .with_key("secure:googleClientSecret")
        .mandatory();

    /// 2018.2 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "GoogleConnection",
        category: Category::ProjectFeature,
        version: ApiVersion::V2018_2,
        type_id: "OAuthProvider",
        seeds: &[("providerType", "Google")],
        fields: &[DISPLAY_NAME.spec(), CLIENT_ID.spec(), CLIENT_SECRET.spec()],
        summary: "Stores Google OAuth client credentials",
    };
}

/// Bugzilla issue tracker
pub mod bugzilla {
    use crate::params::{ApiVersion, Category, EntitySchema, Field, StringField};

    /// Tracker name
    pub const DISPLAY_NAME: StringField = Field::string("displayName").with_key("name").mandatory();
    /// Bugzilla server URL
    pub const HOST: StringField = Field::string("host").mandatory();
    /// Login user
    pub const USER_NAME: StringField = Field::string("userName").with_key("username");
    /// Login password
    pub const PASSWORD: StringField = Field::string("password").with_key("secure:password");
    /// Regex extracting issue ids from commit messages
    pub const ISSUE_ID_PATTERN: StringField =
        Field::string("issueIdPattern").with_key("pattern").mandatory();

    /// 2019.2 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "BugzillaIssueTracker",
        category: Category::ProjectFeature,
        version: ApiVersion::V2019_2,
        type_id: "IssueTracker",
        seeds: &[("type", "bugzilla")],
        fields: &[
            DISPLAY_NAME.spec(),
            HOST.spec(),
            USER_NAME.spec(),
            PASSWORD.spec(),
            ISSUE_ID_PATTERN.spec(),
        ],
        summary: "Links issue ids in commit messages to a Bugzilla server",
    };
}

/// Slack app connection
pub mod slack_connection {
    use crate::params::{ApiVersion, Category, EntitySchema, Field, StringField};

    /// Connection name
    pub const DISPLAY_NAME: StringField = Field::string("displayName");
    /// Bot user OAuth token
    pub const BOT_TOKEN: StringField = Field::string("botToken").with_key("secure:token");
    /// App client id
    pub const CLIENT_ID: StringField = Field::string("clientId");
    /// App client secret
    pub const CLIENT_SECRET: StringField =
        Field::string("clientSecret").with_key("secure:clientSecret");

    /// 10.0 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "SlackConnection",
        category: Category::ProjectFeature,
        version: ApiVersion::V10,
        type_id: "OAuthProvider",
        seeds: &[("providerType", "slackConnection")],
        fields: &[
            DISPLAY_NAME.spec(),
            BOT_TOKEN.spec(),
            CLIENT_ID.spec(),
            CLIENT_SECRET.spec(),
        ],
        summary: "Stores the credentials of a Slack app used for notifications",
    };
}
