//! Trigger schemas

/// Re-queues a failed build
pub mod retry_build {
    use crate::params::{
        ApiVersion, BoolCodec, BoolField, Category, EntitySchema, Field, IntField, StringField,
    };

    /// Seconds to wait before adding the build to the queue
    pub const DELAY_SECONDS: IntField = Field::integer("delaySeconds").with_key("enqueueTimeout");
    /// Number of retries
    pub const ATTEMPTS: IntField = Field::integer("attempts").with_key("retryAttempts");
    /// Put the retried build at the top of the queue
    pub const MOVE_TO_THE_QUEUE_TOP: BoolField = Field::boolean("moveToTheQueueTop");
    /// Retry with the revisions of the failed build
    pub const RETRY_WITH_THE_SAME_REVISIONS: BoolField =
        Field::boolean_with("retryWithTheSameRevisions", BoolCodec::TRUE_OR_EMPTY)
            .with_key("reRunBuildWithTheSameRevisions");
    /// Branches whose failed builds are retried
    pub const BRANCH_FILTER: StringField = Field::string("branchFilter");

    /// 10.0 schema
    pub static SCHEMA: EntitySchema = EntitySchema {
        kind: "RetryBuildTrigger",
        category: Category::Trigger,
        version: ApiVersion::V10,
        type_id: "retryBuildTrigger",
        seeds: &[],
        fields: &[
            DELAY_SECONDS.spec(),
            ATTEMPTS.spec(),
            MOVE_TO_THE_QUEUE_TOP.spec(),
            RETRY_WITH_THE_SAME_REVISIONS.spec(),
            BRANCH_FILTER.spec(),
        ],
        summary: "Adds a failed build back to the queue",
    };
}
