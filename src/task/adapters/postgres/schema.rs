//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records with lifecycle timestamps.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Non-empty task title of unbounded length.
        title -> Text,
        /// Deadline calendar date.
        deadline_date -> Date,
        /// Optional deadline time of day.
        deadline_time -> Nullable<Time>,
        /// Urgency level.
        #[max_length = 20]
        urgency -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Nullable<Timestamptz>,
        /// Completion timestamp, present while completed.
        completed_at -> Nullable<Timestamptz>,
        /// Soft-deletion timestamp, present while deleted.
        deleted_at -> Nullable<Timestamptz>,
    }
}
