//! Diesel schema for task manager persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Store-assigned user identifier.
        id -> Int8,
        /// Display name.
        name -> Text,
        /// Unique email address.
        email -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks, each owned by exactly one user.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Owning user identifier.
        user_id -> Int8,
        /// Task title.
        title -> Text,
        /// Free-text description.
        description -> Text,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority between 1 and 5.
        priority -> Int2,
        /// Optional due date.
        due_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Chat identities bound to user emails.
    chat_bindings (email) {
        /// Bound email address.
        email -> Text,
        /// External chat identifier.
        chat_id -> Int8,
        /// Last upsert timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, tasks);
