//! Diesel table definitions. Keep in step with `backend/migrations`.

diesel::table! {
    /// Customer complaints.
    ///
    /// `priority` is constrained to `Low`, `Medium`, or `High` and
    /// `updated_at` may never precede `created_at`.
    complaints (id) {
        id -> Uuid,
        user_name -> Text,
        issue -> Text,
        priority -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
