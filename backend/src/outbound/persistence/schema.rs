//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered customer accounts.
    users (id) {
        id -> Int8,
        /// Unique login handle.
        username -> Varchar,
        /// Salted digest in `salt$hex` form.
        password_hash -> Text,
        full_name -> Varchar,
        /// Unique, compared case-insensitively via `users_email_lower_key`.
        email -> Varchar,
        phone -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Advertised repair services.
    services (id) {
        id -> Int8,
        category -> Varchar,
        name -> Varchar,
        description -> Text,
        price -> Varchar,
        estimated_time -> Varchar,
    }
}

diesel::table! {
    /// Repair bookings.
    repairs (id) {
        id -> Int8,
        user_id -> Nullable<Int8>,
        /// Unique public code (`repairs_tracking_code_key`).
        tracking_code -> Varchar,
        device_type -> Varchar,
        device_model -> Varchar,
        issue_description -> Text,
        /// One of the canonical status names; enforced by a CHECK constraint.
        status -> Varchar,
        estimated_completion -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        customer_name -> Varchar,
        customer_email -> Varchar,
        customer_phone -> Nullable<Varchar>,
        technician_notes -> Text,
        technician_id -> Varchar,
    }
}

diesel::table! {
    /// Append-only status history for repairs.
    repair_progress (id) {
        id -> Int8,
        repair_id -> Int8,
        status -> Varchar,
        notes -> Nullable<Text>,
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    blog_posts (id) {
        id -> Int8,
        title -> Varchar,
        slug -> Varchar,
        content -> Text,
        excerpt -> Text,
        category -> Varchar,
        image_url -> Nullable<Text>,
        published_at -> Timestamptz,
    }
}

diesel::table! {
    team_members (id) {
        id -> Int8,
        name -> Varchar,
        position -> Varchar,
        bio -> Nullable<Text>,
        image_url -> Nullable<Text>,
    }
}

diesel::table! {
    faqs (id) {
        id -> Int8,
        question -> Text,
        answer -> Text,
        display_order -> Int4,
    }
}

diesel::table! {
    /// Contact-form messages; written by the API, read by staff tooling.
    contact_messages (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        subject -> Varchar,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(repair_progress -> repairs (repair_id));
diesel::joinable!(repairs -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    blog_posts,
    contact_messages,
    faqs,
    repair_progress,
    repairs,
    services,
    team_members,
    users,
);
