//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions to domain types live in the
//! repository modules so each adapter owns its own validation failures.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{
    blog_posts, contact_messages, faqs, repair_progress, repairs, services, team_members, users,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Repairs and progress history
// ---------------------------------------------------------------------------

/// Row struct for reading from the repairs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = repairs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RepairRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub tracking_code: String,
    pub device_type: String,
    pub device_model: String,
    pub issue_description: String,
    pub status: String,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub technician_notes: String,
    pub technician_id: String,
}

/// Insertable struct for booking a repair. Technician fields use column
/// defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = repairs)]
pub(crate) struct NewRepairRow<'a> {
    pub user_id: Option<i64>,
    pub tracking_code: &'a str,
    pub device_type: &'a str,
    pub device_model: &'a str,
    pub issue_description: &'a str,
    pub status: &'a str,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_name: &'a str,
    pub customer_email: &'a str,
    pub customer_phone: Option<&'a str>,
}

/// Changeset applied by a status transition.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = repairs)]
pub(crate) struct RepairStatusUpdate<'a> {
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = repair_progress)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProgressRow {
    pub id: i64,
    pub repair_id: i64,
    pub status: String,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = repair_progress)]
pub(crate) struct NewProgressRow<'a> {
    pub repair_id: i64,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub recorded_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ServiceRow {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub estimated_time: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = services)]
pub(crate) struct NewServiceRow<'a> {
    pub category: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub price: &'a str,
    pub estimated_time: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blog_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BlogPostRow {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blog_posts)]
pub(crate) struct NewBlogPostRow<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub content: &'a str,
    pub excerpt: &'a str,
    pub category: &'a str,
    pub image_url: Option<&'a str>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TeamMemberRow {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = team_members)]
pub(crate) struct NewTeamMemberRow<'a> {
    pub name: &'a str,
    pub position: &'a str,
    pub bio: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = faqs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FaqRow {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = faqs)]
pub(crate) struct NewFaqRow<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub display_order: i32,
}

// ---------------------------------------------------------------------------
// Contact messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contact_messages)]
pub(crate) struct NewContactMessageRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}
