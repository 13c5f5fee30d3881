//! In-memory implementation of every repository port.
//!
//! One [`MemoryStore`] holds all entity families behind a single mutex, so
//! each port call is one critical section: allocating an id, checking a
//! tracking code and inserting the repair with its seed entry cannot
//! interleave with another request. Identifiers start at 1 per family.
//!
//! A poisoned lock is recovered rather than propagated; no operation leaves
//! the state half-written before a panic point.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CatalogueRepository, CatalogueRepositoryError, ContactMessageRepository,
    ContactMessageRepositoryError, RepairRepository, RepairRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    BlogPost, BlogPostDraft, ContactMessage, ContactSubmission, Faq, FaqDraft, NewRepair, NewUser,
    ProgressEntry, Repair, RepairId, SeedEntry, ServiceOffering, ServiceOfferingDraft,
    StatusChange, TeamMember, TeamMemberDraft, User, UserId, order_history, sort_blog_posts,
    sort_faqs,
};

#[cfg(test)]
mod tests;

#[derive(Debug, Default)]
struct IdCounters {
    users: i64,
    repairs: i64,
    progress: i64,
    services: i64,
    blog_posts: i64,
    team_members: i64,
    faqs: i64,
    contact_messages: i64,
}

fn allocate(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Debug, Default)]
struct MemoryState {
    ids: IdCounters,
    users: BTreeMap<i64, User>,
    repairs: BTreeMap<i64, Repair>,
    tracking_codes: HashMap<String, i64>,
    progress: BTreeMap<i64, Vec<ProgressEntry>>,
    services: BTreeMap<i64, ServiceOffering>,
    blog_posts: BTreeMap<i64, BlogPost>,
    team_members: BTreeMap<i64, TeamMember>,
    faqs: BTreeMap<i64, Faq>,
    contact_messages: Vec<ContactMessage>,
}

impl MemoryState {
    fn append_progress(&mut self, entry_for: RepairId, build: impl FnOnce(i64) -> ProgressEntry) {
        let id = allocate(&mut self.ids.progress);
        self.progress
            .entry(entry_for.as_i64())
            .or_default()
            .push(build(id));
    }
}

/// Process-local store implementing the repair, user, catalogue and contact
/// ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stored contact messages in arrival order.
    pub fn contact_messages(&self) -> Vec<ContactMessage> {
        self.lock().contact_messages.clone()
    }
}

#[async_trait]
impl RepairRepository for MemoryStore {
    async fn find_by_id(&self, id: RepairId) -> Result<Option<Repair>, RepairRepositoryError> {
        Ok(self.lock().repairs.get(&id.as_i64()).cloned())
    }

    async fn find_by_tracking_code(
        &self,
        code: &str,
    ) -> Result<Option<Repair>, RepairRepositoryError> {
        let state = self.lock();
        Ok(state
            .tracking_codes
            .get(code)
            .and_then(|id| state.repairs.get(id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Repair>, RepairRepositoryError> {
        Ok(self.lock().repairs.values().cloned().collect())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Repair>, RepairRepositoryError> {
        Ok(self
            .lock()
            .repairs
            .values()
            .filter(|repair| repair.user_id() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create_with_seed(
        &self,
        repair: NewRepair,
        seed: SeedEntry,
    ) -> Result<Repair, RepairRepositoryError> {
        let mut state = self.lock();
        let code = repair.tracking_code.as_str().to_owned();
        if state.tracking_codes.contains_key(&code) {
            return Err(RepairRepositoryError::duplicate_tracking_code(code));
        }

        let id = RepairId::new(allocate(&mut state.ids.repairs));
        let created = Repair::received(id, repair);
        state.tracking_codes.insert(code, id.as_i64());
        state.repairs.insert(id.as_i64(), created.clone());
        state.append_progress(id, |entry_id| ProgressEntry {
            id: entry_id,
            repair_id: id,
            status: created.status(),
            notes: Some(seed.notes),
            timestamp: seed.timestamp,
        });
        Ok(created)
    }

    async fn apply_status_change(
        &self,
        change: StatusChange,
    ) -> Result<Repair, RepairRepositoryError> {
        let mut state = self.lock();
        let id = change.repair_id;
        let Some(current) = state.repairs.get(&id.as_i64()) else {
            return Err(RepairRepositoryError::not_found(id.as_i64()));
        };
        if current.status() != change.expected {
            return Err(RepairRepositoryError::status_mismatch(
                id,
                change.expected,
                current.status(),
            ));
        }

        let updated = current.clone().with_status(change.next, change.at);
        state.repairs.insert(id.as_i64(), updated.clone());
        state.append_progress(id, |entry_id| ProgressEntry {
            id: entry_id,
            repair_id: id,
            status: change.next,
            notes: Some(change.notes),
            timestamp: updated.updated_at(),
        });
        Ok(updated)
    }

    async fn list_progress(
        &self,
        repair_id: RepairId,
    ) -> Result<Vec<ProgressEntry>, RepairRepositoryError> {
        let mut entries = self
            .lock()
            .progress
            .get(&repair_id.as_i64())
            .cloned()
            .unwrap_or_default();
        order_history(&mut entries);
        Ok(entries)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().users.get(&id.as_i64()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| user.username().as_str() == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut state = self.lock();
        let email = user.email.normalised();
        for existing in state.users.values() {
            if existing.username() == &user.username {
                return Err(UserRepositoryError::duplicate_username(
                    user.username.as_str(),
                ));
            }
            if existing.email().normalised() == email {
                return Err(UserRepositoryError::duplicate_email(user.email.as_str()));
            }
        }

        let id = UserId::new(allocate(&mut state.ids.users));
        let created = User::from_new(id, user);
        state.users.insert(id.as_i64(), created.clone());
        Ok(created)
    }
}

#[async_trait]
impl CatalogueRepository for MemoryStore {
    async fn list_services(&self) -> Result<Vec<ServiceOffering>, CatalogueRepositoryError> {
        Ok(self.lock().services.values().cloned().collect())
    }

    async fn list_services_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ServiceOffering>, CatalogueRepositoryError> {
        Ok(self
            .lock()
            .services
            .values()
            .filter(|service| service.category == category)
            .cloned()
            .collect())
    }

    async fn find_service(
        &self,
        id: i64,
    ) -> Result<Option<ServiceOffering>, CatalogueRepositoryError> {
        Ok(self.lock().services.get(&id).cloned())
    }

    async fn create_service(
        &self,
        draft: ServiceOfferingDraft,
    ) -> Result<ServiceOffering, CatalogueRepositoryError> {
        let mut state = self.lock();
        let id = allocate(&mut state.ids.services);
        let service = ServiceOffering::from_draft(id, draft);
        state.services.insert(id, service.clone());
        Ok(service)
    }

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, CatalogueRepositoryError> {
        let mut posts: Vec<BlogPost> = self.lock().blog_posts.values().cloned().collect();
        sort_blog_posts(&mut posts);
        Ok(posts)
    }

    async fn find_blog_post_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BlogPost>, CatalogueRepositoryError> {
        Ok(self
            .lock()
            .blog_posts
            .values()
            .find(|post| post.slug == slug)
            .cloned())
    }

    async fn create_blog_post(
        &self,
        draft: BlogPostDraft,
    ) -> Result<BlogPost, CatalogueRepositoryError> {
        let mut state = self.lock();
        if state.blog_posts.values().any(|post| post.slug == draft.slug) {
            return Err(CatalogueRepositoryError::duplicate_slug(draft.slug));
        }
        let id = allocate(&mut state.ids.blog_posts);
        let post = BlogPost::from_draft(id, draft);
        state.blog_posts.insert(id, post.clone());
        Ok(post)
    }

    async fn list_team_members(&self) -> Result<Vec<TeamMember>, CatalogueRepositoryError> {
        Ok(self.lock().team_members.values().cloned().collect())
    }

    async fn create_team_member(
        &self,
        draft: TeamMemberDraft,
    ) -> Result<TeamMember, CatalogueRepositoryError> {
        let mut state = self.lock();
        let id = allocate(&mut state.ids.team_members);
        let member = TeamMember::from_draft(id, draft);
        state.team_members.insert(id, member.clone());
        Ok(member)
    }

    async fn list_faqs(&self) -> Result<Vec<Faq>, CatalogueRepositoryError> {
        let mut faqs: Vec<Faq> = self.lock().faqs.values().cloned().collect();
        sort_faqs(&mut faqs);
        Ok(faqs)
    }

    async fn create_faq(&self, draft: FaqDraft) -> Result<Faq, CatalogueRepositoryError> {
        let mut state = self.lock();
        let id = allocate(&mut state.ids.faqs);
        let faq = Faq::from_draft(id, draft);
        state.faqs.insert(id, faq.clone());
        Ok(faq)
    }

    async fn is_empty(&self) -> Result<bool, CatalogueRepositoryError> {
        let state = self.lock();
        Ok(state.services.is_empty()
            && state.blog_posts.is_empty()
            && state.team_members.is_empty()
            && state.faqs.is_empty())
    }
}

#[async_trait]
impl ContactMessageRepository for MemoryStore {
    async fn create(
        &self,
        submission: ContactSubmission,
        received_at: DateTime<Utc>,
    ) -> Result<ContactMessage, ContactMessageRepositoryError> {
        let mut state = self.lock();
        let id = allocate(&mut state.ids.contact_messages);
        let message = ContactMessage::from_submission(id, submission, received_at);
        state.contact_messages.push(message.clone());
        Ok(message)
    }
}
