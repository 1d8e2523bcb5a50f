//! Profiles service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};
use tradein::{
    roles::{Actor, Role, check_role_change},
    validation::validate_email,
};

use crate::{
    database::Db,
    domain::{
        pagination::Page,
        profiles::{
            errors::ProfilesServiceError,
            models::{NewProfile, Profile, ProfileUpdate, ProfileUuid},
            repository::PgProfilesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn get_profile(&self, profile: ProfileUuid) -> Result<Profile, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profile = self.repository.get_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(profile)
    }

    async fn list_profiles(&self, page: Page) -> Result<Vec<Profile>, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profiles = self.repository.list_profiles(&mut tx, page).await?;

        tx.commit().await?;

        Ok(profiles)
    }

    async fn create_profile(&self, profile: NewProfile) -> Result<Profile, ProfilesServiceError> {
        validate_email(&profile.email)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_profile(&mut tx, profile).await?;

        tx.commit().await?;

        info!(profile = %created.uuid, role = %created.role, "profile created");

        Ok(created)
    }

    async fn update_profile(
        &self,
        profile: ProfileUuid,
        update: ProfileUpdate,
    ) -> Result<Profile, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_profile(&mut tx, profile, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn change_role(
        &self,
        actor: Actor,
        target: ProfileUuid,
        role: Role,
    ) -> Result<Profile, ProfilesServiceError> {
        if let Err(rejected) = check_role_change(&actor, target.into_uuid(), role) {
            warn!(
                actor = %actor.profile,
                target = %target,
                %role,
                "role change rejected: {rejected}"
            );

            return Err(rejected.into());
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_role(&mut tx, target, role).await?;

        tx.commit().await?;

        info!(actor = %actor.profile, target = %target, %role, "role changed");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Retrieve a single profile.
    async fn get_profile(&self, profile: ProfileUuid) -> Result<Profile, ProfilesServiceError>;

    /// List profiles in creation order.
    async fn list_profiles(&self, page: Page) -> Result<Vec<Profile>, ProfilesServiceError>;

    /// Create a profile.
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile, ProfilesServiceError>;

    /// Update the editable fields of a profile.
    async fn update_profile(
        &self,
        profile: ProfileUuid,
        update: ProfileUpdate,
    ) -> Result<Profile, ProfilesServiceError>;

    /// Set `target`'s role on behalf of `actor`.
    ///
    /// Administrators cannot revoke their own admin role.
    async fn change_role(
        &self,
        actor: Actor,
        target: ProfileUuid,
        role: Role,
    ) -> Result<Profile, ProfilesServiceError>;
}
