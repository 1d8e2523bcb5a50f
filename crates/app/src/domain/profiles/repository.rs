//! Profiles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use tradein::roles::Role;

use crate::domain::{
    pagination::Page,
    profiles::models::{NewProfile, Profile, ProfileUpdate, ProfileUuid},
};

const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const LIST_PROFILES_SQL: &str = include_str!("sql/list_profiles.sql");
const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const UPDATE_ROLE_SQL: &str = include_str!("sql/update_role.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<Profile, sqlx::Error> {
        query_as::<Postgres, Profile>(GET_PROFILE_SQL)
            .bind(profile.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_profiles(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: Page,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        query_as::<Postgres, Profile>(LIST_PROFILES_SQL)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: NewProfile,
    ) -> Result<Profile, sqlx::Error> {
        query_as::<Postgres, Profile>(CREATE_PROFILE_SQL)
            .bind(profile.uuid.into_uuid())
            .bind(profile.email)
            .bind(profile.display_name)
            .bind(profile.role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        update: ProfileUpdate,
    ) -> Result<Profile, sqlx::Error> {
        query_as::<Postgres, Profile>(UPDATE_PROFILE_SQL)
            .bind(profile.into_uuid())
            .bind(update.display_name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        role: Role,
    ) -> Result<Profile, sqlx::Error> {
        query_as::<Postgres, Profile>(UPDATE_ROLE_SQL)
            .bind(profile.into_uuid())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Profile {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role = row
            .try_get::<String, _>("role")?
            .parse::<Role>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProfileUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            role,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
