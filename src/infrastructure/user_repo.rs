use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, Role, User};
use crate::schema::users;

use super::models::{UserFields, UserRow};

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(|_| {
            DomainError::Internal(format!("user {} has unknown role '{}'", row.id, row.role))
        })?;
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn create(&self, user: NewUser) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;

        let id = diesel::insert_into(users::table)
            .values(&UserFields {
                name: &user.name,
                email: &user.email,
                password_hash: &user.password_hash,
                role: user.role.as_str(),
            })
            .returning(users::id)
            .get_result(&mut conn)?;

        Ok(id)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(User::try_from)
            .transpose()
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(User::try_from)
            .transpose()
    }

    fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut conn = self.pool.get()?;

        users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load(&mut conn)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    fn update(&self, user: User) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(users::table.find(user.id))
            .set(&UserFields {
                name: &user.name,
                email: &user.email,
                password_hash: &user.password_hash,
                role: user.role.as_str(),
            })
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(DomainError::NotFound(format!("User {}", user.id)));
        }
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(users::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!("User {id}")));
        }
        Ok(())
    }
}
