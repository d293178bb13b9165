use super::hash_password;
use crate::config::AdminAccount;
use crate::models::{NewUser, User};
use crate::schema::users;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use larder_core::{validate_account, AccountFields, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum AdminSetupError {
    #[error("Invalid administrator account: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Failed to hash administrator password: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("Failed to set up administrator account: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Make sure the configured administrator exists and is a superuser.
///
/// An existing user with that username (any case) is promoted and keeps
/// its password. Otherwise a new superuser is created.
pub fn ensure_superuser(
    conn: &mut PgConnection,
    admin: &AdminAccount,
) -> Result<User, AdminSetupError> {
    let AccountFields { username, email } =
        validate_account(&admin.username, &admin.email, &admin.password)?;

    conn.transaction::<_, AdminSetupError, _>(|conn| {
        let existing: Option<User> = users::table
            .filter(
                sql::<Bool>("LOWER(username) = LOWER(")
                    .bind::<Text, _>(&username)
                    .sql(")"),
            )
            .select(User::as_select())
            .for_update()
            .first(conn)
            .optional()?;

        match existing {
            Some(user) if user.is_superuser => {
                tracing::info!(user_id = %user.id, "administrator account already present");
                Ok(user)
            }
            Some(user) => {
                let user: User = diesel::update(users::table.find(user.id))
                    .set(users::is_superuser.eq(true))
                    .returning(User::as_returning())
                    .get_result(conn)?;
                tracing::info!(user_id = %user.id, "promoted user to administrator");
                Ok(user)
            }
            None => {
                let password_hash =
                    hash_password(&admin.password).map_err(AdminSetupError::Hash)?;
                let user: User = diesel::insert_into(users::table)
                    .values(NewUser {
                        username: &username,
                        email: &email,
                        password_hash: &password_hash,
                        is_superuser: true,
                    })
                    .returning(User::as_returning())
                    .get_result(conn)?;
                tracing::info!(user_id = %user.id, "created administrator account");
                Ok(user)
            }
        }
    })
}
