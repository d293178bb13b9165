use crate::db::DbPool;
use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;

use super::crypto::{generate_token, hash_token};

/// Sessions live for 30 days.
const SESSION_DAYS: i64 = 30;

pub fn create_session(
    conn: &mut PgConnection,
    user_id: uuid::Uuid,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = Utc::now() + Duration::days(SESSION_DAYS);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

pub enum TokenLookup {
    Found(User),
    NotFound,
    Unavailable,
}

pub fn get_user_from_token(pool: &DbPool, token: &str) -> TokenLookup {
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get DB connection for auth: {}", e);
            return TokenLookup::Unavailable;
        }
    };
    let token_hash = hash_token(token);

    let user = sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select(User::as_select())
        .first(&mut conn)
        .optional();

    match user {
        Ok(Some(user)) => TokenLookup::Found(user),
        Ok(None) => TokenLookup::NotFound,
        Err(e) => {
            tracing::error!("Failed to look up session: {}", e);
            TokenLookup::Unavailable
        }
    }
}
