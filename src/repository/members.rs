//! Members repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::Member,
};

use super::MemberStore;

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for MembersRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    async fn get_all(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    async fn put(&self, member: &Member) -> AppResult<Member> {
        if member.id == 0 {
            sqlx::query_as::<_, Member>(
                r#"
                INSERT INTO members (name, email, phone, registration_date)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                "#,
            )
            .bind(&member.name)
            .bind(&member.email)
            .bind(&member.phone)
            .bind(member.registration_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Member"))
        } else {
            sqlx::query_as::<_, Member>(
                r#"
                UPDATE members SET name = $1, email = $2, phone = $3, registration_date = $4
                WHERE id = $5
                RETURNING *
                "#,
            )
            .bind(&member.name)
            .bind(&member.email)
            .bind(&member.phone)
            .bind(member.registration_date)
            .bind(member.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Member"))?
            .ok_or_else(|| AppError::member_not_found(member.id))
        }
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }
}
