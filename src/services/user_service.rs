use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{Account, CreateUserRequest, OutboxRecord, User, UserRole};
use crate::services::password_service::hash_password;
use crate::shared::events::DomainEvent;
use crate::shared::utils::validate_and_normalize_email;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone)]
pub struct UserService {
    db: Database,
    outbox_max_attempts: i32,
}

impl UserService {
    pub fn new(db: Database, outbox_max_attempts: i32) -> Self {
        Self {
            db,
            outbox_max_attempts,
        }
    }

    /// Create a user, and an account alongside it when a password was
    /// supplied. User and account are written in one transaction.
    pub async fn create_user(&self, request: CreateUserRequest) -> ApiResult<(User, bool)> {
        let email = validate_and_normalize_email(&request.email)?;

        if request.display_name.trim().is_empty() {
            return Err(ApiError::BadRequest("Display name is required".to_string()));
        }

        if self.db.get_user_by_email(&email).await?.is_some() {
            return Err(ApiError::Conflict("Email already exists".to_string()));
        }

        let user = User::new(
            email,
            request.display_name.trim().to_string(),
            request.role.unwrap_or_default(),
        );

        let account = match request.password.as_deref() {
            Some(password) => {
                if password.len() < MIN_PASSWORD_LENGTH {
                    return Err(ApiError::BadRequest(format!(
                        "Password must be at least {} characters",
                        MIN_PASSWORD_LENGTH
                    )));
                }
                Some(Account::new(user.id.clone(), hash_password(password)?))
            }
            None => None,
        };

        self.db.create_user(&user, account.as_ref()).await?;

        Ok((user, account.is_some()))
    }

    pub async fn get_user(&self, user_id: &str) -> ApiResult<(User, bool)> {
        let user = self
            .db
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let has_account = self.db.get_account_by_user_id(user_id).await?.is_some();

        Ok((user, has_account))
    }

    /// Delete a user. The `user.deleted` outbox row commits with the delete;
    /// the account removal happens later, in the processor's transaction.
    pub async fn delete_user(&self, user_id: &str) -> ApiResult<()> {
        let event = DomainEvent::UserDeleted {
            user_id: user_id.to_string(),
        };
        let record = OutboxRecord::from_event(&event, self.outbox_max_attempts);

        let deleted = self.db.delete_user(user_id, &record).await?;
        if !deleted {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        tracing::info!("User {} deleted, account cleanup queued", user_id);
        Ok(())
    }

    /// Update a user's role. The emitted event's `token_refreshed` flag is
    /// true iff the stored role actually changed.
    pub async fn update_role(&self, user_id: &str, role: UserRole) -> ApiResult<User> {
        let user = self
            .db
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let token_refreshed = user.role != role;
        let updated_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        let event = DomainEvent::UserRoleUpdated {
            user_id: user_id.to_string(),
            role,
            token_refreshed,
        };
        let record = OutboxRecord::from_event(&event, self.outbox_max_attempts);

        self.db
            .update_user_role(user_id, role, &updated_at, &record)
            .await?;

        Ok(User {
            role,
            updated_at,
            ..user
        })
    }
}
