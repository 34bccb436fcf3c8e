//! Handlers for the `/users/{id}` profile resource.

use aristotle_core::account::DEFAULT_GENDER;
use aristotle_core::commands::{EditAccountCommand, EditProfileCommand};
use aristotle_core::error::CoreError;
use aristotle_core::listing::QuestionSort;
use aristotle_core::types::DbId;
use aristotle_core::validation::{FieldError, Valid};
use aristotle_db::models::answer::AuthoredAnswer;
use aristotle_db::models::question::{QuestionFilter, QuestionSummary};
use aristotle_db::models::user::{Member, UpdateMember, UserResponse};
use aristotle_db::repositories::{AnswerRepo, MemberRepo, QuestionRepo, UserRepo};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

const ENTITY: &str = "user";

/// A user's public page.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub member: Member,
    pub avatar_url: String,
    /// Newest first, paginated by `?page=&pagesize=`.
    pub questions: Page<QuestionSummary>,
    /// Newest first.
    pub answers: Vec<AuthoredAnswer>,
}

/// The user and profile after an edit.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: UserResponse,
    pub member: Member,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// Only the account owner may change it.
fn require_self(user: &AuthUser, id: DbId) -> Result<(), CoreError> {
    if user.user_id != id {
        return Err(CoreError::Forbidden(
            "You can only edit your own account".into(),
        ));
    }
    Ok(())
}

/// GET /api/v1/users/{id}
pub async fn profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let member = MemberRepo::find_by_user(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let filter = QuestionFilter::AuthoredBy(id);
    let sort = QuestionSort::Newest;
    let total = QuestionRepo::count(&state.pool, filter, sort).await?;
    let pagination = params.paginate(total, state.config.listing.question_page_size);
    let questions = QuestionRepo::list(
        &state.pool,
        filter,
        sort,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;
    let answers = AnswerRepo::list_by_author(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ProfileResponse {
            avatar_url: state.config.listing.avatar_url(member.avatar.as_deref()),
            user: UserResponse::from(&user),
            member,
            questions: Page::new(questions, pagination),
            answers,
        },
    }))
}

/// PUT /api/v1/users/{id}/profile
pub async fn edit_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<EditProfileCommand>,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    require_self(&auth, id)?;
    let cmd = Valid::new(input)?.into_inner();

    let update = UpdateMember {
        gender: cmd
            .gender
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GENDER.to_string()),
        age: cmd.age,
        occupation: cmd.occupation,
        education: cmd.education,
        address: cmd.address,
        phone: cmd.phone,
        company: cmd.company,
        website: cmd.website.unwrap_or_default(),
        interests: cmd.interests,
        bio: cmd.bio,
    };

    let mut tx = state.pool.begin().await?;
    UserRepo::update_names(&mut *tx, id, &cmd.first_name, &cmd.last_name).await?;
    let member = MemberRepo::update(&mut *tx, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    let user = UserRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;

    tracing::info!(user_id = id, "Profile updated");
    Ok(Json(DataResponse {
        data: AccountResponse {
            user: UserResponse::from(&user),
            member,
        },
    }))
}

/// PUT /api/v1/users/{id}/account
///
/// Change username and email, and the password when `new_password` is set.
/// A password change must present the current password.
pub async fn edit_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<EditAccountCommand>,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    require_self(&auth, id)?;
    let cmd = Valid::new(input)?;

    let mut tx = state.pool.begin().await?;
    let current = UserRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let new_password = cmd.new_password.as_deref().filter(|p| !p.is_empty());
    if let Some(new_password) = new_password {
        let given = cmd.password.as_deref().unwrap_or_default();
        let matches = verify_password(given, &current.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !matches {
            return Err(CoreError::InvalidFields(vec![FieldError::new(
                "password",
                "Your current password is incorrect.",
            )])
            .into());
        }
        let password_hash = hash_password(new_password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        UserRepo::update_password(&mut *tx, id, &password_hash).await?;
    }

    let user = UserRepo::update_account(&mut *tx, id, &cmd.username, &cmd.email)
        .await?
        .ok_or_else(|| not_found(id))?;
    let member = MemberRepo::find_by_user(&mut *tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;

    tracing::info!(
        user_id = id,
        password_changed = new_password.is_some(),
        "Account updated"
    );
    Ok(Json(DataResponse {
        data: AccountResponse {
            user: UserResponse::from(&user),
            member,
        },
    }))
}
