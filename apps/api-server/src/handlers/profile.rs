//! Profile handler.

use actix_web::{HttpResponse, web};

use bloghub_core::domain::UserProfile;
use bloghub_shared::{ApiResponse, ProfileResponse, UpdateProfileRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Update the authenticated user's profile.
///
/// Accounts that predate the profile table get a profile created lazily on
/// first update. Omitted fields keep their current value.
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    let existing = state.profiles.find_by_user_id(identity.user_id).await?;
    let is_new = existing.is_none();
    let mut profile = existing.unwrap_or_else(|| UserProfile::new(identity.user_id));

    if let Some(bio) = body.bio {
        profile.bio = bio;
    }
    if let Some(avatar) = body.avatar {
        profile.avatar = Some(avatar);
    }
    if let Some(website) = body.website {
        profile.website = website;
    }
    if let Some(location) = body.location {
        profile.location = location;
    }
    profile.touch();

    let profile = if is_new {
        state.profiles.insert(profile).await?
    } else {
        state.profiles.update(profile).await?
    };

    tracing::debug!(user_id = %identity.user_id, "Profile updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ProfileResponse {
            user_id: profile.user_id,
            bio: profile.bio,
            avatar: profile.avatar,
            website: profile.website,
            location: profile.location,
            updated_at: profile.updated_at,
        },
        "Your profile has been updated!",
    )))
}
