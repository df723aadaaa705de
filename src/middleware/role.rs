//! Role-gate extractors backed by the central authorization table.
//!
//! Each extractor authenticates the caller and then consults
//! [`crate::policy::allows`] for one [`crate::policy::Action`]. A failed gate
//! is always 403 `Forbidden`; scoping decisions (which rows a caller may see)
//! live in the services, not here.

use crate::middleware::auth::AuthUser;
use crate::policy::{Action, allows};
use crate::utils::errors::AppError;

pub fn check_action(auth_user: &AuthUser, action: Action) -> Result<(), AppError> {
    if !allows(auth_user.role(), action) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "You do not have permission to perform this action"
        )));
    }
    Ok(())
}

/// Generates an extractor that gates a handler on one policy action.
macro_rules! require_action {
    ($name:ident, $action:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::utils::errors::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                        $crate::state::AppState,
                    >>::from_request_parts(parts, state)
                    .await?;

                $crate::middleware::role::check_action(&auth_user, $action)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_action!(RequireManageCompetitions, Action::ManageCompetitions);
require_action!(RequireManageBooks, Action::ManageBooks);
require_action!(RequireViewAttendance, Action::ViewAttendance);
require_action!(RequireViewStudentFeedback, Action::ViewStudentFeedback);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::model::Claims;
    use crate::modules::users::model::UserRole;
    use uuid::Uuid;

    fn auth_user(role: UserRole) -> AuthUser {
        AuthUser(Claims {
            sub: Uuid::new_v4().to_string(),
            username: "reader1".to_string(),
            role,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_student_blocked_from_competition_management() {
        let err = check_action(&auth_user(UserRole::Student), Action::ManageCompetitions)
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_teacher_passes_competition_management() {
        assert!(check_action(&auth_user(UserRole::Teacher), Action::ManageCompetitions).is_ok());
    }

    #[test]
    fn test_everyone_passes_registration_gate() {
        for role in [UserRole::Admin, UserRole::Teacher, UserRole::Student] {
            assert!(check_action(&auth_user(role), Action::RegisterForCompetition).is_ok());
        }
    }
}
