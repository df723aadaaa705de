use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::achievements::model::{Achievement, CreateAchievementDto};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto, RegisterResponse,
    RequestOtpDto, ResetPasswordWithOtpDto, TokenPair, VerifyEmailResponse, VerifyTokenRequest,
};
use crate::modules::books::model::{Book, CreateBookDto, UpdateBookDto};
use crate::modules::comments::model::{
    CommentResponse, CommentType, CreateCommentDto, StudentFeedback, UpdateCommentDto,
};
use crate::modules::competitions::model::{
    Competition, CompetitionWithBooks, CreateCompetitionDto, StudentCompetition,
    UpdateCompetitionDto,
};
use crate::modules::daily_pages::model::{CreateDailyPageDto, DailyPage};
use crate::modules::notifications::model::{CreateNotificationDto, InboxEntry, Notification};
use crate::modules::ratings::model::{BookRating, CreateBookRatingDto};
use crate::modules::registrations::model::{
    AttendanceEntry, CreateRegistrationDto, Registration, RegistrationResponse,
};
use crate::modules::users::model::{User, UserRole};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::verify_email,
        crate::modules::auth::controller::verify_token,
        crate::modules::auth::controller::request_otp_reset,
        crate::modules::auth::controller::reset_password_with_otp,
        crate::modules::users::controller::get_me,
        crate::modules::competitions::controller::create_competition,
        crate::modules::competitions::controller::get_competitions,
        crate::modules::competitions::controller::get_competition,
        crate::modules::competitions::controller::update_competition,
        crate::modules::competitions::controller::delete_competition,
        crate::modules::competitions::controller::get_student_catalog,
        crate::modules::competitions::controller::get_student_competition,
        crate::modules::books::controller::create_book,
        crate::modules::books::controller::get_books,
        crate::modules::books::controller::get_book,
        crate::modules::books::controller::update_book,
        crate::modules::books::controller::delete_book,
        crate::modules::registrations::controller::create_registration,
        crate::modules::registrations::controller::get_registrations,
        crate::modules::registrations::controller::delete_registration,
        crate::modules::registrations::controller::get_attendance,
        crate::modules::comments::controller::create_comment,
        crate::modules::comments::controller::get_comments,
        crate::modules::comments::controller::get_comment,
        crate::modules::comments::controller::update_comment,
        crate::modules::comments::controller::delete_comment,
        crate::modules::comments::controller::get_student_feedback,
        crate::modules::daily_pages::controller::create_daily_page,
        crate::modules::daily_pages::controller::get_daily_pages,
        crate::modules::ratings::controller::create_rating,
        crate::modules::ratings::controller::get_ratings,
        crate::modules::achievements::controller::create_achievement,
        crate::modules::achievements::controller::get_achievements,
        crate::modules::achievements::controller::delete_achievement,
        crate::modules::notifications::controller::create_notification,
        crate::modules::notifications::controller::get_notifications,
        crate::modules::notifications::controller::get_inbox,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRequestDto,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            TokenPair,
            MessageResponse,
            VerifyTokenRequest,
            VerifyEmailResponse,
            RequestOtpDto,
            ResetPasswordWithOtpDto,
            ErrorResponse,
            Competition,
            CreateCompetitionDto,
            UpdateCompetitionDto,
            CompetitionWithBooks,
            StudentCompetition,
            Book,
            CreateBookDto,
            UpdateBookDto,
            Registration,
            CreateRegistrationDto,
            RegistrationResponse,
            AttendanceEntry,
            CommentType,
            CreateCommentDto,
            UpdateCommentDto,
            CommentResponse,
            StudentFeedback,
            DailyPage,
            CreateDailyPageDto,
            BookRating,
            CreateBookRatingDto,
            Achievement,
            CreateAchievementDto,
            Notification,
            CreateNotificationDto,
            InboxEntry,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, email verification and password reset"),
        (name = "Users", description = "User profile endpoints"),
        (name = "Competitions", description = "Reading competition management and catalog"),
        (name = "Books", description = "Reading list management"),
        (name = "Registrations", description = "Competition registrations and attendance"),
        (name = "Comments", description = "Student comments on books"),
        (name = "Daily pages", description = "Daily reading logs"),
        (name = "Ratings", description = "Book ratings"),
        (name = "Achievements", description = "Reader achievements"),
        (name = "Notifications", description = "Competition notifications and inbox")
    ),
    info(
        title = "ReadRally API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL for running reading competitions, with JWT-based authentication and email verification.",
        contact(
            name = "API Support",
            email = "support@readrally.app"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
