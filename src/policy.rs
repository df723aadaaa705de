//! Central authorization table.
//!
//! Every role-gated operation maps to an [`Action`]; [`allows`] is the single
//! place that decides which roles may perform it. Ownership scoping is a
//! separate concern enforced at the query boundary in each service: rows
//! outside the caller's scope simply fall out of the queryset and surface as
//! 404, while a failed role gate is 403.

use crate::modules::users::model::UserRole;

/// Operations subject to a role gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create, update, or delete competitions.
    ManageCompetitions,
    /// Create, update, or delete books on a competition.
    ManageBooks,
    /// View the registrations (attendance) of owned competitions.
    ViewAttendance,
    /// View student comments on owned competitions.
    ViewStudentFeedback,
    /// Browse the student-facing competition catalog.
    BrowseCompetitions,
    /// Register for a competition.
    RegisterForCompetition,
    /// Write comments on books.
    Comment,
    /// Rate books.
    RateBooks,
    /// Log daily reading progress.
    LogDailyPages,
    /// View own achievements.
    ViewAchievements,
    /// Create and read notifications.
    Notify,
}

/// The (role, action) -> allow table.
pub fn allows(role: UserRole, action: Action) -> bool {
    use Action::*;
    use UserRole::*;

    match action {
        ManageCompetitions | ManageBooks | ViewAttendance | ViewStudentFeedback => {
            matches!(role, Admin | Teacher)
        }
        BrowseCompetitions | RegisterForCompetition | Comment | RateBooks | LogDailyPages
        | ViewAchievements | Notify => {
            matches!(role, Admin | Teacher | Student)
        }
    }
}
