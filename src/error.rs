use thiserror::Error;

#[derive(Debug, Error)]
pub enum InductError {
    #[error("not an induct data directory (run `induct init` first)")]
    NotInitialized,

    #[error("induct already initialized in this directory")]
    AlreadyInitialized,

    #[error("user '{0}' not found in the catalog")]
    UserNotFound(String),

    #[error("no id matches '{0}'")]
    IdNotFound(String),

    #[error("'{0}' is ambiguous; matches: {1}")]
    IdAmbiguous(String, String),

    #[error("no active user (run `induct login` or pass --as)")]
    NoCurrentUser,

    #[error("user '{0}' may not edit this assignment")]
    EditNotPermitted(String),

    #[error("'{0}' is not a trainee")]
    NotATrainee(String),

    #[error("--trainee is required for instructor/admin edits")]
    TraineeRequired,

    #[error("unknown role '{0}' (expected trainee, instructor, or admin)")]
    InvalidRole(String),

    #[error("import file is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InductError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "not_initialized",
            Self::AlreadyInitialized => "already_initialized",
            Self::UserNotFound(_) => "user_not_found",
            Self::IdNotFound(_) => "id_not_found",
            Self::IdAmbiguous(_, _) => "id_ambiguous",
            Self::NoCurrentUser => "no_current_user",
            Self::EditNotPermitted(_) => "edit_not_permitted",
            Self::NotATrainee(_) => "not_a_trainee",
            Self::TraineeRequired => "trainee_required",
            Self::InvalidRole(_) => "invalid_role",
            Self::MissingColumn(_) => "missing_column",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, InductError>;
