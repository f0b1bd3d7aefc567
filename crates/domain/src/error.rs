use crate::{Category, Weekday};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Exercise name must not be empty")]
    EmptyName,
    #[error("'{name}' already exists in {category} workouts")]
    Duplicate { category: Category, name: String },
    #[error("No exercises scheduled for {0}")]
    NoExercises(Weekday),
    #[error("A {0} workout is already in progress")]
    SessionActive(Weekday),
    #[error("No workout in progress")]
    NoSession,
    #[error("No exercise at position {0} in the current workout")]
    NoSuchExercise(usize),
    #[error("Must log at least one set")]
    NothingLogged,
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to decode stored state: {0}")]
    Decode(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_service_error_from_validation_error() {
        assert!(matches!(
            ServiceError::from(ValidationError::NothingLogged),
            ServiceError::Validation(ValidationError::NothingLogged)
        ));
    }

    #[test]
    fn test_service_error_from_storage_error() {
        assert!(matches!(
            ServiceError::from(StorageError::Other("foo".into())),
            ServiceError::Storage(StorageError::Other(error)) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::Duplicate {
                category: Category::Push,
                name: "Dips".to_string()
            }
            .to_string(),
            "'Dips' already exists in push workouts"
        );
        assert_eq!(
            ValidationError::NoExercises(Weekday::Tuesday).to_string(),
            "No exercises scheduled for tuesday"
        );
    }
}
