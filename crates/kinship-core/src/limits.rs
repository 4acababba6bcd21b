//! Input validation limits for resource protection

/// Maximum length for person display names (256 chars)
pub const MAX_PERSON_NAME_LEN: usize = 256;

/// Maximum length for a single relation field (64KB)
pub const MAX_RELATION_FIELD_LEN: usize = 64 * 1024;

/// Maximum traversal distance accepted from callers (10)
pub const MAX_TRAVERSAL_DISTANCE: u32 = 10;

/// Default traversal distance used by the person pages (3)
pub const DEFAULT_TRAVERSAL_DISTANCE: u32 = 3;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    PersonNameTooLong { len: usize, max: usize },
    RelationFieldTooLong { len: usize, max: usize },
    TraversalDistanceTooLarge { distance: u32, max: u32 },
    EmptyPersonName,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonNameTooLong { len, max } => {
                write!(f, "Person name too long: {} chars (max {})", len, max)
            }
            Self::RelationFieldTooLong { len, max } => {
                write!(f, "Relation field too long: {} bytes (max {})", len, max)
            }
            Self::TraversalDistanceTooLarge { distance, max } => {
                write!(f, "Traversal distance too large: {} (max {})", distance, max)
            }
            Self::EmptyPersonName => write!(f, "Person name cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate person name
pub fn validate_person_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyPersonName);
    }
    if name.len() > MAX_PERSON_NAME_LEN {
        return Err(ValidationError::PersonNameTooLong {
            len: name.len(),
            max: MAX_PERSON_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate the raw text of one relation field
pub fn validate_relation_field(text: &str) -> Result<(), ValidationError> {
    if text.len() > MAX_RELATION_FIELD_LEN {
        return Err(ValidationError::RelationFieldTooLong {
            len: text.len(),
            max: MAX_RELATION_FIELD_LEN,
        });
    }
    Ok(())
}

/// Validate a caller-supplied traversal distance
pub fn validate_max_distance(distance: u32) -> Result<(), ValidationError> {
    if distance > MAX_TRAVERSAL_DISTANCE {
        return Err(ValidationError::TraversalDistanceTooLarge {
            distance,
            max: MAX_TRAVERSAL_DISTANCE,
        });
    }
    Ok(())
}
