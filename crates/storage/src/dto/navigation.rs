use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A clickable card linking to an internal route of the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NavigationCard {
    /// Icon identifier understood by the frontend's icon set
    pub icon: Option<String>,

    #[validate(length(min = 1, max = 80, message = "Title must be between 1 and 80 characters"))]
    pub title: String,

    #[validate(length(max = 160, message = "Subtitle must be at most 160 characters"))]
    pub subtitle: String,

    #[validate(custom(function = "validate_internal_link"))]
    pub link: String,
}

impl NavigationCard {
    pub fn new(
        icon: Option<&str>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.map(String::from),
            title: title.into(),
            subtitle: subtitle.into(),
            link: link.into(),
        }
    }
}

// Links must stay inside the client-side router.
fn validate_internal_link(link: &str) -> Result<(), validator::ValidationError> {
    if link.starts_with('/') && !link.starts_with("//") {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("internal_link");
        error.message = Some("Link must be an internal path starting with '/'".into());
        Err(error)
    }
}
