// User CRUD request DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Update request for PUT /api/users/{id}
///
/// All fields are optional to support partial updates. A supplied password
/// is re-hashed before storage.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50))]
    #[schema(example = "johndoe")]
    pub username: Option<String>,
    #[validate(email)]
    #[schema(example = "newemail@example.com")]
    pub email: Option<String>,
    #[validate(length(min = 8))]
    #[schema(example = "newSecurePassword123")]
    pub password: Option<String>,
}
