//! Typed request commands, one per mutating operation.
//!
//! Each command is deserialized from the request body, then wrapped in
//! [`Valid`](crate::validation::Valid) before it reaches the lifecycle layer.

use serde::Deserialize;
use validator::Validate;

use crate::validation::{non_blank, Command, FieldError};

/* --------------------------------------------------------------------------
Questions and answers
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AskQuestionCommand {
    #[validate(custom(function = "non_blank"))]
    pub title: String,
    #[validate(custom(function = "non_blank"))]
    pub content: String,
    /// Free-form tag list, see [`crate::tags::parse_tag_list`].
    #[serde(default)]
    pub tags: Option<String>,
}

impl Command for AskQuestionCommand {}

/// Edit a question. `tags: None` leaves the tag set alone; `Some("")`
/// clears it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditQuestionCommand {
    #[validate(custom(function = "non_blank"))]
    pub title: String,
    #[validate(custom(function = "non_blank"))]
    pub content: String,
    #[serde(default)]
    pub tags: Option<String>,
}

impl Command for EditQuestionCommand {}

/// Body of an answer, used for both creation and edits.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerCommand {
    #[validate(custom(function = "non_blank"))]
    pub content: String,
}

impl Command for AnswerCommand {}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentCommand {
    #[validate(custom(function = "non_blank"))]
    pub content: String,
}

impl Command for CommentCommand {}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppendCommand {
    #[validate(custom(function = "non_blank"))]
    pub content: String,
}

impl Command for AppendCommand {}

/* --------------------------------------------------------------------------
Accounts
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpCommand {
    #[validate(
        custom(function = "non_blank"),
        length(max = 30, message = "Ensure this value has at most 30 characters.")
    )]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(custom(function = "non_blank"))]
    pub password: String,
    #[validate(custom(function = "non_blank"))]
    pub repassword: String,
}

impl Command for SignUpCommand {
    fn cross_field_errors(&self) -> Vec<FieldError> {
        passwords_match(&self.password, &self.repassword)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInCommand {
    #[validate(custom(function = "non_blank"))]
    pub username: String,
    #[validate(custom(function = "non_blank"))]
    pub password: String,
}

impl Command for SignInCommand {}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RequestPasswordResetCommand {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
}

impl Command for RequestPasswordResetCommand {}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordCommand {
    #[validate(custom(function = "non_blank"))]
    pub password: String,
    #[validate(custom(function = "non_blank"))]
    pub repassword: String,
}

impl Command for ResetPasswordCommand {
    fn cross_field_errors(&self) -> Vec<FieldError> {
        passwords_match(&self.password, &self.repassword)
    }
}

/// Profile fields. Missing values fall back to the member defaults.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EditProfileCommand {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(range(min = 0, max = 150, message = "Enter a valid age."))]
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[validate(url(message = "Enter a valid URL."))]
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub bio: String,
}

impl Command for EditProfileCommand {}

/// Change username/email, and optionally the password.
///
/// `new_password` requires `password` to hold the current one; the check
/// against the stored hash happens in the API layer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditAccountCommand {
    #[validate(
        custom(function = "non_blank"),
        length(max = 30, message = "Ensure this value has at most 30 characters.")
    )]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

impl Command for EditAccountCommand {
    fn cross_field_errors(&self) -> Vec<FieldError> {
        let wants_change = self
            .new_password
            .as_deref()
            .is_some_and(|p| !p.is_empty());
        let has_current = self.password.as_deref().is_some_and(|p| !p.is_empty());
        if wants_change && !has_current {
            return vec![FieldError::new(
                "password",
                "Enter your current password to set a new one.",
            )];
        }
        Vec::new()
    }
}

fn passwords_match(password: &str, repassword: &str) -> Vec<FieldError> {
    if !password.is_empty() && !repassword.is_empty() && password != repassword {
        return vec![FieldError::new("repassword", "passwords are not identical")];
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::validation::Valid;
    use assert_matches::assert_matches;

    fn sign_up(password: &str, repassword: &str) -> SignUpCommand {
        SignUpCommand {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: password.into(),
            repassword: repassword.into(),
        }
    }

    #[test]
    fn test_mismatched_passwords_flag_repassword() {
        let result = Valid::new(sign_up("secret", "secrets"));
        assert_matches!(result, Err(CoreError::InvalidFields(errors)) => {
            assert_eq!(errors, vec![FieldError::new("repassword", "passwords are not identical")]);
        });
    }

    #[test]
    fn test_sign_up_collects_every_bad_field() {
        let cmd = SignUpCommand {
            username: "x".repeat(31),
            email: "not-an-email".into(),
            password: String::new(),
            repassword: String::new(),
        };
        let result = Valid::new(cmd);
        assert_matches!(result, Err(CoreError::InvalidFields(errors)) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["email", "password", "repassword", "username"]);
        });
    }

    #[test]
    fn test_empty_question_title_is_rejected() {
        let result = Valid::new(AskQuestionCommand {
            title: String::new(),
            content: "body".into(),
            tags: None,
        });
        assert_matches!(result, Err(CoreError::InvalidFields(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "title");
        });
    }

    #[test]
    fn test_new_password_requires_current_password() {
        let cmd = EditAccountCommand {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: None,
            new_password: Some("n3w".into()),
        };
        assert_matches!(Valid::new(cmd), Err(CoreError::InvalidFields(errors)) => {
            assert_eq!(errors[0].field, "password");
        });
    }

    #[test]
    fn test_account_edit_without_password_change_is_valid() {
        let cmd = EditAccountCommand {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: None,
            new_password: Some(String::new()),
        };
        assert!(Valid::new(cmd).is_ok());
    }

    #[test]
    fn test_profile_defaults_are_valid() {
        assert!(Valid::new(EditProfileCommand::default()).is_ok());
    }
}
