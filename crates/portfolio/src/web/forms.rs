//! Form payloads and their field-presence validation.

use serde::Deserialize;

use crate::project::{is_web_url, NewProject};

/// The contact form as posted by the browser.
///
/// Every field is optional at the wire level. Missing and empty values are
/// both reported as "required" by [`ContactForm::validate`].
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    /// Sender's first name.
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    /// Sender's last name.
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    /// Sender's e-mail address.
    pub email: Option<String>,
    /// Chosen password.
    pub password: Option<String>,
    /// Password confirmation.
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
    /// Newsletter opt-in checkbox (`"on"` when ticked).
    pub newsletter: Option<String>,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "confirm_password",
                &self.confirm_password.as_ref().map(|_| "<redacted>"),
            )
            .field("newsletter", &self.newsletter)
            .finish()
    }
}

impl ContactForm {
    /// Trimmed first name, empty if missing.
    #[must_use]
    pub fn first_name(&self) -> &str {
        trimmed(self.first_name.as_ref())
    }

    /// Trimmed last name, empty if missing.
    #[must_use]
    pub fn last_name(&self) -> &str {
        trimmed(self.last_name.as_ref())
    }

    /// Trimmed e-mail, empty if missing.
    #[must_use]
    pub fn email(&self) -> &str {
        trimmed(self.email.as_ref())
    }

    /// True when the newsletter box was ticked.
    #[must_use]
    pub fn wants_newsletter(&self) -> bool {
        self.newsletter.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Collect validation errors in display order. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.first_name().is_empty() {
            errors.push("First name is required".to_string());
        }
        if self.last_name().is_empty() {
            errors.push("Last name is required".to_string());
        }
        if self.email().is_empty() {
            errors.push("Email is required".to_string());
        }

        // Passwords are compared verbatim, never trimmed
        let password = self.password.as_deref().unwrap_or_default();
        let confirm = self.confirm_password.as_deref().unwrap_or_default();
        if password.is_empty() {
            errors.push("Password is required".to_string());
        }
        if password != confirm {
            errors.push("Passwords do not match".to_string());
        }

        errors
    }
}

/// The add-project form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    /// Project title (required).
    pub title: Option<String>,
    /// Description (required).
    pub description: Option<String>,
    /// Image file name (required).
    pub image_filename: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Comma-separated technologies.
    pub technologies: Option<String>,
    /// Live project URL.
    pub project_url: Option<String>,
    /// Duration.
    pub duration: Option<String>,
    /// Role.
    pub role: Option<String>,
}

impl ProjectForm {
    /// Validate required fields and build the project to insert.
    ///
    /// Values are trimmed and blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns the validation messages, in display order, if any required
    /// field is missing.
    pub fn validate(&self) -> std::result::Result<NewProject, Vec<String>> {
        let title = trimmed(self.title.as_ref());
        let description = trimmed(self.description.as_ref());
        let image_filename = trimmed(self.image_filename.as_ref());

        let mut errors = Vec::new();
        if title.is_empty() {
            errors.push("Title is required".to_string());
        }
        if description.is_empty() {
            errors.push("Description is required".to_string());
        }
        if image_filename.is_empty() {
            errors.push("Image filename is required".to_string());
        }
        let project_url = optional(self.project_url.as_ref());
        if project_url.as_deref().is_some_and(|url| !is_web_url(url)) {
            errors.push("Project URL must start with http:// or https://".to_string());
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewProject {
            title: title.to_string(),
            description: description.to_string(),
            image_filename: image_filename.to_string(),
            category: optional(self.category.as_ref()),
            technologies: optional(self.technologies.as_ref()),
            project_url,
            duration: optional(self.duration.as_ref()),
            role: optional(self.role.as_ref()),
        })
    }
}

fn trimmed(value: Option<&String>) -> &str {
    value.map_or("", |v| v.trim())
}

fn optional(value: Option<&String>) -> Option<String> {
    Some(trimmed(value)).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_contact() -> ContactForm {
        ContactForm {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("john@example.com".to_string()),
            password: Some("password123".to_string()),
            confirm_password: Some("password123".to_string()),
            newsletter: Some("on".to_string()),
        }
    }

    #[test]
    fn test_valid_contact() {
        let form = valid_contact();
        assert!(form.validate().is_empty());
        assert!(form.wants_newsletter());
        assert_eq!(form.first_name(), "John");
    }

    #[test]
    fn test_all_missing_contact_fields() {
        let errors = ContactForm::default().validate();
        assert_eq!(
            errors,
            vec![
                "First name is required",
                "Last name is required",
                "Email is required",
                "Password is required",
            ]
        );
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let form = ContactForm {
            first_name: Some(String::new()),
            last_name: Some("   ".to_string()),
            email: Some(String::new()),
            password: Some(String::new()),
            confirm_password: Some(String::new()),
            newsletter: None,
        };
        assert_eq!(form.validate().len(), 4);
        assert!(!form.wants_newsletter());
    }

    #[test]
    fn test_password_mismatch() {
        let mut form = valid_contact();
        form.confirm_password = Some("different456".to_string());
        assert_eq!(form.validate(), vec!["Passwords do not match"]);
    }

    #[test]
    fn test_missing_confirmation_mismatches() {
        let mut form = valid_contact();
        form.confirm_password = None;
        assert_eq!(form.validate(), vec!["Passwords do not match"]);
    }

    #[test]
    fn test_password_not_trimmed() {
        let mut form = valid_contact();
        form.confirm_password = Some("password123 ".to_string());
        assert_eq!(form.validate(), vec!["Passwords do not match"]);
    }

    #[test]
    fn test_contact_debug_redacts_passwords() {
        let debug_str = format!("{:?}", valid_contact());
        assert!(debug_str.contains("John"));
        assert!(!debug_str.contains("password123"));
        assert!(debug_str.contains("<redacted>"));
    }

    #[test]
    fn test_contact_deserializes_camel_case_fields() {
        let form: ContactForm =
            serde_json::from_str(r#"{"firstName":"Ada","confirmPassword":"x"}"#).unwrap();
        assert_eq!(form.first_name(), "Ada");
        assert_eq!(form.confirm_password.as_deref(), Some("x"));
        assert!(form.last_name.is_none());
    }

    #[test]
    fn test_project_form_valid_with_optional_fields() {
        let form = ProjectForm {
            title: Some(" New Project ".to_string()),
            description: Some("Project description".to_string()),
            image_filename: Some("image.jpg".to_string()),
            category: Some("Web Development".to_string()),
            technologies: Some("Python, Flask".to_string()),
            project_url: Some(String::new()),
            duration: Some("  ".to_string()),
            role: None,
        };
        let project = form.validate().unwrap();
        assert_eq!(project.title, "New Project");
        assert_eq!(project.category.as_deref(), Some("Web Development"));
        assert!(project.project_url.is_none());
        assert!(project.duration.is_none());
        assert!(project.role.is_none());
    }

    #[test]
    fn test_project_form_required_only() {
        let form = ProjectForm {
            title: Some("Minimal Project".to_string()),
            description: Some("Minimal description".to_string()),
            image_filename: Some("minimal.jpg".to_string()),
            ..ProjectForm::default()
        };
        let project = form.validate().unwrap();
        assert_eq!(
            project,
            NewProject::new("Minimal Project", "Minimal description", "minimal.jpg")
        );
    }

    #[test]
    fn test_project_form_rejects_non_web_url() {
        let mut form = ProjectForm {
            title: Some("T".to_string()),
            description: Some("D".to_string()),
            image_filename: Some("i.png".to_string()),
            project_url: Some("javascript:alert(document.cookie)".to_string()),
            ..ProjectForm::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            vec!["Project URL must start with http:// or https://"]
        );

        form.project_url = Some(" https://example.com/app ".to_string());
        let project = form.validate().unwrap();
        assert_eq!(project.project_url.as_deref(), Some("https://example.com/app"));
    }

    #[test]
    fn test_project_form_missing_required() {
        let errors = ProjectForm::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Title is required",
                "Description is required",
                "Image filename is required",
            ]
        );
    }
}
