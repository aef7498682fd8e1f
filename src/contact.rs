// Contact form validation and the alert shown after submitting it.
use std::fmt;
use strum::Display;

pub const SUCCESS_MESSAGE: &str = "تم إرسال رسالتك بنجاح! سنتواصل معك قريباً.";
pub const INVALID_MESSAGE: &str = "الرجاء التأكد من تعبئة جميع الحقول بشكل صحيح.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFieldError {
    Missing(ContactField),
    InvalidEmail(String),
}

impl fmt::Display for ContactFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactFieldError::Missing(field) => write!(f, "{} is required", field),
            ContactFieldError::InvalidEmail(email) => {
                write!(f, "'{}' is not a valid email address", email)
            }
        }
    }
}

/// Checks the `local@domain.tld` shape: one `@`, no whitespace, a dot inside the domain.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !domain.starts_with('.'),
        None => false,
    }
}

impl ContactForm {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    /// Returns every problem found, in field order.
    pub fn validate(&self) -> Result<(), Vec<ContactFieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ContactFieldError::Missing(ContactField::Name));
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.push(ContactFieldError::Missing(ContactField::Email));
        } else if !is_valid_email(email) {
            errors.push(ContactFieldError::InvalidEmail(email.to_string()));
        }
        if self.message.trim().is_empty() {
            errors.push(ContactFieldError::Missing(ContactField::Message));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validates the form and produces the alert to show.
    ///
    /// A valid form is reset after submission; an invalid one keeps its values.
    pub fn submit(&mut self) -> Submission {
        match self.validate() {
            Ok(()) => {
                log::info!("Contact form accepted");
                *self = ContactForm::default();
                Submission {
                    alert: Alert::new(AlertKind::Success, SUCCESS_MESSAGE),
                    errors: Vec::new(),
                }
            }
            Err(errors) => {
                log::debug!("Contact form rejected: {} problem(s)", errors.len());
                Submission {
                    alert: Alert::new(AlertKind::Danger, INVALID_MESSAGE),
                    errors,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub alert: Alert,
    pub errors: Vec<ContactFieldError>,
}

impl Submission {
    pub fn is_success(&self) -> bool {
        self.alert.kind == AlertKind::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AlertKind {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    pub fn css_class(&self) -> String {
        format!("alert-{}", self.kind)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Holds at most one alert; showing a new one replaces the previous.
#[derive(Debug, Default)]
pub struct AlertContainer {
    current: Option<Alert>,
}

impl AlertContainer {
    pub fn show(&mut self, alert: Alert) {
        self.current = Some(alert);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission_resets_form() {
        let mut form = ContactForm::new("سارة", "sara@example.com", "مرحباً");
        let sub = form.submit();
        assert!(sub.is_success());
        assert_eq!(sub.alert.message, SUCCESS_MESSAGE);
        assert_eq!(sub.alert.css_class(), "alert-success");
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn test_invalid_submission_keeps_values() {
        let mut form = ContactForm::new("  ", "sara@example", "hi");
        let sub = form.submit();
        assert!(!sub.is_success());
        assert_eq!(sub.alert.css_class(), "alert-danger");
        assert_eq!(sub.alert.message, INVALID_MESSAGE);
        assert_eq!(
            sub.errors,
            vec![
                ContactFieldError::Missing(ContactField::Name),
                ContactFieldError::InvalidEmail("sara@example".to_string()),
            ]
        );
        assert_eq!(form.email, "sara@example");
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ContactFieldError::Missing(ContactField::Message).to_string(),
            "message is required"
        );
        assert_eq!(ContactField::Email.to_string(), "email");
    }

    #[test]
    fn test_alert_container_replaces() {
        let mut c = AlertContainer::default();
        c.show(Alert::new(AlertKind::Danger, "first"));
        c.show(Alert::new(AlertKind::Success, "second"));
        assert_eq!(c.current().map(|a| a.message.as_str()), Some("second"));
        c.dismiss();
        assert!(c.current().is_none());
    }
}
