use super::MailError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix the host tool appends to every project container name.
pub const CONTAINER_SUFFIX: &str = ".ws";

pub const DEFAULT_IMAGE_VERSION: &str = "latest";

/// Image and port defaults for one supported kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    pub image: &'static str,
    pub port: u16,
}

const PROFILES: &[(&str, KindProfile)] = &[
    (
        "maildev",
        KindProfile {
            image: "maildev/maildev",
            port: 80,
        },
    ),
    (
        "mailhog",
        KindProfile {
            image: "mailhog/mailhog",
            port: 8025,
        },
    ),
];

/// Mail testing tool family backing a service.
///
/// Values outside the supported set are kept as `Other` so a hand-edited
/// registry still loads and saves without losing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceKind {
    Maildev,
    Mailhog,
    Other(String),
}

impl ServiceKind {
    pub fn supported() -> [ServiceKind; 2] {
        [ServiceKind::Maildev, ServiceKind::Mailhog]
    }

    /// Parses a user supplied kind, rejecting anything unsupported.
    pub fn parse(value: &str) -> Result<Self, MailError> {
        match Self::from(value.to_string()) {
            ServiceKind::Other(other) => Err(MailError::InvalidKind(other)),
            kind => Ok(kind),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ServiceKind::Maildev => "maildev",
            ServiceKind::Mailhog => "mailhog",
            ServiceKind::Other(value) => value,
        }
    }

    pub fn profile(&self) -> Result<KindProfile, MailError> {
        PROFILES
            .iter()
            .find(|(key, _)| *key == self.as_str())
            .map(|(_, profile)| *profile)
            .ok_or_else(|| MailError::UnsupportedKind(self.as_str().to_string()))
    }
}

impl From<String> for ServiceKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "maildev" => ServiceKind::Maildev,
            "mailhog" => ServiceKind::Mailhog,
            _ => ServiceKind::Other(value),
        }
    }
}

impl From<ServiceKind> for String {
    fn from(kind: ServiceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named mail service as persisted in the registry document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    #[serde(default, alias = "imageName", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_version: Option<String>,
}

impl ServiceDefinition {
    pub fn new(name: impl Into<String>, kind: ServiceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            image: None,
            image_version: None,
        }
    }

    pub fn with_image(mut self, image: Option<String>, image_version: Option<String>) -> Self {
        self.image = image;
        self.image_version = image_version;
        self
    }

    pub fn container_name(&self) -> String {
        format!("mail-{}{}", self.name, CONTAINER_SUFFIX)
    }

    /// Full `repository:tag` reference, falling back to the kind's image and `latest`.
    pub fn image_reference(&self) -> Result<String, MailError> {
        let image = match self.image.as_deref() {
            Some(image) => image.to_string(),
            None => self.kind.profile()?.image.to_string(),
        };
        let version = self
            .image_version
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_VERSION);

        Ok(format!("{image}:{version}"))
    }

    /// Switches kind; overrides are dropped because they belong to the old kind.
    pub fn change_kind(&mut self, kind: ServiceKind) {
        if self.kind != kind {
            self.image = None;
            self.image_version = None;
        }
        self.kind = kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_name_generation() {
        let svc = ServiceDefinition::new("project", ServiceKind::Mailhog);
        assert_eq!(svc.container_name(), "mail-project.ws");
    }

    #[test]
    fn test_image_reference_defaults_by_kind() {
        let maildev = ServiceDefinition::new("a", ServiceKind::Maildev);
        let mailhog = ServiceDefinition::new("b", ServiceKind::Mailhog);

        assert_eq!(maildev.image_reference().unwrap(), "maildev/maildev:latest");
        assert_eq!(mailhog.image_reference().unwrap(), "mailhog/mailhog:latest");
    }

    #[test]
    fn test_image_reference_uses_overrides() {
        let svc = ServiceDefinition::new("a", ServiceKind::Maildev)
            .with_image(Some("registry.local/maildev".into()), Some("2.1.0".into()));

        assert_eq!(svc.image_reference().unwrap(), "registry.local/maildev:2.1.0");
    }

    #[test]
    fn test_image_override_without_kind_profile() {
        let svc = ServiceDefinition::new("a", ServiceKind::Other("mailpit".into()))
            .with_image(Some("axllent/mailpit".into()), None);

        assert_eq!(svc.image_reference().unwrap(), "axllent/mailpit:latest");
    }

    #[test]
    fn test_unsupported_kind_has_no_profile() {
        let svc = ServiceDefinition::new("a", ServiceKind::Other("mailpit".into()));

        assert!(matches!(
            svc.image_reference(),
            Err(MailError::UnsupportedKind(kind)) if kind == "mailpit"
        ));
    }

    #[test]
    fn test_kind_ports() {
        assert_eq!(ServiceKind::Maildev.profile().unwrap().port, 80);
        assert_eq!(ServiceKind::Mailhog.profile().unwrap().port, 8025);
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert_eq!(ServiceKind::parse("mailhog").unwrap(), ServiceKind::Mailhog);
        assert!(matches!(
            ServiceKind::parse("MailHog"),
            Err(MailError::InvalidKind(value)) if value == "MailHog"
        ));
    }

    #[test]
    fn test_change_kind_clears_overrides() {
        let mut svc = ServiceDefinition::new("a", ServiceKind::Maildev)
            .with_image(Some("custom/maildev".into()), Some("1.0".into()));

        svc.change_kind(ServiceKind::Mailhog);

        assert_eq!(svc.kind, ServiceKind::Mailhog);
        assert!(svc.image.is_none());
        assert!(svc.image_version.is_none());
    }

    #[test]
    fn test_change_to_same_kind_keeps_overrides() {
        let mut svc = ServiceDefinition::new("a", ServiceKind::Maildev)
            .with_image(Some("custom/maildev".into()), None);

        svc.change_kind(ServiceKind::Maildev);

        assert_eq!(svc.image.as_deref(), Some("custom/maildev"));
    }

    #[test]
    fn test_serializes_with_document_field_names() {
        let svc = ServiceDefinition::new("a", ServiceKind::Mailhog).with_image(None, Some("v1".into()));
        let json = serde_json::to_value(&svc).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"name": "a", "type": "mailhog", "imageVersion": "v1"})
        );
    }

    #[test]
    fn test_reads_legacy_image_name_and_unknown_kind() {
        let svc: ServiceDefinition = serde_json::from_str(
            r#"{"name": "old", "type": "mailpit", "imageName": "axllent/mailpit"}"#,
        )
        .unwrap();

        assert_eq!(svc.kind, ServiceKind::Other("mailpit".into()));
        assert_eq!(svc.image.as_deref(), Some("axllent/mailpit"));
        assert_eq!(serde_json::to_value(&svc).unwrap()["type"], "mailpit");
    }
}
