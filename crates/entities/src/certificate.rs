//! Certificate entity definitions.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Background used when a certificate has no template.
pub const PLACEHOLDER_TEMPLATE_URL: &str =
    "/placeholder.svg?height=800&width=1200&text=Certificate+Template";

/// Font used for text without an explicit font.
pub const DEFAULT_FONT: &str = "Arial";

/// Text color used without an explicit color.
pub const DEFAULT_COLOR: &str = "#000000";

/// Student name size in pixels without an explicit size.
pub const DEFAULT_NAME_SIZE: u32 = 24;

/// Description size in pixels without an explicit size.
pub const DEFAULT_DESC_SIZE: u32 = 18;

/// Optional presentation metadata. Pure display data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_size: Option<u32>,
}

impl CertificateStyle {
    pub fn name_font(&self) -> &str {
        self.name_font.as_deref().unwrap_or(DEFAULT_FONT)
    }

    pub fn name_size(&self) -> u32 {
        self.name_size.unwrap_or(DEFAULT_NAME_SIZE)
    }

    pub fn name_color(&self) -> &str {
        self.name_color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    pub fn desc_font(&self) -> &str {
        self.desc_font.as_deref().unwrap_or(DEFAULT_FONT)
    }

    pub fn desc_size(&self) -> u32 {
        self.desc_size.unwrap_or(DEFAULT_DESC_SIZE)
    }

    pub fn desc_color(&self) -> &str {
        self.desc_color.as_deref().unwrap_or(DEFAULT_COLOR)
    }
}

/// An issued certificate. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Identifier, supplied by the issuer.
    pub id: String,
    /// Certificate title.
    pub title: String,
    /// Kind of certificate (participation, merit, ...).
    #[serde(rename = "type")]
    pub certificate_type: String,
    /// Issuing faculty member or department.
    pub issued_by: String,
    /// Issue date as displayed.
    pub date: String,
    /// Recipient name.
    pub student: String,
    /// Recipient register number.
    #[serde(default)]
    pub register_number: String,
    /// Body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Background template image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
    /// Signature image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
    /// Presentation metadata.
    #[serde(flatten)]
    pub style: CertificateStyle,
}

impl Certificate {
    /// Creates a certificate dated today with no recipient set.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        certificate_type: impl Into<String>,
        issued_by: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            certificate_type: certificate_type.into(),
            issued_by: issued_by.into(),
            date: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            student: String::new(),
            register_number: String::new(),
            content: None,
            template_url: None,
            signature_url: None,
            style: CertificateStyle::default(),
        }
    }

    /// Sets the recipient.
    pub fn for_student(
        mut self,
        student: impl Into<String>,
        register_number: impl Into<String>,
    ) -> Self {
        self.student = student.into();
        self.register_number = register_number.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_template_url(mut self, url: impl Into<String>) -> Self {
        self.template_url = Some(url.into());
        self
    }

    pub fn with_signature_url(mut self, url: impl Into<String>) -> Self {
        self.signature_url = Some(url.into());
        self
    }

    pub fn with_style(mut self, style: CertificateStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the template URL, falling back to the placeholder.
    pub fn template_url_or_placeholder(&self) -> &str {
        self.template_url
            .as_deref()
            .unwrap_or(PLACEHOLDER_TEMPLATE_URL)
    }
}
