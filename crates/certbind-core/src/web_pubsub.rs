//! Identifiers for Web PubSub services and their custom certificates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IdError, Result};
use crate::resource_id::{Segment, format_segments, parse_segments};

const WEB_PUBSUB_LAYOUT: &[Segment] = &[
    Segment::Static("subscriptions"),
    Segment::Value("subscriptionId"),
    Segment::Static("resourceGroups"),
    Segment::Value("resourceGroupName"),
    Segment::Static("providers"),
    Segment::Static("Microsoft.SignalRService"),
    Segment::Static("webPubSub"),
    Segment::Value("webPubSubName"),
];

const CUSTOM_CERTIFICATE_LAYOUT: &[Segment] = &[
    Segment::Static("subscriptions"),
    Segment::Value("subscriptionId"),
    Segment::Static("resourceGroups"),
    Segment::Value("resourceGroupName"),
    Segment::Static("providers"),
    Segment::Static("Microsoft.SignalRService"),
    Segment::Static("webPubSub"),
    Segment::Value("webPubSubName"),
    Segment::Static("customCertificates"),
    Segment::Value("customCertificateName"),
];

/// Identifier of a Web PubSub service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebPubSubId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub web_pubsub_name: String,
}

impl WebPubSubId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        web_pubsub_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            web_pubsub_name: web_pubsub_name.into(),
        }
    }

    /// Parses `/subscriptions/{s}/resourceGroups/{rg}/providers/Microsoft.SignalRService/webPubSub/{name}`.
    pub fn parse(input: &str) -> Result<Self> {
        let values = parse_segments("Web PubSub", input, WEB_PUBSUB_LAYOUT)?;
        let [subscription_id, resource_group_name, web_pubsub_name]: [String; 3] = values
            .try_into()
            .map_err(|_| IdError::Empty { kind: "Web PubSub" })?;
        Ok(Self {
            subscription_id,
            resource_group_name,
            web_pubsub_name,
        })
    }

    /// Identifier of the custom certificate `name` under this service.
    pub fn custom_certificate(&self, name: impl Into<String>) -> CustomCertificateId {
        CustomCertificateId::new(
            &self.subscription_id,
            &self.resource_group_name,
            &self.web_pubsub_name,
            name,
        )
    }

    pub fn id(&self) -> String {
        format_segments(
            WEB_PUBSUB_LAYOUT,
            &[
                &self.subscription_id,
                &self.resource_group_name,
                &self.web_pubsub_name,
            ],
        )
    }
}

impl fmt::Display for WebPubSubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Web PubSub (Subscription: {:?}", self.subscription_id)?;
        write!(f, " / Resource Group Name: {:?}", self.resource_group_name)?;
        write!(f, " / Web PubSub Name: {:?})", self.web_pubsub_name)
    }
}

impl FromStr for WebPubSubId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WebPubSubId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<WebPubSubId> for String {
    fn from(value: WebPubSubId) -> Self {
        value.id()
    }
}

/// Identifier of a custom certificate bound to a Web PubSub service.
///
/// This is the persisted identity of a certificate binding and is derived
/// purely from the parent service identifier and the binding name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomCertificateId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub web_pubsub_name: String,
    pub custom_certificate_name: String,
}

impl CustomCertificateId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        web_pubsub_name: impl Into<String>,
        custom_certificate_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            web_pubsub_name: web_pubsub_name.into(),
            custom_certificate_name: custom_certificate_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let values = parse_segments("Custom Certificate", input, CUSTOM_CERTIFICATE_LAYOUT)?;
        let [
            subscription_id,
            resource_group_name,
            web_pubsub_name,
            custom_certificate_name,
        ]: [String; 4] = values.try_into().map_err(|_| IdError::Empty {
            kind: "Custom Certificate",
        })?;
        Ok(Self {
            subscription_id,
            resource_group_name,
            web_pubsub_name,
            custom_certificate_name,
        })
    }

    /// Identifier of the owning Web PubSub service.
    pub fn web_pubsub_id(&self) -> WebPubSubId {
        WebPubSubId::new(
            &self.subscription_id,
            &self.resource_group_name,
            &self.web_pubsub_name,
        )
    }

    pub fn id(&self) -> String {
        format_segments(
            CUSTOM_CERTIFICATE_LAYOUT,
            &[
                &self.subscription_id,
                &self.resource_group_name,
                &self.web_pubsub_name,
                &self.custom_certificate_name,
            ],
        )
    }
}

impl fmt::Display for CustomCertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom Certificate (Subscription: {:?}", self.subscription_id)?;
        write!(f, " / Resource Group Name: {:?}", self.resource_group_name)?;
        write!(f, " / Web PubSub Name: {:?}", self.web_pubsub_name)?;
        write!(
            f,
            " / Custom Certificate Name: {:?})",
            self.custom_certificate_name
        )
    }
}

impl FromStr for CustomCertificateId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CustomCertificateId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CustomCertificateId> for String {
    fn from(value: CustomCertificateId) -> Self {
        value.id()
    }
}

/// Checks that `input` is a well-formed custom certificate identifier.
pub fn validate_custom_certificate_id(input: &str) -> Result<()> {
    CustomCertificateId::parse(input).map(|_| ())
}

/// Checks that `input` is a well-formed Web PubSub service identifier.
pub fn validate_web_pubsub_id(input: &str) -> Result<()> {
    WebPubSubId::parse(input).map(|_| ())
}
