//! Request bodies for the send and preview endpoints
//!
//! Each request type serializes to exactly the keys the caller supplied, in a
//! fixed order per type. Optional fields are [`Field`]s, which are skipped
//! entirely while unset; a field set to an empty string is still written.
//! Uploads nested inside [`Personalisation`] keep all of their keys, with
//! `null` for unset metadata.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::io::Read;

use crate::errors::{ClientError, ClientResult};
use crate::upload::{encode_document, Upload};

/// An optional request field that is either left out or sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Unset,
    Set(T),
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Field::Set(value) => Some(value),
            Field::Unset => None,
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Set(value),
            None => Field::Unset,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Set(value) => value.serialize(serializer),
            Field::Unset => serializer.serialize_none(),
        }
    }
}

/// A single personalisation value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PersonalisationValue {
    Value(Value),
    Upload(Upload),
}

impl From<&str> for PersonalisationValue {
    fn from(value: &str) -> Self {
        PersonalisationValue::Value(Value::String(value.to_string()))
    }
}

impl From<String> for PersonalisationValue {
    fn from(value: String) -> Self {
        PersonalisationValue::Value(Value::String(value))
    }
}

impl From<Value> for PersonalisationValue {
    fn from(value: Value) -> Self {
        PersonalisationValue::Value(value)
    }
}

impl From<Upload> for PersonalisationValue {
    fn from(upload: Upload) -> Self {
        PersonalisationValue::Upload(upload)
    }
}

/// Template placeholder values, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Personalisation {
    entries: Vec<(String, PersonalisationValue)>,
}

impl Personalisation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PersonalisationValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<PersonalisationValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PersonalisationValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersonalisationValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Personalisation
where
    K: Into<String>,
    V: Into<PersonalisationValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut personalisation = Personalisation::new();
        for (key, value) in iter {
            personalisation.insert(key, value);
        }
        personalisation
    }
}

impl Serialize for Personalisation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Body of `POST /v2/notifications/sms`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsRequest {
    template_id: String,
    phone_number: String,
    #[serde(skip_serializing_if = "Field::is_unset")]
    personalisation: Field<Personalisation>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    reference: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    sms_sender_id: Field<String>,
}

impl SmsRequest {
    pub fn new(template_id: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            phone_number: phone_number.into(),
            personalisation: Field::Unset,
            reference: Field::Unset,
            sms_sender_id: Field::Unset,
        }
    }

    pub fn personalisation(mut self, personalisation: Personalisation) -> Self {
        self.personalisation = Field::Set(personalisation);
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Field::Set(reference.into());
        self
    }

    pub fn sms_sender_id(mut self, sms_sender_id: impl Into<String>) -> Self {
        self.sms_sender_id = Field::Set(sms_sender_id.into());
        self
    }
}

/// Body of `POST /v2/notifications/email`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRequest {
    template_id: String,
    email_address: String,
    #[serde(skip_serializing_if = "Field::is_unset")]
    personalisation: Field<Personalisation>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    reference: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    email_reply_to_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    one_click_unsubscribe_url: Field<String>,
}

impl EmailRequest {
    pub fn new(template_id: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            email_address: email_address.into(),
            personalisation: Field::Unset,
            reference: Field::Unset,
            email_reply_to_id: Field::Unset,
            one_click_unsubscribe_url: Field::Unset,
        }
    }

    pub fn personalisation(mut self, personalisation: Personalisation) -> Self {
        self.personalisation = Field::Set(personalisation);
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Field::Set(reference.into());
        self
    }

    pub fn email_reply_to_id(mut self, email_reply_to_id: impl Into<String>) -> Self {
        self.email_reply_to_id = Field::Set(email_reply_to_id.into());
        self
    }

    pub fn one_click_unsubscribe_url(mut self, url: impl Into<String>) -> Self {
        self.one_click_unsubscribe_url = Field::Set(url.into());
        self
    }
}

/// Body of `POST /v2/notifications/letter` for a templated letter.
///
/// The address lines travel inside personalisation, so it is required here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterRequest {
    template_id: String,
    personalisation: Personalisation,
    #[serde(skip_serializing_if = "Field::is_unset")]
    reference: Field<String>,
}

impl LetterRequest {
    pub fn new(template_id: impl Into<String>, personalisation: Personalisation) -> Self {
        Self {
            template_id: template_id.into(),
            personalisation,
            reference: Field::Unset,
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Field::Set(reference.into());
        self
    }
}

/// Body of `POST /v2/notifications/letter` for a pre-rendered PDF.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecompiledLetterRequest {
    reference: String,
    content: String,
    #[serde(skip_serializing_if = "Field::is_unset")]
    postage: Field<String>,
}

impl PrecompiledLetterRequest {
    /// Read the whole PDF from `pdf` and encode it as the letter content.
    pub fn from_reader<R: Read>(reference: impl Into<String>, pdf: R) -> ClientResult<Self> {
        Ok(Self {
            reference: reference.into(),
            content: encode_document(pdf)?,
            postage: Field::Unset,
        })
    }

    /// `"first"`, `"second"`, `"economy"`, `"europe"` or `"rest-of-world"`.
    pub fn postage(mut self, postage: impl Into<String>) -> Self {
        self.postage = Field::Set(postage.into());
        self
    }
}

/// Body of `POST /v2/template/{id}/preview`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplatePreviewRequest {
    personalisation: Personalisation,
}

impl TemplatePreviewRequest {
    pub fn new(personalisation: Personalisation) -> Self {
        Self { personalisation }
    }
}

/// Any notification the API can send.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationRequest {
    Sms(SmsRequest),
    Email(EmailRequest),
    Letter(LetterRequest),
    PrecompiledLetter(PrecompiledLetterRequest),
}

impl NotificationRequest {
    /// Endpoint path segments for this notification type.
    pub fn segments(&self) -> [&'static str; 3] {
        let kind = match self {
            NotificationRequest::Sms(_) => "sms",
            NotificationRequest::Email(_) => "email",
            NotificationRequest::Letter(_) | NotificationRequest::PrecompiledLetter(_) => "letter",
        };
        ["v2", "notifications", kind]
    }

    /// Endpoint path, e.g. `/v2/notifications/sms`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }

    pub fn body(&self) -> ClientResult<Value> {
        match self {
            NotificationRequest::Sms(request) => to_json_body(request),
            NotificationRequest::Email(request) => to_json_body(request),
            NotificationRequest::Letter(request) => to_json_body(request),
            NotificationRequest::PrecompiledLetter(request) => to_json_body(request),
        }
    }
}

/// Serialize a request body, reporting failures as `JsonSerialization`.
pub(crate) fn to_json_body<T: Serialize + ?Sized>(value: &T) -> ClientResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| ClientError::json_serialization("Failed to build request body", e))
}

impl From<SmsRequest> for NotificationRequest {
    fn from(request: SmsRequest) -> Self {
        NotificationRequest::Sms(request)
    }
}

impl From<EmailRequest> for NotificationRequest {
    fn from(request: EmailRequest) -> Self {
        NotificationRequest::Email(request)
    }
}

impl From<LetterRequest> for NotificationRequest {
    fn from(request: LetterRequest) -> Self {
        NotificationRequest::Letter(request)
    }
}

impl From<PrecompiledLetterRequest> for NotificationRequest {
    fn from(request: PrecompiledLetterRequest) -> Self {
        NotificationRequest::PrecompiledLetter(request)
    }
}
