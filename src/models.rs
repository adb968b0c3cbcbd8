//! Response models returned by the client.
//!
//! Only identifiers are relied on; every other field is optional and unknown
//! fields are kept in `extra`, so new server fields never break parsing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pagination::{older_than_from_link, Page, Paged};

/// Pagination links attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Template reference embedded in notifications and send responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRef {
    pub id: String,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// A notification and its delivery status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(rename = "type", default)]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub template: Option<TemplateRef>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub postage: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of `GET /v2/notifications`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationList {
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub links: Links,
}

impl Paged for NotificationList {
    type Item = Notification;

    fn into_page(self) -> Page<Notification> {
        Page {
            next_cursor: self.links.next.as_deref().and_then(older_than_from_link),
            items: self.notifications,
        }
    }
}

/// An inbound text message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedText {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_number: Option<String>,
    #[serde(default)]
    pub notify_number: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of `GET /v2/received-text-messages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceivedTextList {
    #[serde(default)]
    pub received_text_messages: Vec<ReceivedText>,
    #[serde(default)]
    pub links: Links,
}

impl Paged for ReceivedTextList {
    type Item = ReceivedText;

    fn into_page(self) -> Page<ReceivedText> {
        Page {
            next_cursor: self.links.next.as_deref().and_then(older_than_from_link),
            items: self.received_text_messages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub template_type: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub letter_contact_block: Option<String>,
    #[serde(default)]
    pub postage: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateList {
    #[serde(default)]
    pub templates: Vec<Template>,
}

/// A template rendered with personalisation, without sending anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePreview {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub template_type: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub postage: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Acknowledgement returned by the send endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub template: Option<TemplateRef>,
    #[serde(default)]
    pub scheduled_for: Option<String>,
    #[serde(default)]
    pub postage: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_keeps_unknown_fields() {
        let notification: Notification = serde_json::from_value(json!({
            "id": "740e5834-3a29-46b4-9a6f-16142fde533a",
            "type": "letter",
            "status": "delivered",
            "line_1": "Foo",
            "template": {"id": "t-1", "version": 3, "uri": "https://example/t-1"},
        }))
        .unwrap();

        assert_eq!(notification.notification_type.as_deref(), Some("letter"));
        assert_eq!(notification.template.unwrap().version, Some(3));
        assert_eq!(notification.extra["line_1"], "Foo");
    }

    #[test]
    fn test_list_without_items_is_an_empty_page() {
        let list: NotificationList = serde_json::from_value(json!({"status": "success"})).unwrap();
        let page = list.into_page();
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_list_extracts_cursor_from_next_link() {
        let list: ReceivedTextList = serde_json::from_value(json!({
            "received_text_messages": [{"id": "a", "content": "hi"}],
            "links": {
                "current": "https://api.example/v2/received-text-messages",
                "next": "https://api.example/v2/received-text-messages?older_than=a"
            }
        }))
        .unwrap();

        let page = list.into_page();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_cursor.as_deref(), Some("a"));
    }

    #[test]
    fn test_template_list() {
        let list: TemplateList = serde_json::from_value(json!({
            "templates": [{"id": "1", "type": "email", "version": 2, "name": "welcome"}]
        }))
        .unwrap();
        assert_eq!(list.templates[0].template_type.as_deref(), Some("email"));
        assert_eq!(list.templates[0].name.as_deref(), Some("welcome"));
    }
}
