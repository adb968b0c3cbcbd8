//! The notifications API client.
//!
//! Every method builds its request from its own arguments, performs exactly
//! one call on the transport and returns the parsed response. The iterator
//! methods perform one call per page, only when the caller pulls past the
//! end of the current page.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::errors::{ClientError, ClientResult};
use crate::models::{
    Notification, NotificationList, ReceivedText, ReceivedTextList, SendResponse, Template,
    TemplateList, TemplatePreview,
};
use crate::pagination::{Page, Paged, Paginator};
use crate::payload::{
    to_json_body, EmailRequest, LetterRequest, NotificationRequest, Personalisation,
    PrecompiledLetterRequest, SmsRequest, TemplatePreviewRequest,
};
use crate::query::{
    CursorQuery, ListQuery, NotificationQuery, ReceivedTextQuery, TemplateQuery, TemplateType,
};
use crate::transport::{ApiRequest, HttpTransport, Transport};

const NOTIFICATIONS_PATH: &[&str] = &["v2", "notifications"];
const RECEIVED_TEXTS_PATH: &[&str] = &["v2", "received-text-messages"];
const TEMPLATES_PATH: &[&str] = &["v2", "templates"];

/// An ID that can be placed in a single path segment.
///
/// Everything except the empty string and the dot segments is escaped when
/// the URL is built; those three would change which resource is addressed.
fn path_id<'a>(argument: &str, id: &'a str) -> ClientResult<&'a str> {
    match id {
        "" => Err(ClientError::invalid_argument(argument, "must not be empty")),
        "." | ".." => Err(ClientError::invalid_argument(
            argument,
            format!("'{id}' is not a valid identifier"),
        )),
        _ => Ok(id),
    }
}

/// Client for the notifications API.
///
/// ```rust,no_run
/// use notifications_client::{ApiConfig, NotificationsClient, SmsRequest};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ApiConfig {
///         api_key: Some("my-key".to_string()),
///         ..ApiConfig::default()
///     };
///     let client = NotificationsClient::from_config(&config)?;
///     let sent = client.send_sms_notification(SmsRequest::new("template-id", "07700 900000"))?;
///     println!("sent {}", sent.id);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct NotificationsClient<T: Transport = HttpTransport> {
    transport: T,
}

impl NotificationsClient<HttpTransport> {
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        Ok(Self::with_transport(HttpTransport::from_config(config)?))
    }
}

impl<T: Transport> NotificationsClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request_json<R: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<R> {
        self.transport.execute(&request)?.json()
    }

    pub fn get_notification_by_id(&self, id: &str) -> ClientResult<Notification> {
        let id = path_id("id", id)?;
        self.request_json(ApiRequest::get(["v2", "notifications", id]))
    }

    /// One page of notifications matching `query`.
    pub fn get_all_notifications(&self, query: &NotificationQuery) -> ClientResult<NotificationList> {
        self.request_json(
            ApiRequest::get(NOTIFICATIONS_PATH.iter().copied()).with_query(query.query_string()),
        )
    }

    /// Every notification matching `query`, newest first, fetched page by page.
    ///
    /// `query.older_than`, when set, is where the walk starts.
    pub fn get_all_notifications_iterator(
        &self,
        query: NotificationQuery,
    ) -> impl Iterator<Item = ClientResult<Notification>> + '_ {
        let start = query.older_than.clone();
        self.paginate::<_, NotificationList>(NOTIFICATIONS_PATH, query)
            .starting_from(start)
    }

    /// One page of inbound text messages.
    pub fn get_received_texts(&self, query: &ReceivedTextQuery) -> ClientResult<ReceivedTextList> {
        self.request_json(
            ApiRequest::get(RECEIVED_TEXTS_PATH.iter().copied()).with_query(query.query_string()),
        )
    }

    /// Every inbound text message, newest first, fetched page by page.
    pub fn get_received_texts_iterator(
        &self,
    ) -> impl Iterator<Item = ClientResult<ReceivedText>> + '_ {
        self.paginate::<_, ReceivedTextList>(RECEIVED_TEXTS_PATH, ReceivedTextQuery::new())
    }

    fn paginate<'a, Q, L>(
        &'a self,
        path: &'static [&'static str],
        query: Q,
    ) -> Paginator<L::Item, impl FnMut(Option<String>) -> ClientResult<Page<L::Item>> + 'a>
    where
        Q: CursorQuery + 'a,
        L: Paged + DeserializeOwned,
    {
        Paginator::new(move |cursor: Option<String>| {
            debug!(path = %path.join("/"), older_than = cursor.as_deref().unwrap_or("-"), "fetching page");
            let query = query.with_older_than(cursor);
            let request = ApiRequest::get(path.iter().copied()).with_query(query.query_string());
            let list: L = self.request_json(request)?;
            Ok(list.into_page())
        })
    }

    /// Send any notification type.
    pub fn send(&self, request: &NotificationRequest) -> ClientResult<SendResponse> {
        self.request_json(ApiRequest::post(request.segments(), request.body()?))
    }

    pub fn send_sms_notification(&self, request: SmsRequest) -> ClientResult<SendResponse> {
        self.send(&request.into())
    }

    pub fn send_email_notification(&self, request: EmailRequest) -> ClientResult<SendResponse> {
        self.send(&request.into())
    }

    pub fn send_letter_notification(&self, request: LetterRequest) -> ClientResult<SendResponse> {
        self.send(&request.into())
    }

    pub fn send_precompiled_letter_notification(
        &self,
        request: PrecompiledLetterRequest,
    ) -> ClientResult<SendResponse> {
        self.send(&request.into())
    }

    /// Latest version of a template.
    pub fn get_template(&self, template_id: &str) -> ClientResult<Template> {
        let template_id = path_id("template_id", template_id)?;
        self.request_json(ApiRequest::get(["v2", "template", template_id]))
    }

    pub fn get_template_version(&self, template_id: &str, version: u32) -> ClientResult<Template> {
        let template_id = path_id("template_id", template_id)?;
        let version = version.to_string();
        self.request_json(ApiRequest::get([
            "v2",
            "template",
            template_id,
            "version",
            version.as_str(),
        ]))
    }

    /// Render a template with `personalisation` without sending anything.
    pub fn post_template_preview(
        &self,
        template_id: &str,
        personalisation: Personalisation,
    ) -> ClientResult<TemplatePreview> {
        let template_id = path_id("template_id", template_id)?;
        let body = to_json_body(&TemplatePreviewRequest::new(personalisation))?;
        self.request_json(ApiRequest::post(
            ["v2", "template", template_id, "preview"],
            body,
        ))
    }

    pub fn get_all_templates(&self, template_type: Option<TemplateType>) -> ClientResult<TemplateList> {
        let query = TemplateQuery { template_type };
        self.request_json(
            ApiRequest::get(TEMPLATES_PATH.iter().copied()).with_query(query.query_string()),
        )
    }

    /// Raw PDF bytes of a letter.
    pub fn get_pdf_for_letter(&self, notification_id: &str) -> ClientResult<Vec<u8>> {
        let notification_id = path_id("notification_id", notification_id)?;
        let request = ApiRequest::get(["v2", "notifications", notification_id, "pdf"]);
        Ok(self.transport.execute(&request)?.into_bytes())
    }
}
