//! Request construction for every client operation, checked against a
//! recording transport.

mod common;

use common::MockTransport;
use notifications_client::{
    ClientError, EmailRequest, LetterRequest, Method, NotificationQuery, NotificationsClient,
    Personalisation, PrecompiledLetterRequest, ReceivedTextQuery, SmsRequest, TemplateType, Upload,
};
use serde_json::json;

fn sent() -> serde_json::Value {
    json!({"id": "740e5834-3a29-46b4-9a6f-16142fde533a", "reference": null, "content": {}})
}

#[test]
fn test_get_notification_by_id() {
    let transport = MockTransport::new().respond_json(json!({"id": "123", "status": "delivered"}));
    let client = NotificationsClient::with_transport(&transport);

    let notification = client.get_notification_by_id("123").unwrap();

    let request = transport.only_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path_and_query(), "/v2/notifications/123");
    assert_eq!(request.body, None);
    assert_eq!(notification.status.as_deref(), Some("delivered"));
}

#[test]
fn test_get_all_notifications_without_filters() {
    let transport = MockTransport::new().respond_json(json!({"notifications": [], "links": {}}));
    let client = NotificationsClient::with_transport(&transport);

    client.get_all_notifications(&NotificationQuery::new()).unwrap();

    assert_eq!(transport.only_request().path_and_query(), "/v2/notifications");
}

#[test]
fn test_get_all_notifications_with_every_filter() {
    let transport = MockTransport::new().respond_json(json!({"notifications": [], "links": {}}));
    let client = NotificationsClient::with_transport(&transport);

    let query = NotificationQuery::new()
        .status("status")
        .template_type(TemplateType::Sms)
        .reference("reference")
        .older_than("older_than")
        .include_jobs(true);
    client.get_all_notifications(&query).unwrap();

    assert_eq!(
        transport.only_request().path_and_query(),
        "/v2/notifications?status=status&template_type=sms&reference=reference&older_than=older_than&include_jobs=true"
    );
}

#[test]
fn test_get_all_notifications_single_filter() {
    let transport = MockTransport::new().respond_json(json!({"notifications": [], "links": {}}));
    let client = NotificationsClient::with_transport(&transport);

    client
        .get_all_notifications(&NotificationQuery::new().template_type(TemplateType::Letter))
        .unwrap();

    assert_eq!(
        transport.only_request().path_and_query(),
        "/v2/notifications?template_type=letter"
    );
}

#[test]
fn test_get_received_texts() {
    let transport =
        MockTransport::new().respond_json(json!({"received_text_messages": [], "links": {}}))
            .respond_json(json!({"received_text_messages": [], "links": {}}));
    let client = NotificationsClient::with_transport(&transport);

    client.get_received_texts(&ReceivedTextQuery::new()).unwrap();
    client
        .get_received_texts(&ReceivedTextQuery::new().older_than("abc"))
        .unwrap();

    let paths: Vec<String> = transport.requests().iter().map(|r| r.path_and_query()).collect();
    assert_eq!(
        paths,
        vec![
            "/v2/received-text-messages".to_string(),
            "/v2/received-text-messages?older_than=abc".to_string(),
        ]
    );
}

#[test]
fn test_send_sms_minimal() {
    let transport = MockTransport::new().respond_json(sent());
    let client = NotificationsClient::with_transport(&transport);

    let response = client
        .send_sms_notification(SmsRequest::new("456", "07700 900000"))
        .unwrap();

    let request = transport.only_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path(), "/v2/notifications/sms");
    assert_eq!(
        serde_json::to_string(&request.body.unwrap()).unwrap(),
        r#"{"template_id":"456","phone_number":"07700 900000"}"#
    );
    assert_eq!(response.id, "740e5834-3a29-46b4-9a6f-16142fde533a");
}

#[test]
fn test_send_sms_with_all_fields() {
    let transport = MockTransport::new().respond_json(sent());
    let client = NotificationsClient::with_transport(&transport);

    client
        .send_sms_notification(
            SmsRequest::new("456", "07700 900000")
                .personalisation(Personalisation::new().with("name", "chris"))
                .reference("ref")
                .sms_sender_id("789"),
        )
        .unwrap();

    assert_eq!(
        transport.only_request().body.unwrap(),
        json!({
            "template_id": "456",
            "phone_number": "07700 900000",
            "personalisation": {"name": "chris"},
            "reference": "ref",
            "sms_sender_id": "789",
        })
    );
}

#[test]
fn test_send_email_with_document() {
    let transport = MockTransport::new().respond_json(sent());
    let client = NotificationsClient::with_transport(&transport);

    let upload = Upload::from_reader(&b"file-contents"[..])
        .unwrap()
        .filename("report.csv")
        .retention_period("1 weeks");
    client
        .send_email_notification(
            EmailRequest::new("456", "to@example.com")
                .personalisation(Personalisation::new().with("doc", upload))
                .email_reply_to_id("789")
                .one_click_unsubscribe_url("https://example.com/unsubscribe"),
        )
        .unwrap();

    let request = transport.only_request();
    assert_eq!(request.path(), "/v2/notifications/email");
    assert_eq!(
        request.body.unwrap(),
        json!({
            "template_id": "456",
            "email_address": "to@example.com",
            "personalisation": {
                "doc": {
                    "file": "ZmlsZS1jb250ZW50cw==",
                    "filename": "report.csv",
                    "confirm_email_before_download": null,
                    "retention_period": "1 weeks",
                }
            },
            "email_reply_to_id": "789",
            "one_click_unsubscribe_url": "https://example.com/unsubscribe",
        })
    );
}

#[test]
fn test_send_letter() {
    let transport = MockTransport::new().respond_json(sent());
    let client = NotificationsClient::with_transport(&transport);

    let personalisation = Personalisation::new()
        .with("address_line_1", "The Occupier")
        .with("address_line_2", "123 High Street")
        .with("postcode", "SW14 6BH");
    client
        .send_letter_notification(LetterRequest::new("456", personalisation).reference("Baz"))
        .unwrap();

    let request = transport.only_request();
    assert_eq!(request.path(), "/v2/notifications/letter");
    assert_eq!(
        serde_json::to_string(&request.body.unwrap()).unwrap(),
        r#"{"template_id":"456","personalisation":{"address_line_1":"The Occupier","address_line_2":"123 High Street","postcode":"SW14 6BH"},"reference":"Baz"}"#
    );
}

#[test]
fn test_send_precompiled_letter() {
    let transport = MockTransport::new().respond_json(json!({
        "id": "abc",
        "reference": "Baz",
        "postage": "first",
    }));
    let client = NotificationsClient::with_transport(&transport);

    let request = PrecompiledLetterRequest::from_reader("Baz", &b"file_contents"[..])
        .unwrap()
        .postage("first");
    let response = client.send_precompiled_letter_notification(request).unwrap();

    let request = transport.only_request();
    assert_eq!(request.path(), "/v2/notifications/letter");
    assert_eq!(
        request.body.unwrap(),
        json!({"reference": "Baz", "content": "ZmlsZV9jb250ZW50cw==", "postage": "first"})
    );
    assert_eq!(response.postage.as_deref(), Some("first"));
}

#[test]
fn test_template_endpoints() {
    let template = json!({"id": "t1", "type": "email", "version": 2, "body": "Hello"});
    let transport = MockTransport::new()
        .respond_json(template.clone())
        .respond_json(template)
        .respond_json(json!({"templates": []}))
        .respond_json(json!({"templates": []}));
    let client = NotificationsClient::with_transport(&transport);

    client.get_template("t1").unwrap();
    let versioned = client.get_template_version("t1", 2).unwrap();
    client.get_all_templates(None).unwrap();
    client.get_all_templates(Some(TemplateType::Sms)).unwrap();

    let paths: Vec<String> = transport.requests().iter().map(|r| r.path_and_query()).collect();
    assert_eq!(
        paths,
        vec![
            "/v2/template/t1",
            "/v2/template/t1/version/2",
            "/v2/templates",
            "/v2/templates?type=sms",
        ]
    );
    assert_eq!(versioned.version, Some(2));
}

#[test]
fn test_post_template_preview() {
    let transport = MockTransport::new().respond_json(json!({
        "id": "t1",
        "type": "sms",
        "version": 3,
        "body": "Hello chris",
    }));
    let client = NotificationsClient::with_transport(&transport);

    let preview = client
        .post_template_preview("t1", Personalisation::new().with("name", "chris"))
        .unwrap();

    let request = transport.only_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path(), "/v2/template/t1/preview");
    assert_eq!(request.body.unwrap(), json!({"personalisation": {"name": "chris"}}));
    assert_eq!(preview.body.as_deref(), Some("Hello chris"));
}

#[test]
fn test_get_pdf_for_letter_returns_raw_bytes() {
    let transport = MockTransport::new().respond_bytes(b"%PDF-1.5 test");
    let client = NotificationsClient::with_transport(&transport);

    let pdf = client.get_pdf_for_letter("abc").unwrap();

    assert_eq!(transport.only_request().path(), "/v2/notifications/abc/pdf");
    assert_eq!(pdf, b"%PDF-1.5 test");
}

#[test]
fn test_http_status_is_surfaced() {
    let transport = MockTransport::new().respond_status(400, r#"{"errors":[{"error":"BadRequestError"}]}"#);
    let client = NotificationsClient::with_transport(&transport);

    let err = client.get_notification_by_id("missing").unwrap_err();

    match err {
        ClientError::HttpStatus { status_code, body } => {
            assert_eq!(status_code, 400);
            assert!(body.contains("BadRequestError"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_large_precompiled_letter_is_sent() {
    let transport = MockTransport::new().respond_json(sent());
    let client = NotificationsClient::with_transport(&transport);
    let pdf = vec![0x25u8; 3 * 1024 * 1024];

    let request = PrecompiledLetterRequest::from_reader("Baz", pdf.as_slice()).unwrap();
    client.send_precompiled_letter_notification(request).unwrap();

    let request = transport.only_request();
    assert_eq!(request.path(), "/v2/notifications/letter");
    let content = request.body.as_ref().unwrap()["content"].as_str().unwrap();
    assert_eq!(content.len(), 4 * 1024 * 1024);
}

#[test]
fn test_oversized_upload_never_reaches_transport() {
    let transport = MockTransport::new();
    let big = vec![0u8; 2 * 1024 * 1024 + 1];

    let err = Upload::from_reader(big.as_slice()).unwrap_err();

    assert!(matches!(err, ClientError::DocumentTooLarge { size, .. } if size == big.len()));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_ids_stay_inside_one_path_segment() {
    let transport = MockTransport::new()
        .respond_json(json!({"id": "abc?x=1", "status": "delivered"}))
        .respond_json(json!({"id": "t1", "version": 1}))
        .respond_bytes(b"%PDF");
    let client = NotificationsClient::with_transport(&transport);

    client.get_notification_by_id("abc?x=1").unwrap();
    client.get_template("../notifications/123").unwrap();
    client.get_pdf_for_letter("a/b#c").unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].path_and_query(), "/v2/notifications/abc%3Fx=1");
    assert_eq!(requests[0].query, None);
    assert_eq!(requests[1].path(), "/v2/template/..%2Fnotifications%2F123");
    assert_eq!(requests[2].path(), "/v2/notifications/a%2Fb%23c/pdf");
}

#[test]
fn test_dot_and_empty_ids_are_rejected() {
    let transport = MockTransport::new();
    let client = NotificationsClient::with_transport(&transport);

    for id in ["", ".", ".."] {
        let err = client.get_notification_by_id(id).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument { .. }), "id {id:?}: {err:?}");
    }
    let err = client.get_template_version("..", 2).unwrap_err();
    assert!(matches!(err, ClientError::InvalidArgument { ref argument, .. } if argument == "template_id"));

    assert_eq!(transport.request_count(), 0);
}
