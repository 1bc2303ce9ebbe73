//! Entity-to-view assembly. Mapping functions are pure and never touch link
//! construction; link builders are separate so each half is testable on its
//! own. Handlers combine the two through the `assemble_*` functions.

use serde::Serialize;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::models::{Customer, Notification, NotificationKind, Provider};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: &'static str,
    pub href: String,
}

/// Client-facing notification shape. The summary view omits the message
/// body; the details view carries it.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum NotificationView {
    Summary {
        id: String,
        user_id: String,
        #[serde(rename = "type")]
        kind: NotificationKind,
        timestamp: i64,
        is_read: bool,
        links: Vec<Link>,
    },
    Details {
        id: String,
        user_id: String,
        #[serde(rename = "type")]
        kind: NotificationKind,
        message: String,
        timestamp: i64,
        is_read: bool,
        links: Vec<Link>,
    },
}

fn epoch_seconds(rfc3339: &str) -> ApiResult<i64> {
    time::OffsetDateTime::parse(rfc3339, &time::format_description::well_known::Rfc3339)
        .map(|t| t.unix_timestamp())
        .map_err(|e| ApiError::Internal(format!("Stored timestamp is not RFC 3339: {}", e)))
}

// --- Pure mapping ---

pub fn notification_summary(notification: &Notification) -> ApiResult<NotificationView> {
    Ok(NotificationView::Summary {
        id: notification.id.clone(),
        user_id: notification.user_id.clone(),
        kind: notification.kind,
        timestamp: epoch_seconds(&notification.created_at)?,
        is_read: notification.is_read,
        links: Vec::new(),
    })
}

pub fn notification_details(notification: &Notification) -> ApiResult<NotificationView> {
    Ok(NotificationView::Details {
        id: notification.id.clone(),
        user_id: notification.user_id.clone(),
        kind: notification.kind,
        message: notification.message.clone(),
        timestamp: epoch_seconds(&notification.created_at)?,
        is_read: notification.is_read,
        links: Vec::new(),
    })
}

// --- Link builders ---

pub fn notification_links(notification: &Notification) -> Vec<Link> {
    vec![
        Link {
            rel: "self",
            href: format!("/api/notifications/{}", notification.id),
        },
        Link {
            rel: "user",
            href: format!("/api/users/{}", notification.user_id),
        },
        Link {
            rel: "collection",
            href: format!("/api/notifications?user_id={}", notification.user_id),
        },
    ]
}

pub fn provider_links(provider: &Provider) -> Vec<Link> {
    vec![
        Link {
            rel: "self",
            href: format!("/api/providers/{}", provider.id),
        },
        Link {
            rel: "collection",
            href: "/api/providers".to_string(),
        },
    ]
}

pub fn customer_links(customer: &Customer) -> Vec<Link> {
    vec![
        Link {
            rel: "self",
            href: format!("/api/customers/{}", customer.id),
        },
        Link {
            rel: "collection",
            href: "/api/customers".to_string(),
        },
    ]
}

// --- Assembly: mapping plus links ---

fn with_links(view: NotificationView, new_links: Vec<Link>) -> NotificationView {
    match view {
        NotificationView::Summary {
            id,
            user_id,
            kind,
            timestamp,
            is_read,
            ..
        } => NotificationView::Summary {
            id,
            user_id,
            kind,
            timestamp,
            is_read,
            links: new_links,
        },
        NotificationView::Details {
            id,
            user_id,
            kind,
            message,
            timestamp,
            is_read,
            ..
        } => NotificationView::Details {
            id,
            user_id,
            kind,
            message,
            timestamp,
            is_read,
            links: new_links,
        },
    }
}

pub fn assemble_notification_summary(notification: &Notification) -> ApiResult<NotificationView> {
    let view = notification_summary(notification)?;
    Ok(with_links(view, notification_links(notification)))
}

pub fn assemble_notification_details(notification: &Notification) -> ApiResult<NotificationView> {
    let view = notification_details(notification)?;
    Ok(with_links(view, notification_links(notification)))
}

#[derive(Debug, Serialize)]
pub struct ProviderView {
    #[serde(flatten)]
    pub provider: Provider,
    pub links: Vec<Link>,
}

pub fn assemble_provider(provider: Provider) -> ProviderView {
    let links = provider_links(&provider);
    ProviderView { provider, links }
}

#[derive(Debug, Serialize)]
pub struct CustomerView {
    #[serde(flatten)]
    pub customer: Customer,
    pub links: Vec<Link>,
}

pub fn assemble_customer(customer: Customer) -> CustomerView {
    let links = customer_links(&customer);
    CustomerView { customer, links }
}
