//! Notification service (确认通知)
//!
//! 预订确认/取消通知的出口。配置了 NOTIFY_WEBHOOK_URL 时向邮件中继
//! POST 一个 JSON 载荷，未配置时仅记录日志。发送在后台任务中完成，
//! 失败只记日志，从不阻塞请求路径。

use serde::Serialize;

use crate::db::models::Reservation;

/// Notification event kinds
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyEvent {
    ReservationConfirmed,
    ReservationCanceled,
}

#[derive(Debug, Clone, Serialize)]
struct ReservationPayload {
    event: NotifyEvent,
    reservation_id: String,
    customer_name: String,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    date: String,
    people: i32,
}

/// Confirmation email sink
#[derive(Clone, Debug)]
pub struct NotifyService {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl NotifyService {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Queue a reservation notification (fire-and-forget)
    pub fn notify_reservation(&self, event: NotifyEvent, reservation: &Reservation) {
        let payload = ReservationPayload {
            event,
            reservation_id: reservation
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            customer_name: reservation.customer_name.clone(),
            customer_email: reservation.customer_email.clone(),
            customer_phone: reservation.customer_phone.clone(),
            date: reservation.date.clone(),
            people: reservation.people,
        };

        let Some(url) = self.webhook_url.clone() else {
            tracing::info!(
                event = ?event,
                reservation = %payload.reservation_id,
                customer = %payload.customer_name,
                "Notification webhook not configured, logging only"
            );
            return;
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(reservation = %payload.reservation_id, "Notification delivered");
                }
                Ok(response) => {
                    tracing::warn!(
                        status = %response.status(),
                        reservation = %payload.reservation_id,
                        "Notification relay rejected the payload"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        reservation = %payload.reservation_id,
                        "Failed to deliver notification"
                    );
                }
            }
        });
    }
}
