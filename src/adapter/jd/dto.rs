//! Wire types for the JD Cloud Trade API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{OrderPayload, OrderStatus};

/// OAuth client-credentials token request form.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

impl<'a> TokenRequest<'a> {
    pub fn client_credentials(client_id: &'a str, client_secret: &'a str) -> Self {
        Self {
            grant_type: "client_credentials",
            client_id,
            client_secret,
        }
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto<'a> {
    pub sku: &'a str,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Body for order create and update calls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest<'a> {
    pub merchant_order_id: &'a str,
    pub total_amount: Decimal,
    pub status: &'static str,
    pub items: Vec<ItemDto<'a>>,
}

impl<'a> OrderRequest<'a> {
    pub fn from_payload(payload: &OrderPayload<'a>) -> Self {
        Self {
            merchant_order_id: payload.order_id.as_str(),
            total_amount: payload.amount,
            status: match payload.status {
                OrderStatus::Pending => "PENDING",
                OrderStatus::Confirmed => "CONFIRMED",
                OrderStatus::Cancelled => "CANCELLED",
            },
            items: payload
                .items
                .iter()
                .map(|item| ItemDto {
                    sku: &item.sku,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
        }
    }
}

/// Successful order response; `orderId` is the platform's reference.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
}

/// Error envelope the platform returns on non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Human-readable message, falling back to the raw body.
    pub fn message_or(&self, raw: &str) -> String {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message.clone(),
            _ => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineItem, Order};
    use rust_decimal_macros::dec;

    #[test]
    fn order_request_uses_platform_field_names() {
        let order = Order::try_new(
            "1",
            "A1",
            dec!(100),
            vec![LineItem::new("SKU-1", 2, dec!(50))],
        )
        .unwrap();
        let payload = order.payload();
        let request = OrderRequest::from_payload(&payload);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["merchantOrderId"], "1");
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["items"][0]["unitPrice"], "50");
    }

    #[test]
    fn error_body_falls_back_to_raw_text() {
        let body = ErrorBody::default();
        assert_eq!(body.message_or("boom"), "boom");
    }
}
