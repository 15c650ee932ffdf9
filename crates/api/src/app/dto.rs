use serde::Deserialize;

use forno_auth::{StaffAccount, StaffRole};
use forno_deliveries::{CourierId, CourierStatus, DeliveryStatus};
use forno_inventory::{StockItemDraft, StockItemId};
use forno_orders::OrderStatus;

// -------------------------
// Request DTOs
//
// Creation bodies deserialize straight into the domain drafts; the DTOs here
// are the update shapes that do not exist as domain types.
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SetOrderStatusRequest {
    pub status: OrderStatus,
}

/// Upsert body for stock items: the admin screen re-submits the whole form,
/// optionally with the id of the record being edited.
#[derive(Debug, Deserialize)]
pub struct UpsertStockItemRequest {
    #[serde(default)]
    pub id: Option<StockItemId>,
    #[serde(flatten)]
    pub draft: StockItemDraft,
}

#[derive(Debug, Deserialize)]
pub struct SetStockQuantityRequest {
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLoyaltyPointsRequest {
    pub points: i64,
    #[serde(default)]
    pub purchase_total_cents: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDeliveryStatusRequest {
    pub status: DeliveryStatus,
    #[serde(default)]
    pub courier_id: Option<CourierId>,
}

#[derive(Debug, Deserialize)]
pub struct SetCourierStatusRequest {
    pub status: CourierStatus,
}

#[derive(Debug, Deserialize)]
pub struct SetStaffRoleRequest {
    pub role: StaffRole,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Staff account without its `api_key`.
///
/// The key is a credential: it is returned exactly once, from the creating
/// request, and never on list or update responses.
pub fn staff_to_json(account: &StaffAccount) -> serde_json::Value {
    serde_json::json!({
        "id": account.id.to_string(),
        "name": account.name,
        "email": account.email,
        "role": account.role.as_str(),
        "active": account.active,
        "createdAt": account.created_at,
        "updatedAt": account.updated_at,
    })
}
