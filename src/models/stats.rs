use serde::Serialize;

/// Admin dashboard counters.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct AdminStats {
    pub users: u64,
    pub classes: u64,
    pub purchases: u64,
    /// Sum of every recorded payment price
    pub revenue: f64,
}
