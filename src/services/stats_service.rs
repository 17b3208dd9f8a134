use crate::models::AdminStats;
use crate::store::Stores;
use crate::utils::ApiError;

/// Dashboard totals. No time window and no currency conversion.
pub async fn admin_stats(stores: &Stores) -> Result<AdminStats, ApiError> {
    let (users, classes, purchases, revenue) = futures::try_join!(
        stores.users.count(),
        stores.classes.count(),
        stores.payments.count(),
        stores.payments.total_revenue(),
    )?;

    Ok(AdminStats {
        users,
        classes,
        purchases,
        revenue,
    })
}
