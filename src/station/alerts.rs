//! Projects GTFS-RT service alerts into display alerts.

use crate::gtfs_rt;
use crate::station::types::Alert;

/// One display alert per input alert, in the same order.
pub fn project_alerts(alerts: &[&gtfs_rt::Alert]) -> Vec<Alert> {
    alerts.iter().map(|alert| project_alert(alert)).collect()
}

/// Effect as its canonical name (`NO_SERVICE`, ...) and the first non-empty
/// header translation, or `""` when there is none.
pub fn project_alert(alert: &gtfs_rt::Alert) -> Alert {
    let header = alert
        .header_text
        .as_ref()
        .and_then(|header| header.translation.iter().find(|t| !t.text.is_empty()))
        .map(|t| t.text.clone())
        .unwrap_or_default();

    Alert {
        effect: alert.effect().as_str_name().to_string(),
        header,
    }
}
