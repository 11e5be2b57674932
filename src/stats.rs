//! Visit counters read from the counter service.

use crate::config::{COUNTER_PLACEHOLDER, VISIT_COUNT_TODAY_URL, VISIT_COUNT_URL};
use crate::{net, NetworkError};
use log::warn;

/// Result of the two counter reads. Each side fails on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitCounts {
    pub total: Result<String, NetworkError>,
    pub today: Result<String, NetworkError>,
}

impl VisitCounts {
    pub fn total_label(&self) -> String {
        counter_label(&self.total)
    }

    pub fn today_label(&self) -> String {
        counter_label(&self.today)
    }
}

fn counter_label(result: &Result<String, NetworkError>) -> String {
    match result {
        Ok(text) => text.trim().to_string(),
        Err(_) => COUNTER_PLACEHOLDER.to_string(),
    }
}

/// Read total and today's visit counts concurrently.
pub async fn fetch_visit_counts() -> VisitCounts {
    let (total, today) = futures::join!(
        net::fetch_text(VISIT_COUNT_URL),
        net::fetch_text(VISIT_COUNT_TODAY_URL)
    );

    if let Err(e) = &total {
        warn!("Failed to read total visit count: {}", e);
    }
    if let Err(e) = &today {
        warn!("Failed to read today's visit count: {}", e);
    }

    VisitCounts { total, today }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_degrade_independently() {
        let counts = VisitCounts {
            total: Ok("1024\n".to_string()),
            today: Err(NetworkError::Status(500)),
        };
        assert_eq!(counts.total_label(), "1024");
        assert_eq!(counts.today_label(), COUNTER_PLACEHOLDER);

        let counts = VisitCounts {
            total: Err(NetworkError::Request("offline".to_string())),
            today: Ok("17".to_string()),
        };
        assert_eq!(counts.total_label(), COUNTER_PLACEHOLDER);
        assert_eq!(counts.today_label(), "17");
    }
}
