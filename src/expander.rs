use anyhow::Result;

use crate::browser::{BrowserSession, TriggerOutcome};
use crate::config::BrowserSettings;
use crate::utils::SettleDelay;

#[derive(Debug, Clone, Copy)]
pub struct ExpandPolicy {
    pub settle: SettleDelay,
    /// Stop after this many clicks even if the control is still live
    pub max_clicks: Option<usize>,
}

impl ExpandPolicy {
    pub fn from_settings(settings: &BrowserSettings) -> Self {
        Self {
            settle: SettleDelay::from_millis(settings.settle_delay_ms),
            max_clicks: settings.max_clicks,
        }
    }

    /// No settle pause and no cap
    pub fn immediate() -> Self {
        Self {
            settle: SettleDelay::from_millis(0),
            max_clicks: None,
        }
    }
}

impl Default for ExpandPolicy {
    fn default() -> Self {
        Self::from_settings(&BrowserSettings::default())
    }
}

/// Click the load-more control with this class until the page replaces it.
///
/// The same handle is reused for every click; a stale handle means the section
/// is fully expanded. Returns the number of successful clicks, `0` when the
/// page has no such control.
pub async fn click_until_exhausted<S>(
    session: &mut S,
    class_name: &str,
    policy: &ExpandPolicy,
) -> Result<usize>
where
    S: BrowserSession,
{
    let handle = match session.find_by_class(class_name).await? {
        Some(handle) => handle,
        None => {
            log::debug!("No '{}' control on page", class_name);
            return Ok(0);
        }
    };

    let mut clicks = 0;
    loop {
        if let Some(max) = policy.max_clicks {
            if clicks >= max {
                log::warn!("'{}' still live after {} clicks, giving up", class_name, max);
                break;
            }
        }

        match session.trigger(&handle).await? {
            TriggerOutcome::Clicked => {
                clicks += 1;
                policy.settle.wait().await;
            }
            TriggerOutcome::Stale => break,
        }
    }

    log::debug!("'{}' expanded after {} clicks", class_name, clicks);
    Ok(clicks)
}

/// Expand every load-more class in order, returning the total click count
pub async fn expand_all<S>(session: &mut S, classes: &[String], policy: &ExpandPolicy) -> Result<usize>
where
    S: BrowserSession,
{
    let mut total = 0;
    for class_name in classes {
        total += click_until_exhausted(session, class_name, policy).await?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakeSession;

    #[tokio::test]
    async fn test_missing_control_is_noop() {
        let mut session = FakeSession::default();

        let clicks = click_until_exhausted(&mut session, "load_more_0", &ExpandPolicy::immediate())
            .await
            .unwrap();

        assert_eq!(clicks, 0);
        assert_eq!(session.clicks_for("load_more_0"), 0);
    }

    #[tokio::test]
    async fn test_clicks_until_stale() {
        for n in [0usize, 1, 4] {
            let mut session = FakeSession::default().with_control("load_more_2", n);

            let clicks =
                click_until_exhausted(&mut session, "load_more_2", &ExpandPolicy::immediate())
                    .await
                    .unwrap();

            assert_eq!(clicks, n);
            assert_eq!(session.clicks_for("load_more_2"), n);
        }
    }

    #[tokio::test]
    async fn test_max_clicks_caps_loop() {
        let mut session = FakeSession::default().with_control("load_more_3", 50);
        let policy = ExpandPolicy {
            max_clicks: Some(5),
            ..ExpandPolicy::immediate()
        };

        let clicks = click_until_exhausted(&mut session, "load_more_3", &policy)
            .await
            .unwrap();

        assert_eq!(clicks, 5);
    }

    #[tokio::test]
    async fn test_expand_all_sums_classes() {
        let mut session = FakeSession::default()
            .with_control("load_more_0", 3)
            .with_control("load_more_3", 2);
        let classes = vec![
            "load_more_0".to_string(),
            "load_more_2".to_string(),
            "load_more_3".to_string(),
        ];

        let total = expand_all(&mut session, &classes, &ExpandPolicy::immediate())
            .await
            .unwrap();

        assert_eq!(total, 5);
        assert_eq!(session.clicks_for("load_more_2"), 0);
    }

    #[tokio::test]
    async fn test_expand_all_follows_configured_order() {
        let mut session = FakeSession::default()
            .with_control("load_more_3", 1)
            .with_control("load_more_0", 2);
        let classes = vec![
            "load_more_0".to_string(),
            "load_more_2".to_string(),
            "load_more_3".to_string(),
        ];

        expand_all(&mut session, &classes, &ExpandPolicy::immediate())
            .await
            .unwrap();

        assert_eq!(
            session.triggered,
            vec!["load_more_0", "load_more_0", "load_more_3"]
        );
    }

    #[test]
    fn test_policy_from_settings() {
        let settings = BrowserSettings {
            settle_delay_ms: 300,
            max_clicks: Some(7),
            ..Default::default()
        };

        let policy = ExpandPolicy::from_settings(&settings);
        assert_eq!(policy.settle.duration(), std::time::Duration::from_millis(300));
        assert_eq!(policy.max_clicks, Some(7));
    }
}
