//! Channel descriptors fetched from the channel-list endpoint.

use serde::{Deserialize, Serialize};

/// One entry in the polled channel list.
///
/// Descriptors are immutable once fetched; every successful poll replaces the
/// previous set wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    /// Provider site code (`"ttv"`, `"ust"`, ...).
    pub site: String,
    /// Provider-side channel identifier.
    pub channel: String,
    /// Human-readable display name.
    pub name: String,
    /// Icon image reference.
    #[serde(default)]
    pub icon: String,
}

/// Parse the endpoint's JSON body into descriptors, preserving order.
pub fn parse_channel_list(body: &str) -> anyhow::Result<Vec<ChannelDescriptor>> {
    let channels: Vec<ChannelDescriptor> = serde_json::from_str(body)?;
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_list_in_order() {
        let body = r#"[
            {"site": "ttv", "channel": "alpha", "name": "Alpha", "icon": "a.png"},
            {"site": "ust", "channel": "beta", "name": "Beta"}
        ]"#;
        let channels = parse_channel_list(body).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].channel, "alpha");
        assert_eq!(channels[1].site, "ust");
        // icon is optional in the feed
        assert_eq!(channels[1].icon, "");
    }

    #[test]
    fn rejects_non_list_bodies() {
        assert!(parse_channel_list(r#"{"oops": 1}"#).is_err());
    }
}
