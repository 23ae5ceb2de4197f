//! Discord webhook notification sink.

use serde::Serialize;
use tracing::info;

use crate::advisory::Advisory;
use crate::duration::format_travel_time;
use crate::error::SinkError;
use crate::traits::NotificationSink;

pub const COLOR_RED: u32 = 16711680;
pub const COLOR_GREEN: u32 = 65280;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%B %d, %Y %I:%M %p";

/// Presentation settings for the rendered message.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub embed_title: String,
    /// chrono strftime pattern for the date line.
    pub timestamp_format: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            embed_title: "Home to Office Route".to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub image: EmbedImage,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

pub fn render_payload(
    advisory: &Advisory,
    map_url: &str,
    template: &MessageTemplate,
) -> WebhookPayload {
    let heavy = advisory.traffic.is_heavy;
    let header_icon = if heavy { "🔴" } else { "🟢" };
    let times = &advisory.formatted_times;

    let mut lines = vec![
        format!(">>> ## {header_icon} Traffic Situation Advisory"),
        format!(
            "**Date:** *{}*",
            advisory.timestamp.format(&template.timestamp_format)
        ),
        "**Route:** Home (H) ➡️ Office (O)".to_string(),
        String::new(),
        "**Estimated Travel Times:**".to_string(),
        format!("- 🏍️ **Motorcycle:** `{}`", times.moto),
        format!("- 🚗 **Car:** `{}`", times.drive),
        format!("- 🚌 **Commute:** `{}`", times.transit),
    ];

    if heavy {
        lines.push(String::new());
        lines.push("⚠️ **HEAVY TRAFFIC DETECTED**".to_string());
        lines.push(format!(
            "Current traffic conditions are adding around {} minutes of delay compared to free-flow traffic.",
            advisory.traffic.delay_minutes
        ));
    }

    if let Some(detour) = &advisory.detour {
        lines.push(String::new());
        lines.push("**ALTERNATIVE ROUTE FOUND!**".to_string());
        lines.push(format!(
            "Please be advised to take an alternate route that saves **{} minutes**.",
            detour.minutes_saved
        ));
        lines.push(format!(
            "(Travel time: {})",
            format_travel_time(detour.alternate_minutes)
        ));
    }

    let mut content = lines.join("\n");
    content.push('\n');

    WebhookPayload {
        content,
        embeds: vec![Embed {
            title: template.embed_title.clone(),
            image: EmbedImage {
                url: map_url.to_string(),
            },
            color: if heavy { COLOR_RED } else { COLOR_GREEN },
        }],
    }
}

#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    url: String,
    template: MessageTemplate,
    client: reqwest::blocking::Client,
}

impl DiscordWebhook {
    pub fn new(
        url: impl Into<String>,
        template: MessageTemplate,
        timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            url: url.into(),
            template,
            client,
        })
    }
}

impl NotificationSink for DiscordWebhook {
    fn deliver(&self, advisory: &Advisory, map_url: &str) -> Result<(), SinkError> {
        let payload = render_payload(advisory, map_url, &self.template);
        let response = self.client.post(&self.url).json(&payload).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(status = status.as_u16(), "traffic update sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{DetourRecommendation, FormattedTimes, TrafficAssessment};
    use crate::polyline::EncodedPolyline;
    use crate::route::RouteCandidate;
    use chrono::{Local, TimeZone};

    fn advisory(delay: i64, detour: Option<DetourRecommendation>) -> Advisory {
        Advisory {
            timestamp: Local.with_ymd_and_hms(2026, 3, 9, 7, 5, 0).unwrap(),
            drive_minutes: 50,
            traffic: TrafficAssessment::from_durations(50, 50 - delay),
            detour,
            formatted_times: FormattedTimes {
                drive: "50 mins".to_string(),
                moto: "30 mins".to_string(),
                transit: "N/A".to_string(),
            },
            map_polyline: EncodedPolyline::new("abc"),
        }
    }

    #[test]
    fn test_light_traffic_message() {
        let template = MessageTemplate::default();
        let payload = render_payload(&advisory(3, None), "https://map", &template);
        assert!(payload.content.starts_with(">>> ## 🟢 Traffic Situation Advisory\n"));
        assert!(payload.content.contains("**Date:** *March 09, 2026 07:05 AM*"));
        assert!(payload.content.contains("- 🏍️ **Motorcycle:** `30 mins`"));
        assert!(payload.content.contains("- 🚗 **Car:** `50 mins`"));
        assert!(payload.content.contains("- 🚌 **Commute:** `N/A`"));
        assert!(!payload.content.contains("HEAVY TRAFFIC"));
        assert!(!payload.content.contains("ALTERNATIVE ROUTE"));
        assert_eq!(payload.embeds[0].color, COLOR_GREEN);
        assert_eq!(payload.embeds[0].image.url, "https://map");
        assert_eq!(payload.embeds[0].title, "Home to Office Route");
    }

    #[test]
    fn test_heavy_traffic_message() {
        let template = MessageTemplate::default();
        let payload = render_payload(&advisory(15, None), "https://map", &template);
        assert!(payload.content.contains("🔴"));
        assert!(payload.content.contains("⚠️ **HEAVY TRAFFIC DETECTED**"));
        assert!(payload.content.contains("adding around 15 minutes of delay"));
        assert_eq!(payload.embeds[0].color, COLOR_RED);
    }

    #[test]
    fn test_detour_message() {
        let detour = DetourRecommendation {
            minutes_saved: 12,
            alternate_minutes: 38,
            route_index: 1,
            alternate: RouteCandidate::default(),
        };
        let payload = render_payload(&advisory(3, Some(detour)), "u", &MessageTemplate::default());
        assert!(payload.content.contains("**ALTERNATIVE ROUTE FOUND!**"));
        assert!(payload.content.contains("saves **12 minutes**"));
        assert!(payload.content.contains("(Travel time: 38 mins)"));
    }

    #[test]
    fn test_custom_template() {
        let template = MessageTemplate {
            embed_title: "Home to JEG Tower Route".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
        };
        let payload = render_payload(&advisory(0, None), "u", &template);
        assert!(payload.content.contains("**Date:** *2026-03-09 07:05*"));
        assert_eq!(payload.embeds[0].title, "Home to JEG Tower Route");
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = render_payload(&advisory(0, None), "u", &MessageTemplate::default());
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["content"].is_string());
        assert_eq!(value["embeds"][0]["image"]["url"], "u");
        assert_eq!(value["embeds"][0]["color"], 65280);
    }
}
